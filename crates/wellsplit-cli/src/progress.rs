use indicatif::{ProgressBar, ProgressStyle};
use wellsplit_core::pipeline::{BatchStage, ProgressReporter};

/// Drives a terminal progress bar from scheduler events.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:20} [{bar:40}] {pos}/{len} ({eta})")?
                .progress_chars("=> "),
        );
        Ok(Self { bar })
    }

    pub fn finish(&self, message: &'static str) {
        self.bar.finish_with_message(message);
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: BatchStage, total_items: Option<usize>) {
        self.bar.set_message(stage.to_string());
        self.bar.set_length(total_items.unwrap_or(0) as u64);
        self.bar.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        self.bar.set_position(items_done as u64);
    }
}
