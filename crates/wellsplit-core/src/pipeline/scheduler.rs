use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use crate::consts::STAGING_DIR_PREFIX;
use crate::engine::{EngineRequest, TransformEngine};
use crate::error::{Result, WellSplitError};

use super::context::BatchContext;
use super::task::{plan_tasks, FrameTask, TaskReport, TaskState};
use super::types::{BatchStage, BatchSummary, CancelToken, NoOpReporter, ProgressReporter};

/// Runs every frame task of a batch on a bounded worker pool.
///
/// Tasks whose input frame is absent are reported as missing, tasks whose
/// tiles already exist are skipped unless overwrite is set, and the rest are
/// handed to the engine. Cancelling stops admission; running tasks finish and
/// the pool is drained before `run` returns.
pub struct ConversionScheduler<'a> {
    ctx: &'a BatchContext,
    engine: &'a dyn TransformEngine,
    cancel: CancelToken,
    reporter: Arc<dyn ProgressReporter>,
}

impl<'a> ConversionScheduler<'a> {
    pub fn new(ctx: &'a BatchContext, engine: &'a dyn TransformEngine) -> Self {
        Self {
            ctx,
            engine,
            cancel: CancelToken::new(),
            reporter: Arc::new(NoOpReporter),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn run(&self) -> Result<BatchSummary> {
        self.reporter.begin_stage(BatchStage::Planning, None);
        let tasks = plan_tasks(self.ctx)?;
        self.reporter.finish_stage();
        info!(tasks = tasks.len(), engine = self.engine.name(), "Planned batch");

        let (pending, mut reports) = self.triage(&tasks);
        info!(
            pending = pending.len(),
            settled = reports.len(),
            "Dispatching conversions"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.ctx.jobs)
            .thread_name(|i| format!("wellsplit-worker-{i}"))
            .build()
            .map_err(|e| WellSplitError::Pipeline(format!("worker pool: {e}")))?;

        self.reporter
            .begin_stage(BatchStage::Converting, Some(pending.len()));
        let done = AtomicUsize::new(0);
        let converted: Vec<TaskReport> = pool.install(|| {
            pending
                .par_iter()
                .map(|task| {
                    let report = self.admit(task);
                    self.reporter
                        .advance(done.fetch_add(1, Ordering::Relaxed) + 1);
                    report
                })
                .collect()
        });
        self.reporter.finish_stage();

        reports.extend(converted);
        let summary = BatchSummary { reports };
        info!(
            complete = summary.count(TaskState::Complete),
            skipped = summary.count(TaskState::Skipped),
            missing = summary.count(TaskState::Missing),
            failed = summary.count(TaskState::Failed),
            cancelled = summary.count(TaskState::Cancelled),
            "Batch finished"
        );
        Ok(summary)
    }

    /// Settle missing and already-converted tasks; return the rest.
    fn triage<'t>(&self, tasks: &'t [FrameTask]) -> (Vec<&'t FrameTask>, Vec<TaskReport>) {
        let execution = &self.ctx.config.execution;
        self.reporter
            .begin_stage(BatchStage::Triage, Some(tasks.len()));

        let mut pending = Vec::new();
        let mut settled = Vec::new();
        for (i, task) in tasks.iter().enumerate() {
            match task.triage(execution.overwrite) {
                TaskState::Missing => {
                    let missing = WellSplitError::MissingInputFrame(task.input_path.clone());
                    if !execution.quiet_missing {
                        warn!(well = %task.well, field = task.field, channel = task.channel, "{missing}");
                    }
                    let mut report = TaskReport::new(task, TaskState::Missing);
                    report.error = Some(missing.to_string());
                    settled.push(report);
                }
                TaskState::Skipped => {
                    debug!(well = %task.well, field = task.field, channel = task.channel, "Outputs present, skipping");
                    settled.push(TaskReport::new(task, TaskState::Skipped));
                }
                _ => pending.push(task),
            }
            self.reporter.advance(i + 1);
        }
        self.reporter.finish_stage();
        (pending, settled)
    }

    fn admit(&self, task: &FrameTask) -> TaskReport {
        if self.cancel.is_cancelled() {
            return TaskReport::new(task, TaskState::Cancelled);
        }
        debug!(
            well = %task.well,
            field = task.field,
            channel = task.channel,
            state = %TaskState::Dispatched,
            "Converting {}",
            task.input_path.display()
        );
        match self.convert(task) {
            Ok(()) => TaskReport::new(task, TaskState::Complete),
            Err(e) => {
                error!(well = %task.well, field = task.field, channel = task.channel, "{e}");
                TaskReport::failed(task, e)
            }
        }
    }

    /// Run the engine into a private staging directory and move the tiles
    /// into place only once all of them exist.
    fn convert(&self, task: &FrameTask) -> Result<()> {
        fs::create_dir_all(&task.output_dir)?;
        let staging = tempfile::Builder::new()
            .prefix(STAGING_DIR_PREFIX)
            .tempdir_in(&task.output_dir)?;

        let pattern = task.output_template.pattern_in(staging.path());
        let request = EngineRequest {
            input: &task.input_path,
            transform: task.transform,
            transform_ops: &self.ctx.profile.transform_ops,
            output_bit_depth: self.ctx.config.contrast.output_bit_depth,
            sequence_start: task.sequence_start,
            output_pattern: &pattern,
        };
        self.engine.convert(&request)?;

        let staged = task
            .output_template
            .paths_in(staging.path(), task.sequence_start, task.tile_count);
        if let Some(absent) = staged.iter().find(|p| !p.is_file()) {
            return Err(WellSplitError::ConversionEngineFailure {
                input: task.input_path.clone(),
                reason: format!(
                    "expected {} tiles, {} was not written",
                    task.tile_count,
                    absent.display()
                ),
            });
        }

        for (from, to) in staged.iter().zip(task.output_paths()) {
            fs::rename(from, &to)?;
        }
        Ok(())
    }
}
