use console::Style;
use wellsplit_core::pipeline::{BatchContext, BatchSummary, TaskState};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red().bold(),
        }
    }
}

pub fn print_batch_summary(ctx: &BatchContext) {
    let s = Styles::new();
    let config = &ctx.config;

    println!();
    println!("  {}", s.title.apply_to("WellSplit Batch"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Genotypes"),
        s.path.apply_to(config.genotype_table.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Acquisition"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Plate"),
        s.value.apply_to(ctx.layout)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Microscope"),
        s.method.apply_to(&config.microscope)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Fields"),
        s.value.apply_to(ctx.fields_per_well())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Tiles"),
        s.value.apply_to(format!("{} per frame", ctx.profile.tiles_per_frame))
    );
    println!();

    println!("  {}", s.header.apply_to("Contrast"));
    for channel in 1..=ctx.channels() {
        println!(
            "    {:<12}{}",
            s.label.apply_to(format!("Channel {channel}")),
            s.method.apply_to(ctx.transform_for(channel))
        );
    }
    println!();

    println!(
        "  {:<14}{}",
        s.header.apply_to("Execution"),
        s.value.apply_to(format!("{} jobs", ctx.jobs))
    );
    if config.execution.overwrite {
        println!("  {:<14}{}", "", s.disabled.apply_to("overwriting existing tiles"));
    }
    println!();
}

pub fn print_batch_result(summary: &BatchSummary) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Result"));
    for state in [
        TaskState::Complete,
        TaskState::Skipped,
        TaskState::Missing,
        TaskState::Failed,
        TaskState::Cancelled,
    ] {
        let count = summary.count(state);
        let style = match state {
            TaskState::Failed if count > 0 => &s.error,
            TaskState::Missing | TaskState::Cancelled if count > 0 => &s.disabled,
            _ => &s.value,
        };
        println!(
            "    {:<12}{}",
            s.label.apply_to(state.to_string()),
            style.apply_to(count)
        );
    }

    let failures: Vec<_> = summary.failures().collect();
    if !failures.is_empty() {
        println!();
        println!("  {}", s.header.apply_to("Failures"));
        for report in failures {
            println!(
                "    {} f{} c{}  {}",
                s.value.apply_to(report.well),
                report.field,
                report.channel,
                s.error.apply_to(report.error.as_deref().unwrap_or("unknown error"))
            );
        }
    }
    println!();
}
