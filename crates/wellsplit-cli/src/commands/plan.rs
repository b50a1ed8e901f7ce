use anyhow::Result;
use clap::Args;
use wellsplit_core::pipeline::{plan_tasks, TaskState};

use super::batch::BatchArgs;

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Assume existing tiles will be regenerated
    #[arg(long)]
    pub overwrite: bool,

    /// Only list tasks that would invoke the engine
    #[arg(long)]
    pub pending_only: bool,
}

pub fn run(args: &PlanArgs) -> Result<()> {
    let ctx = args.batch.build_context()?;
    let overwrite = args.overwrite || ctx.config.execution.overwrite;
    let tasks = plan_tasks(&ctx)?;

    println!(
        "{:<6}{:>6}{:>7}{:>5}  {:<28}{:<24}{:>13}  State",
        "Well", "Scan", "Field", "Ch", "Input", "Group", "Tiles"
    );
    let mut pending = 0usize;
    for task in &tasks {
        let state = task.triage(overwrite);
        if state == TaskState::Pending {
            pending += 1;
        } else if args.pending_only {
            continue;
        }
        let input = task
            .input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let range = task.sequence_range();
        println!(
            "{:<6}{:>6}{:>7}{:>5}  {:<28}{:<24}{:>13}  {}",
            task.well.to_string(),
            task.scan_ordinal,
            task.field,
            task.channel,
            input,
            ctx.codec.group_name(&task.label),
            format!("{}-{}", range.start, range.end - 1),
            state,
        );
    }
    println!();
    println!("{} task(s), {} to convert", tasks.len(), pending);
    Ok(())
}
