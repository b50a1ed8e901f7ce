use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::warn;
use wellsplit_core::engine::MagickEngine;
use wellsplit_core::pipeline::{BatchContext, CancelToken, ConversionScheduler};

use super::batch::BatchArgs;
use crate::progress::BarReporter;
use crate::summary::{print_batch_result, print_batch_summary};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Maximum concurrent conversions (default: one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Regenerate tiles that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Do not warn about missing input frames
    #[arg(long)]
    pub quiet_missing: bool,

    /// Transform program to invoke (ImageMagick convert or compatible)
    #[arg(long)]
    pub engine: Option<String>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = args.batch.load_config()?;
    if args.jobs.is_some() {
        config.execution.jobs = args.jobs;
    }
    config.execution.overwrite |= args.overwrite;
    config.execution.quiet_missing |= args.quiet_missing;
    if let Some(ref engine) = args.engine {
        config.execution.engine_program = engine.clone();
    }

    let ctx = BatchContext::build(config)
        .context("Invalid batch configuration")?;

    let engine = MagickEngine::new(&ctx.config.execution.engine_program);
    if !engine.is_available() {
        bail!(
            "Transform program '{}' not found; install ImageMagick or pass --engine",
            ctx.config.execution.engine_program
        );
    }

    print_batch_summary(&ctx);

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        if !handler_token.is_cancelled() {
            warn!("Interrupt received, finishing running conversions");
            handler_token.cancel();
        }
    })
    .context("Failed to install signal handler")?;

    let reporter = Arc::new(BarReporter::new()?);
    let summary = ConversionScheduler::new(&ctx, &engine)
        .with_cancel(cancel)
        .with_reporter(reporter.clone())
        .run()?;
    reporter.finish("Done");

    print_batch_result(&summary);

    if summary.was_cancelled() {
        bail!("Batch interrupted; rerun the same command to resume");
    }
    let failed = summary.failures().count();
    if failed > 0 {
        bail!("{failed} conversion(s) failed");
    }
    Ok(())
}
