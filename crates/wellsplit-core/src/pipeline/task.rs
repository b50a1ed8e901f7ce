use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

use crate::contrast::TransformParams;
use crate::error::Result;
use crate::naming::{sequence_range, OutputTemplate};
use crate::plate::Well;

use super::context::BatchContext;

/// One engine invocation: a single channel of a single field of one well.
#[derive(Clone, Debug)]
pub struct FrameTask {
    pub well: Well,
    pub scan_ordinal: u32,
    /// 1-based.
    pub field: u32,
    /// 1-based.
    pub channel: u32,
    pub label: String,
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub output_template: OutputTemplate,
    pub sequence_start: u32,
    pub tile_count: u32,
    pub transform: TransformParams,
}

impl FrameTask {
    pub fn sequence_range(&self) -> Range<u32> {
        self.sequence_start..self.sequence_start + self.tile_count
    }

    pub fn output_paths(&self) -> Vec<PathBuf> {
        self.output_template
            .paths_in(&self.output_dir, self.sequence_start, self.tile_count)
    }

    /// True when every tile this task would write is already on disk.
    pub fn outputs_exist(&self) -> bool {
        self.output_paths().iter().all(|p| p.is_file())
    }

    /// Terminal state the scheduler would assign without running the engine,
    /// or `Pending` if the task needs to run.
    pub fn triage(&self, overwrite: bool) -> TaskState {
        if !self.input_path.is_file() {
            TaskState::Missing
        } else if !overwrite && self.outputs_exist() {
            TaskState::Skipped
        } else {
            TaskState::Pending
        }
    }
}

/// Every task of a batch: wells in grid order, then fields, then channels.
pub fn plan_tasks(ctx: &BatchContext) -> Result<Vec<FrameTask>> {
    let layout = &ctx.layout;
    let fields = ctx.fields_per_well();
    let channels = ctx.channels();
    let tiles = ctx.profile.tiles_per_frame;

    let mut tasks = Vec::with_capacity(layout.well_count() * (fields * channels) as usize);
    for well in layout.wells() {
        let grid_index = layout.grid_index(well);
        let label = ctx.genotypes.label(grid_index);
        let rank = ctx.genotypes.occurrence_rank(grid_index);
        let scan_ordinal = layout.scan_ordinal(well);
        let output_dir = ctx.config.output_dir.join(ctx.codec.group_name(label));

        for field in 1..=fields {
            let sequence = sequence_range(rank, field, tiles, fields);
            for channel in 1..=channels {
                let input_name = ctx.codec.input_filename(scan_ordinal, field, channel);
                tasks.push(FrameTask {
                    well,
                    scan_ordinal,
                    field,
                    channel,
                    label: label.to_string(),
                    input_path: ctx.config.input_dir.join(input_name),
                    output_dir: output_dir.clone(),
                    output_template: ctx.codec.output_template(label, channel)?,
                    sequence_start: sequence.start,
                    tile_count: tiles,
                    transform: ctx.transform_for(channel),
                });
            }
        }
    }
    Ok(tasks)
}

/// Lifecycle of a task: `Pending`, then `Dispatched`, then one terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskState {
    Pending,
    Dispatched,
    Complete,
    Failed,
    Skipped,
    /// Input frame absent; tolerated.
    Missing,
    /// Never admitted because the batch was cancelled.
    Cancelled,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Dispatched => write!(f, "dispatched"),
            Self::Complete => write!(f, "complete"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
            Self::Missing => write!(f, "missing"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// What happened to one task.
#[derive(Clone, Debug)]
pub struct TaskReport {
    pub well: Well,
    pub field: u32,
    pub channel: u32,
    pub input_path: PathBuf,
    pub state: TaskState,
    pub error: Option<String>,
}

impl TaskReport {
    pub fn new(task: &FrameTask, state: TaskState) -> Self {
        Self {
            well: task.well,
            field: task.field,
            channel: task.channel,
            input_path: task.input_path.clone(),
            state,
            error: None,
        }
    }

    pub fn failed(task: &FrameTask, error: impl fmt::Display) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(task, TaskState::Failed)
        }
    }
}
