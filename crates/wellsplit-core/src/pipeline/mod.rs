pub mod config;
mod context;
mod scheduler;
mod task;
mod types;

pub use context::BatchContext;
pub use scheduler::ConversionScheduler;
pub use task::{plan_tasks, FrameTask, TaskReport, TaskState};
pub use types::{BatchStage, BatchSummary, CancelToken, ProgressReporter};
