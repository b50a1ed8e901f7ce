use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::task::{TaskReport, TaskState};

/// Batch processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchStage {
    Planning,
    Triage,
    Converting,
}

impl std::fmt::Display for BatchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planning => write!(f, "Planning tasks"),
            Self::Triage => write!(f, "Checking outputs"),
            Self::Converting => write!(f, "Converting frames"),
        }
    }
}

/// Thread-safe progress reporting for a batch run.
///
/// Implementors can use this to drive progress bars or logging. All methods
/// have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage, if known.
    fn begin_stage(&self, _stage: BatchStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Cooperative stop flag shared between a signal handler and the scheduler.
///
/// Once set, no new task is admitted; tasks already running finish normally.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of a whole batch.
#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<TaskReport>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn count(&self, state: TaskState) -> usize {
        self.reports.iter().filter(|r| r.state == state).count()
    }

    /// Tasks handed to the transform engine, whatever their result.
    pub fn dispatched(&self) -> usize {
        self.count(TaskState::Complete) + self.count(TaskState::Failed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskReport> {
        self.reports.iter().filter(|r| r.state == TaskState::Failed)
    }

    pub fn was_cancelled(&self) -> bool {
        self.count(TaskState::Cancelled) > 0
    }

    pub fn is_success(&self) -> bool {
        self.count(TaskState::Failed) == 0 && !self.was_cancelled()
    }
}
