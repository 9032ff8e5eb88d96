use thiserror::Error;

/// Raised while turning raw input into a [`TaskNetwork`](crate::TaskNetwork).
///
/// Any of these aborts construction; no partially built network is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(
        "the number of task names, durations and predecessor lists do not match \
         (mismatch detected at row {row})"
    )]
    LengthMismatch { row: usize },
    #[error("task {task} has two different durations ({first} and {second})")]
    DuplicateDuration {
        task: String,
        first: i64,
        second: i64,
    },
    #[error("task {task} has two sets of predecessors declared")]
    DuplicatePredecessorSet { task: String },
    #[error("task {predecessor}, declared predecessor of {task}, does not exist")]
    UnknownPredecessor { task: String, predecessor: String },
    #[error("task name {0} is reserved")]
    ReservedTaskName(String),
    #[error("task {task} has negative duration {duration}")]
    NegativeDuration { task: String, duration: i64 },
    #[error("circular dependency detected involving task {task}")]
    CyclicDependency { task: String },
}

/// Raised by the forward and backward sweeps.
///
/// A network that passed construction always has START upstream and END
/// downstream of every task, so the missing-link variants point at an internal
/// inconsistency. `DateOverflow` means the durations add up past `i64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropagationError {
    #[error("task {0} has no predecessor")]
    NoPredecessor(String),
    #[error("task {0} has no successor")]
    NoSuccessor(String),
    #[error("earliest date of task {0} overflows")]
    DateOverflow(String),
}
