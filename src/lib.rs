//! Metra Potential Method (MPM) scheduling.
//!
//! Durations live on tasks, dependencies on edges. A [`TaskNetwork`] is built
//! once from task names, durations and predecessor lists, then yields earliest
//! start dates, latest start dates and the critical path on demand.

pub mod calculations;
pub mod error;
pub mod graph;
pub mod metadata;
pub mod network;
pub mod persistence;
pub mod report;
pub mod task;

pub use error::{BuildError, PropagationError};
pub use graph::{END_DURATION_SENTINEL, END_TASK, START_TASK, TaskGraph};
pub use metadata::ProjectMetadata;
pub use network::TaskNetwork;
pub use persistence::{
    PersistenceError, ProjectSnapshot, load_project_from_csv, load_project_from_json,
    save_project_to_csv, save_project_to_json, save_report_to_csv, save_report_to_json,
    validate_snapshot,
};
pub use report::{ScheduleReport, TaskReportRow};
pub use task::TaskSpec;
