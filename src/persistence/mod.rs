use crate::error::{BuildError, PropagationError};
use crate::metadata::ProjectMetadata;
use crate::network::TaskNetwork;
use crate::task::TaskSpec;
use polars::prelude::PolarsError;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid network: {0}")]
    Network(#[from] BuildError),
    #[error("computation error: {0}")]
    Computation(#[from] PropagationError),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Everything needed to rebuild a network: project metadata plus task rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub metadata: ProjectMetadata,
    pub tasks: Vec<TaskSpec>,
}

impl ProjectSnapshot {
    pub fn new(metadata: ProjectMetadata, tasks: Vec<TaskSpec>) -> Self {
        Self { metadata, tasks }
    }

    pub fn to_network(&self) -> PersistenceResult<TaskNetwork> {
        Ok(TaskNetwork::from_tasks(&self.tasks)?)
    }
}

/// Rejects snapshots that would not build into a valid network.
pub fn validate_snapshot(snapshot: &ProjectSnapshot) -> PersistenceResult<()> {
    snapshot.to_network().map(|_| ())
}

pub mod file;

pub use file::{
    load_project_from_csv, load_project_from_json, save_project_to_csv, save_project_to_json,
    save_report_to_csv, save_report_to_json,
};
