use super::{PersistenceError, PersistenceResult, ProjectSnapshot};
use crate::metadata::ProjectMetadata;
use crate::report::ScheduleReport;
use crate::task::TaskSpec;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::debug;

const METADATA_ROW_NAME: &str = "__metadata__";

pub fn save_project_to_json<P: AsRef<Path>>(
    snapshot: &ProjectSnapshot,
    path: P,
) -> PersistenceResult<()> {
    super::validate_snapshot(snapshot)?;
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, snapshot)?;
    debug!(path = %path.as_ref().display(), tasks = snapshot.tasks.len(), "saved project json");
    Ok(())
}

pub fn load_project_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<ProjectSnapshot> {
    let file = File::open(path.as_ref())?;
    let snapshot: ProjectSnapshot = serde_json::from_reader(file)?;
    super::validate_snapshot(&snapshot)?;
    debug!(path = %path.as_ref().display(), tasks = snapshot.tasks.len(), "loaded project json");
    Ok(snapshot)
}

#[derive(Default, Serialize, Deserialize)]
struct TaskCsvRecord {
    name: String,
    duration: i64,
    predecessors: String,
    #[serde(default)]
    metadata_json: String,
}

impl From<&TaskSpec> for TaskCsvRecord {
    fn from(task: &TaskSpec) -> Self {
        Self {
            name: task.name.clone(),
            duration: task.duration,
            predecessors: task.predecessors.join(","),
            metadata_json: String::new(),
        }
    }
}

impl TaskCsvRecord {
    fn metadata_row(metadata: &ProjectMetadata) -> PersistenceResult<Self> {
        Ok(Self {
            name: METADATA_ROW_NAME.to_string(),
            metadata_json: serde_json::to_string(metadata)?,
            ..Self::default()
        })
    }

    fn is_metadata_row(&self) -> bool {
        !self.metadata_json.trim().is_empty()
    }

    fn into_task(self) -> PersistenceResult<TaskSpec> {
        if self.is_metadata_row() {
            return Err(PersistenceError::InvalidData(
                "metadata row cannot be converted to task".into(),
            ));
        }
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(PersistenceError::InvalidData("task row missing name".into()));
        }
        Ok(TaskSpec {
            name,
            duration: self.duration,
            predecessors: split_names(&self.predecessors),
        })
    }
}

/// Predecessors share one comma-separated cell, so task names must not contain
/// commas.
pub fn save_project_to_csv<P: AsRef<Path>>(
    snapshot: &ProjectSnapshot,
    path: P,
) -> PersistenceResult<()> {
    super::validate_snapshot(snapshot)?;
    if let Some(task) = snapshot.tasks.iter().find(|task| task.name.contains(',')) {
        return Err(PersistenceError::InvalidData(format!(
            "task name {:?} contains a comma and cannot be stored in CSV",
            task.name
        )));
    }
    let file = File::create(path.as_ref())?;
    let mut writer = csv::Writer::from_writer(file);
    writer.serialize(TaskCsvRecord::metadata_row(&snapshot.metadata)?)?;
    for task in &snapshot.tasks {
        writer.serialize(TaskCsvRecord::from(task))?;
    }
    writer.flush()?;
    debug!(path = %path.as_ref().display(), tasks = snapshot.tasks.len(), "saved project csv");
    Ok(())
}

pub fn load_project_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<ProjectSnapshot> {
    let file = File::open(path.as_ref())?;
    let mut reader = csv::Reader::from_reader(file);
    let mut tasks = Vec::new();
    let mut metadata: Option<ProjectMetadata> = None;
    for record in reader.deserialize::<TaskCsvRecord>() {
        let record = record?;
        if record.is_metadata_row() {
            if metadata.is_some() {
                return Err(PersistenceError::InvalidData(
                    "CSV file contained multiple metadata rows".into(),
                ));
            }
            metadata = Some(serde_json::from_str(&record.metadata_json).map_err(|err| {
                PersistenceError::InvalidData(format!("invalid metadata json: {err}"))
            })?);
            continue;
        }
        tasks.push(record.into_task()?);
    }

    let snapshot = ProjectSnapshot::new(metadata.unwrap_or_default(), tasks);
    super::validate_snapshot(&snapshot)?;
    debug!(path = %path.as_ref().display(), tasks = snapshot.tasks.len(), "loaded project csv");
    Ok(snapshot)
}

pub fn save_report_to_json<P: AsRef<Path>>(
    report: &ScheduleReport,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Writes one row per task; the critical path is implied by `is_critical`.
pub fn save_report_to_csv<P: AsRef<Path>>(
    report: &ScheduleReport,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &report.tasks {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn split_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
