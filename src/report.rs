use crate::graph::{END_TASK, TaskGraph};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReportRow {
    pub name: String,
    pub duration: i64,
    pub earliest_start: i64,
    pub earliest_finish: i64,
    pub latest_start: i64,
    pub latest_finish: i64,
    pub total_float: i64,
    pub is_critical: bool,
}

/// Flattened MPM results for every real task, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub project_duration: i64,
    pub critical_path: Vec<String>,
    pub tasks: Vec<TaskReportRow>,
}

impl ScheduleReport {
    pub(crate) fn from_parts(
        graph: &TaskGraph,
        earliest: &HashMap<String, i64>,
        latest: &HashMap<String, i64>,
        critical_path: &[String],
    ) -> Self {
        let tasks = graph
            .real_tasks()
            .map(|name| {
                let duration = graph.duration_of(name);
                let earliest_start = earliest.get(name).copied().unwrap_or(0);
                let latest_start = latest.get(name).copied().unwrap_or(earliest_start);
                TaskReportRow {
                    name: name.to_string(),
                    duration,
                    earliest_start,
                    earliest_finish: earliest_start + duration,
                    latest_start,
                    latest_finish: latest_start + duration,
                    total_float: latest_start - earliest_start,
                    is_critical: latest_start == earliest_start,
                }
            })
            .collect();

        Self {
            project_duration: earliest.get(END_TASK).copied().unwrap_or(0),
            critical_path: critical_path.to_vec(),
            tasks,
        }
    }

    pub fn critical_count(&self) -> usize {
        self.tasks.iter().filter(|row| row.is_critical).count()
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.tasks.len()));
        parts.push(format!("critical={}", self.critical_count()));
        parts.push(format!("duration={}", self.project_duration));
        if !self.critical_path.is_empty() {
            parts.push(format!("crit_path={}", self.critical_path.join("->")));
        }
        parts.join(", ")
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let names: Vec<&str> = self.tasks.iter().map(|row| row.name.as_str()).collect();
        let durations: Vec<i64> = self.tasks.iter().map(|row| row.duration).collect();
        let earliest_starts: Vec<i64> = self.tasks.iter().map(|row| row.earliest_start).collect();
        let earliest_finishes: Vec<i64> =
            self.tasks.iter().map(|row| row.earliest_finish).collect();
        let latest_starts: Vec<i64> = self.tasks.iter().map(|row| row.latest_start).collect();
        let latest_finishes: Vec<i64> = self.tasks.iter().map(|row| row.latest_finish).collect();
        let floats: Vec<i64> = self.tasks.iter().map(|row| row.total_float).collect();
        let critical: Vec<bool> = self.tasks.iter().map(|row| row.is_critical).collect();

        DataFrame::new(vec![
            Series::new(PlSmallStr::from_static("name"), names).into_column(),
            Series::new(PlSmallStr::from_static("duration"), durations).into_column(),
            Series::new(PlSmallStr::from_static("earliest_start"), earliest_starts).into_column(),
            Series::new(PlSmallStr::from_static("earliest_finish"), earliest_finishes)
                .into_column(),
            Series::new(PlSmallStr::from_static("latest_start"), latest_starts).into_column(),
            Series::new(PlSmallStr::from_static("latest_finish"), latest_finishes).into_column(),
            Series::new(PlSmallStr::from_static("total_float"), floats).into_column(),
            Series::new(PlSmallStr::from_static("is_critical"), critical).into_column(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use crate::TaskNetwork;

    #[test]
    fn report_rows_follow_declaration_order() {
        let mut network = TaskNetwork::new(
            ["A", "B", "C"],
            [2, 1, 5],
            [vec![], vec![], vec!["A", "B"]],
        )
        .unwrap();
        let report = network.report().unwrap();

        let names: Vec<&str> = report.tasks.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(report.project_duration, 7);
        assert_eq!(report.tasks[1].total_float, 1);
        assert_eq!(report.tasks[2].earliest_finish, 7);
        assert_eq!(report.critical_count(), 2);
        assert_eq!(
            report.to_cli_summary(),
            "tasks=3, critical=2, duration=7, crit_path=START->A->C->END"
        );
    }

    #[test]
    fn dataframe_has_one_row_per_task() {
        let mut network =
            TaskNetwork::new(["T1", "T2"], [3, 2], [vec![], vec!["T1"]]).unwrap();
        let df = network.report().unwrap().to_dataframe().unwrap();

        assert_eq!(df.height(), 2);
        let latest = df.column("latest_start").unwrap().i64().unwrap();
        assert_eq!(latest.get(1), Some(3));
        let critical = df.column("is_critical").unwrap().bool().unwrap();
        assert_eq!(critical.get(0), Some(true));
    }
}
