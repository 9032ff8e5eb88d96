use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of network input: a task, its duration and the tasks that must
/// finish before it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    pub duration: i64,
    #[serde(default)]
    pub predecessors: Vec<String>,
}

impl TaskSpec {
    pub fn new(name: impl Into<String>, duration: i64) -> Self {
        Self {
            name: name.into(),
            duration,
            predecessors: Vec::new(),
        }
    }

    pub fn with_predecessors<I, S>(mut self, predecessors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessors = predecessors.into_iter().map(Into::into).collect();
        self
    }

    /// Table of task rows with predecessors joined by commas.
    pub fn to_dataframe(tasks: &[Self]) -> PolarsResult<DataFrame> {
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        let durations: Vec<i64> = tasks.iter().map(|t| t.duration).collect();
        let predecessors: Vec<String> = tasks.iter().map(|t| t.predecessors.join(",")).collect();

        DataFrame::new(vec![
            Series::new(PlSmallStr::from_static("name"), names).into_column(),
            Series::new(PlSmallStr::from_static("duration"), durations).into_column(),
            Series::new(PlSmallStr::from_static("predecessors"), predecessors).into_column(),
        ])
    }
}
