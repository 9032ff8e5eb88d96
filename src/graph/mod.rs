use std::collections::HashMap;

/// Synthetic task every network starts from.
pub const START_TASK: &str = "START";
/// Synthetic task every network finishes at.
pub const END_TASK: &str = "END";
/// Duration recorded for END. It is never used as a task length.
pub const END_DURATION_SENTINEL: i64 = -1;

/// Validated dependency graph over task names.
///
/// Predecessor and successor lists are kept symmetric and preserve input
/// order. The graph is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGraph {
    pub(crate) order: Vec<String>,
    pub(crate) durations: HashMap<String, i64>,
    pub(crate) predecessors: HashMap<String, Vec<String>>,
    pub(crate) successors: HashMap<String, Vec<String>>,
}

impl TaskGraph {
    /// Task names in declaration order, START first and END last.
    pub fn task_names(&self) -> &[String] {
        &self.order
    }

    pub fn durations(&self) -> &HashMap<String, i64> {
        &self.durations
    }

    pub fn predecessors(&self) -> &HashMap<String, Vec<String>> {
        &self.predecessors
    }

    pub fn successors(&self) -> &HashMap<String, Vec<String>> {
        &self.successors
    }

    pub fn contains(&self, task: &str) -> bool {
        self.durations.contains_key(task)
    }

    /// Number of tasks, START and END included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn duration_of(&self, task: &str) -> i64 {
        self.durations.get(task).copied().unwrap_or(0)
    }

    pub(crate) fn predecessors_of(&self, task: &str) -> &[String] {
        self.predecessors.get(task).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn successors_of(&self, task: &str) -> &[String] {
        self.successors.get(task).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Real tasks only, in declaration order.
    pub(crate) fn real_tasks(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .map(String::as_str)
            .filter(|name| *name != START_TASK && *name != END_TASK)
    }
}

pub mod builder;
pub mod schedule_dag;
