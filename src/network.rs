use crate::calculations::{BackwardPass, ForwardPass};
use crate::error::{BuildError, PropagationError};
use crate::graph::builder::GraphBuilder;
use crate::graph::{END_TASK, TaskGraph};
use crate::report::ScheduleReport;
use crate::task::TaskSpec;
use std::collections::HashMap;

/// A validated task network together with its cached MPM results.
///
/// Earliest dates, latest dates and the critical path are computed lazily on
/// first access and cached afterwards. The `compute_*` methods rebuild them
/// from scratch. Computing mutates the cache, so a network must not be shared
/// across threads without external locking.
#[derive(Debug, Clone)]
pub struct TaskNetwork {
    graph: TaskGraph,
    earliest: HashMap<String, i64>,
    latest: HashMap<String, i64>,
    critical_path: Vec<String>,
}

impl TaskNetwork {
    /// Builds a network from three aligned inputs.
    ///
    /// `durations[i]` and `predecessor_lists[i]` describe `task_names[i]`. A
    /// task with an empty predecessor list starts with the project, a task
    /// nothing depends on finishes it.
    pub fn new<N, S, D, P, L, T>(
        task_names: N,
        durations: D,
        predecessor_lists: P,
    ) -> Result<Self, BuildError>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        D: IntoIterator<Item = i64>,
        P: IntoIterator<Item = L>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let graph = GraphBuilder::build(task_names, durations, predecessor_lists)?;
        Ok(Self::from_graph(graph))
    }

    pub fn from_tasks(tasks: &[TaskSpec]) -> Result<Self, BuildError> {
        Self::new(
            tasks.iter().map(|task| task.name.as_str()),
            tasks.iter().map(|task| task.duration),
            tasks
                .iter()
                .map(|task| task.predecessors.iter().map(String::as_str)),
        )
    }

    pub fn from_graph(graph: TaskGraph) -> Self {
        Self {
            graph,
            earliest: HashMap::new(),
            latest: HashMap::new(),
            critical_path: Vec::new(),
        }
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn task_names(&self) -> &[String] {
        self.graph.task_names()
    }

    pub fn durations(&self) -> &HashMap<String, i64> {
        self.graph.durations()
    }

    pub fn predecessors(&self) -> &HashMap<String, Vec<String>> {
        self.graph.predecessors()
    }

    pub fn successors(&self) -> &HashMap<String, Vec<String>> {
        self.graph.successors()
    }

    /// Recomputes the earliest start date of every task.
    pub fn compute_earliest_dates(&mut self) -> Result<&HashMap<String, i64>, PropagationError> {
        self.earliest.clear();
        self.earliest = ForwardPass::new(&self.graph).execute()?;
        Ok(&self.earliest)
    }

    /// Recomputes latest dates and the critical path.
    ///
    /// Earliest dates are computed first only when none are cached.
    pub fn compute_critical_path(&mut self) -> Result<&[String], PropagationError> {
        self.critical_path.clear();
        self.latest.clear();
        if self.earliest.is_empty() {
            self.compute_earliest_dates()?;
        }
        let result = BackwardPass::new(&self.graph, &self.earliest).execute()?;
        self.latest = result.latest;
        self.critical_path = result.critical_path;
        Ok(&self.critical_path)
    }

    pub fn earliest_dates(&mut self) -> Result<&HashMap<String, i64>, PropagationError> {
        if self.earliest.is_empty() {
            self.compute_earliest_dates()?;
        }
        Ok(&self.earliest)
    }

    pub fn latest_dates(&mut self) -> Result<&HashMap<String, i64>, PropagationError> {
        if self.latest.is_empty() {
            self.compute_critical_path()?;
        }
        Ok(&self.latest)
    }

    pub fn critical_path(&mut self) -> Result<&[String], PropagationError> {
        if self.critical_path.is_empty() {
            self.compute_critical_path()?;
        }
        Ok(&self.critical_path)
    }

    /// Minimum completion time of the project, i.e. the earliest date of END.
    pub fn project_duration(&mut self) -> Result<i64, PropagationError> {
        self.earliest_dates()?
            .get(END_TASK)
            .copied()
            .ok_or_else(|| PropagationError::NoPredecessor(END_TASK.to_string()))
    }

    /// Slack of every task: how far its start can slip without delaying END.
    pub fn total_float(&mut self) -> Result<HashMap<String, i64>, PropagationError> {
        if self.latest.is_empty() {
            self.compute_critical_path()?;
        }
        Ok(self
            .latest
            .iter()
            .filter_map(|(task, latest)| {
                self.earliest
                    .get(task)
                    .map(|earliest| (task.clone(), latest - earliest))
            })
            .collect())
    }

    pub fn is_critical(&mut self, task: &str) -> Result<bool, PropagationError> {
        Ok(self.critical_path()?.iter().any(|name| name == task))
    }

    pub fn report(&mut self) -> Result<ScheduleReport, PropagationError> {
        if self.latest.is_empty() {
            self.compute_critical_path()?;
        }
        Ok(ScheduleReport::from_parts(
            &self.graph,
            &self.earliest,
            &self.latest,
            &self.critical_path,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> TaskNetwork {
        TaskNetwork::new(
            ["T1", "T2", "T3"],
            [3, 2, 1],
            [vec![], vec!["T1"], vec!["T1", "T2"]],
        )
        .unwrap()
    }

    #[test]
    fn accessors_compute_lazily() {
        let mut network = chain();
        assert!(network.earliest.is_empty());

        assert_eq!(network.latest_dates().unwrap()["T2"], 3);
        assert!(!network.earliest.is_empty());
        assert_eq!(network.critical_path.len(), 5);
    }

    #[test]
    fn compute_critical_path_reuses_cached_earliest_dates() {
        let mut network = chain();
        network.compute_earliest_dates().unwrap();
        network.earliest.insert("T3".to_string(), 4);

        // Cached earliest dates are reused as-is, so T3 drops off the path
        let path = network.compute_critical_path().unwrap().to_vec();
        assert_eq!(path, ["START", "T1", "T2", "END"]);
    }

    #[test]
    fn failed_sweep_leaves_cache_empty() {
        let mut network = chain();
        network
            .graph
            .predecessors
            .insert("T2".to_string(), Vec::new());

        assert!(network.earliest_dates().is_err());
        assert!(network.earliest.is_empty());
        assert!(network.critical_path().is_err());
        assert!(network.latest.is_empty());
        assert!(network.critical_path.is_empty());
    }

    #[test]
    fn total_float_is_latest_minus_earliest() {
        let mut network = TaskNetwork::new(
            ["A", "B", "C"],
            [4, 1, 2],
            [vec![], vec![], vec!["A", "B"]],
        )
        .unwrap();
        let float = network.total_float().unwrap();
        assert_eq!(float["A"], 0);
        assert_eq!(float["B"], 3);
        assert_eq!(float["C"], 0);
        assert!(!network.is_critical("B").unwrap());
        assert_eq!(network.project_duration().unwrap(), 6);
    }
}
