use super::Relaxation;
use crate::error::PropagationError;
use crate::graph::{END_TASK, TaskGraph};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace};

/// Latest start dates and the critical path, swept breadth-first from END.
pub struct BackwardPass<'a> {
    graph: &'a TaskGraph,
    earliest: &'a HashMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackwardPassResult {
    pub latest: HashMap<String, i64>,
    /// Zero-slack tasks, START to END.
    pub critical_path: Vec<String>,
}

impl<'a> BackwardPass<'a> {
    pub fn new(graph: &'a TaskGraph, earliest: &'a HashMap<String, i64>) -> Self {
        Self { graph, earliest }
    }

    pub fn execute(&self) -> Result<BackwardPassResult, PropagationError> {
        let project_end = self
            .earliest
            .get(END_TASK)
            .copied()
            .ok_or_else(|| PropagationError::NoPredecessor(END_TASK.to_string()))?;

        let mut latest: HashMap<String, i64> = HashMap::with_capacity(self.graph.len());
        latest.insert(END_TASK.to_string(), project_end);
        let mut critical_path: VecDeque<String> = VecDeque::new();
        critical_path.push_front(END_TASK.to_string());

        let mut seen: HashSet<&str> = HashSet::with_capacity(self.graph.len());
        let mut queue: VecDeque<&str> = self
            .graph
            .predecessors_of(END_TASK)
            .iter()
            .map(String::as_str)
            .collect();
        let mut deferrals = 0usize;

        while let Some(task) = queue.pop_front() {
            if seen.contains(task) {
                continue;
            }
            match self.relax(task, &latest)? {
                Relaxation::Resolved(date) => {
                    latest.insert(task.to_string(), date);
                    // Every successor is already final, so prepending keeps
                    // the path in start-to-end order.
                    if self.earliest.get(task) == Some(&date) {
                        critical_path.push_front(task.to_string());
                    }
                    seen.insert(task);
                    queue.extend(self.graph.predecessors_of(task).iter().map(String::as_str));
                }
                Relaxation::Deferred => {
                    trace!(task = task, "successors not dated yet, deferring");
                    deferrals += 1;
                    queue.push_back(task);
                }
            }
        }

        debug!(
            tasks = latest.len(),
            deferrals = deferrals,
            critical = critical_path.len(),
            "backward pass complete"
        );
        Ok(BackwardPassResult {
            latest,
            critical_path: critical_path.into(),
        })
    }

    /// `min(latest[s]) - duration[task]` over the task's successors.
    fn relax(
        &self,
        task: &str,
        latest: &HashMap<String, i64>,
    ) -> Result<Relaxation, PropagationError> {
        let successors = self.graph.successors_of(task);
        if successors.is_empty() {
            return Err(PropagationError::NoSuccessor(task.to_string()));
        }

        let mut date = i64::MAX;
        for succ in successors {
            let Some(&succ_start) = latest.get(succ) else {
                return Ok(Relaxation::Deferred);
            };
            date = date.min(succ_start);
        }
        Ok(Relaxation::Resolved(date - self.graph.duration_of(task)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::ForwardPass;
    use crate::graph::builder::GraphBuilder;

    fn run(graph: &TaskGraph) -> (HashMap<String, i64>, BackwardPassResult) {
        let earliest = ForwardPass::new(graph).execute().unwrap();
        let result = BackwardPass::new(graph, &earliest).execute().unwrap();
        (earliest, result)
    }

    #[test]
    fn chain_is_entirely_critical() {
        let graph = GraphBuilder::build(
            ["T1", "T2", "T3"],
            [3, 2, 1],
            [vec![], vec!["T1"], vec!["T1", "T2"]],
        )
        .unwrap();
        let (_, result) = run(&graph);

        assert_eq!(result.latest["END"], 6);
        assert_eq!(result.latest["T3"], 5);
        assert_eq!(result.latest["T2"], 3);
        assert_eq!(result.latest["T1"], 0);
        assert_eq!(result.latest["START"], 0);
        assert_eq!(result.critical_path, ["START", "T1", "T2", "T3", "END"]);
    }

    #[test]
    fn branch_with_slack_stays_off_the_path() {
        // T1 -> {T2 (3), T3 (1)} -> T4
        let graph = GraphBuilder::build(
            ["T1", "T2", "T3", "T4"],
            [2, 3, 1, 2],
            [vec![], vec!["T1"], vec!["T1"], vec!["T2", "T3"]],
        )
        .unwrap();
        let (earliest, result) = run(&graph);

        assert_eq!(earliest["T3"], 2);
        assert_eq!(result.latest["T3"], 4);
        assert_eq!(result.critical_path, ["START", "T1", "T2", "T4", "END"]);
    }

    #[test]
    fn missing_successor_link_is_reported() {
        let mut graph = GraphBuilder::build(["A"], [1], [Vec::<&str>::new()]).unwrap();
        let earliest = ForwardPass::new(&graph).execute().unwrap();
        graph.successors.insert("A".to_string(), Vec::new());

        let err = BackwardPass::new(&graph, &earliest).execute().unwrap_err();
        assert_eq!(err, PropagationError::NoSuccessor("A".to_string()));
    }
}
