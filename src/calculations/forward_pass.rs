use super::Relaxation;
use crate::error::PropagationError;
use crate::graph::{END_TASK, START_TASK, TaskGraph};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace};

/// Earliest start dates, swept breadth-first from START.
pub struct ForwardPass<'a> {
    graph: &'a TaskGraph,
}

impl<'a> ForwardPass<'a> {
    pub fn new(graph: &'a TaskGraph) -> Self {
        Self { graph }
    }

    pub fn execute(&self) -> Result<HashMap<String, i64>, PropagationError> {
        let mut earliest: HashMap<String, i64> = HashMap::with_capacity(self.graph.len());
        earliest.insert(START_TASK.to_string(), 0);

        let mut seen: HashSet<&str> = HashSet::with_capacity(self.graph.len());
        let mut queue: VecDeque<&str> = self
            .graph
            .successors_of(START_TASK)
            .iter()
            .map(String::as_str)
            .collect();
        let mut deferrals = 0usize;

        while let Some(task) = queue.pop_front() {
            if seen.contains(task) {
                continue;
            }
            match self.relax(task, &earliest)? {
                Relaxation::Resolved(date) => {
                    earliest.insert(task.to_string(), date);
                    seen.insert(task);
                    queue.extend(self.graph.successors_of(task).iter().map(String::as_str));
                }
                Relaxation::Deferred => {
                    trace!(task = task, "predecessors not dated yet, deferring");
                    deferrals += 1;
                    queue.push_back(task);
                }
            }
        }

        debug!(
            tasks = earliest.len(),
            deferrals = deferrals,
            project_duration = ?earliest.get(END_TASK),
            "forward pass complete"
        );
        Ok(earliest)
    }

    /// `max(earliest[p] + duration[p])` over the task's predecessors.
    fn relax(
        &self,
        task: &str,
        earliest: &HashMap<String, i64>,
    ) -> Result<Relaxation, PropagationError> {
        let predecessors = self.graph.predecessors_of(task);
        if predecessors.is_empty() {
            return Err(PropagationError::NoPredecessor(task.to_string()));
        }

        let mut date = i64::MIN;
        for pred in predecessors {
            let Some(&pred_start) = earliest.get(pred) else {
                return Ok(Relaxation::Deferred);
            };
            let finish = pred_start
                .checked_add(self.graph.duration_of(pred))
                .ok_or_else(|| PropagationError::DateOverflow(task.to_string()))?;
            date = date.max(finish);
        }
        Ok(Relaxation::Resolved(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    #[test]
    fn chain_accumulates_durations() {
        let graph = GraphBuilder::build(
            ["T1", "T2", "T3"],
            [3, 2, 1],
            [vec![], vec!["T1"], vec!["T1", "T2"]],
        )
        .unwrap();
        let earliest = ForwardPass::new(&graph).execute().unwrap();

        assert_eq!(earliest["START"], 0);
        assert_eq!(earliest["T1"], 0);
        assert_eq!(earliest["T2"], 3);
        assert_eq!(earliest["T3"], 5);
        assert_eq!(earliest["END"], 6);
    }

    #[test]
    fn task_reached_before_its_predecessors_is_deferred() {
        // C is queued as soon as A resolves, while B2 is still pending
        let graph = GraphBuilder::build(
            ["A", "B", "B2", "C"],
            [1, 1, 4, 1],
            [vec![], vec![], vec!["B"], vec!["A", "B2"]],
        )
        .unwrap();
        let earliest = ForwardPass::new(&graph).execute().unwrap();

        assert_eq!(earliest["B2"], 1);
        assert_eq!(earliest["C"], 5);
        assert_eq!(earliest["END"], 6);
    }

    #[test]
    fn missing_predecessor_link_is_reported() {
        let mut graph = GraphBuilder::build(["A"], [1], [Vec::<&str>::new()]).unwrap();
        graph.predecessors.insert("A".to_string(), Vec::new());

        let err = ForwardPass::new(&graph).execute().unwrap_err();
        assert_eq!(err, PropagationError::NoPredecessor("A".to_string()));
    }

    #[test]
    fn date_past_i64_max_is_reported() {
        let graph =
            GraphBuilder::build(["A", "B"], [i64::MAX, 1], [vec![], vec!["A"]]).unwrap();

        let err = ForwardPass::new(&graph).execute().unwrap_err();
        assert_eq!(err, PropagationError::DateOverflow("END".to_string()));
    }
}
