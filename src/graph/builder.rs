use super::schedule_dag::ScheduleDag;
use super::{END_DURATION_SENTINEL, END_TASK, START_TASK, TaskGraph};
use crate::error::BuildError;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Validates raw task input and wires it into a [`TaskGraph`].
pub struct GraphBuilder {
    order: Vec<String>,
    durations: HashMap<String, i64>,
    predecessors: HashMap<String, Vec<String>>,
    successors: HashMap<String, Vec<String>>,
    declared_predecessors: HashSet<String>,
}

impl GraphBuilder {
    /// Builds a graph from three aligned inputs: `predecessor_lists[i]` and
    /// `durations[i]` belong to `task_names[i]`.
    pub fn build<N, S, D, P, L, T>(
        task_names: N,
        durations: D,
        predecessor_lists: P,
    ) -> Result<TaskGraph, BuildError>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        D: IntoIterator<Item = i64>,
        P: IntoIterator<Item = L>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let result = Self::build_graph(task_names, durations, predecessor_lists);
        if let Err(err) = &result {
            warn!(error = %err, "rejected task network");
        }
        result
    }

    fn build_graph<N, S, D, P, L, T>(
        task_names: N,
        durations: D,
        predecessor_lists: P,
    ) -> Result<TaskGraph, BuildError>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        D: IntoIterator<Item = i64>,
        P: IntoIterator<Item = L>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        // Step 1: declare every name up front so forward references resolve
        let names: Vec<String> = task_names.into_iter().map(Into::into).collect();
        let mut builder = Self::with_names(&names)?;

        // Step 2: walk the three inputs in lockstep
        let mut name_iter = names.iter();
        let mut duration_iter = durations.into_iter();
        let mut predecessor_iter = predecessor_lists.into_iter();
        let mut row = 0;
        loop {
            match (name_iter.next(), duration_iter.next(), predecessor_iter.next()) {
                (None, None, None) => break,
                (Some(name), Some(duration), Some(predecessors)) => {
                    builder.add_duration(name, duration)?;
                    builder.add_predecessors(name, predecessors)?;
                }
                _ => return Err(BuildError::LengthMismatch { row }),
            }
            row += 1;
        }

        // Step 3: hang loose ends on START and END
        builder.link_start_and_end();

        // Step 4: reject cycles before any sweep can spin on them
        let graph = builder.into_graph();
        ScheduleDag::build(&graph).topological_order()?;

        debug!(tasks = graph.len(), rows = row, "built task network");
        Ok(graph)
    }

    fn with_names(names: &[String]) -> Result<Self, BuildError> {
        let mut order = Vec::with_capacity(names.len() + 2);
        let mut predecessors = HashMap::with_capacity(names.len() + 2);
        let mut successors = HashMap::with_capacity(names.len() + 2);
        let mut durations = HashMap::with_capacity(names.len() + 2);

        order.push(START_TASK.to_string());
        durations.insert(START_TASK.to_string(), 0);
        predecessors.insert(START_TASK.to_string(), Vec::new());
        successors.insert(START_TASK.to_string(), Vec::new());

        for name in names {
            if name == START_TASK || name == END_TASK {
                return Err(BuildError::ReservedTaskName(name.clone()));
            }
            if !predecessors.contains_key(name) {
                order.push(name.clone());
                predecessors.insert(name.clone(), Vec::new());
                successors.insert(name.clone(), Vec::new());
            }
        }

        order.push(END_TASK.to_string());
        durations.insert(END_TASK.to_string(), END_DURATION_SENTINEL);
        predecessors.insert(END_TASK.to_string(), Vec::new());
        successors.insert(END_TASK.to_string(), Vec::new());

        Ok(Self {
            order,
            durations,
            predecessors,
            successors,
            declared_predecessors: HashSet::new(),
        })
    }

    fn add_duration(&mut self, name: &str, duration: i64) -> Result<(), BuildError> {
        if duration < 0 {
            return Err(BuildError::NegativeDuration {
                task: name.to_string(),
                duration,
            });
        }
        match self.durations.get(name).copied() {
            Some(first) if first != duration && first != END_DURATION_SENTINEL => {
                Err(BuildError::DuplicateDuration {
                    task: name.to_string(),
                    first,
                    second: duration,
                })
            }
            _ => {
                self.durations.insert(name.to_string(), duration);
                Ok(())
            }
        }
    }

    fn add_predecessors<L, T>(&mut self, name: &str, predecessor_list: L) -> Result<(), BuildError>
    where
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut seen = HashSet::new();
        let distinct: Vec<String> = predecessor_list
            .into_iter()
            .map(Into::into)
            .filter(|pred| seen.insert(pred.clone()))
            .collect();

        // An empty list is a re-declaration of "starts with the project"
        if distinct.is_empty() {
            return Ok(());
        }
        if !self.declared_predecessors.insert(name.to_string()) {
            return Err(BuildError::DuplicatePredecessorSet {
                task: name.to_string(),
            });
        }

        for pred in distinct {
            let Some(pred_successors) = self.successors.get_mut(&pred) else {
                return Err(BuildError::UnknownPredecessor {
                    task: name.to_string(),
                    predecessor: pred,
                });
            };
            pred_successors.push(name.to_string());
            if let Some(task_predecessors) = self.predecessors.get_mut(name) {
                task_predecessors.push(pred);
            }
        }
        Ok(())
    }

    fn link_start_and_end(&mut self) {
        let real_tasks: Vec<String> = self
            .order
            .iter()
            .filter(|name| *name != START_TASK && *name != END_TASK)
            .cloned()
            .collect();

        // An empty network still spans START -> END
        if real_tasks.is_empty() {
            self.link(START_TASK, END_TASK);
            return;
        }

        for name in &real_tasks {
            if self.predecessors.get(name).is_none_or(Vec::is_empty) {
                self.link(START_TASK, name);
            }
        }
        for name in &real_tasks {
            if self.successors.get(name).is_none_or(Vec::is_empty) {
                self.link(name, END_TASK);
            }
        }
    }

    fn link(&mut self, from: &str, to: &str) {
        self.successors
            .entry(from.to_string())
            .or_default()
            .push(to.to_string());
        self.predecessors
            .entry(to.to_string())
            .or_default()
            .push(from.to_string());
    }

    fn into_graph(self) -> TaskGraph {
        TaskGraph {
            order: self.order,
            durations: self.durations,
            predecessors: self.predecessors,
            successors: self.successors,
        }
    }
}
