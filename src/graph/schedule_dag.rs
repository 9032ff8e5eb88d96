use super::TaskGraph;
use crate::error::BuildError;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// `petgraph` view of a [`TaskGraph`], used for ordering and cycle detection.
pub struct ScheduleDag {
    graph: DiGraph<String, ()>,
}

impl ScheduleDag {
    pub fn build(tasks: &TaskGraph) -> Self {
        let mut graph: DiGraph<String, ()> = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut name_to_index: HashMap<String, NodeIndex> = HashMap::with_capacity(tasks.len());

        // Add nodes first
        for name in tasks.task_names() {
            let node_ix = graph.add_node(name.clone());
            name_to_index.insert(name.clone(), node_ix);
        }

        // Add edges: task -> successor
        for name in tasks.task_names() {
            for succ in tasks.successors_of(name) {
                if let (Some(&u), Some(&v)) = (name_to_index.get(name), name_to_index.get(succ)) {
                    graph.add_edge(u, v, ());
                }
            }
        }

        Self { graph }
    }

    /// Task names ordered so every task comes after all of its predecessors.
    pub fn topological_order(&self) -> Result<Vec<String>, BuildError> {
        let order = toposort(&self.graph, None).map_err(|cycle| BuildError::CyclicDependency {
            task: self.graph[cycle.node_id()].clone(),
        })?;
        Ok(order
            .into_iter()
            .map(|node_ix| self.graph[node_ix].clone())
            .collect())
    }
}
