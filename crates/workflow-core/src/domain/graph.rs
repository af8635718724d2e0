use serde::{Deserialize, Serialize};

use super::{DependencyRelation, TaskNode};

/// Project-scoped projection of the workflow graph.
///
/// Nodes and edges are read separately, so an edge may reference a node
/// that is absent from `nodes` (or the reverse) under concurrent writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    pub nodes: Vec<TaskNode>,
    pub dependencies: Vec<DependencyRelation>,
}
