//! Domain model (ids, task nodes, dependency relations, errors).

pub mod errors;
pub mod graph;
pub mod ids;
pub mod node;
pub mod relation;

pub use self::errors::{Result, StoreError, StoreErrorKind, WorkflowError};
pub use self::graph::WorkflowGraph;
pub use self::ids::{ProjectId, TaskId};
pub use self::node::TaskNode;
pub use self::relation::DependencyRelation;
