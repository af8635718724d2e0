//! GraphStore port - タスクノードと depends-on エッジの正本（source of truth）
//!
//! GraphStore は以下を管理します：
//! - TaskNode（id, projectId, name, description, blocked）
//! - depends-on エッジ（from -> to: `to` が `from` に依存）
//!
//! # 実装
//! - `InMemoryGraphStore`（テスト・開発用）
//! - 本番用（Neo4j など）は別クレートに配置

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{DependencyRelation, ProjectId, StoreError, TaskId, TaskNode};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Durable storage of task nodes and depends-on edges.
///
/// Every method is a single store round trip. Implementations must be
/// thread-safe; the engine keeps no state of its own between calls.
///
/// # 設計原則
/// - エッジの書き込みと `to.blocked = true` は同一トランザクション内
/// - 到達可能性の判定はストア側（クエリ or メモリ上の BFS）
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Create the node if absent. An existing node is left untouched.
    async fn upsert_node(&self, node: &TaskNode) -> StoreResult<()>;

    async fn get_node(&self, id: &TaskId) -> StoreResult<Option<TaskNode>>;

    /// Write the edge and set `to.blocked = true` in one transaction.
    ///
    /// Writing an edge that already exists must not duplicate it.
    async fn insert_edge(&self, relation: &DependencyRelation) -> StoreResult<()>;

    /// Delete the edge. Deleting an absent edge is not an error.
    async fn delete_edge(&self, relation: &DependencyRelation) -> StoreResult<()>;

    async fn edge_exists(&self, relation: &DependencyRelation) -> StoreResult<bool>;

    /// True if `task` reaches `target` through one or more depends-on hops,
    /// i.e. `task` already (transitively) depends on `target`.
    async fn depends_transitively(&self, task: &TaskId, target: &TaskId) -> StoreResult<bool>;

    /// Direct dependencies of `task`: every `from` with an edge `from -> task`.
    async fn dependencies_of(&self, task: &TaskId) -> StoreResult<Vec<TaskNode>>;

    /// Overwrite the `blocked` attribute. Missing nodes are ignored.
    async fn set_blocked(&self, task: &TaskId, blocked: bool) -> StoreResult<()>;

    async fn nodes_in_project(&self, project: &ProjectId) -> StoreResult<Vec<TaskNode>>;

    /// Edges whose dependent (`to`) node belongs to `project`.
    async fn edges_in_project(&self, project: &ProjectId) -> StoreResult<Vec<DependencyRelation>>;
}

#[async_trait]
impl<S: GraphStore + ?Sized> GraphStore for Arc<S> {
    async fn upsert_node(&self, node: &TaskNode) -> StoreResult<()> {
        (**self).upsert_node(node).await
    }

    async fn get_node(&self, id: &TaskId) -> StoreResult<Option<TaskNode>> {
        (**self).get_node(id).await
    }

    async fn insert_edge(&self, relation: &DependencyRelation) -> StoreResult<()> {
        (**self).insert_edge(relation).await
    }

    async fn delete_edge(&self, relation: &DependencyRelation) -> StoreResult<()> {
        (**self).delete_edge(relation).await
    }

    async fn edge_exists(&self, relation: &DependencyRelation) -> StoreResult<bool> {
        (**self).edge_exists(relation).await
    }

    async fn depends_transitively(&self, task: &TaskId, target: &TaskId) -> StoreResult<bool> {
        (**self).depends_transitively(task, target).await
    }

    async fn dependencies_of(&self, task: &TaskId) -> StoreResult<Vec<TaskNode>> {
        (**self).dependencies_of(task).await
    }

    async fn set_blocked(&self, task: &TaskId, blocked: bool) -> StoreResult<()> {
        (**self).set_blocked(task, blocked).await
    }

    async fn nodes_in_project(&self, project: &ProjectId) -> StoreResult<Vec<TaskNode>> {
        (**self).nodes_in_project(project).await
    }

    async fn edges_in_project(&self, project: &ProjectId) -> StoreResult<Vec<DependencyRelation>> {
        (**self).edges_in_project(project).await
    }
}
