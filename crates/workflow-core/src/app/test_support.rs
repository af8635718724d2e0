//! Test-only store wrapper with fault injection and write accounting.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{DependencyRelation, ProjectId, StoreError, TaskId, TaskNode};
use crate::impls::InMemoryGraphStore;
use crate::ports::{GraphStore, StoreResult};

/// Store calls that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    GetNode,
    EdgeExists,
    DependsTransitively,
    InsertEdge,
    DeleteEdge,
    DependenciesOf,
    SetBlocked,
}

/// Wraps an `InMemoryGraphStore`, counting writes and optionally failing
/// selected calls or slowing down `get_node`.
///
/// A failing call returns a connectivity error before reaching the inner
/// store, so it neither writes nor counts as a write.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryGraphStore,
    failing: Mutex<HashSet<StoreOp>>,
    lookup_delay: Option<Duration>,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookup_delay(delay: Duration) -> Self {
        Self {
            lookup_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn fail(&self, op: StoreOp, fail: bool) {
        let mut failing = self.failing.lock().unwrap();
        if fail {
            failing.insert(op);
        } else {
            failing.remove(&op);
        }
    }

    /// Edge inserts, edge deletes and blocked writes seen so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self, op: StoreOp) -> StoreResult<()> {
        if self.failing.lock().unwrap().contains(&op) {
            return Err(StoreError::connectivity(format!(
                "injected: connection reset during {op:?}"
            )));
        }
        Ok(())
    }

    fn count_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl GraphStore for FlakyStore {
    async fn upsert_node(&self, node: &TaskNode) -> StoreResult<()> {
        self.inner.upsert_node(node).await
    }

    async fn get_node(&self, id: &TaskId) -> StoreResult<Option<TaskNode>> {
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        self.check(StoreOp::GetNode)?;
        self.inner.get_node(id).await
    }

    async fn insert_edge(&self, relation: &DependencyRelation) -> StoreResult<()> {
        self.check(StoreOp::InsertEdge)?;
        self.count_write();
        self.inner.insert_edge(relation).await
    }

    async fn delete_edge(&self, relation: &DependencyRelation) -> StoreResult<()> {
        self.check(StoreOp::DeleteEdge)?;
        self.count_write();
        self.inner.delete_edge(relation).await
    }

    async fn edge_exists(&self, relation: &DependencyRelation) -> StoreResult<bool> {
        self.check(StoreOp::EdgeExists)?;
        self.inner.edge_exists(relation).await
    }

    async fn depends_transitively(&self, task: &TaskId, target: &TaskId) -> StoreResult<bool> {
        self.check(StoreOp::DependsTransitively)?;
        self.inner.depends_transitively(task, target).await
    }

    async fn dependencies_of(&self, task: &TaskId) -> StoreResult<Vec<TaskNode>> {
        self.check(StoreOp::DependenciesOf)?;
        self.inner.dependencies_of(task).await
    }

    async fn set_blocked(&self, task: &TaskId, blocked: bool) -> StoreResult<()> {
        self.check(StoreOp::SetBlocked)?;
        self.count_write();
        self.inner.set_blocked(task, blocked).await
    }

    async fn nodes_in_project(&self, project: &ProjectId) -> StoreResult<Vec<TaskNode>> {
        self.inner.nodes_in_project(project).await
    }

    async fn edges_in_project(&self, project: &ProjectId) -> StoreResult<Vec<DependencyRelation>> {
        self.inner.edges_in_project(project).await
    }
}
