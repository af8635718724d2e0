//! WorkflowEngine - the dependency graph engine.
//!
//! Owns the edge invariants (no self-loop, no duplicate, no cycle) and the
//! blocked-status rule. It keeps no state between calls; everything lives in
//! the `GraphStore`.
//!
//! Blocked rule: a task is blocked iff it has at least one depends-on edge.
//! The dependency's own completion state is not consulted, so a task stays
//! blocked until the edge is removed.

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::{
    DependencyRelation, ProjectId, Result, TaskId, TaskNode, WorkflowError, WorkflowGraph,
};
use crate::ports::{GraphStore, WorkflowCommandContext, WorkflowQueryContext};

pub struct WorkflowEngine<S> {
    store: S,
    /// Present when `serialize_mutations` is on.
    mutation_lock: Option<Mutex<()>>,
}

impl<S: GraphStore> WorkflowEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, &EngineConfig::default())
    }

    pub fn with_config(store: S, config: &EngineConfig) -> Self {
        Self {
            store,
            mutation_lock: config.serialize_mutations.then(|| Mutex::new(())),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn lock_mutations(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.mutation_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }

    /// Create-only upsert; metadata of an existing node is not updated.
    pub async fn ensure_node(&self, node: &TaskNode) -> Result<()> {
        self.store.upsert_node(node).await?;
        debug!(task = %node.id, project = %node.project_id, "task node ensured");
        Ok(())
    }

    pub async fn tasks_exist(&self, a: &TaskId, b: &TaskId) -> Result<bool> {
        if self.store.get_node(a).await?.is_none() {
            return Ok(false);
        }
        Ok(self.store.get_node(b).await?.is_some())
    }

    pub async fn dependency_exists(&self, from: &TaskId, to: &TaskId) -> Result<bool> {
        let relation = DependencyRelation::new(from.clone(), to.clone());
        Ok(self.store.edge_exists(&relation).await?)
    }

    /// Would `from -> to` close a cycle?
    ///
    /// A self-loop answers without touching the store. Otherwise the edge
    /// closes a cycle iff `from` already depends, transitively, on `to`.
    pub async fn creates_cycle(&self, from: &TaskId, to: &TaskId) -> Result<bool> {
        if from == to {
            return Ok(true);
        }
        Ok(self.store.depends_transitively(from, to).await?)
    }

    /// Validate and write one depends-on edge.
    ///
    /// Checks run in order and short-circuit: existence, duplicate, cycle.
    /// The edge write marks `to` blocked in the same transaction; the
    /// recompute that follows is best-effort and only logged on failure.
    pub async fn add_dependency(&self, relation: &DependencyRelation) -> Result<()> {
        let _guard = self.lock_mutations().await;
        let DependencyRelation { from, to } = relation;

        if !self.tasks_exist(from, to).await? {
            debug!(%from, %to, "dependency rejected: task not found");
            return Err(WorkflowError::TaskNotFound {
                from: from.clone(),
                to: to.clone(),
            });
        }
        if self.dependency_exists(from, to).await? {
            debug!(%from, %to, "dependency rejected: already exists");
            return Err(WorkflowError::DependencyExists {
                from: from.clone(),
                to: to.clone(),
            });
        }
        if self.creates_cycle(from, to).await? {
            debug!(%from, %to, "dependency rejected: cycle");
            return Err(WorkflowError::Cycle {
                from: from.clone(),
                to: to.clone(),
            });
        }

        self.store.insert_edge(relation).await?;
        info!(%from, %to, "dependency added");

        if let Err(err) = self.update_blocked_status(to).await {
            warn!(task = %to, error = %err, "dependency added, but blocked status recompute failed");
        }
        Ok(())
    }

    /// Delete the edge (absent edges are fine) and recompute `to`.
    ///
    /// Unlike `add_dependency`, a failed recompute fails the whole call.
    pub async fn remove_dependency(&self, from: &TaskId, to: &TaskId) -> Result<()> {
        let _guard = self.lock_mutations().await;
        let relation = DependencyRelation::new(from.clone(), to.clone());

        self.store.delete_edge(&relation).await?;
        info!(%from, %to, "dependency removed");

        self.update_blocked_status(to).await
    }

    /// Full recompute of `blocked` from the current edge count; safe to repeat.
    pub async fn update_blocked_status(&self, task: &TaskId) -> Result<()> {
        let dependencies = self.store.dependencies_of(task).await?;
        let blocked = !dependencies.is_empty();
        self.store.set_blocked(task, blocked).await?;
        info!(%task, blocked, "blocked status updated");
        Ok(())
    }

    /// Administrative override: writes the flag verbatim, no recompute.
    pub async fn set_blocked_status(&self, task: &TaskId, blocked: bool) -> Result<()> {
        self.store.set_blocked(task, blocked).await?;
        info!(%task, blocked, "blocked status overridden");
        Ok(())
    }

    /// Direct dependencies only; not transitive.
    pub async fn get_dependencies(&self, task: &TaskId) -> Result<Vec<TaskNode>> {
        Ok(self.store.dependencies_of(task).await?)
    }

    /// Edges whose dependent is in `project`; the dependency side is not filtered.
    pub async fn get_project_dependencies(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<DependencyRelation>> {
        Ok(self.store.edges_in_project(project).await?)
    }

    /// Nodes and edges of a project, read in two independent steps.
    pub async fn get_workflow_by_project(&self, project: &ProjectId) -> Result<WorkflowGraph> {
        let nodes = self.store.nodes_in_project(project).await?;
        let dependencies = self.store.edges_in_project(project).await?;
        Ok(WorkflowGraph {
            nodes,
            dependencies,
        })
    }
}

#[async_trait]
impl<S: GraphStore> WorkflowCommandContext for WorkflowEngine<S> {
    async fn add_dependency(&self, relation: &DependencyRelation) -> Result<()> {
        WorkflowEngine::add_dependency(self, relation).await
    }

    async fn remove_dependency(&self, from: &TaskId, to: &TaskId) -> Result<()> {
        WorkflowEngine::remove_dependency(self, from, to).await
    }

    async fn update_blocked_status(&self, task: &TaskId) -> Result<()> {
        WorkflowEngine::update_blocked_status(self, task).await
    }

    async fn ensure_task_node(&self, node: &TaskNode) -> Result<()> {
        self.ensure_node(node).await
    }

    async fn set_blocked_status(&self, task: &TaskId, blocked: bool) -> Result<()> {
        WorkflowEngine::set_blocked_status(self, task, blocked).await
    }
}

#[async_trait]
impl<S: GraphStore> WorkflowQueryContext for WorkflowEngine<S> {
    async fn get_dependencies(&self, task: &TaskId) -> Result<Vec<TaskNode>> {
        WorkflowEngine::get_dependencies(self, task).await
    }

    async fn get_project_dependencies(&self, project: &ProjectId) -> Result<Vec<DependencyRelation>> {
        WorkflowEngine::get_project_dependencies(self, project).await
    }

    async fn get_workflow_by_project(&self, project: &ProjectId) -> Result<WorkflowGraph> {
        WorkflowEngine::get_workflow_by_project(self, project).await
    }
}
