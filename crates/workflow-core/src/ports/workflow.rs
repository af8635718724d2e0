//! Workflow capability ports - command/query handlers が依存する狭いインターフェース
//!
//! Handlers never see a concrete engine or store client; anything that
//! implements these traits (the engine, a test double) can stand behind them.

use async_trait::async_trait;

use crate::domain::{DependencyRelation, ProjectId, Result, TaskId, TaskNode, WorkflowGraph};

/// Write capability consumed by command handlers.
#[async_trait]
pub trait WorkflowCommandContext: Send + Sync {
    async fn add_dependency(&self, relation: &DependencyRelation) -> Result<()>;

    async fn remove_dependency(&self, from: &TaskId, to: &TaskId) -> Result<()>;

    async fn update_blocked_status(&self, task: &TaskId) -> Result<()>;

    async fn ensure_task_node(&self, node: &TaskNode) -> Result<()>;

    /// Administrative override; bypasses recomputation.
    async fn set_blocked_status(&self, task: &TaskId, blocked: bool) -> Result<()>;
}

/// Read capability consumed by query handlers.
#[async_trait]
pub trait WorkflowQueryContext: Send + Sync {
    async fn get_dependencies(&self, task: &TaskId) -> Result<Vec<TaskNode>>;

    async fn get_project_dependencies(&self, project: &ProjectId) -> Result<Vec<DependencyRelation>>;

    async fn get_workflow_by_project(&self, project: &ProjectId) -> Result<WorkflowGraph>;
}
