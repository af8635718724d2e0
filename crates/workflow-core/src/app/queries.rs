//! Query handlers - 読み取り専用の射影
//!
//! Thin pass-throughs to `WorkflowQueryContext`; they exist so the read path
//! can be exercised without a transport layer.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{DependencyRelation, ProjectId, Result, TaskId, TaskNode, WorkflowGraph};
use crate::ports::WorkflowQueryContext;

/// A read request and the shape of its answer.
pub trait Query: Send + 'static {
    type Output: Send;
}

#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, query: Q) -> Result<Q::Output>;
}

#[derive(Debug, Clone)]
pub struct GetDependenciesQuery {
    pub task: TaskId,
}

impl Query for GetDependenciesQuery {
    type Output = Vec<TaskNode>;
}

#[derive(Debug, Clone)]
pub struct GetProjectDependenciesQuery {
    pub project: ProjectId,
}

impl Query for GetProjectDependenciesQuery {
    type Output = Vec<DependencyRelation>;
}

#[derive(Debug, Clone)]
pub struct GetWorkflowGraphQuery {
    pub project: ProjectId,
}

impl Query for GetWorkflowGraphQuery {
    type Output = WorkflowGraph;
}

/// Serves every workflow query from one read context.
pub struct WorkflowQueryHandler {
    ctx: Arc<dyn WorkflowQueryContext>,
}

impl WorkflowQueryHandler {
    pub fn new(ctx: Arc<dyn WorkflowQueryContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl QueryHandler<GetDependenciesQuery> for WorkflowQueryHandler {
    async fn handle(&self, query: GetDependenciesQuery) -> Result<Vec<TaskNode>> {
        self.ctx.get_dependencies(&query.task).await
    }
}

#[async_trait]
impl QueryHandler<GetProjectDependenciesQuery> for WorkflowQueryHandler {
    async fn handle(&self, query: GetProjectDependenciesQuery) -> Result<Vec<DependencyRelation>> {
        self.ctx.get_project_dependencies(&query.project).await
    }
}

#[async_trait]
impl QueryHandler<GetWorkflowGraphQuery> for WorkflowQueryHandler {
    async fn handle(&self, query: GetWorkflowGraphQuery) -> Result<WorkflowGraph> {
        self.ctx.get_workflow_by_project(&query.project).await
    }
}
