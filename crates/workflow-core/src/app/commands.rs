//! Command handlers - 書き込み系の調停
//!
//! Each handler wraps one intent plus its mandated follow-up recompute.
//! - AddDependency: recompute failure is logged, the command still succeeds.
//! - RemoveDependency: recompute failure is the command's failure.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{DependencyRelation, Result, TaskId, TaskNode};
use crate::ports::WorkflowCommandContext;

/// Marker for write intents.
pub trait Command: Send + 'static {}

/// CommandHandler は Command を一回の request/response で処理する
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct AddDependencyCommand {
    pub dependency: DependencyRelation,
}

impl Command for AddDependencyCommand {}

#[derive(Debug, Clone)]
pub struct RemoveDependencyCommand {
    pub from: TaskId,
    pub to: TaskId,
}

impl Command for RemoveDependencyCommand {}

#[derive(Debug, Clone)]
pub struct EnsureTaskNodeCommand {
    pub node: TaskNode,
}

impl Command for EnsureTaskNodeCommand {}

/// Administrative correction of the blocked flag.
#[derive(Debug, Clone)]
pub struct SetBlockedStatusCommand {
    pub task: TaskId,
    pub blocked: bool,
}

impl Command for SetBlockedStatusCommand {}

pub struct AddDependencyHandler {
    ctx: Arc<dyn WorkflowCommandContext>,
}

impl AddDependencyHandler {
    pub fn new(ctx: Arc<dyn WorkflowCommandContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl CommandHandler<AddDependencyCommand> for AddDependencyHandler {
    async fn handle(&self, command: AddDependencyCommand) -> Result<()> {
        let AddDependencyCommand { dependency } = command;
        self.ctx.add_dependency(&dependency).await?;

        if let Err(err) = self.ctx.update_blocked_status(&dependency.to).await {
            warn!(
                task = %dependency.to,
                error = %err,
                "dependency added, but failed to update blocked status"
            );
        }
        Ok(())
    }
}

pub struct RemoveDependencyHandler {
    ctx: Arc<dyn WorkflowCommandContext>,
}

impl RemoveDependencyHandler {
    pub fn new(ctx: Arc<dyn WorkflowCommandContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl CommandHandler<RemoveDependencyCommand> for RemoveDependencyHandler {
    async fn handle(&self, command: RemoveDependencyCommand) -> Result<()> {
        let RemoveDependencyCommand { from, to } = command;
        info!(%from, %to, "removing dependency");

        self.ctx.remove_dependency(&from, &to).await?;
        self.ctx.update_blocked_status(&to).await
    }
}

pub struct EnsureTaskNodeHandler {
    ctx: Arc<dyn WorkflowCommandContext>,
}

impl EnsureTaskNodeHandler {
    pub fn new(ctx: Arc<dyn WorkflowCommandContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl CommandHandler<EnsureTaskNodeCommand> for EnsureTaskNodeHandler {
    async fn handle(&self, command: EnsureTaskNodeCommand) -> Result<()> {
        self.ctx.ensure_task_node(&command.node).await
    }
}

pub struct SetBlockedStatusHandler {
    ctx: Arc<dyn WorkflowCommandContext>,
}

impl SetBlockedStatusHandler {
    pub fn new(ctx: Arc<dyn WorkflowCommandContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl CommandHandler<SetBlockedStatusCommand> for SetBlockedStatusHandler {
    async fn handle(&self, command: SetBlockedStatusCommand) -> Result<()> {
        self.ctx
            .set_blocked_status(&command.task, command.blocked)
            .await
    }
}
