//! App - アプリケーション層
//!
//! # 主要コンポーネント
//! - **WorkflowEngine**: 依存グラフの不変条件（自己ループ・重複・循環の禁止）と blocked 導出
//! - **Command handlers**: AddDependency / RemoveDependency / EnsureTaskNode / SetBlockedStatus
//! - **Query handlers**: GetDependencies / GetProjectDependencies / GetWorkflowGraph

pub mod commands;
pub mod engine;
pub mod queries;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::commands::{
    AddDependencyCommand, AddDependencyHandler, Command, CommandHandler, EnsureTaskNodeCommand,
    EnsureTaskNodeHandler, RemoveDependencyCommand, RemoveDependencyHandler,
    SetBlockedStatusCommand, SetBlockedStatusHandler,
};
pub use self::engine::WorkflowEngine;
pub use self::queries::{
    GetDependenciesQuery, GetProjectDependenciesQuery, GetWorkflowGraphQuery, Query, QueryHandler,
    WorkflowQueryHandler,
};
