//! workflow-core
//!
//! Task-dependency workflow engine: a directed graph of tasks and depends-on
//! edges per project, kept acyclic, with each task's blocked flag derived
//! from its dependencies.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, TaskNode, DependencyRelation, WorkflowGraph, errors）
//! - **ports**: 抽象化レイヤー（GraphStore, WorkflowCommandContext, WorkflowQueryContext）
//! - **app**: WorkflowEngine と command/query handlers
//! - **impls**: 実装（InMemoryGraphStore など開発用）
//! - **config**: EngineConfig
//!
//! The crate logs through `tracing` and never installs a subscriber.

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::WorkflowEngine;
pub use config::{ConfigError, EngineConfig};
pub use domain::{
    DependencyRelation, ProjectId, StoreError, TaskId, TaskNode, WorkflowError, WorkflowGraph,
};
pub use impls::InMemoryGraphStore;
pub use ports::GraphStore;
