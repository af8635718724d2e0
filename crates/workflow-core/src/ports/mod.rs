//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! - `GraphStore`: グラフストア（Neo4j / InMemory）への唯一の入口
//! - `WorkflowCommandContext` / `WorkflowQueryContext`: handlers から見たエンジンの能力

pub mod graph_store;
pub mod workflow;

pub use self::graph_store::{GraphStore, StoreResult};
pub use self::workflow::{WorkflowCommandContext, WorkflowQueryContext};
