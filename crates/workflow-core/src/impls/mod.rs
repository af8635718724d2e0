//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryGraphStore**: 開発・テスト用のグラフストア
//!
//! 本番用のストア実装（Neo4j など）は別クレートに配置します。

pub mod inmem_graph;

pub use self::inmem_graph::InMemoryGraphStore;
