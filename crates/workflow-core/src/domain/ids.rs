//! Domain identifiers (strongly-typed IDs).
//!
//! Task and project identifiers are owned by the task-management system and
//! arrive here as opaque strings; the engine only mirrors them.
//!
//! ## Phantom Type パターン
//! `Id<T>` で共通実装を提供しつつ、`T` はマーカー型（PhantomData）として
//! コンパイル時に TaskId と ProjectId の混同を防ぎます。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// `generate()` で使うプレフィックス（"task-", "project-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic string identifier.
///
/// Externally supplied ids are kept verbatim; no prefix is enforced on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<T: IdMarker> {
    value: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// Mint a fresh ULID-based id, e.g. `task-01J...`.
    pub fn generate() -> Self {
        Self::new(format!("{}{}", T::prefix(), Ulid::new()))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T: IdMarker> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Task のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {}

impl IdMarker for Task {
    fn prefix() -> &'static str {
        "task-"
    }
}

/// Project のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Project {}

impl IdMarker for Project {
    fn prefix() -> &'static str {
        "project-"
    }
}

/// Identifier of a task node (external task id).
pub type TaskId = Id<Task>;

/// Identifier of the project a task node belongs to.
pub type ProjectId = Id<Project>;
