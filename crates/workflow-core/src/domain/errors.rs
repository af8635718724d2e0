//! Errors - エラー型と分類
//!
//! - `StoreError`: graph store failures (connectivity, query, decode); always retryable.
//! - `WorkflowError`: what the command/query surface returns.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use super::TaskId;

/// Classification of a graph store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The store could not be reached.
    Connectivity,
    /// The store rejected or failed a query/write.
    Query,
    /// A record came back in an unexpected shape.
    Decode,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StoreErrorKind::Connectivity => "connectivity",
            StoreErrorKind::Query => "query",
            StoreErrorKind::Decode => "decode",
        };
        f.write_str(s)
    }
}

/// Failure reported by a `GraphStore` implementation, with its underlying cause.
#[derive(Debug, Error)]
#[error("graph store {kind} error: {message}")]
pub struct StoreError {
    kind: StoreErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Connectivity, message)
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Query, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Decode, message)
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors surfaced by the engine and its command/query handlers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkflowError {
    /// One or both endpoints of a proposed edge are not registered.
    #[error("task not found: one or both of '{from}' and '{to}' do not exist")]
    TaskNotFound { from: TaskId, to: TaskId },

    /// The exact edge is already present; nothing to do.
    #[error("dependency already exists: {from} -> {to}")]
    DependencyExists { from: TaskId, to: TaskId },

    /// The edge would close a cycle (or is a self-dependency).
    #[error("cannot add dependency {from} -> {to}: cycle detected")]
    Cycle { from: TaskId, to: TaskId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WorkflowError {
    /// Only store failures are worth retrying unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WorkflowError::Store(_))
    }
}

pub type Result<T, E = WorkflowError> = std::result::Result<T, E>;
