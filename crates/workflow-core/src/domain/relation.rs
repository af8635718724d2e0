use serde::{Deserialize, Serialize};
use std::fmt;

use super::TaskId;

/// A depends-on edge: `to` cannot proceed until `from` is resolved.
///
/// The edge carries no attributes beyond its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyRelation {
    #[serde(rename = "fromTaskId")]
    pub from: TaskId,
    #[serde(rename = "toTaskId")]
    pub to: TaskId,
}

impl DependencyRelation {
    pub fn new(from: impl Into<TaskId>, to: impl Into<TaskId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for DependencyRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_transport_field_names() {
        let rel: DependencyRelation =
            serde_json::from_value(json!({ "fromTaskId": "a", "toTaskId": "b" })).unwrap();
        assert_eq!(rel, DependencyRelation::new("a", "b"));
        assert!(!rel.is_self_loop());
        assert!(DependencyRelation::new("x", "x").is_self_loop());
    }
}
