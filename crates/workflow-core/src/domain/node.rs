use serde::{Deserialize, Serialize};

use super::{ProjectId, TaskId};

/// A task known to the workflow engine.
///
/// Identity and display metadata are mirrored from the task-management
/// system. `blocked` is derived: only the engine's recompute step (or the
/// explicit administrative override) writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskNode {
    pub id: TaskId,
    pub project_id: ProjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blocked: bool,
}

impl TaskNode {
    /// New unblocked node with empty display metadata.
    pub fn new(id: impl Into<TaskId>, project_id: impl Into<ProjectId>) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: String::new(),
            description: String::new(),
            blocked: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
