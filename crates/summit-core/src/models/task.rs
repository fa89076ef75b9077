//! Plan task model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Metadata, TaskState};
use crate::ids::wire_timestamp;

/// Atomic work item within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanTask {
    /// Unique identifier (`task-…`)
    pub id: String,

    /// ID of the parent plan
    pub plan_id: String,

    /// ID of the owning objective, denormalized for direct lookup
    pub objective_id: String,

    /// Name of the task
    pub name: String,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Position of the task within its plan (0-indexed, contiguous)
    pub index: u32,

    /// IDs of sibling tasks this task waits for
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    /// Linked task in the external task protocol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a2a_task_id: Option<String>,

    /// Mirrored state of the linked external task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskState>,

    /// Free-form caller metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Timestamp when the task was created (UTC)
    #[serde(with = "wire_timestamp")]
    pub created_at: Timestamp,

    /// Timestamp when the task was last modified (UTC)
    #[serde(with = "wire_timestamp")]
    pub updated_at: Timestamp,
}
