//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Metadata, PlanStatus, PlanTask, Population};
use crate::ids::wire_timestamp;

/// A named, ordered approach belonging to exactly one objective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Unique identifier (`plan-…`)
    pub id: String,

    /// ID of the parent objective (never changes)
    pub objective_id: String,

    /// Name of the plan
    pub name: String,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: PlanStatus,

    /// Tasks ordered by index; omitted when not requested
    #[serde(default, skip_serializing_if = "Population::is_omitted")]
    pub tasks: Population<PlanTask>,

    /// IDs of plans this plan depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    /// Free-form caller metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Timestamp when the plan was created (UTC)
    #[serde(with = "wire_timestamp")]
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    #[serde(with = "wire_timestamp")]
    pub updated_at: Timestamp,
}
