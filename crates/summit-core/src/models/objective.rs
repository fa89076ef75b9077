//! Objective model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Metadata, ObjectiveStatus, Plan, Population};
use crate::ids::wire_timestamp;

/// Top-level goal, root of the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    /// Unique identifier (`obj-…`)
    pub id: String,

    /// Human readable name of the objective
    pub name: String,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: ObjectiveStatus,

    /// Plans in creation order; omitted when not requested
    #[serde(default, skip_serializing_if = "Population::is_omitted")]
    pub plans: Population<Plan>,

    /// Free-form caller metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Timestamp when the objective was created (UTC)
    #[serde(with = "wire_timestamp")]
    pub created_at: Timestamp,

    /// Timestamp when the objective was last modified (UTC)
    #[serde(with = "wire_timestamp")]
    pub updated_at: Timestamp,
}
