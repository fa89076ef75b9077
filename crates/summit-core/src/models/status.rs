//! Status enumerations for objectives, plans and plan tasks.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Type-safe enumeration of objective statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveStatus {
    /// Objective has been recorded but not yet decomposed
    #[default]
    Submitted,

    /// Plans are being drafted for the objective
    Planning,

    /// At least one plan is being executed
    Working,

    /// Progress is waiting on something outside the hierarchy
    Blocked,

    /// Objective reached its goal
    Completed,

    /// Objective could not be achieved
    Failed,

    /// Objective was abandoned
    Canceled,
}

impl ObjectiveStatus {
    /// Every objective status, in declaration order.
    pub const ALL: [ObjectiveStatus; 7] = [
        ObjectiveStatus::Submitted,
        ObjectiveStatus::Planning,
        ObjectiveStatus::Working,
        ObjectiveStatus::Blocked,
        ObjectiveStatus::Completed,
        ObjectiveStatus::Failed,
        ObjectiveStatus::Canceled,
    ];

    /// Convert to the wire and database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveStatus::Submitted => "submitted",
            ObjectiveStatus::Planning => "planning",
            ObjectiveStatus::Working => "working",
            ObjectiveStatus::Blocked => "blocked",
            ObjectiveStatus::Completed => "completed",
            ObjectiveStatus::Failed => "failed",
            ObjectiveStatus::Canceled => "canceled",
        }
    }
}

impl FromStr for ObjectiveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "submitted" => Ok(ObjectiveStatus::Submitted),
            "planning" => Ok(ObjectiveStatus::Planning),
            "working" => Ok(ObjectiveStatus::Working),
            "blocked" => Ok(ObjectiveStatus::Blocked),
            "completed" => Ok(ObjectiveStatus::Completed),
            "failed" => Ok(ObjectiveStatus::Failed),
            "canceled" | "cancelled" => Ok(ObjectiveStatus::Canceled),
            _ => Err(format!("Invalid objective status: {s}")),
        }
    }
}

/// Type-safe enumeration of plan statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Plan is waiting to be started
    #[default]
    Pending,

    /// Plan tasks are being executed
    Working,

    /// Plan is waiting on input or another plan
    Blocked,

    /// All plan tasks finished
    Completed,

    /// Plan could not be carried out
    Failed,

    /// Plan was deliberately not executed
    Skipped,
}

impl PlanStatus {
    /// Every plan status, in declaration order.
    pub const ALL: [PlanStatus; 6] = [
        PlanStatus::Pending,
        PlanStatus::Working,
        PlanStatus::Blocked,
        PlanStatus::Completed,
        PlanStatus::Failed,
        PlanStatus::Skipped,
    ];

    /// Convert to the wire and database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Pending => "pending",
            PlanStatus::Working => "working",
            PlanStatus::Blocked => "blocked",
            PlanStatus::Completed => "completed",
            PlanStatus::Failed => "failed",
            PlanStatus::Skipped => "skipped",
        }
    }
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PlanStatus::Pending),
            "working" => Ok(PlanStatus::Working),
            "blocked" => Ok(PlanStatus::Blocked),
            "completed" => Ok(PlanStatus::Completed),
            "failed" => Ok(PlanStatus::Failed),
            "skipped" => Ok(PlanStatus::Skipped),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

/// State of a linked task in the external single-level task protocol.
///
/// Plan tasks only mirror this value; no transition rules apply to it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    InputRequired,
    Completed,
    Canceled,
    Failed,
    Rejected,
    AuthRequired,
    Unknown,
}

impl TaskState {
    /// Convert to the wire and database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Submitted => "submitted",
            TaskState::Working => "working",
            TaskState::InputRequired => "input-required",
            TaskState::Completed => "completed",
            TaskState::Canceled => "canceled",
            TaskState::Failed => "failed",
            TaskState::Rejected => "rejected",
            TaskState::AuthRequired => "auth-required",
            TaskState::Unknown => "unknown",
        }
    }
}

impl FromStr for TaskState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "submitted" => Ok(TaskState::Submitted),
            "working" => Ok(TaskState::Working),
            "input-required" | "input_required" => Ok(TaskState::InputRequired),
            "completed" => Ok(TaskState::Completed),
            "canceled" | "cancelled" => Ok(TaskState::Canceled),
            "failed" => Ok(TaskState::Failed),
            "rejected" => Ok(TaskState::Rejected),
            "auth-required" | "auth_required" => Ok(TaskState::AuthRequired),
            "unknown" => Ok(TaskState::Unknown),
            _ => Err(format!("Invalid task state: {s}")),
        }
    }
}
