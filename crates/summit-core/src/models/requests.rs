//! Request types handed to the store for creating and updating records.
//!
//! These carry already-validated values. Identity fields (`id`, parent ids,
//! creation timestamps) are deliberately absent from the update types, so no
//! caller can overwrite them through an update.

use jiff::Timestamp;

use super::{Metadata, Objective, ObjectiveStatus, Plan, PlanStatus, PlanTask, TaskState};

/// Fields for a new objective.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewObjective {
    pub name: String,
    pub description: Option<String>,
    pub metadata: Option<Metadata>,
}

/// Partial update of an objective. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectiveUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ObjectiveStatus>,
    pub metadata: Option<Metadata>,
}

/// Fields for a new plan, optionally with its initial tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPlan {
    pub objective_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Tasks in execution order; their indices follow this order
    pub tasks: Vec<NewPlanTask>,
    pub dependencies: Vec<String>,
    pub metadata: Option<Metadata>,
}

/// Fields for a task created together with (or appended to) a plan.
///
/// Each dependency is either a literal task id or a `task-<N>` placeholder
/// naming the N-th task of the same request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPlanTask {
    pub name: String,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
    pub metadata: Option<Metadata>,
}

/// Partial update of a plan. The parent objective can never change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<PlanStatus>,
    pub dependencies: Option<Vec<String>>,
    pub metadata: Option<Metadata>,
}

/// Partial update of a plan task. Parent ids and index never change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanTaskUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskState>,
    pub a2a_task_id: Option<String>,
    pub dependencies: Option<Vec<String>>,
    pub metadata: Option<Metadata>,
}

impl ObjectiveUpdate {
    /// Applies the supplied fields and stamps `updated_at`.
    pub(crate) fn apply_to(self, objective: &mut Objective, now: Timestamp) {
        if let Some(name) = self.name {
            objective.name = name;
        }
        if let Some(description) = self.description {
            objective.description = Some(description);
        }
        if let Some(status) = self.status {
            objective.status = status;
        }
        if let Some(metadata) = self.metadata {
            objective.metadata = Some(metadata);
        }
        objective.updated_at = now;
    }
}

impl PlanUpdate {
    /// Applies the supplied fields and stamps `updated_at`.
    pub(crate) fn apply_to(self, plan: &mut Plan, now: Timestamp) {
        if let Some(name) = self.name {
            plan.name = name;
        }
        if let Some(description) = self.description {
            plan.description = Some(description);
        }
        if let Some(status) = self.status {
            plan.status = status;
        }
        if let Some(dependencies) = self.dependencies {
            plan.dependencies = dependencies;
        }
        if let Some(metadata) = self.metadata {
            plan.metadata = Some(metadata);
        }
        plan.updated_at = now;
    }
}

impl PlanTaskUpdate {
    /// Applies the supplied fields and stamps `updated_at`.
    pub(crate) fn apply_to(self, task: &mut PlanTask, now: Timestamp) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(status) = self.status {
            task.status = Some(status);
        }
        if let Some(a2a_task_id) = self.a2a_task_id {
            task.a2a_task_id = Some(a2a_task_id);
        }
        if let Some(dependencies) = self.dependencies {
            task.dependencies = dependencies;
        }
        if let Some(metadata) = self.metadata {
            task.metadata = Some(metadata);
        }
        task.updated_at = now;
    }
}
