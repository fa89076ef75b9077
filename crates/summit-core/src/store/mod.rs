//! Storage abstraction for the objective → plan → task hierarchy.
//!
//! [`HierarchyStore`] is the contract every backend satisfies. Two backends
//! ship with the crate:
//!
//! - [`InMemoryStore`]: the reference backend, ordered maps behind one lock.
//! - [`crate::db::SqliteStore`]: a durable backend on SQLite.
//!
//! Stores report unknown ids as `Ok(None)` / `Ok(false)` rather than errors;
//! the hierarchy service turns those misses into not-found failures. Stores
//! never check status transitions and never verify that a parent exists before
//! creating a child; both are the caller's job.
//!
//! Each call is atomic on its own. Cascading deletes remove the whole subtree
//! before any reader can observe the result.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{
        NewObjective, NewPlan, NewPlanTask, Objective, ObjectiveFilter, ObjectivePage,
        ObjectiveUpdate, Plan, PlanTask, PlanTaskUpdate, PlanUpdate, StoreCounts,
    },
};

pub mod memory;
pub mod resolve;

pub use memory::InMemoryStore;

/// Persistence contract for objectives, plans and plan tasks.
#[async_trait]
pub trait HierarchyStore: Send + Sync {
    /// Creates an objective with the initial status and no plans.
    async fn create_objective(&self, new: NewObjective) -> Result<Objective>;

    /// Fetches an objective with its plans (each with its tasks) populated.
    async fn get_objective(&self, id: &str) -> Result<Option<Objective>>;

    /// Lists objectives newest first; plans are left unpopulated.
    async fn list_objectives(&self, filter: &ObjectiveFilter) -> Result<ObjectivePage>;

    /// Applies a partial update and refreshes `updated_at`.
    async fn update_objective(&self, id: &str, update: ObjectiveUpdate)
        -> Result<Option<Objective>>;

    /// Deletes an objective together with all of its plans and tasks.
    async fn delete_objective(&self, id: &str) -> Result<bool>;

    /// Creates a plan and its initial tasks in one step.
    async fn create_plan(&self, new: NewPlan) -> Result<Plan>;

    /// Fetches a plan with its tasks sorted by index.
    async fn get_plan(&self, id: &str) -> Result<Option<Plan>>;

    /// Plans of an objective, oldest first, each with its tasks.
    async fn plans_for_objective(&self, objective_id: &str) -> Result<Vec<Plan>>;

    /// Applies a partial update and refreshes `updated_at`.
    async fn update_plan(&self, id: &str, update: PlanUpdate) -> Result<Option<Plan>>;

    /// Deletes a plan together with its tasks.
    async fn delete_plan(&self, id: &str) -> Result<bool>;

    /// Appends tasks to an existing plan, continuing its index sequence.
    async fn add_tasks(
        &self,
        plan_id: &str,
        tasks: Vec<NewPlanTask>,
    ) -> Result<Option<Vec<PlanTask>>>;

    /// Tasks of a plan sorted by index.
    async fn tasks_for_plan(&self, plan_id: &str) -> Result<Vec<PlanTask>>;

    /// Fetches a single plan task.
    async fn get_plan_task(&self, id: &str) -> Result<Option<PlanTask>>;

    /// Applies a partial update and refreshes `updated_at`.
    async fn update_plan_task(&self, id: &str, update: PlanTaskUpdate)
        -> Result<Option<PlanTask>>;

    /// Sets the external task link, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::TaskNotFound` when the task does not exist.
    async fn link_external_task(&self, task_id: &str, external_id: &str) -> Result<()>;

    /// Removes every record.
    async fn clear(&self) -> Result<()>;

    /// Number of stored records per entity.
    async fn counts(&self) -> Result<StoreCounts>;
}
