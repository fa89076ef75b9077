//! Plan task operations for the Hierarchy.

use log::debug;

use super::{Hierarchy, StatusChange};
use crate::{
    error::{HierarchyError, Result},
    models::PlanTask,
    params::{AddTasks, LinkTask, ListTasks, UpdateTask},
};

fn task_not_found(id: &str) -> HierarchyError {
    HierarchyError::TaskNotFound { id: id.to_string() }
}

impl Hierarchy {
    /// Returns the tasks of a plan in index order.
    pub async fn list_tasks(&self, params: &ListTasks) -> Result<Vec<PlanTask>> {
        params.validate()?;
        self.ensure_plan_exists(&params.plan_id).await?;
        self.store.tasks_for_plan(&params.plan_id).await
    }

    /// Appends tasks to an existing plan.
    ///
    /// `task-<N>` placeholders in the new tasks' dependencies refer to
    /// positions within this request.
    pub async fn add_tasks(&self, params: AddTasks) -> Result<Vec<PlanTask>> {
        let (plan_id, tasks) = params.into_new()?;
        let added = self
            .store
            .add_tasks(&plan_id, tasks)
            .await?
            .ok_or(HierarchyError::PlanNotFound { id: plan_id })?;
        debug!("Added {} tasks", added.len());
        Ok(added)
    }

    /// Applies a partial update to a task. Task status mirrors the external
    /// protocol and is not checked against a transition table.
    pub async fn update_task(&self, params: UpdateTask) -> Result<PlanTask> {
        let (id, update) = params.into_update()?;

        let current = self
            .store
            .get_plan_task(&id)
            .await?
            .ok_or_else(|| task_not_found(&id))?;

        let updated = self
            .store
            .update_plan_task(&id, update)
            .await?
            .ok_or_else(|| task_not_found(&id))?;

        if updated.status != current.status {
            self.notify(StatusChange::Task {
                id: updated.id.clone(),
                plan_id: updated.plan_id.clone(),
                objective_id: updated.objective_id.clone(),
                from: current.status,
                to: updated.status,
            })
            .await;
        }

        Ok(updated)
    }

    /// Links a task to an external task, replacing any previous link, and
    /// returns the updated task.
    pub async fn link_task(&self, params: &LinkTask) -> Result<PlanTask> {
        params.validate()?;
        self.store
            .link_external_task(&params.id, &params.a2a_task_id)
            .await?;
        debug!("Linked {} to {}", params.id, params.a2a_task_id);

        self.store
            .get_plan_task(&params.id)
            .await?
            .ok_or_else(|| task_not_found(&params.id))
    }
}
