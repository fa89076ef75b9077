//! Plan operations for the Hierarchy.

use log::{debug, warn};

use super::{Hierarchy, StatusChange};
use crate::{
    error::{HierarchyError, Result},
    models::Plan,
    params::{CreatePlan, GetPlan, Id, ListPlans, UpdatePlan},
    transitions::ensure_transition,
};

fn plan_not_found(id: &str) -> HierarchyError {
    HierarchyError::PlanNotFound { id: id.to_string() }
}

impl Hierarchy {
    /// Creates a plan, and any tasks given with it, under an existing
    /// objective.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::ObjectiveNotFound` when the parent does not
    /// exist; nothing is created in that case.
    pub async fn create_plan(&self, params: CreatePlan) -> Result<Plan> {
        let new = params.into_new()?;
        self.ensure_objective_exists(&new.objective_id).await?;

        let plan = self.store.create_plan(new).await?;
        debug!(
            "Created plan {} with {} tasks under {}",
            plan.id,
            plan.tasks.as_slice().len(),
            plan.objective_id
        );
        Ok(plan)
    }

    /// Retrieves a plan, with its tasks unless suppressed.
    pub async fn get_plan(&self, params: &GetPlan) -> Result<Plan> {
        params.validate()?;
        let mut plan = self
            .store
            .get_plan(&params.id)
            .await?
            .ok_or_else(|| plan_not_found(&params.id))?;

        if !params.include_tasks {
            plan.tasks.omit();
        }
        Ok(plan)
    }

    /// Lists the plans of an objective, oldest first.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Vec<Plan>> {
        params.validate()?;
        self.ensure_objective_exists(&params.objective_id).await?;

        let mut plans = self.store.plans_for_objective(&params.objective_id).await?;
        if !params.include_tasks {
            for plan in &mut plans {
                plan.tasks.omit();
            }
        }
        Ok(plans)
    }

    /// Applies a partial update to a plan.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::PlanNotFound` for an unknown id and
    /// `HierarchyError::InvalidTransition` for an illegal status change.
    pub async fn update_plan(&self, params: UpdatePlan) -> Result<Plan> {
        let (id, update) = params.into_update()?;

        let current = self
            .store
            .get_plan(&id)
            .await?
            .ok_or_else(|| plan_not_found(&id))?;

        if let Some(next) = update.status {
            ensure_transition(current.status, next).inspect_err(|e| warn!("{e} ({id})"))?;
        }

        let updated = self
            .store
            .update_plan(&id, update)
            .await?
            .ok_or_else(|| plan_not_found(&id))?;

        if updated.status != current.status {
            self.notify(StatusChange::Plan {
                id: updated.id.clone(),
                objective_id: updated.objective_id.clone(),
                from: current.status,
                to: updated.status,
            })
            .await;
        }

        Ok(updated)
    }

    /// Deletes a plan and its tasks. Sibling plans are untouched.
    pub async fn delete_plan(&self, params: &Id) -> Result<()> {
        params.validate()?;
        if !self.store.delete_plan(&params.id).await? {
            return Err(plan_not_found(&params.id));
        }
        debug!("Deleted plan {}", params.id);
        Ok(())
    }

    pub(crate) async fn ensure_objective_exists(&self, id: &str) -> Result<()> {
        match self.store.get_objective(id).await? {
            Some(_) => Ok(()),
            None => Err(HierarchyError::ObjectiveNotFound { id: id.to_string() }),
        }
    }

    pub(crate) async fn ensure_plan_exists(&self, id: &str) -> Result<()> {
        match self.store.get_plan(id).await? {
            Some(_) => Ok(()),
            None => Err(plan_not_found(id)),
        }
    }
}
