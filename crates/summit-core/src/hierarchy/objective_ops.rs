//! Objective operations for the Hierarchy.

use log::{debug, warn};

use super::{Hierarchy, StatusChange};
use crate::{
    error::{HierarchyError, Result},
    models::{Objective, ObjectivePage, Population},
    params::{CreateObjective, GetObjective, Id, ListObjectives, UpdateObjective},
    transitions::ensure_transition,
};

fn objective_not_found(id: &str) -> HierarchyError {
    HierarchyError::ObjectiveNotFound { id: id.to_string() }
}

/// Drops the child collections the caller did not ask for.
pub(crate) fn apply_population(objective: &mut Objective, include_plans: bool, include_tasks: bool) {
    if !include_plans {
        objective.plans = Population::Omitted;
    } else if !include_tasks {
        if let Some(plans) = objective.plans.loaded_mut() {
            for plan in plans.iter_mut() {
                plan.tasks.omit();
            }
        }
    }
}

impl Hierarchy {
    /// Creates a new objective in the `submitted` status.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::InvalidInput` when the name is blank.
    pub async fn create_objective(&self, params: CreateObjective) -> Result<Objective> {
        let new = params.into_new()?;
        let objective = self.store.create_objective(new).await?;
        debug!("Created objective {}", objective.id);
        Ok(objective)
    }

    /// Retrieves an objective, populating children as requested.
    pub async fn get_objective(&self, params: &GetObjective) -> Result<Objective> {
        params.validate()?;
        let mut objective = self
            .store
            .get_objective(&params.id)
            .await?
            .ok_or_else(|| objective_not_found(&params.id))?;

        apply_population(&mut objective, params.include_plans, params.include_tasks);
        Ok(objective)
    }

    /// Lists objectives newest first, one page at a time.
    pub async fn list_objectives(&self, params: ListObjectives) -> Result<ObjectivePage> {
        let filter = params.into_filter(self.default_page_size);
        self.store.list_objectives(&filter).await
    }

    /// Applies a partial update to an objective.
    ///
    /// A requested status change is checked against the objective transition
    /// table before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::ObjectiveNotFound` for an unknown id and
    /// `HierarchyError::InvalidTransition` for an illegal status change.
    pub async fn update_objective(&self, params: UpdateObjective) -> Result<Objective> {
        let (id, update) = params.into_update()?;

        let current = self
            .store
            .get_objective(&id)
            .await?
            .ok_or_else(|| objective_not_found(&id))?;

        if let Some(next) = update.status {
            ensure_transition(current.status, next).inspect_err(|e| warn!("{e} ({id})"))?;
        }

        let updated = self
            .store
            .update_objective(&id, update)
            .await?
            .ok_or_else(|| objective_not_found(&id))?;

        if updated.status != current.status {
            self.notify(StatusChange::Objective {
                id: updated.id.clone(),
                from: current.status,
                to: updated.status,
            })
            .await;
        }

        Ok(updated)
    }

    /// Permanently deletes an objective with all of its plans and tasks.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::ObjectiveNotFound` for an unknown id.
    pub async fn delete_objective(&self, params: &Id) -> Result<()> {
        params.validate()?;
        if !self.store.delete_objective(&params.id).await? {
            return Err(objective_not_found(&params.id));
        }
        debug!("Deleted objective {}", params.id);
        Ok(())
    }
}
