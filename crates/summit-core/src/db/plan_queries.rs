//! Plan CRUD operations and queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::utils::{
    id_list_text, metadata_text, parse_enum, parse_id_list, parse_metadata, parse_time,
    timestamp_text,
};
use crate::{
    error::{DatabaseResultExt, Result},
    ids::{new_id, now, PLAN_PREFIX},
    models::{NewPlan, Plan, PlanStatus, PlanUpdate, Population},
    store::resolve::materialize_tasks,
};

use super::task_queries::select_plan_tasks;

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (id, objective_id, name, description, status, dependencies, metadata, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const SELECT_PLAN_SQL: &str = "SELECT id, objective_id, name, description, status, dependencies, metadata, created_at, updated_at FROM plans WHERE id = ?1";
const SELECT_OBJECTIVE_PLANS_SQL: &str = "SELECT id, objective_id, name, description, status, dependencies, metadata, created_at, updated_at FROM plans WHERE objective_id = ?1 ORDER BY created_at ASC, rowid ASC";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET name = ?1, description = ?2, status = ?3, dependencies = ?4, metadata = ?5, updated_at = ?6 WHERE id = ?7";
const DELETE_PLAN_TASKS_SQL: &str = "DELETE FROM plan_tasks WHERE plan_id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

/// Maps a plan row; tasks stay unpopulated.
fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
    Ok(Plan {
        id: row.get(0)?,
        objective_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        status: parse_enum::<PlanStatus>(row, 4)?,
        tasks: Population::Omitted,
        dependencies: parse_id_list(row, 5)?,
        metadata: parse_metadata(row, 6)?,
        created_at: parse_time(row, 7)?,
        updated_at: parse_time(row, 8)?,
    })
}

/// Loads a plan row without its tasks.
pub(super) fn select_plan(conn: &Connection, id: &str) -> Result<Option<Plan>> {
    conn.query_row(SELECT_PLAN_SQL, params![id], plan_from_row)
        .optional()
        .db_context("Failed to query plan")
}

/// Loads a plan with its tasks populated.
fn select_populated_plan(conn: &Connection, id: &str) -> Result<Option<Plan>> {
    let mut plan = select_plan(conn, id)?;

    if let Some(ref mut plan) = plan {
        plan.tasks = Population::Loaded(select_plan_tasks(conn, &plan.id)?);
    }

    Ok(plan)
}

/// Loads every plan of an objective, oldest first, tasks populated.
pub(super) fn select_objective_plans(
    conn: &Connection,
    objective_id: &str,
) -> Result<Vec<Plan>> {
    let mut stmt = conn
        .prepare(SELECT_OBJECTIVE_PLANS_SQL)
        .db_context("Failed to prepare query")?;

    let mut plans = stmt
        .query_map(params![objective_id], plan_from_row)
        .db_context("Failed to query plans")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch plans")?;

    for plan in &mut plans {
        plan.tasks = Population::Loaded(select_plan_tasks(conn, &plan.id)?);
    }

    Ok(plans)
}

impl super::Database {
    /// Inserts a plan and its initial tasks in one transaction.
    ///
    /// The caller is responsible for making sure the parent objective exists;
    /// with foreign keys enabled a dangling `objective_id` is rejected here as
    /// a database error.
    pub fn create_plan(&mut self, new: NewPlan) -> Result<Plan> {
        let created_at = now();
        let id = new_id(Some(PLAN_PREFIX));
        let tasks = materialize_tasks(&id, &new.objective_id, 0, new.tasks, created_at);
        let plan = Plan {
            id,
            objective_id: new.objective_id,
            name: new.name,
            description: new.description,
            status: PlanStatus::default(),
            tasks: Population::Loaded(tasks),
            dependencies: new.dependencies,
            metadata: new.metadata,
            created_at,
            updated_at: created_at,
        };

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                &plan.id,
                &plan.objective_id,
                &plan.name,
                plan.description.as_deref(),
                plan.status.as_str(),
                id_list_text(&plan.dependencies)?,
                metadata_text(plan.metadata.as_ref())?,
                timestamp_text(&plan.created_at),
                timestamp_text(&plan.updated_at),
            ],
        )
        .db_context("Failed to insert plan")?;

        for task in plan.tasks.as_slice() {
            super::task_queries::insert_task(&tx, task)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(plan)
    }

    /// Retrieves a plan with its tasks in index order, read from a single
    /// snapshot.
    pub fn get_plan(&self, id: &str) -> Result<Option<Plan>> {
        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;
        let plan = select_populated_plan(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(plan)
    }

    /// Returns every plan of an objective, oldest first, tasks populated.
    pub fn plans_for_objective(&self, objective_id: &str) -> Result<Vec<Plan>> {
        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;
        let plans = select_objective_plans(&tx, objective_id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(plans)
    }

    /// Applies a partial update. Returns `None` when the plan does not exist.
    pub fn update_plan(&mut self, id: &str, update: PlanUpdate) -> Result<Option<Plan>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(mut plan) = select_plan(&tx, id)? else {
            return Ok(None);
        };

        update.apply_to(&mut plan, now());
        tx.execute(
            UPDATE_PLAN_SQL,
            params![
                &plan.name,
                plan.description.as_deref(),
                plan.status.as_str(),
                id_list_text(&plan.dependencies)?,
                metadata_text(plan.metadata.as_ref())?,
                timestamp_text(&plan.updated_at),
                id,
            ],
        )
        .db_context("Failed to update plan")?;

        let plan = select_populated_plan(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(plan)
    }

    /// Deletes a plan and its tasks. Returns `false` when the plan does not
    /// exist.
    pub fn delete_plan(&mut self, id: &str) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_PLAN_TASKS_SQL, params![id])
            .db_context("Failed to delete plan tasks")?;
        let removed = tx
            .execute(DELETE_PLAN_SQL, params![id])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(removed > 0)
    }
}
