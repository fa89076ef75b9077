//! Plan task operations and queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::utils::{
    id_list_text, metadata_text, parse_id_list, parse_metadata, parse_optional_enum, parse_time,
    timestamp_text,
};
use crate::{
    error::{DatabaseResultExt, HierarchyError, Result},
    ids::now,
    models::{NewPlanTask, PlanTask, PlanTaskUpdate, TaskState},
    store::resolve::materialize_tasks,
};

const INSERT_TASK_SQL: &str = "INSERT INTO plan_tasks (id, plan_id, objective_id, name, description, task_index, dependencies, a2a_task_id, status, metadata, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const SELECT_TASK_SQL: &str = "SELECT id, plan_id, objective_id, name, description, task_index, dependencies, a2a_task_id, status, metadata, created_at, updated_at FROM plan_tasks WHERE id = ?1";
const SELECT_PLAN_TASKS_SQL: &str = "SELECT id, plan_id, objective_id, name, description, task_index, dependencies, a2a_task_id, status, metadata, created_at, updated_at FROM plan_tasks WHERE plan_id = ?1 ORDER BY task_index ASC";
const SELECT_PLAN_OBJECTIVE_SQL: &str = "SELECT objective_id FROM plans WHERE id = ?1";
const NEXT_TASK_INDEX_SQL: &str =
    "SELECT COALESCE(MAX(task_index) + 1, 0) FROM plan_tasks WHERE plan_id = ?1";
const UPDATE_TASK_SQL: &str = "UPDATE plan_tasks SET name = ?1, description = ?2, dependencies = ?3, a2a_task_id = ?4, status = ?5, metadata = ?6, updated_at = ?7 WHERE id = ?8";
const LINK_TASK_SQL: &str = "UPDATE plan_tasks SET a2a_task_id = ?1, updated_at = ?2 WHERE id = ?3";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<PlanTask> {
    Ok(PlanTask {
        id: row.get(0)?,
        plan_id: row.get(1)?,
        objective_id: row.get(2)?,
        name: row.get(3)?,
        description: row.get(4)?,
        index: row.get(5)?,
        dependencies: parse_id_list(row, 6)?,
        a2a_task_id: row.get(7)?,
        status: parse_optional_enum::<TaskState>(row, 8)?,
        metadata: parse_metadata(row, 9)?,
        created_at: parse_time(row, 10)?,
        updated_at: parse_time(row, 11)?,
    })
}

/// Writes one materialized task row.
pub(super) fn insert_task(conn: &Connection, task: &PlanTask) -> Result<()> {
    conn.execute(
        INSERT_TASK_SQL,
        params![
            &task.id,
            &task.plan_id,
            &task.objective_id,
            &task.name,
            task.description.as_deref(),
            task.index,
            id_list_text(&task.dependencies)?,
            task.a2a_task_id.as_deref(),
            task.status.map(|s| s.as_str()),
            metadata_text(task.metadata.as_ref())?,
            timestamp_text(&task.created_at),
            timestamp_text(&task.updated_at),
        ],
    )
    .db_context("Failed to insert plan task")?;
    Ok(())
}

fn select_task(conn: &Connection, id: &str) -> Result<Option<PlanTask>> {
    conn.query_row(SELECT_TASK_SQL, params![id], task_from_row)
        .optional()
        .db_context("Failed to query plan task")
}

/// Loads the tasks of a plan in index order.
pub(super) fn select_plan_tasks(conn: &Connection, plan_id: &str) -> Result<Vec<PlanTask>> {
    let mut stmt = conn
        .prepare(SELECT_PLAN_TASKS_SQL)
        .db_context("Failed to prepare query")?;

    let tasks = stmt
        .query_map(params![plan_id], task_from_row)
        .db_context("Failed to query plan tasks")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch plan tasks")?;
    Ok(tasks)
}

impl super::Database {
    /// Returns the tasks of a plan in index order.
    pub fn tasks_for_plan(&self, plan_id: &str) -> Result<Vec<PlanTask>> {
        select_plan_tasks(&self.connection, plan_id)
    }

    /// Retrieves a single plan task.
    pub fn get_plan_task(&self, id: &str) -> Result<Option<PlanTask>> {
        select_task(&self.connection, id)
    }

    /// Appends tasks to an existing plan, continuing its index sequence.
    /// Returns `None` when the plan does not exist.
    pub fn add_tasks(
        &mut self,
        plan_id: &str,
        tasks: Vec<NewPlanTask>,
    ) -> Result<Option<Vec<PlanTask>>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(objective_id) = tx
            .query_row(SELECT_PLAN_OBJECTIVE_SQL, params![plan_id], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .db_context("Failed to query plan")?
        else {
            return Ok(None);
        };

        let first_index: u32 = tx
            .query_row(NEXT_TASK_INDEX_SQL, params![plan_id], |row| row.get(0))
            .db_context("Failed to compute next task index")?;

        let created = materialize_tasks(plan_id, &objective_id, first_index, tasks, now());
        for task in &created {
            insert_task(&tx, task)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(created))
    }

    /// Applies a partial update. Returns `None` when the task does not exist.
    pub fn update_plan_task(
        &mut self,
        id: &str,
        update: PlanTaskUpdate,
    ) -> Result<Option<PlanTask>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(mut task) = select_task(&tx, id)? else {
            return Ok(None);
        };

        update.apply_to(&mut task, now());
        tx.execute(
            UPDATE_TASK_SQL,
            params![
                &task.name,
                task.description.as_deref(),
                id_list_text(&task.dependencies)?,
                task.a2a_task_id.as_deref(),
                task.status.map(|s| s.as_str()),
                metadata_text(task.metadata.as_ref())?,
                timestamp_text(&task.updated_at),
                id,
            ],
        )
        .db_context("Failed to update plan task")?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(task))
    }

    /// Records the external task id on a plan task.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::TaskNotFound` when no task has this id.
    pub fn link_external_task(&mut self, id: &str, a2a_task_id: &str) -> Result<()> {
        let updated = self
            .connection
            .execute(
                LINK_TASK_SQL,
                params![a2a_task_id, timestamp_text(&now()), id],
            )
            .db_context("Failed to link plan task")?;

        if updated == 0 {
            return Err(HierarchyError::TaskNotFound { id: id.to_string() });
        }
        Ok(())
    }
}
