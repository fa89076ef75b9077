//! Objective CRUD operations and queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::plan_queries::select_objective_plans;
use super::utils::{metadata_text, parse_enum, parse_metadata, parse_time, timestamp_text};
use crate::{
    error::{DatabaseResultExt, Result},
    ids::{new_id, now, OBJECTIVE_PREFIX},
    models::{
        NewObjective, Objective, ObjectiveFilter, ObjectivePage, ObjectiveStatus,
        ObjectiveUpdate, Population,
    },
};

const OBJECTIVE_COLUMNS: &str =
    "id, name, description, status, metadata, created_at, updated_at";
const INSERT_OBJECTIVE_SQL: &str = "INSERT INTO objectives (id, name, description, status, metadata, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_OBJECTIVE_SQL: &str = "SELECT id, name, description, status, metadata, created_at, updated_at FROM objectives WHERE id = ?1";
const UPDATE_OBJECTIVE_SQL: &str = "UPDATE objectives SET name = ?1, description = ?2, status = ?3, metadata = ?4, updated_at = ?5 WHERE id = ?6";
const DELETE_OBJECTIVE_TASKS_SQL: &str = "DELETE FROM plan_tasks WHERE objective_id = ?1";
const DELETE_OBJECTIVE_PLANS_SQL: &str = "DELETE FROM plans WHERE objective_id = ?1";
const DELETE_OBJECTIVE_SQL: &str = "DELETE FROM objectives WHERE id = ?1";

/// Maps a row selected with [`OBJECTIVE_COLUMNS`]; plans stay unpopulated.
fn objective_from_row(row: &Row<'_>) -> rusqlite::Result<Objective> {
    Ok(Objective {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        status: parse_enum::<ObjectiveStatus>(row, 3)?,
        plans: Population::Omitted,
        metadata: parse_metadata(row, 4)?,
        created_at: parse_time(row, 5)?,
        updated_at: parse_time(row, 6)?,
    })
}

/// Loads an objective with every plan and task populated.
fn select_populated_objective(conn: &Connection, id: &str) -> Result<Option<Objective>> {
    let mut objective = conn
        .query_row(SELECT_OBJECTIVE_SQL, params![id], objective_from_row)
        .optional()
        .db_context("Failed to query objective")?;

    if let Some(ref mut objective) = objective {
        objective.plans = Population::Loaded(select_objective_plans(conn, &objective.id)?);
    }

    Ok(objective)
}

impl super::Database {
    /// Inserts a new objective in the initial status.
    pub fn create_objective(&mut self, new: NewObjective) -> Result<Objective> {
        let created_at = now();
        let objective = Objective {
            id: new_id(Some(OBJECTIVE_PREFIX)),
            name: new.name,
            description: new.description,
            status: ObjectiveStatus::default(),
            plans: Population::Loaded(Vec::new()),
            metadata: new.metadata,
            created_at,
            updated_at: created_at,
        };

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        tx.execute(
            INSERT_OBJECTIVE_SQL,
            params![
                &objective.id,
                &objective.name,
                objective.description.as_deref(),
                objective.status.as_str(),
                metadata_text(objective.metadata.as_ref())?,
                timestamp_text(&objective.created_at),
                timestamp_text(&objective.updated_at),
            ],
        )
        .db_context("Failed to insert objective")?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(objective)
    }

    /// Retrieves an objective with every plan and task populated, read from a
    /// single snapshot.
    pub fn get_objective(&self, id: &str) -> Result<Option<Objective>> {
        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;
        let objective = select_populated_objective(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(objective)
    }

    /// Lists objectives newest first, one page at a time. The count and the
    /// page come from the same snapshot.
    pub fn list_objectives(&self, filter: &ObjectiveFilter) -> Result<ObjectivePage> {
        let window = filter.window()?;
        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();
        let total_size: i64 = tx
            .query_row(
                &format!("SELECT COUNT(*) FROM objectives{where_clause}"),
                &params_refs[..],
                |row| row.get(0),
            )
            .db_context("Failed to count objectives")?;

        let query = format!(
            "SELECT {OBJECTIVE_COLUMNS} FROM objectives{where_clause} \
             ORDER BY created_at DESC, rowid DESC LIMIT {} OFFSET {}",
            window.limit, window.offset
        );
        let objectives = {
            let mut stmt = tx.prepare(&query).db_context("Failed to prepare query")?;
            let objectives = stmt
                .query_map(&params_refs[..], objective_from_row)
                .db_context("Failed to query objectives")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch objectives")?;
            objectives
        };
        tx.commit().db_context("Failed to commit transaction")?;

        let total_size = usize::try_from(total_size).unwrap_or_default();
        let next_page_token = window.next_token(objectives.len(), total_size);
        Ok(ObjectivePage {
            objectives,
            next_page_token,
            total_size,
        })
    }

    /// Applies a partial update. Returns `None` when the objective does not
    /// exist.
    pub fn update_objective(
        &mut self,
        id: &str,
        update: ObjectiveUpdate,
    ) -> Result<Option<Objective>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(mut objective) = tx
            .query_row(SELECT_OBJECTIVE_SQL, params![id], objective_from_row)
            .optional()
            .db_context("Failed to query objective")?
        else {
            return Ok(None);
        };

        update.apply_to(&mut objective, now());
        tx.execute(
            UPDATE_OBJECTIVE_SQL,
            params![
                &objective.name,
                objective.description.as_deref(),
                objective.status.as_str(),
                metadata_text(objective.metadata.as_ref())?,
                timestamp_text(&objective.updated_at),
                id,
            ],
        )
        .db_context("Failed to update objective")?;

        let objective = select_populated_objective(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(objective)
    }

    /// Permanently deletes an objective with all of its plans and tasks.
    /// Returns `false` when the objective does not exist.
    pub fn delete_objective(&mut self, id: &str) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        // Foreign keys cascade as well; explicit deletes keep this independent
        // of the connection's pragma state.
        tx.execute(DELETE_OBJECTIVE_TASKS_SQL, params![id])
            .db_context("Failed to delete objective tasks")?;
        tx.execute(DELETE_OBJECTIVE_PLANS_SQL, params![id])
            .db_context("Failed to delete objective plans")?;
        let removed = tx
            .execute(DELETE_OBJECTIVE_SQL, params![id])
            .db_context("Failed to delete objective")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(removed > 0)
    }
}
