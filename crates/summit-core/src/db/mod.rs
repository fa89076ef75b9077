//! SQLite persistence for the hierarchy.
//!
//! [`Database`] wraps a single `rusqlite` connection and exposes synchronous
//! queries grouped per entity. [`SqliteStore`] adapts it to the async
//! [`HierarchyStore`] contract by running every call on the blocking thread
//! pool against a fresh connection.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::Connection;

use crate::{
    error::{DatabaseResultExt, HierarchyError, Result},
    models::{
        NewObjective, NewPlan, NewPlanTask, Objective, ObjectiveFilter, ObjectivePage,
        ObjectiveUpdate, Plan, PlanTask, PlanTaskUpdate, PlanUpdate, StoreCounts,
    },
    store::HierarchyStore,
};

pub mod migrations;
pub mod objective_queries;
pub mod plan_queries;
pub mod task_queries;
mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and brings the schema up to date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database; mostly useful in tests.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Removes every objective, plan and task.
    pub fn clear(&mut self) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        tx.execute_batch("DELETE FROM plan_tasks; DELETE FROM plans; DELETE FROM objectives;")
            .db_context("Failed to clear database")?;
        tx.commit().db_context("Failed to commit transaction")
    }

    /// Number of rows per entity table.
    pub fn counts(&self) -> Result<StoreCounts> {
        let count = |table: &str| -> Result<usize> {
            let n: i64 = self
                .connection
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
                .db_context("Failed to count rows")?;
            Ok(usize::try_from(n).unwrap_or_default())
        };

        Ok(StoreCounts {
            objectives: count("objectives")?,
            plans: count("plans")?,
            tasks: count("plan_tasks")?,
        })
    }
}

/// Durable [`HierarchyStore`] backed by a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Creates a store on `path`, initializing the schema eagerly so that an
    /// unusable path fails here instead of on the first request.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| HierarchyError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        Database::new(&db_path)?;
        Ok(Self { db_path })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(|e| HierarchyError::internal(format!("Task join error: {e}")))?
    }
}

#[async_trait]
impl HierarchyStore for SqliteStore {
    async fn create_objective(&self, new: NewObjective) -> Result<Objective> {
        self.with_db(move |db| db.create_objective(new)).await
    }

    async fn get_objective(&self, id: &str) -> Result<Option<Objective>> {
        let id = id.to_string();
        self.with_db(move |db| db.get_objective(&id)).await
    }

    async fn list_objectives(&self, filter: &ObjectiveFilter) -> Result<ObjectivePage> {
        let filter = filter.clone();
        self.with_db(move |db| db.list_objectives(&filter)).await
    }

    async fn update_objective(
        &self,
        id: &str,
        update: ObjectiveUpdate,
    ) -> Result<Option<Objective>> {
        let id = id.to_string();
        self.with_db(move |db| db.update_objective(&id, update)).await
    }

    async fn delete_objective(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.with_db(move |db| db.delete_objective(&id)).await
    }

    async fn create_plan(&self, new: NewPlan) -> Result<Plan> {
        self.with_db(move |db| db.create_plan(new)).await
    }

    async fn get_plan(&self, id: &str) -> Result<Option<Plan>> {
        let id = id.to_string();
        self.with_db(move |db| db.get_plan(&id)).await
    }

    async fn plans_for_objective(&self, objective_id: &str) -> Result<Vec<Plan>> {
        let objective_id = objective_id.to_string();
        self.with_db(move |db| db.plans_for_objective(&objective_id))
            .await
    }

    async fn update_plan(&self, id: &str, update: PlanUpdate) -> Result<Option<Plan>> {
        let id = id.to_string();
        self.with_db(move |db| db.update_plan(&id, update)).await
    }

    async fn delete_plan(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.with_db(move |db| db.delete_plan(&id)).await
    }

    async fn add_tasks(
        &self,
        plan_id: &str,
        tasks: Vec<NewPlanTask>,
    ) -> Result<Option<Vec<PlanTask>>> {
        let plan_id = plan_id.to_string();
        self.with_db(move |db| db.add_tasks(&plan_id, tasks)).await
    }

    async fn tasks_for_plan(&self, plan_id: &str) -> Result<Vec<PlanTask>> {
        let plan_id = plan_id.to_string();
        self.with_db(move |db| db.tasks_for_plan(&plan_id)).await
    }

    async fn get_plan_task(&self, id: &str) -> Result<Option<PlanTask>> {
        let id = id.to_string();
        self.with_db(move |db| db.get_plan_task(&id)).await
    }

    async fn update_plan_task(
        &self,
        id: &str,
        update: PlanTaskUpdate,
    ) -> Result<Option<PlanTask>> {
        let id = id.to_string();
        self.with_db(move |db| db.update_plan_task(&id, update)).await
    }

    async fn link_external_task(&self, task_id: &str, external_id: &str) -> Result<()> {
        let task_id = task_id.to_string();
        let external_id = external_id.to_string();
        self.with_db(move |db| db.link_external_task(&task_id, &external_id))
            .await
    }

    async fn clear(&self) -> Result<()> {
        self.with_db(|db| db.clear()).await
    }

    async fn counts(&self) -> Result<StoreCounts> {
        self.with_db(|db| db.counts()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ObjectiveStatus, PlanStatus};

    fn seeded() -> (Database, Plan) {
        let mut db = Database::open_in_memory().unwrap();
        let objective = db
            .create_objective(NewObjective {
                name: "Ship".into(),
                ..Default::default()
            })
            .unwrap();
        let plan = db
            .create_plan(NewPlan {
                objective_id: objective.id,
                name: "Build".into(),
                tasks: vec![
                    NewPlanTask {
                        name: "compile".into(),
                        ..Default::default()
                    },
                    NewPlanTask {
                        name: "test".into(),
                        dependencies: vec!["task-0".into()],
                        ..Default::default()
                    },
                ],
                ..Default::default()
            })
            .unwrap();
        (db, plan)
    }

    #[test]
    fn test_plan_round_trips_through_rows() {
        let (db, plan) = seeded();
        let loaded = db.get_plan(&plan.id).unwrap().unwrap();
        assert_eq!(loaded, plan);
        assert_eq!(loaded.status, PlanStatus::Pending);
        let tasks = loaded.tasks.as_slice();
        assert_eq!(tasks[1].dependencies, vec![tasks[0].id.clone()]);
    }

    #[test]
    fn test_add_tasks_continues_indices() {
        let (mut db, plan) = seeded();
        let added = db
            .add_tasks(
                &plan.id,
                vec![NewPlanTask {
                    name: "release".into(),
                    ..Default::default()
                }],
            )
            .unwrap()
            .unwrap();
        assert_eq!(added[0].index, 2);
        assert!(db.add_tasks("plan-missing", Vec::new()).unwrap().is_none());
    }

    #[test]
    fn test_delete_objective_cascades() {
        let (mut db, plan) = seeded();
        assert!(db.delete_objective(&plan.objective_id).unwrap());
        assert_eq!(db.counts().unwrap(), StoreCounts::default());
        assert!(!db.delete_objective(&plan.objective_id).unwrap());
    }

    #[test]
    fn test_update_keeps_identity() {
        let (mut db, plan) = seeded();
        let updated = db
            .update_objective(
                &plan.objective_id,
                ObjectiveUpdate {
                    status: Some(ObjectiveStatus::Planning),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, plan.objective_id);
        assert_eq!(updated.status, ObjectiveStatus::Planning);
        assert_eq!(updated.plans.as_slice().len(), 1);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn test_link_unknown_task_fails() {
        let (mut db, _) = seeded();
        let err = db.link_external_task("task-missing", "ext-1").unwrap_err();
        assert!(matches!(err, HierarchyError::TaskNotFound { .. }));
    }
}
