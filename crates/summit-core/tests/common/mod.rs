#![allow(dead_code)]

use std::sync::Arc;

use summit_core::{
    models::{NewObjective, NewPlan, NewPlanTask},
    Hierarchy, HierarchyBuilder, HierarchyStore, InMemoryStore, RpcHandler, SqliteStore,
};
use tempfile::TempDir;

/// Helper function to create a SQLite-backed hierarchy in a temp dir
pub async fn create_test_hierarchy() -> (TempDir, Hierarchy) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let hierarchy = HierarchyBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create hierarchy");
    (temp_dir, hierarchy)
}

/// Helper function to create an RPC handler over the in-memory store
pub async fn create_test_handler() -> RpcHandler {
    let hierarchy = HierarchyBuilder::new()
        .in_memory()
        .build()
        .await
        .expect("Failed to create hierarchy");
    RpcHandler::new(hierarchy)
}

pub fn memory_store() -> Arc<dyn HierarchyStore> {
    Arc::new(InMemoryStore::new())
}

pub fn sqlite_store() -> (TempDir, Arc<dyn HierarchyStore>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store =
        SqliteStore::open(temp_dir.path().join("store.db")).expect("Failed to open store");
    (temp_dir, Arc::new(store))
}

pub fn new_objective(name: &str) -> NewObjective {
    NewObjective {
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn new_task(name: &str, dependencies: &[&str]) -> NewPlanTask {
    NewPlanTask {
        name: name.to_string(),
        dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        ..Default::default()
    }
}

pub fn new_plan(objective_id: &str, name: &str, tasks: Vec<NewPlanTask>) -> NewPlan {
    NewPlan {
        objective_id: objective_id.to_string(),
        name: name.to_string(),
        tasks,
        ..Default::default()
    }
}
