//! Integration tests comparing CLI output with the core Display
//! implementations over a shared database file.

use std::process::Command;

use summit_core::{
    display::{Objectives, Tasks},
    params::{CreateObjective, CreatePlan, GetObjective, ListObjectives, ListTasks, TaskInput},
    Hierarchy, HierarchyBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test hierarchy with a temporary database
async fn create_test_hierarchy() -> (Hierarchy, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let hierarchy = HierarchyBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create hierarchy");

    (hierarchy, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(temp_dir: &TempDir, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_summit"));
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(temp_dir.path().join("test.db"));

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    assert!(output.status.success(), "{args:?} failed: {output:?}");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_objective_display_consistency() {
    let (hierarchy, temp_dir) = create_test_hierarchy().await;

    let objective = hierarchy
        .create_objective(CreateObjective {
            name: "Consistent".to_string(),
            description: Some("Same bytes either way".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    hierarchy
        .create_plan(CreatePlan {
            objective_id: objective.id.clone(),
            name: "Only plan".to_string(),
            tasks: vec![TaskInput {
                name: "Only task".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        })
        .await
        .unwrap();

    let expected = hierarchy
        .get_objective(&GetObjective::new(&objective.id))
        .await
        .unwrap()
        .to_string();
    let cli_output = run_cli_command(&temp_dir, &["objective", "show", &objective.id]);

    assert_eq!(cli_output, expected);
}

#[tokio::test]
async fn test_list_display_consistency() {
    let (hierarchy, temp_dir) = create_test_hierarchy().await;
    for name in ["Alpha", "Beta"] {
        hierarchy
            .create_objective(CreateObjective {
                name: name.to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let page = hierarchy
        .list_objectives(ListObjectives::default())
        .await
        .unwrap();
    let cli_output = run_cli_command(&temp_dir, &["objective", "list"]);

    assert_eq!(cli_output, Objectives(&page).to_string());
}

#[tokio::test]
async fn test_cli_changes_are_visible_to_library() {
    let (hierarchy, temp_dir) = create_test_hierarchy().await;
    let objective = hierarchy
        .create_objective(CreateObjective {
            name: "Shared".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let plan = hierarchy
        .create_plan(CreatePlan {
            objective_id: objective.id.clone(),
            name: "Work".to_string(),
            tasks: vec![TaskInput {
                name: "First".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        })
        .await
        .unwrap();

    run_cli_command(&temp_dir, &["task", "add", &plan.id, "Second"]);

    let tasks = hierarchy
        .list_tasks(&ListTasks {
            plan_id: plan.id.clone(),
        })
        .await
        .unwrap();
    let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(tasks[1].index, 1);

    let cli_output = run_cli_command(&temp_dir, &["task", "list", &plan.id]);
    assert_eq!(cli_output, Tasks(tasks).to_string());
}
