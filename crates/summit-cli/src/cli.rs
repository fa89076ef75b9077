//! Command-line argument definitions using clap.
//!
//! Each subcommand has its own clap `Args` struct that converts into the
//! matching core parameter type, so the core stays free of clap derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Hierarchy
//! ```
//!
//! Status flags parse through the core enums' `FromStr` implementations, which
//! also accept the `cancelled` spelling.

use clap::{Args, Subcommand};
use summit_core::{
    models::{Metadata, ObjectiveStatus, PlanStatus, TaskState},
    params::*,
};

/// Parses a `--metadata` value as a JSON object.
fn parse_metadata(raw: &str) -> Result<Metadata, String> {
    serde_json::from_str(raw).map_err(|e| format!("metadata must be a JSON object: {e}"))
}

// ============================================================================
// Objectives
// ============================================================================

/// Create a new objective
#[derive(Args)]
pub struct CreateObjectiveArgs {
    /// Name of the objective
    pub name: String,
    #[arg(short, long, help = "Optional description of what the objective is for")]
    pub description: Option<String>,
    #[arg(long, value_parser = parse_metadata, help = "Metadata as a JSON object")]
    pub metadata: Option<Metadata>,
}

impl From<CreateObjectiveArgs> for CreateObjective {
    fn from(val: CreateObjectiveArgs) -> Self {
        CreateObjective {
            name: val.name,
            description: val.description,
            metadata: val.metadata,
        }
    }
}

/// List objectives, newest first
#[derive(Args)]
pub struct ListObjectivesArgs {
    #[arg(
        short,
        long,
        help = "Only show objectives in this status (submitted, planning, working, blocked, completed, failed, canceled)"
    )]
    pub status: Option<ObjectiveStatus>,
    #[arg(short = 'n', long, help = "Number of objectives per page")]
    pub limit: Option<usize>,
    #[arg(long, help = "Continuation token printed with the previous page")]
    pub page_token: Option<String>,
}

impl From<ListObjectivesArgs> for ListObjectives {
    fn from(val: ListObjectivesArgs) -> Self {
        ListObjectives {
            status: val.status,
            page_size: val.limit,
            page_token: val.page_token,
        }
    }
}

/// Show an objective with its plans and tasks
#[derive(Args)]
pub struct ShowObjectiveArgs {
    #[arg(help = "Identifier of the objective to show")]
    pub id: String,
    #[arg(long, help = "Leave out the plans section")]
    pub no_plans: bool,
    #[arg(long, help = "Show plans without their tasks")]
    pub no_tasks: bool,
}

impl From<ShowObjectiveArgs> for GetObjective {
    fn from(val: ShowObjectiveArgs) -> Self {
        GetObjective {
            id: val.id,
            include_plans: !val.no_plans,
            include_tasks: !val.no_tasks,
        }
    }
}

/// Update an objective's status or details
#[derive(Args)]
pub struct UpdateObjectiveArgs {
    #[arg(help = "Identifier of the objective to update")]
    pub id: String,
    #[arg(short, long, help = "New status; must be a legal move from the current one")]
    pub status: Option<ObjectiveStatus>,
    #[arg(short, long, help = "New name")]
    pub name: Option<String>,
    #[arg(short, long, help = "New description")]
    pub description: Option<String>,
    #[arg(long, value_parser = parse_metadata, help = "Replacement metadata as a JSON object")]
    pub metadata: Option<Metadata>,
}

impl From<UpdateObjectiveArgs> for UpdateObjective {
    fn from(val: UpdateObjectiveArgs) -> Self {
        UpdateObjective {
            id: val.id,
            name: val.name,
            description: val.description,
            status: val.status,
            metadata: val.metadata,
        }
    }
}

/// Delete an objective with all its plans and tasks
#[derive(Args)]
pub struct DeleteArgs {
    #[arg(help = "Identifier of the record to delete")]
    pub id: String,
}

impl From<DeleteArgs> for Id {
    fn from(val: DeleteArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum ObjectiveCommands {
    /// Create a new objective
    #[command(alias = "c")]
    Create(CreateObjectiveArgs),
    /// List objectives, newest first
    #[command(aliases = ["l", "ls"])]
    List(ListObjectivesArgs),
    /// Show an objective with its plans and tasks
    #[command(alias = "s")]
    Show(ShowObjectiveArgs),
    /// Update an objective's status or details
    #[command(alias = "u")]
    Update(UpdateObjectiveArgs),
    /// Delete an objective with all its plans and tasks
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

// ============================================================================
// Plans
// ============================================================================

/// Create a plan under an objective
///
/// Each `--task` adds one task in order. Task dependencies can be wired
/// afterwards with `task update --depends-on`.
#[derive(Args)]
pub struct CreatePlanArgs {
    #[arg(help = "Identifier of the objective that owns the plan")]
    pub objective_id: String,
    /// Name of the plan
    pub name: String,
    #[arg(short, long, help = "Optional description of the plan")]
    pub description: Option<String>,
    #[arg(short, long = "task", help = "Task name; repeat for several tasks")]
    pub tasks: Vec<String>,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Plan ids this plan depends on, as a comma-separated list"
    )]
    pub depends_on: Vec<String>,
    #[arg(long, value_parser = parse_metadata, help = "Metadata as a JSON object")]
    pub metadata: Option<Metadata>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            objective_id: val.objective_id,
            name: val.name,
            description: val.description,
            tasks: val
                .tasks
                .into_iter()
                .map(|name| TaskInput {
                    name,
                    ..Default::default()
                })
                .collect(),
            dependencies: val.depends_on,
            metadata: val.metadata,
        }
    }
}

/// List the plans of an objective
#[derive(Args)]
pub struct ListPlansArgs {
    #[arg(help = "Identifier of the objective")]
    pub objective_id: String,
    #[arg(long, help = "Show plans without their tasks")]
    pub no_tasks: bool,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            objective_id: val.objective_id,
            include_tasks: !val.no_tasks,
        }
    }
}

/// Show a plan with its tasks
#[derive(Args)]
pub struct ShowPlanArgs {
    #[arg(help = "Identifier of the plan to show")]
    pub id: String,
    #[arg(long, help = "Leave out the tasks section")]
    pub no_tasks: bool,
}

impl From<ShowPlanArgs> for GetPlan {
    fn from(val: ShowPlanArgs) -> Self {
        GetPlan {
            id: val.id,
            include_tasks: !val.no_tasks,
        }
    }
}

/// Update a plan's status or details
#[derive(Args)]
pub struct UpdatePlanArgs {
    #[arg(help = "Identifier of the plan to update")]
    pub id: String,
    #[arg(
        short,
        long,
        help = "New status (pending, working, blocked, completed, failed, skipped)"
    )]
    pub status: Option<PlanStatus>,
    #[arg(short, long, help = "New name")]
    pub name: Option<String>,
    #[arg(short, long, help = "New description")]
    pub description: Option<String>,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Replacement plan dependencies as a comma-separated list"
    )]
    pub depends_on: Option<Vec<String>>,
    #[arg(long, value_parser = parse_metadata, help = "Replacement metadata as a JSON object")]
    pub metadata: Option<Metadata>,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        UpdatePlan {
            id: val.id,
            name: val.name,
            description: val.description,
            status: val.status,
            dependencies: val.depends_on,
            metadata: val.metadata,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a plan under an objective
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List the plans of an objective
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan with its tasks
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Update a plan's status or details
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Delete a plan with its tasks
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

// ============================================================================
// Tasks
// ============================================================================

/// List the tasks of a plan in index order
#[derive(Args)]
pub struct ListTasksArgs {
    #[arg(help = "Identifier of the plan")]
    pub plan_id: String,
}

impl From<ListTasksArgs> for ListTasks {
    fn from(val: ListTasksArgs) -> Self {
        ListTasks {
            plan_id: val.plan_id,
        }
    }
}

/// Append a task to a plan
#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(help = "Identifier of the plan to append to")]
    pub plan_id: String,
    /// Name of the task
    pub name: String,
    #[arg(short, long, help = "Optional description of the task")]
    pub description: Option<String>,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Task ids this task depends on, as a comma-separated list"
    )]
    pub depends_on: Vec<String>,
}

impl From<AddTaskArgs> for AddTasks {
    fn from(val: AddTaskArgs) -> Self {
        AddTasks {
            plan_id: val.plan_id,
            tasks: vec![TaskInput {
                name: val.name,
                description: val.description,
                dependencies: val.depends_on,
                metadata: None,
            }],
        }
    }
}

/// Update a task's state or details
#[derive(Args)]
pub struct UpdateTaskArgs {
    #[arg(help = "Identifier of the task to update")]
    pub id: String,
    #[arg(
        short,
        long,
        help = "Mirrored external state (submitted, working, input-required, completed, canceled, failed, rejected, auth-required, unknown)"
    )]
    pub status: Option<TaskState>,
    #[arg(short, long, help = "New name")]
    pub name: Option<String>,
    #[arg(short, long, help = "New description")]
    pub description: Option<String>,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Replacement dependencies as a comma-separated list of task ids"
    )]
    pub depends_on: Option<Vec<String>>,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            name: val.name,
            description: val.description,
            status: val.status,
            a2a_task_id: None,
            dependencies: val.depends_on,
            metadata: None,
        }
    }
}

/// Link a task to a task of the external protocol
#[derive(Args)]
pub struct LinkTaskArgs {
    #[arg(help = "Identifier of the plan task")]
    pub id: String,
    #[arg(help = "Identifier of the external task")]
    pub a2a_task_id: String,
}

impl From<LinkTaskArgs> for LinkTask {
    fn from(val: LinkTaskArgs) -> Self {
        LinkTask {
            id: val.id,
            a2a_task_id: val.a2a_task_id,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List the tasks of a plan in index order
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Append a task to a plan
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Update a task's state or details
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Link a task to a task of the external protocol
    Link(LinkTaskArgs),
}

// ============================================================================
// JSON-RPC
// ============================================================================

/// Dispatch one JSON-RPC method
#[derive(Args)]
pub struct CallArgs {
    #[arg(help = "Method name, e.g. objectives/create")]
    pub method: String,
    #[arg(help = "Params as a JSON object; omitted means no params")]
    pub params: Option<String>,
}
