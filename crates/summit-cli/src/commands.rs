//! Command execution: runs parsed subcommands against the hierarchy and
//! renders the outcome as markdown.

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde_json::Value;
use summit_core::{
    display::{CreateResult, DeleteResult, Objectives, Plans, Tasks, UpdateResult},
    params::{GetObjective, Id, ListObjectives},
    rpc::{methods, JsonRpcResponse},
    Hierarchy, RpcHandler,
};

use crate::{
    cli::{CallArgs, ObjectiveCommands, PlanCommands, TaskCommands},
    renderer::TerminalRenderer,
};

/// Executes CLI commands against one hierarchy.
pub struct Cli {
    hierarchy: Hierarchy,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(hierarchy: Hierarchy, renderer: TerminalRenderer) -> Self {
        Self {
            hierarchy,
            renderer,
        }
    }

    pub async fn handle_objective_command(&self, command: ObjectiveCommands) -> Result<()> {
        match command {
            ObjectiveCommands::Create(args) => {
                let objective = self.hierarchy.create_objective(args.into()).await?;
                self.renderer
                    .render(&CreateResult::new(objective).to_string())
            }
            ObjectiveCommands::List(args) => self.list_objectives(args.into()).await,
            ObjectiveCommands::Show(args) => {
                let params: GetObjective = args.into();
                let objective = self.hierarchy.get_objective(&params).await?;
                self.renderer.render(&objective.to_string())
            }
            ObjectiveCommands::Update(args) => {
                let objective = self.hierarchy.update_objective(args.into()).await?;
                self.renderer
                    .render(&UpdateResult::new(objective).to_string())
            }
            ObjectiveCommands::Delete(args) => {
                let params: Id = args.into();
                self.hierarchy.delete_objective(&params).await?;
                self.renderer
                    .render(&DeleteResult::new("objective", params.id).to_string())
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.hierarchy.create_plan(args.into()).await?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List(args) => {
                let plans = self.hierarchy.list_plans(&args.into()).await?;
                self.renderer.render(&Plans(plans).to_string())
            }
            PlanCommands::Show(args) => {
                let plan = self.hierarchy.get_plan(&args.into()).await?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Update(args) => {
                let plan = self.hierarchy.update_plan(args.into()).await?;
                self.renderer.render(&UpdateResult::new(plan).to_string())
            }
            PlanCommands::Delete(args) => {
                let params: Id = args.into();
                self.hierarchy.delete_plan(&params).await?;
                self.renderer
                    .render(&DeleteResult::new("plan", params.id).to_string())
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::List(args) => {
                let tasks = self.hierarchy.list_tasks(&args.into()).await?;
                self.renderer.render(&Tasks(tasks).to_string())
            }
            TaskCommands::Add(args) => {
                let tasks = self.hierarchy.add_tasks(args.into()).await?;
                let mut output = String::new();
                for task in tasks {
                    output.push_str(&CreateResult::new(task).to_string());
                }
                self.renderer.render(&output)
            }
            TaskCommands::Update(args) => {
                let task = self.hierarchy.update_task(args.into()).await?;
                self.renderer.render(&UpdateResult::new(task).to_string())
            }
            TaskCommands::Link(args) => {
                let task = self.hierarchy.link_task(&args.into()).await?;
                let change = format!(
                    "Linked to {}",
                    task.a2a_task_id.as_deref().unwrap_or_default()
                );
                self.renderer
                    .render(&UpdateResult::with_changes(task, vec![change]).to_string())
            }
        }
    }

    pub async fn list_objectives(&self, params: ListObjectives) -> Result<()> {
        let page = self.hierarchy.list_objectives(params).await?;
        self.renderer.render(&Objectives(&page).to_string())
    }

    /// Dispatches one method through the JSON-RPC handler and prints the
    /// full response envelope as JSON.
    ///
    /// Error responses are printed too, then reported as a failure so the
    /// process exits non-zero.
    pub async fn call(self, args: CallArgs) -> Result<()> {
        let params = match args.params.as_deref() {
            Some(raw) => serde_json::from_str(raw).context("params must be valid JSON")?,
            None => Value::Null,
        };
        debug!("call {} {}", args.method, params);

        let handler = RpcHandler::new(self.hierarchy);
        let response = match handler.call(&args.method, params).await {
            Ok(result) => JsonRpcResponse::success(Value::Null, result),
            Err(error) => JsonRpcResponse::failure(Value::Null, error),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);

        match response.error {
            Some(error) => Err(anyhow!(error)),
            None => Ok(()),
        }
    }
}

/// Prints every method name with the JSON schema of its params.
pub fn print_methods() -> Result<()> {
    let mut listing = serde_json::Map::new();
    for (method, schema) in methods::param_schemas() {
        listing.insert(method.to_string(), serde_json::to_value(schema)?);
    }
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
