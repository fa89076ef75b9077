//! Parameter structures for hierarchy operations.
//!
//! These are the request shapes shared by every interface: the RPC handler
//! deserializes them straight from a request's `params`, and the CLI builds
//! them from its arguments. Wire names are camelCase. With the `schema`
//! feature enabled each type also derives `schemars::JsonSchema`, which the CLI
//! uses to describe method parameters.
//!
//! The `into_*` conversions and `validate` methods perform the field-level
//! validation (non-empty ids, non-blank names) and produce the store request
//! types from [`crate::models`].

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{HierarchyError, Result},
    models::{
        Metadata, NewObjective, NewPlan, NewPlanTask, ObjectiveFilter, ObjectiveStatus,
        ObjectiveUpdate, PlanStatus, PlanTaskUpdate, PlanUpdate, TaskState,
    },
};

fn default_true() -> bool {
    true
}

/// Rejects names that are empty or only whitespace.
fn require_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(HierarchyError::invalid_input(field).with_reason("must not be blank"));
    }
    Ok(())
}

/// Rejects identifiers that are empty or only whitespace.
fn require_id(field: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(HierarchyError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}

fn optional_name(field: &str, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => require_name(field, name),
        None => Ok(()),
    }
}

/// Generic parameters for operations requiring just an ID.
///
/// Used by `objectives/delete` and `plans/delete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: String,
}

impl Id {
    /// Rejects an empty id.
    pub fn validate(&self) -> Result<()> {
        require_id("id", &self.id)
    }
}

/// Parameters for creating a new objective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateObjective {
    /// Name of the objective
    pub name: String,
    /// Optional detailed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form metadata stored with the objective
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl CreateObjective {
    /// Validates the parameters and builds the store request.
    pub fn into_new(self) -> Result<NewObjective> {
        require_name("name", &self.name)?;
        Ok(NewObjective {
            name: self.name,
            description: self.description,
            metadata: self.metadata,
        })
    }
}

/// Parameters for fetching one objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct GetObjective {
    /// ID of the objective
    pub id: String,
    /// Populate the objective's plans (default: true)
    #[serde(default = "default_true")]
    pub include_plans: bool,
    /// Populate each plan's tasks (default: true)
    #[serde(default = "default_true")]
    pub include_tasks: bool,
}

impl GetObjective {
    /// Fetch with every child collection populated.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            include_plans: true,
            include_tasks: true,
        }
    }

    /// Rejects an empty id.
    pub fn validate(&self) -> Result<()> {
        require_id("id", &self.id)
    }
}

/// Parameters for listing objectives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ListObjectives {
    /// Only return objectives in this status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ObjectiveStatus>,
    /// Maximum number of objectives per page (default 10, at most 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Token returned as `nextPageToken` by the previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl ListObjectives {
    /// Builds the store filter, substituting `default_page_size` when the
    /// caller gave none.
    pub fn into_filter(self, default_page_size: usize) -> ObjectiveFilter {
        let page_size = match self.page_size {
            None | Some(0) => Some(default_page_size),
            size => size,
        };
        ObjectiveFilter {
            status: self.status,
            page_size,
            page_token: self.page_token,
        }
    }
}

/// Parameters for updating an objective. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateObjective {
    /// ID of the objective to update
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status; must be a legal transition from the current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ObjectiveStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl UpdateObjective {
    /// Validates the parameters and splits off the target id.
    pub fn into_update(self) -> Result<(String, ObjectiveUpdate)> {
        require_id("id", &self.id)?;
        optional_name("name", self.name.as_deref())?;
        Ok((
            self.id,
            ObjectiveUpdate {
                name: self.name,
                description: self.description,
                status: self.status,
                metadata: self.metadata,
            },
        ))
    }
}

/// One task in a plan creation or task addition request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// Name of the task
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Task ids, or `task-<N>` placeholders naming the N-th task of this
    /// request
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

fn into_new_tasks(tasks: Vec<TaskInput>) -> Result<Vec<NewPlanTask>> {
    tasks
        .into_iter()
        .enumerate()
        .map(|(position, task)| {
            require_name(&format!("tasks[{position}].name"), &task.name)?;
            Ok(NewPlanTask {
                name: task.name,
                description: task.description,
                dependencies: task.dependencies,
                metadata: task.metadata,
            })
        })
        .collect()
}

/// Parameters for creating a plan under an objective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreatePlan {
    /// ID of the parent objective
    pub objective_id: String,
    /// Name of the plan
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tasks to create with the plan, in execution order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskInput>,
    /// IDs of plans this plan depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl CreatePlan {
    /// Validates the parameters and builds the store request.
    pub fn into_new(self) -> Result<NewPlan> {
        require_id("objectiveId", &self.objective_id)?;
        require_name("name", &self.name)?;
        Ok(NewPlan {
            objective_id: self.objective_id,
            name: self.name,
            description: self.description,
            tasks: into_new_tasks(self.tasks)?,
            dependencies: self.dependencies,
            metadata: self.metadata,
        })
    }
}

/// Parameters for fetching one plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct GetPlan {
    /// ID of the plan
    pub id: String,
    /// Populate the plan's tasks (default: true)
    #[serde(default = "default_true")]
    pub include_tasks: bool,
}

impl GetPlan {
    /// Fetch with tasks populated.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            include_tasks: true,
        }
    }

    /// Rejects an empty id.
    pub fn validate(&self) -> Result<()> {
        require_id("id", &self.id)
    }
}

/// Parameters for listing the plans of an objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ListPlans {
    /// ID of the parent objective
    pub objective_id: String,
    /// Populate each plan's tasks (default: true)
    #[serde(default = "default_true")]
    pub include_tasks: bool,
}

impl ListPlans {
    /// Rejects an empty objective id.
    pub fn validate(&self) -> Result<()> {
        require_id("objectiveId", &self.objective_id)
    }
}

/// Parameters for updating a plan. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlan {
    /// ID of the plan to update
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status; must be a legal transition from the current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlanStatus>,
    /// Replacement list of plan dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl UpdatePlan {
    /// Validates the parameters and splits off the target id.
    pub fn into_update(self) -> Result<(String, PlanUpdate)> {
        require_id("id", &self.id)?;
        optional_name("name", self.name.as_deref())?;
        Ok((
            self.id,
            PlanUpdate {
                name: self.name,
                description: self.description,
                status: self.status,
                dependencies: self.dependencies,
                metadata: self.metadata,
            },
        ))
    }
}

/// Parameters for listing the tasks of a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ListTasks {
    /// ID of the plan
    pub plan_id: String,
}

impl ListTasks {
    /// Rejects an empty plan id.
    pub fn validate(&self) -> Result<()> {
        require_id("planId", &self.plan_id)
    }
}

/// Parameters for appending tasks to an existing plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AddTasks {
    /// ID of the plan
    pub plan_id: String,
    /// Tasks to append, in execution order
    pub tasks: Vec<TaskInput>,
}

impl AddTasks {
    /// Validates the parameters and splits off the plan id.
    pub fn into_new(self) -> Result<(String, Vec<NewPlanTask>)> {
        require_id("planId", &self.plan_id)?;
        Ok((self.plan_id, into_new_tasks(self.tasks)?))
    }
}

/// Parameters for updating a plan task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    /// ID of the task to update
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Mirrored state of the linked external task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a2a_task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl UpdateTask {
    /// Validates the parameters and splits off the target id.
    pub fn into_update(self) -> Result<(String, PlanTaskUpdate)> {
        require_id("id", &self.id)?;
        optional_name("name", self.name.as_deref())?;
        Ok((
            self.id,
            PlanTaskUpdate {
                name: self.name,
                description: self.description,
                status: self.status,
                a2a_task_id: self.a2a_task_id,
                dependencies: self.dependencies,
                metadata: self.metadata,
            },
        ))
    }
}

/// Parameters for linking a plan task to an external task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LinkTask {
    /// ID of the plan task
    pub id: String,
    /// ID of the task in the external task protocol
    pub a2a_task_id: String,
}

impl LinkTask {
    /// Rejects an empty task id or a blank external id.
    pub fn validate(&self) -> Result<()> {
        require_id("id", &self.id)?;
        if self.a2a_task_id.trim().is_empty() {
            return Err(
                HierarchyError::invalid_input("a2aTaskId").with_reason("must not be blank")
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_blank_names_are_rejected() {
        let err = CreateObjective {
            name: "   ".into(),
            ..Default::default()
        }
        .into_new()
        .unwrap_err();
        assert!(matches!(err, HierarchyError::InvalidInput { ref field, .. } if field == "name"));

        let err = CreatePlan {
            objective_id: "obj-1".into(),
            name: "Plan".into(),
            tasks: vec![TaskInput {
                name: String::new(),
                ..Default::default()
            }],
            ..Default::default()
        }
        .into_new()
        .unwrap_err();
        assert!(
            matches!(err, HierarchyError::InvalidInput { ref field, .. } if field == "tasks[0].name")
        );
    }

    #[test]
    fn test_empty_ids_are_rejected() {
        fn field_of(err: HierarchyError) -> String {
            match err {
                HierarchyError::InvalidInput { field, .. } => field,
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }

        assert_eq!(field_of(GetObjective::new("").validate().unwrap_err()), "id");
        assert_eq!(field_of(GetPlan::new(" ").validate().unwrap_err()), "id");
        assert_eq!(field_of(Id { id: String::new() }.validate().unwrap_err()), "id");
        let err = CreatePlan {
            name: "Plan".into(),
            ..Default::default()
        }
        .into_new()
        .unwrap_err();
        assert_eq!(field_of(err), "objectiveId");
        let err = UpdateObjective::default().into_update().unwrap_err();
        assert_eq!(field_of(err), "id");
        let err = AddTasks::default().into_new().unwrap_err();
        assert_eq!(field_of(err), "planId");
        assert_eq!(field_of(ListTasks::default().validate().unwrap_err()), "planId");
        let err = LinkTask {
            id: String::new(),
            a2a_task_id: "remote".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(field_of(err), "id");

        assert!(GetObjective::new("obj-1").validate().is_ok());
    }

    #[test]
    fn test_population_flags_default_to_true() {
        let get: GetObjective = serde_json::from_value(json!({ "id": "obj-1" })).unwrap();
        assert!(get.include_plans);
        assert!(get.include_tasks);

        let get: GetPlan =
            serde_json::from_value(json!({ "id": "plan-1", "includeTasks": false })).unwrap();
        assert!(!get.include_tasks);
    }

    #[test]
    fn test_missing_required_field_fails_to_deserialize() {
        assert!(serde_json::from_value::<CreatePlan>(json!({ "name": "x" })).is_err());
        assert!(serde_json::from_value::<LinkTask>(json!({ "id": "task-1" })).is_err());
    }

    #[test]
    fn test_list_filter_uses_default_page_size() {
        let filter = ListObjectives {
            page_size: Some(0),
            ..Default::default()
        }
        .into_filter(25);
        assert_eq!(filter.page_size, Some(25));

        let filter = ListObjectives {
            page_size: Some(3),
            ..Default::default()
        }
        .into_filter(25);
        assert_eq!(filter.page_size, Some(3));
    }
}
