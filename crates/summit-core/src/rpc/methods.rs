//! Method names served by [`super::RpcHandler`].

pub const OBJECTIVES_CREATE: &str = "objectives/create";
pub const OBJECTIVES_GET: &str = "objectives/get";
pub const OBJECTIVES_LIST: &str = "objectives/list";
pub const OBJECTIVES_UPDATE: &str = "objectives/update";
pub const OBJECTIVES_DELETE: &str = "objectives/delete";
pub const PLANS_CREATE: &str = "plans/create";
pub const PLANS_GET: &str = "plans/get";
pub const PLANS_LIST: &str = "plans/list";
pub const PLANS_UPDATE: &str = "plans/update";
pub const PLANS_DELETE: &str = "plans/delete";
pub const TASKS_LIST: &str = "tasks/list";
pub const TASKS_ADD: &str = "tasks/add";
pub const TASKS_UPDATE: &str = "tasks/update";
pub const TASKS_LINK: &str = "tasks/link";

/// Every method name, grouped by entity.
pub const ALL: [&str; 14] = [
    OBJECTIVES_CREATE,
    OBJECTIVES_GET,
    OBJECTIVES_LIST,
    OBJECTIVES_UPDATE,
    OBJECTIVES_DELETE,
    PLANS_CREATE,
    PLANS_GET,
    PLANS_LIST,
    PLANS_UPDATE,
    PLANS_DELETE,
    TASKS_LIST,
    TASKS_ADD,
    TASKS_UPDATE,
    TASKS_LINK,
];

/// JSON schema of each method's `params` object.
#[cfg(feature = "schema")]
pub fn param_schemas() -> Vec<(&'static str, schemars::Schema)> {
    use schemars::schema_for;

    use crate::params::{
        AddTasks, CreateObjective, CreatePlan, GetObjective, GetPlan, Id, LinkTask,
        ListObjectives, ListPlans, ListTasks, UpdateObjective, UpdatePlan, UpdateTask,
    };

    vec![
        (OBJECTIVES_CREATE, schema_for!(CreateObjective)),
        (OBJECTIVES_GET, schema_for!(GetObjective)),
        (OBJECTIVES_LIST, schema_for!(ListObjectives)),
        (OBJECTIVES_UPDATE, schema_for!(UpdateObjective)),
        (OBJECTIVES_DELETE, schema_for!(Id)),
        (PLANS_CREATE, schema_for!(CreatePlan)),
        (PLANS_GET, schema_for!(GetPlan)),
        (PLANS_LIST, schema_for!(ListPlans)),
        (PLANS_UPDATE, schema_for!(UpdatePlan)),
        (PLANS_DELETE, schema_for!(Id)),
        (TASKS_LIST, schema_for!(ListTasks)),
        (TASKS_ADD, schema_for!(AddTasks)),
        (TASKS_UPDATE, schema_for!(UpdateTask)),
        (TASKS_LINK, schema_for!(LinkTask)),
    ]
}
