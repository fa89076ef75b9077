//! Materialization of new plan tasks and their dependency references.
//!
//! A dependency written as `task-<N>` (N decimal digits) is a placeholder for
//! the N-th task of the same request and is replaced with that sibling's
//! generated id. Anything else is kept verbatim as a literal task id.
//! Placeholders pointing past the end of the request are dropped.

use jiff::Timestamp;

use crate::{
    ids::{new_id, TASK_PREFIX},
    models::{NewPlanTask, PlanTask},
};

/// Returns the sibling position named by a `task-<N>` placeholder.
///
/// Only plain decimal digits count; `task-+1` or a generated id is not a
/// placeholder. Numbers too large for `usize` still match the pattern and
/// resolve to `usize::MAX`, which no request can reach.
pub fn placeholder_index(reference: &str) -> Option<usize> {
    let digits = reference.strip_prefix(TASK_PREFIX)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<usize>().unwrap_or(usize::MAX))
}

/// Resolves declared dependencies against the ids generated for a request.
pub fn resolve_dependencies(declared: &[String], sibling_ids: &[String]) -> Vec<String> {
    declared
        .iter()
        .filter_map(|reference| match placeholder_index(reference) {
            Some(position) => sibling_ids.get(position).cloned(),
            None => Some(reference.clone()),
        })
        .collect()
}

/// Builds stored tasks for one request.
///
/// Ids are generated for every task before any dependency is resolved, so a
/// placeholder may point forward as well as backward. Indices start at
/// `first_index` and follow the request order.
pub(crate) fn materialize_tasks(
    plan_id: &str,
    objective_id: &str,
    first_index: u32,
    tasks: Vec<NewPlanTask>,
    now: Timestamp,
) -> Vec<PlanTask> {
    let ids: Vec<String> = tasks.iter().map(|_| new_id(Some(TASK_PREFIX))).collect();

    tasks
        .into_iter()
        .zip(ids.iter())
        .zip(first_index..)
        .map(|((task, id), index)| PlanTask {
            id: id.clone(),
            plan_id: plan_id.to_string(),
            objective_id: objective_id.to_string(),
            name: task.name,
            description: task.description,
            index,
            dependencies: resolve_dependencies(&task.dependencies, &ids),
            a2a_task_id: None,
            status: None,
            metadata: task.metadata,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<String> {
        vec!["task-aaa".into(), "task-bbb".into(), "task-ccc".into()]
    }

    #[test]
    fn test_placeholder_pattern() {
        assert_eq!(placeholder_index("task-0"), Some(0));
        assert_eq!(placeholder_index("task-12"), Some(12));
        assert_eq!(placeholder_index("task-"), None);
        assert_eq!(placeholder_index("task-+1"), None);
        assert_eq!(placeholder_index("task-0189f2c4"), None);
        assert_eq!(placeholder_index("plan-0"), None);
        assert_eq!(placeholder_index("tasks-0"), None);
    }

    #[test]
    fn test_placeholders_resolve_to_sibling_ids() {
        let declared = vec!["task-0".to_string(), "task-2".to_string()];
        assert_eq!(
            resolve_dependencies(&declared, &ids()),
            vec!["task-aaa".to_string(), "task-ccc".to_string()]
        );
    }

    #[test]
    fn test_literals_pass_through() {
        let declared = vec!["task-0189f2c4deadbeef".to_string(), "external-7".to_string()];
        assert_eq!(resolve_dependencies(&declared, &ids()), declared);
    }

    #[test]
    fn test_out_of_range_placeholders_are_dropped() {
        let declared = vec![
            "task-1".to_string(),
            "task-3".to_string(),
            "task-99999999999999999999999".to_string(),
        ];
        assert_eq!(
            resolve_dependencies(&declared, &ids()),
            vec!["task-bbb".to_string()]
        );
    }

    #[test]
    fn test_materialize_assigns_contiguous_indices() {
        let tasks = vec![
            NewPlanTask {
                name: "A".into(),
                dependencies: vec!["task-2".into()],
                ..Default::default()
            },
            NewPlanTask {
                name: "B".into(),
                ..Default::default()
            },
            NewPlanTask {
                name: "C".into(),
                dependencies: vec!["task-0".into()],
                ..Default::default()
            },
        ];
        let built = materialize_tasks("plan-1", "obj-1", 0, tasks, crate::ids::now());

        let indices: Vec<u32> = built.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(built[0].dependencies, vec![built[2].id.clone()]);
        assert_eq!(built[2].dependencies, vec![built[0].id.clone()]);
        assert!(built.iter().all(|t| t.plan_id == "plan-1" && t.objective_id == "obj-1"));
    }

    #[test]
    fn test_materialize_continues_from_first_index() {
        let tasks = vec![NewPlanTask {
            name: "late".into(),
            ..Default::default()
        }];
        let built = materialize_tasks("plan-1", "obj-1", 3, tasks, crate::ids::now());
        assert_eq!(built[0].index, 3);
    }
}
