//! Behaviour every `HierarchyStore` backend must share.

mod common;

use std::collections::HashSet;

use common::{new_objective, new_plan, new_task};
use summit_core::{
    models::{ObjectiveFilter, ObjectiveStatus, ObjectiveUpdate, PlanTaskUpdate, Population},
    HierarchyError, HierarchyStore, TaskState,
};

async fn parent(store: &dyn HierarchyStore) -> String {
    store
        .create_objective(new_objective("Parent"))
        .await
        .unwrap()
        .id
}

async fn cascade_delete_removes_subtree(store: &dyn HierarchyStore) {
    let keep = store.create_objective(new_objective("Keep")).await.unwrap();
    let doomed = store.create_objective(new_objective("Doomed")).await.unwrap();

    let mut task_ids = Vec::new();
    for name in ["First", "Second"] {
        let plan = store
            .create_plan(new_plan(
                &doomed.id,
                name,
                vec![new_task("a", &[]), new_task("b", &[]), new_task("c", &[])],
            ))
            .await
            .unwrap();
        task_ids.extend(plan.tasks.as_slice().iter().map(|t| t.id.clone()));
    }
    let survivor = store
        .create_plan(new_plan(&keep.id, "Survivor", vec![new_task("x", &[])]))
        .await
        .unwrap();

    assert!(store.delete_objective(&doomed.id).await.unwrap());

    assert!(store.get_objective(&doomed.id).await.unwrap().is_none());
    assert!(store.plans_for_objective(&doomed.id).await.unwrap().is_empty());
    for id in &task_ids {
        assert!(store.get_plan_task(id).await.unwrap().is_none());
    }

    let counts = store.counts().await.unwrap();
    assert_eq!((counts.objectives, counts.plans, counts.tasks), (1, 1, 1));
    assert!(store.get_plan(&survivor.id).await.unwrap().is_some());
    assert!(!store.delete_objective(&doomed.id).await.unwrap());
}

async fn deleting_a_plan_spares_its_siblings(store: &dyn HierarchyStore) {
    let objective = store.create_objective(new_objective("Parent")).await.unwrap();
    let first = store
        .create_plan(new_plan(&objective.id, "First", vec![new_task("a", &[])]))
        .await
        .unwrap();
    let second = store
        .create_plan(new_plan(&objective.id, "Second", vec![new_task("b", &[])]))
        .await
        .unwrap();

    assert!(store.delete_plan(&first.id).await.unwrap());

    let remaining = store.plans_for_objective(&objective.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
    assert!(store.get_objective(&objective.id).await.unwrap().is_some());
    assert!(store.tasks_for_plan(&first.id).await.unwrap().is_empty());
    assert_eq!(store.tasks_for_plan(&second.id).await.unwrap().len(), 1);
}

async fn indices_follow_request_order(store: &dyn HierarchyStore) {
    let objective_id = parent(store).await;
    let plan = store
        .create_plan(new_plan(
            &objective_id,
            "Ordered",
            vec![
                new_task("A", &["task-2"]),
                new_task("B", &["task-0"]),
                new_task("C", &[]),
            ],
        ))
        .await
        .unwrap();

    let stored = store.tasks_for_plan(&plan.id).await.unwrap();
    let shape: Vec<(u32, &str)> = stored.iter().map(|t| (t.index, t.name.as_str())).collect();
    assert_eq!(shape, vec![(0, "A"), (1, "B"), (2, "C")]);

    let added = store
        .add_tasks(&plan.id, vec![new_task("D", &["task-0"]), new_task("E", &[])])
        .await
        .unwrap()
        .expect("plan should exist");
    assert_eq!(added[0].index, 3);
    assert_eq!(added[1].index, 4);
    // Placeholders in a later batch refer to that batch only
    assert_eq!(added[0].dependencies, vec![added[0].id.clone()]);

    assert!(store
        .add_tasks("plan-missing", vec![new_task("F", &[])])
        .await
        .unwrap()
        .is_none());
}

async fn placeholders_resolve_to_generated_ids(store: &dyn HierarchyStore) {
    let objective_id = parent(store).await;
    let plan = store
        .create_plan(new_plan(
            &objective_id,
            "Chain",
            vec![
                new_task("T0", &[]),
                new_task("T1", &["task-0"]),
                new_task("T2", &["task-0", "task-1"]),
                new_task("T3", &["task-9", "external-1"]),
            ],
        ))
        .await
        .unwrap();

    let tasks = store.tasks_for_plan(&plan.id).await.unwrap();
    let (t0, t1, t2, t3) = (&tasks[0], &tasks[1], &tasks[2], &tasks[3]);

    assert!(t0.dependencies.is_empty());
    assert_eq!(t1.dependencies, vec![t0.id.clone()]);
    let expected: HashSet<&String> = [&t0.id, &t1.id].into_iter().collect();
    assert_eq!(t2.dependencies.iter().collect::<HashSet<_>>(), expected);
    assert_eq!(t3.dependencies, vec!["external-1".to_string()]);
}

async fn pagination_is_stable(store: &dyn HierarchyStore) {
    let mut created = Vec::new();
    for name in ["one", "two", "three"] {
        created.push(store.create_objective(new_objective(name)).await.unwrap().id);
    }

    let first = store
        .list_objectives(&ObjectiveFilter {
            page_size: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(first.objectives.len(), 2);
    assert_eq!(first.total_size, 3);
    let token = first.next_page_token.clone().expect("more results");

    let second = store
        .list_objectives(&ObjectiveFilter {
            page_size: Some(2),
            page_token: Some(token),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(second.objectives.len(), 1);
    assert!(second.next_page_token.is_none());
    assert_eq!(second.total_size, 3);

    let listed: Vec<String> = first
        .objectives
        .iter()
        .chain(&second.objectives)
        .map(|o| o.id.clone())
        .collect();
    created.reverse();
    assert_eq!(listed, created, "newest first");
    assert!(first
        .objectives
        .iter()
        .all(|o| o.plans.is_omitted()));
}

async fn plans_come_back_oldest_first(store: &dyn HierarchyStore) {
    let objective_id = parent(store).await;
    let mut created = Vec::new();
    for name in ["one", "two", "three", "four"] {
        let plan = store
            .create_plan(new_plan(&objective_id, name, vec![]))
            .await
            .unwrap();
        created.push(plan.id);
    }

    let listed: Vec<String> = store
        .plans_for_objective(&objective_id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, created);

    let objective = store.get_objective(&objective_id).await.unwrap().unwrap();
    let embedded: Vec<String> = objective
        .plans
        .as_slice()
        .iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(embedded, created);
}

async fn oversized_page_tokens_are_rejected(store: &dyn HierarchyStore) {
    store.create_objective(new_objective("only")).await.unwrap();

    for token in ["18446744073709551615", "9223372036854775808", "-1", "next"] {
        let err = store
            .list_objectives(&ObjectiveFilter {
                page_token: Some(token.to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(
            matches!(err, HierarchyError::InvalidInput { ref field, .. } if field == "pageToken"),
            "{token}: {err:?}"
        );
    }

    let past_the_end = store
        .list_objectives(&ObjectiveFilter {
            page_token: Some(i64::MAX.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(past_the_end.objectives.is_empty());
    assert!(past_the_end.next_page_token.is_none());
    assert_eq!(past_the_end.total_size, 1);
}

async fn listing_filters_by_status(store: &dyn HierarchyStore) {
    let working = store.create_objective(new_objective("Busy")).await.unwrap();
    store.create_objective(new_objective("Idle")).await.unwrap();
    store
        .update_objective(
            &working.id,
            ObjectiveUpdate {
                status: Some(ObjectiveStatus::Working),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let page = store
        .list_objectives(&ObjectiveFilter {
            status: Some(ObjectiveStatus::Working),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_size, 1);
    assert_eq!(page.objectives[0].id, working.id);

    let err = store
        .list_objectives(&ObjectiveFilter {
            page_token: Some("next".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, HierarchyError::InvalidInput { .. }));
}

async fn get_populates_children(store: &dyn HierarchyStore) {
    let objective = store.create_objective(new_objective("Parent")).await.unwrap();
    assert_eq!(objective.plans, Population::Loaded(vec![]));

    store
        .create_plan(new_plan(&objective.id, "Only", vec![new_task("a", &[])]))
        .await
        .unwrap();

    let fetched = store.get_objective(&objective.id).await.unwrap().unwrap();
    let plans = fetched.plans.as_slice();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].tasks.as_slice().len(), 1);
}

async fn task_updates_and_links(store: &dyn HierarchyStore) {
    let objective_id = parent(store).await;
    let plan = store
        .create_plan(new_plan(&objective_id, "Linked", vec![new_task("a", &[])]))
        .await
        .unwrap();
    let task = plan.tasks.as_slice()[0].clone();
    assert!(task.status.is_none());

    let updated = store
        .update_plan_task(
            &task.id,
            PlanTaskUpdate {
                status: Some(TaskState::Working),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, Some(TaskState::Working));
    assert_eq!(updated.index, task.index);
    assert_eq!(updated.created_at, task.created_at);

    store.link_external_task(&task.id, "a2a-1").await.unwrap();
    store.link_external_task(&task.id, "a2a-2").await.unwrap();
    let linked = store.get_plan_task(&task.id).await.unwrap().unwrap();
    assert_eq!(linked.a2a_task_id.as_deref(), Some("a2a-2"));

    let err = store
        .link_external_task("task-missing", "a2a-3")
        .await
        .unwrap_err();
    assert!(matches!(err, HierarchyError::TaskNotFound { .. }));
    assert!(store
        .update_plan_task("task-missing", PlanTaskUpdate::default())
        .await
        .unwrap()
        .is_none());
}

async fn clear_empties_everything(store: &dyn HierarchyStore) {
    let objective = store.create_objective(new_objective("Gone")).await.unwrap();
    store
        .create_plan(new_plan(&objective.id, "Gone too", vec![new_task("a", &[])]))
        .await
        .unwrap();

    store.clear().await.unwrap();
    let counts = store.counts().await.unwrap();
    assert_eq!((counts.objectives, counts.plans, counts.tasks), (0, 0, 0));
}

macro_rules! store_contract {
    ($($case:ident),* $(,)?) => {
        mod memory {
            $(
                #[tokio::test]
                async fn $case() {
                    let store = super::common::memory_store();
                    super::$case(store.as_ref()).await;
                }
            )*
        }

        mod sqlite {
            $(
                #[tokio::test]
                async fn $case() {
                    let (_temp_dir, store) = super::common::sqlite_store();
                    super::$case(store.as_ref()).await;
                }
            )*
        }
    };
}

store_contract!(
    cascade_delete_removes_subtree,
    deleting_a_plan_spares_its_siblings,
    indices_follow_request_order,
    placeholders_resolve_to_generated_ids,
    pagination_is_stable,
    plans_come_back_oldest_first,
    oversized_page_tokens_are_rejected,
    listing_filters_by_status,
    get_populates_children,
    task_updates_and_links,
    clear_empties_everything,
);
