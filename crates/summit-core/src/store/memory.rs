//! In-memory reference implementation of [`HierarchyStore`].

use std::{
    collections::BTreeMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use log::debug;

use super::{resolve::materialize_tasks, HierarchyStore};
use crate::{
    error::{HierarchyError, Result},
    ids::{new_id, now, OBJECTIVE_PREFIX, PLAN_PREFIX},
    models::{
        NewObjective, NewPlan, NewPlanTask, Objective, ObjectiveFilter, ObjectivePage,
        ObjectiveStatus, ObjectiveUpdate, Plan, PlanStatus, PlanTask, PlanTaskUpdate, PlanUpdate,
        Population, StoreCounts,
    },
};

/// A stored value plus its insertion sequence, the tie-breaker for records
/// created within the same millisecond.
#[derive(Debug, Clone)]
struct Entry<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Default)]
struct State {
    next_seq: u64,
    objectives: BTreeMap<String, Entry<Objective>>,
    plans: BTreeMap<String, Entry<Plan>>,
    tasks: BTreeMap<String, PlanTask>,
}

impl State {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn tasks_for_plan(&self, plan_id: &str) -> Vec<PlanTask> {
        let mut tasks: Vec<PlanTask> = self
            .tasks
            .values()
            .filter(|t| t.plan_id == plan_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.index);
        tasks
    }

    fn populated_plan(&self, plan: &Plan) -> Plan {
        let mut plan = plan.clone();
        plan.tasks = Population::Loaded(self.tasks_for_plan(&plan.id));
        plan
    }

    fn plans_for_objective(&self, objective_id: &str) -> Vec<Plan> {
        let mut entries: Vec<&Entry<Plan>> = self
            .plans
            .values()
            .filter(|e| e.value.objective_id == objective_id)
            .collect();
        entries.sort_by_key(|e| (e.value.created_at, e.seq));
        entries
            .into_iter()
            .map(|e| self.populated_plan(&e.value))
            .collect()
    }

    fn populated_objective(&self, objective: &Objective) -> Objective {
        let mut objective = objective.clone();
        objective.plans = Population::Loaded(self.plans_for_objective(&objective.id));
        objective
    }
}

/// In-memory store backed by ordered maps behind a single lock.
///
/// Every operation holds the lock for its whole duration, so cascading
/// deletes are never observed half-done. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        self.state.read().map_err(HierarchyError::internal)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        self.state.write().map_err(HierarchyError::internal)
    }
}

#[async_trait]
impl HierarchyStore for InMemoryStore {
    async fn create_objective(&self, new: NewObjective) -> Result<Objective> {
        let mut state = self.write()?;
        let created_at = now();
        let objective = Objective {
            id: new_id(Some(OBJECTIVE_PREFIX)),
            name: new.name,
            description: new.description,
            status: ObjectiveStatus::default(),
            plans: Population::Omitted,
            metadata: new.metadata,
            created_at,
            updated_at: created_at,
        };
        let seq = state.next_seq();
        state.objectives.insert(
            objective.id.clone(),
            Entry {
                seq,
                value: objective.clone(),
            },
        );
        Ok(Objective {
            plans: Population::Loaded(Vec::new()),
            ..objective
        })
    }

    async fn get_objective(&self, id: &str) -> Result<Option<Objective>> {
        let state = self.read()?;
        Ok(state
            .objectives
            .get(id)
            .map(|e| state.populated_objective(&e.value)))
    }

    async fn list_objectives(&self, filter: &ObjectiveFilter) -> Result<ObjectivePage> {
        let window = filter.window()?;
        let state = self.read()?;

        let mut matching: Vec<&Entry<Objective>> = state
            .objectives
            .values()
            .filter(|e| filter.status.map_or(true, |s| e.value.status == s))
            .collect();
        matching.sort_by(|a, b| {
            (b.value.created_at, b.seq).cmp(&(a.value.created_at, a.seq))
        });

        let total_size = matching.len();
        let objectives: Vec<Objective> = matching
            .into_iter()
            .skip(window.offset)
            .take(window.limit)
            .map(|e| e.value.clone())
            .collect();
        let next_page_token = window.next_token(objectives.len(), total_size);

        Ok(ObjectivePage {
            objectives,
            next_page_token,
            total_size,
        })
    }

    async fn update_objective(
        &self,
        id: &str,
        update: ObjectiveUpdate,
    ) -> Result<Option<Objective>> {
        let mut state = self.write()?;
        let Some(entry) = state.objectives.get_mut(id) else {
            return Ok(None);
        };
        update.apply_to(&mut entry.value, now());
        let updated = entry.value.clone();
        Ok(Some(state.populated_objective(&updated)))
    }

    async fn delete_objective(&self, id: &str) -> Result<bool> {
        let mut state = self.write()?;
        if state.objectives.remove(id).is_none() {
            return Ok(false);
        }
        state.plans.retain(|_, e| e.value.objective_id != id);
        let before = state.tasks.len();
        state.tasks.retain(|_, t| t.objective_id != id);
        debug!(
            "Deleted objective {id} and {} task(s)",
            before - state.tasks.len()
        );
        Ok(true)
    }

    async fn create_plan(&self, new: NewPlan) -> Result<Plan> {
        let mut state = self.write()?;
        let created_at = now();
        let id = new_id(Some(PLAN_PREFIX));
        let tasks = materialize_tasks(&id, &new.objective_id, 0, new.tasks, created_at);

        let plan = Plan {
            id,
            objective_id: new.objective_id,
            name: new.name,
            description: new.description,
            status: PlanStatus::default(),
            tasks: Population::Omitted,
            dependencies: new.dependencies,
            metadata: new.metadata,
            created_at,
            updated_at: created_at,
        };
        let seq = state.next_seq();
        state.plans.insert(
            plan.id.clone(),
            Entry {
                seq,
                value: plan.clone(),
            },
        );
        for task in &tasks {
            state.tasks.insert(task.id.clone(), task.clone());
        }

        Ok(Plan {
            tasks: Population::Loaded(tasks),
            ..plan
        })
    }

    async fn get_plan(&self, id: &str) -> Result<Option<Plan>> {
        let state = self.read()?;
        Ok(state.plans.get(id).map(|e| state.populated_plan(&e.value)))
    }

    async fn plans_for_objective(&self, objective_id: &str) -> Result<Vec<Plan>> {
        Ok(self.read()?.plans_for_objective(objective_id))
    }

    async fn update_plan(&self, id: &str, update: PlanUpdate) -> Result<Option<Plan>> {
        let mut state = self.write()?;
        let Some(entry) = state.plans.get_mut(id) else {
            return Ok(None);
        };
        update.apply_to(&mut entry.value, now());
        let updated = entry.value.clone();
        Ok(Some(state.populated_plan(&updated)))
    }

    async fn delete_plan(&self, id: &str) -> Result<bool> {
        let mut state = self.write()?;
        if state.plans.remove(id).is_none() {
            return Ok(false);
        }
        state.tasks.retain(|_, t| t.plan_id != id);
        Ok(true)
    }

    async fn add_tasks(
        &self,
        plan_id: &str,
        tasks: Vec<NewPlanTask>,
    ) -> Result<Option<Vec<PlanTask>>> {
        let mut state = self.write()?;
        let Some(objective_id) = state
            .plans
            .get(plan_id)
            .map(|e| e.value.objective_id.clone())
        else {
            return Ok(None);
        };
        let first_index = state
            .tasks
            .values()
            .filter(|t| t.plan_id == plan_id)
            .map(|t| t.index + 1)
            .max()
            .unwrap_or(0);

        let created = materialize_tasks(plan_id, &objective_id, first_index, tasks, now());
        for task in &created {
            state.tasks.insert(task.id.clone(), task.clone());
        }
        Ok(Some(created))
    }

    async fn tasks_for_plan(&self, plan_id: &str) -> Result<Vec<PlanTask>> {
        Ok(self.read()?.tasks_for_plan(plan_id))
    }

    async fn get_plan_task(&self, id: &str) -> Result<Option<PlanTask>> {
        Ok(self.read()?.tasks.get(id).cloned())
    }

    async fn update_plan_task(
        &self,
        id: &str,
        update: PlanTaskUpdate,
    ) -> Result<Option<PlanTask>> {
        let mut state = self.write()?;
        Ok(state.tasks.get_mut(id).map(|task| {
            update.apply_to(task, now());
            task.clone()
        }))
    }

    async fn link_external_task(&self, task_id: &str, external_id: &str) -> Result<()> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| HierarchyError::TaskNotFound {
                id: task_id.to_string(),
            })?;
        task.a2a_task_id = Some(external_id.to_string());
        task.updated_at = now();
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.write()? = State::default();
        Ok(())
    }

    async fn counts(&self) -> Result<StoreCounts> {
        let state = self.read()?;
        Ok(StoreCounts {
            objectives: state.objectives.len(),
            plans: state.plans.len(),
            tasks: state.tasks.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_plan(objective_id: &str, names: &[&str]) -> NewPlan {
        NewPlan {
            objective_id: objective_id.to_string(),
            name: "Plan".to_string(),
            tasks: names
                .iter()
                .map(|n| NewPlanTask {
                    name: n.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let store = InMemoryStore::new();
        let objective = store
            .create_objective(NewObjective {
                name: "Original".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = store
            .update_objective(
                &objective.id,
                ObjectiveUpdate {
                    name: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("objective should exist");

        assert_eq!(updated.id, objective.id);
        assert_eq!(updated.created_at, objective.created_at);
        assert_eq!(updated.name, "Renamed");
        assert!(updated.updated_at >= objective.updated_at);
    }

    #[tokio::test]
    async fn test_add_tasks_continues_indices() {
        let store = InMemoryStore::new();
        let plan = store.create_plan(new_plan("obj-x", &["A", "B"])).await.unwrap();

        let added = store
            .add_tasks(
                &plan.id,
                vec![
                    NewPlanTask {
                        name: "C".into(),
                        ..Default::default()
                    },
                    NewPlanTask {
                        name: "D".into(),
                        dependencies: vec!["task-0".into()],
                        ..Default::default()
                    },
                ],
            )
            .await
            .unwrap()
            .expect("plan should exist");

        assert_eq!(added[0].index, 2);
        assert_eq!(added[1].index, 3);
        assert_eq!(added[1].dependencies, vec![added[0].id.clone()]);

        let names: Vec<String> = store
            .tasks_for_plan(&plan.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_add_tasks_to_unknown_plan() {
        let store = InMemoryStore::new();
        let result = store.add_tasks("plan-missing", Vec::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_clear_empties_store() {
        let store = InMemoryStore::new();
        let objective = store
            .create_objective(NewObjective {
                name: "Clear me".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .create_plan(new_plan(&objective.id, &["A"]))
            .await
            .unwrap();

        store.clear().await.unwrap();
        assert_eq!(store.counts().await.unwrap(), StoreCounts::default());
    }
}
