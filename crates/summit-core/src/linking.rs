//! Mapping between hierarchy records and the external task protocol.
//!
//! An external task carries a generic key-value metadata bag. A plan task's
//! position in the hierarchy is written into that bag under the versioned
//! [`METADATA_PREFIX`], and whole objective or plan snapshots can be embedded
//! next to it. Clients opt into the extension by listing [`EXTENSION_URI`]
//! in the [`EXTENSIONS_HEADER`] header.
//!
//! ```rust
//! use summit_core::linking::{hierarchy_metadata, set_hierarchy_metadata, HierarchyLink};
//!
//! let link = HierarchyLink {
//!     objective_id: "obj-1".into(),
//!     plan_id: "plan-1".into(),
//!     task_index: 2,
//!     dependencies: vec![],
//! };
//! let mut metadata = serde_json::Map::new();
//! set_hierarchy_metadata(&mut metadata, &link);
//! assert!(!metadata.contains_key("hierarchy/v1/dependencies"));
//! assert_eq!(hierarchy_metadata(&metadata), Some(link));
//! ```

use serde_json::Value;

use crate::{
    error::Result,
    models::{Metadata, Objective, Plan, PlanTask},
};

/// Identifier clients list to activate the extension.
pub const EXTENSION_URI: &str = "https://summit.dev/extensions/hierarchy/v1";

/// Header carrying the comma-separated list of activated extensions.
pub const EXTENSIONS_HEADER: &str = "X-A2A-Extensions";

/// Prefix shared by every metadata key this extension writes.
pub const METADATA_PREFIX: &str = "hierarchy/v1/";

/// Metadata keys, each under [`METADATA_PREFIX`].
pub mod keys {
    pub const OBJECTIVE_ID: &str = "hierarchy/v1/objectiveId";
    pub const PLAN_ID: &str = "hierarchy/v1/planId";
    pub const TASK_INDEX: &str = "hierarchy/v1/taskIndex";
    pub const DEPENDENCIES: &str = "hierarchy/v1/dependencies";
    pub const OBJECTIVE: &str = "hierarchy/v1/objective";
    pub const PLAN: &str = "hierarchy/v1/plan";
}

/// Position of a plan task within the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyLink {
    pub objective_id: String,
    pub plan_id: String,
    pub task_index: u32,
    pub dependencies: Vec<String>,
}

/// The link describing where `task` sits.
pub fn link_for_task(task: &PlanTask) -> HierarchyLink {
    HierarchyLink {
        objective_id: task.objective_id.clone(),
        plan_id: task.plan_id.clone(),
        task_index: task.index,
        dependencies: task.dependencies.clone(),
    }
}

/// Writes `link` into `metadata`, leaving unrelated keys alone.
///
/// An empty dependency list is represented by the key's absence; a stale
/// dependency key is removed.
pub fn set_hierarchy_metadata(metadata: &mut Metadata, link: &HierarchyLink) {
    metadata.insert(
        keys::OBJECTIVE_ID.to_string(),
        Value::String(link.objective_id.clone()),
    );
    metadata.insert(keys::PLAN_ID.to_string(), Value::String(link.plan_id.clone()));
    metadata.insert(keys::TASK_INDEX.to_string(), Value::from(link.task_index));

    if link.dependencies.is_empty() {
        metadata.remove(keys::DEPENDENCIES);
    } else {
        metadata.insert(
            keys::DEPENDENCIES.to_string(),
            Value::Array(
                link.dependencies
                    .iter()
                    .cloned()
                    .map(Value::String)
                    .collect(),
            ),
        );
    }
}

/// Reads a link written by [`set_hierarchy_metadata`].
///
/// Returns `None` unless the objective id, plan id and task index are all
/// present with the right types.
pub fn hierarchy_metadata(metadata: &Metadata) -> Option<HierarchyLink> {
    let objective_id = metadata.get(keys::OBJECTIVE_ID)?.as_str()?.to_string();
    let plan_id = metadata.get(keys::PLAN_ID)?.as_str()?.to_string();
    let task_index = u32::try_from(metadata.get(keys::TASK_INDEX)?.as_u64()?).ok()?;
    let dependencies = match metadata.get(keys::DEPENDENCIES) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    Some(HierarchyLink {
        objective_id,
        plan_id,
        task_index,
        dependencies,
    })
}

/// Embeds a full objective snapshot.
pub fn embed_objective(metadata: &mut Metadata, objective: &Objective) -> Result<()> {
    metadata.insert(keys::OBJECTIVE.to_string(), serde_json::to_value(objective)?);
    Ok(())
}

/// Embeds a full plan snapshot.
pub fn embed_plan(metadata: &mut Metadata, plan: &Plan) -> Result<()> {
    metadata.insert(keys::PLAN.to_string(), serde_json::to_value(plan)?);
    Ok(())
}

/// Reads an embedded objective snapshot, if one is present.
pub fn embedded_objective(metadata: &Metadata) -> Result<Option<Objective>> {
    metadata
        .get(keys::OBJECTIVE)
        .map(|value| serde_json::from_value::<Objective>(value.clone()))
        .transpose()
        .map_err(Into::into)
}

/// Reads an embedded plan snapshot, if one is present.
pub fn embedded_plan(metadata: &Metadata) -> Result<Option<Plan>> {
    metadata
        .get(keys::PLAN)
        .map(|value| serde_json::from_value::<Plan>(value.clone()))
        .transpose()
        .map_err(Into::into)
}

/// Splits a header value into its trimmed, non-empty entries.
pub fn parse_extensions_header(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds a header value listing `others` followed by this extension.
/// Duplicates are dropped, keeping the first occurrence.
pub fn build_extensions_header<I, S>(others: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries: Vec<String> = Vec::new();
    let candidates = others
        .into_iter()
        .flat_map(|value| parse_extensions_header(value.as_ref()))
        .chain(std::iter::once(EXTENSION_URI.to_string()));
    for entry in candidates {
        if !entries.contains(&entry) {
            entries.push(entry);
        }
    }
    entries.join(", ")
}

/// Whether any [`EXTENSIONS_HEADER`] header (name matched
/// case-insensitively) lists this extension.
pub fn is_extension_activated<I, K, V>(headers: I) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    headers.into_iter().any(|(name, value)| {
        name.as_ref().eq_ignore_ascii_case(EXTENSIONS_HEADER)
            && parse_extensions_header(value.as_ref())
                .iter()
                .any(|entry| entry == EXTENSION_URI)
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        ids::now,
        models::{ObjectiveStatus, Population},
    };

    fn sample_task() -> PlanTask {
        PlanTask {
            id: "task-b".into(),
            plan_id: "plan-1".into(),
            objective_id: "obj-1".into(),
            name: "Test".into(),
            description: None,
            index: 1,
            dependencies: vec!["task-a".into()],
            a2a_task_id: None,
            status: None,
            metadata: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_link_round_trip_keeps_other_keys() {
        let mut metadata = Metadata::new();
        metadata.insert("caller".into(), json!("kept"));

        let link = link_for_task(&sample_task());
        set_hierarchy_metadata(&mut metadata, &link);

        assert_eq!(metadata[keys::DEPENDENCIES], json!(["task-a"]));
        assert_eq!(metadata["caller"], json!("kept"));
        assert_eq!(hierarchy_metadata(&metadata), Some(link));
    }

    #[test]
    fn test_empty_dependencies_remove_key() {
        let mut metadata = Metadata::new();
        let mut link = link_for_task(&sample_task());
        set_hierarchy_metadata(&mut metadata, &link);

        link.dependencies.clear();
        set_hierarchy_metadata(&mut metadata, &link);
        assert!(!metadata.contains_key(keys::DEPENDENCIES));
        assert_eq!(hierarchy_metadata(&metadata).unwrap().dependencies, Vec::<String>::new());
    }

    #[test]
    fn test_incomplete_metadata_has_no_link() {
        let mut metadata = Metadata::new();
        metadata.insert(keys::OBJECTIVE_ID.into(), json!("obj-1"));
        assert_eq!(hierarchy_metadata(&metadata), None);

        metadata.insert(keys::PLAN_ID.into(), json!("plan-1"));
        metadata.insert(keys::TASK_INDEX.into(), json!(-1));
        assert_eq!(hierarchy_metadata(&metadata), None);
    }

    #[test]
    fn test_embedded_snapshots() {
        let objective = Objective {
            id: "obj-1".into(),
            name: "Ship".into(),
            description: None,
            status: ObjectiveStatus::Working,
            plans: Population::Omitted,
            metadata: None,
            created_at: now(),
            updated_at: now(),
        };
        let mut metadata = Metadata::new();
        assert_eq!(embedded_objective(&metadata).unwrap(), None);

        embed_objective(&mut metadata, &objective).unwrap();
        assert_eq!(embedded_objective(&metadata).unwrap(), Some(objective));
        assert_eq!(embedded_plan(&metadata).unwrap(), None);

        metadata.insert(keys::PLAN.into(), json!({ "id": 5 }));
        assert!(embedded_plan(&metadata).is_err());
    }

    #[test]
    fn test_activation_header() {
        assert!(is_extension_activated([(
            "x-a2a-extensions",
            format!("https://example.com/other, {EXTENSION_URI}"),
        )]));
        assert!(!is_extension_activated([("X-A2A-Extensions", "https://example.com/other")]));
        assert!(!is_extension_activated([("Accept", EXTENSION_URI)]));
    }

    #[test]
    fn test_header_build_and_parse() {
        let header = build_extensions_header(["https://example.com/a", EXTENSION_URI]);
        assert_eq!(header, format!("https://example.com/a, {EXTENSION_URI}"));
        assert_eq!(
            parse_extensions_header(&header),
            vec!["https://example.com/a".to_string(), EXTENSION_URI.to_string()]
        );
        assert_eq!(build_extensions_header(Vec::<String>::new()), EXTENSION_URI);
        assert!(parse_extensions_header(" , ,").is_empty());
    }
}
