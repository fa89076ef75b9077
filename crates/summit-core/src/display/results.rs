//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Objective, Plan, PlanTask};

/// A record that can be named in a result message.
pub trait Resource: fmt::Display {
    /// Lower-case kind name, e.g. `"objective"`
    const KIND: &'static str;

    fn id(&self) -> &str;
}

impl Resource for Objective {
    const KIND: &'static str = "objective";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Plan {
    const KIND: &'static str = "plan";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for PlanTask {
    const KIND: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use summit_core::{
///     display::CreateResult,
///     ids::now,
///     models::{Objective, ObjectiveStatus, Population},
/// };
///
/// let objective = Objective {
///     id: "obj-1".to_string(),
///     name: "Launch".to_string(),
///     description: None,
///     status: ObjectiveStatus::Submitted,
///     plans: Population::Loaded(vec![]),
///     metadata: None,
///     created_at: now(),
///     updated_at: now(),
/// };
/// let output = CreateResult::new(objective).to_string();
/// assert!(output.starts_with("Created objective with ID: obj-1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::KIND, self.resource.id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Confirmation that a record and its descendants were removed.
pub struct DeleteResult {
    pub kind: &'static str,
    pub id: String,
}

impl DeleteResult {
    pub fn new(kind: &'static str, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted {} {}", self.kind, self.id)
    }
}
