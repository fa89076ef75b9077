//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{ObjectivePage, Plan, PlanTask};

/// Newtype wrapper rendering one page of objectives as a summary list.
///
/// # Examples
///
/// ```rust
/// use summit_core::{display::Objectives, models::ObjectivePage};
///
/// let page = ObjectivePage {
///     objectives: vec![],
///     next_page_token: None,
///     total_size: 0,
/// };
/// assert_eq!(Objectives(&page).to_string(), "No objectives found.\n");
/// ```
pub struct Objectives<'a>(pub &'a ObjectivePage);

impl fmt::Display for Objectives<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        if page.objectives.is_empty() {
            return writeln!(f, "No objectives found.");
        }

        for objective in &page.objectives {
            writeln!(f, "## {} (ID: {})", objective.name, objective.id)?;
            writeln!(f)?;
            writeln!(f, "- **Status**: {}", objective.status.with_icon())?;
            if let Some(desc) = &objective.description {
                writeln!(f, "- **Description**: {desc}")?;
            }
            writeln!(f, "- **Created**: {}", LocalDateTime(&objective.created_at))?;
            writeln!(f)?;
        }

        write!(f, "Showing {} of {}", page.objectives.len(), page.total_size)?;
        if let Some(token) = &page.next_page_token {
            write!(f, " (next page token: {token})")?;
        }
        writeln!(f)
    }
}

/// Newtype wrapper for displaying the plans of an objective.
pub struct Plans(pub Vec<Plan>);

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper listing tasks in index order, one line each.
pub struct Tasks(pub Vec<PlanTask>);

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            task.fmt_line(f)?;
        }
        Ok(())
    }
}
