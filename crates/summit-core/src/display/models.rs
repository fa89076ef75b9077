//! Display implementations for domain models.
//!
//! Models render as markdown for the terminal. Child collections that were
//! not requested are left out entirely; requested but empty collections say
//! so.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Objective, ObjectiveStatus, Plan, PlanStatus, PlanTask, Population, TaskState};

impl fmt::Display for ObjectiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ObjectiveStatus {
    /// Status label prefixed with an icon.
    pub fn with_icon(&self) -> String {
        let icon = match self {
            ObjectiveStatus::Submitted => "○",
            ObjectiveStatus::Planning => "◇",
            ObjectiveStatus::Working => "➤",
            ObjectiveStatus::Blocked => "■",
            ObjectiveStatus::Completed => "✓",
            ObjectiveStatus::Failed => "✗",
            ObjectiveStatus::Canceled => "⊘",
        };
        format!("{icon} {}", self.as_str())
    }
}

impl PlanStatus {
    /// Status label prefixed with an icon.
    pub fn with_icon(&self) -> String {
        let icon = match self {
            PlanStatus::Pending => "○",
            PlanStatus::Working => "➤",
            PlanStatus::Blocked => "■",
            PlanStatus::Completed => "✓",
            PlanStatus::Failed => "✗",
            PlanStatus::Skipped => "↷",
        };
        format!("{icon} {}", self.as_str())
    }
}

impl TaskState {
    /// Status label prefixed with an icon.
    pub fn with_icon(&self) -> String {
        let icon = match self {
            TaskState::Submitted => "○",
            TaskState::Working => "➤",
            TaskState::InputRequired | TaskState::AuthRequired => "?",
            TaskState::Completed => "✓",
            TaskState::Canceled => "⊘",
            TaskState::Failed | TaskState::Rejected => "✗",
            TaskState::Unknown => "·",
        };
        format!("{icon} {}", self.as_str())
    }
}

fn heading(level: usize) -> String {
    "#".repeat(level)
}

impl Plan {
    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        writeln!(f, "{} {} ({})", heading(level), self.name, self.status.with_icon())?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        if level == 1 {
            writeln!(f, "- Objective: {}", self.objective_id)?;
        }
        if !self.dependencies.is_empty() {
            writeln!(f, "- Depends on: {}", self.dependencies.join(", "))?;
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        match &self.tasks {
            Population::Omitted => {}
            Population::Loaded(tasks) if tasks.is_empty() => {
                writeln!(f, "\nNo tasks in this plan.")?;
            }
            Population::Loaded(tasks) => {
                writeln!(f)?;
                for task in tasks {
                    task.fmt_line(f)?;
                }
            }
        }
        writeln!(f)
    }
}

impl PlanTask {
    /// One list item, as shown inside a plan.
    pub(super) fn fmt_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. **{}**", self.index, self.name)?;
        if let Some(status) = &self.status {
            write!(f, " ({})", status.with_icon())?;
        }
        write!(f, " `{}`", self.id)?;
        if let Some(a2a) = &self.a2a_task_id {
            write!(f, " → {a2a}")?;
        }
        if !self.dependencies.is_empty() {
            write!(f, ", after {}", self.dependencies.join(", "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        match &self.plans {
            Population::Omitted => {}
            Population::Loaded(plans) if plans.is_empty() => {
                writeln!(f, "\nNo plans for this objective.")?;
            }
            Population::Loaded(plans) => {
                writeln!(f, "\n## Plans")?;
                writeln!(f)?;
                for plan in plans {
                    plan.fmt_at(f, 3)?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 1)
    }
}

impl fmt::Display for PlanTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}. {}", self.index, self.name)?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Plan: {}", self.plan_id)?;
        if let Some(status) = &self.status {
            writeln!(f, "- Status: {}", status.with_icon())?;
        }
        if let Some(a2a) = &self.a2a_task_id {
            writeln!(f, "- Linked task: {a2a}")?;
        }
        if !self.dependencies.is_empty() {
            writeln!(f, "- Depends on: {}", self.dependencies.join(", "))?;
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        Ok(())
    }
}
