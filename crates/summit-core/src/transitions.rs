//! Legal status transitions for objectives and plans.
//!
//! Each status enum carries a fixed adjacency table. Staying in the same
//! state is always allowed. These functions are pure; the hierarchy service
//! consults them before any status change reaches a store, and the stores
//! themselves have no opinion on legality.

use crate::{
    error::{HierarchyError, Result},
    models::{ObjectiveStatus, PlanStatus},
};

/// A status enum with a fixed transition table.
pub trait StatusMachine: Copy + Eq + 'static {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    /// States reachable in one step, excluding the implicit self-loop.
    fn successors(self) -> &'static [Self];

    /// String form used in messages.
    fn label(self) -> &'static str;

    /// Whether no other state can be reached from this one.
    fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

impl StatusMachine for ObjectiveStatus {
    const ENTITY: &'static str = "objective";

    fn successors(self) -> &'static [Self] {
        use ObjectiveStatus::*;
        match self {
            Submitted => &[Planning, Working, Canceled],
            Planning => &[Working, Blocked, Failed, Canceled],
            Working => &[Blocked, Completed, Failed, Canceled],
            Blocked => &[Planning, Working, Failed, Canceled],
            Completed => &[],
            // retry
            Failed => &[Submitted, Planning],
            // restart
            Canceled => &[Submitted],
        }
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl StatusMachine for PlanStatus {
    const ENTITY: &'static str = "plan";

    fn successors(self) -> &'static [Self] {
        use PlanStatus::*;
        match self {
            Pending => &[Working, Skipped],
            Working => &[Blocked, Completed, Failed],
            Blocked => &[Working, Failed, Skipped],
            Completed => &[],
            Failed => &[Pending, Working],
            Skipped => &[],
        }
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

/// Returns `true` iff `from == to` or `to` is a successor of `from`.
///
/// # Examples
///
/// ```rust
/// use summit_core::models::{ObjectiveStatus, PlanStatus};
/// use summit_core::transitions::is_valid_transition;
///
/// assert!(is_valid_transition(ObjectiveStatus::Submitted, ObjectiveStatus::Planning));
/// assert!(!is_valid_transition(ObjectiveStatus::Submitted, ObjectiveStatus::Completed));
/// assert!(is_valid_transition(PlanStatus::Skipped, PlanStatus::Skipped));
/// ```
pub fn is_valid_transition<S: StatusMachine>(from: S, to: S) -> bool {
    from == to || from.successors().contains(&to)
}

/// Checks a transition and names the attempted pair when it is illegal.
///
/// # Errors
///
/// Returns `HierarchyError::InvalidTransition` when `to` is not reachable
/// from `from`.
pub fn ensure_transition<S: StatusMachine>(from: S, to: S) -> Result<()> {
    if is_valid_transition(from, to) {
        Ok(())
    } else {
        Err(HierarchyError::InvalidTransition {
            entity: S::ENTITY,
            from: from.label().to_string(),
            to: to.label().to_string(),
        })
    }
}

/// Objective-specific shorthand for [`is_valid_transition`].
pub fn is_valid_objective_transition(from: ObjectiveStatus, to: ObjectiveStatus) -> bool {
    is_valid_transition(from, to)
}

/// Plan-specific shorthand for [`is_valid_transition`].
pub fn is_valid_plan_transition(from: PlanStatus, to: PlanStatus) -> bool {
    is_valid_transition(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objective_table(from: ObjectiveStatus) -> Vec<ObjectiveStatus> {
        use ObjectiveStatus::*;
        match from {
            Submitted => vec![Planning, Working, Canceled],
            Planning => vec![Working, Blocked, Failed, Canceled],
            Working => vec![Blocked, Completed, Failed, Canceled],
            Blocked => vec![Planning, Working, Failed, Canceled],
            Completed => vec![],
            Failed => vec![Submitted, Planning],
            Canceled => vec![Submitted],
        }
    }

    fn plan_table(from: PlanStatus) -> Vec<PlanStatus> {
        use PlanStatus::*;
        match from {
            Pending => vec![Working, Skipped],
            Working => vec![Blocked, Completed, Failed],
            Blocked => vec![Working, Failed, Skipped],
            Completed => vec![],
            Failed => vec![Pending, Working],
            Skipped => vec![],
        }
    }

    #[test]
    fn test_objective_transition_closure() {
        for from in ObjectiveStatus::ALL {
            let allowed = objective_table(from);
            for to in ObjectiveStatus::ALL {
                let expected = from == to || allowed.contains(&to);
                assert_eq!(
                    is_valid_objective_transition(from, to),
                    expected,
                    "objective {} -> {}",
                    from.as_str(),
                    to.as_str()
                );
            }
        }
    }

    #[test]
    fn test_plan_transition_closure() {
        for from in PlanStatus::ALL {
            let allowed = plan_table(from);
            for to in PlanStatus::ALL {
                let expected = from == to || allowed.contains(&to);
                assert_eq!(
                    is_valid_plan_transition(from, to),
                    expected,
                    "plan {} -> {}",
                    from.as_str(),
                    to.as_str()
                );
            }
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(ObjectiveStatus::Completed.is_terminal());
        assert!(PlanStatus::Completed.is_terminal());
        assert!(PlanStatus::Skipped.is_terminal());
        assert!(!ObjectiveStatus::Canceled.is_terminal());
        assert!(!PlanStatus::Failed.is_terminal());

        let terminal: Vec<_> = ObjectiveStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![ObjectiveStatus::Completed]);
    }

    #[test]
    fn test_ensure_transition_reports_pair() {
        let err = ensure_transition(PlanStatus::Skipped, PlanStatus::Working).unwrap_err();
        match err {
            HierarchyError::InvalidTransition { entity, from, to } => {
                assert_eq!(entity, "plan");
                assert_eq!(from, "skipped");
                assert_eq!(to, "working");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(ensure_transition(ObjectiveStatus::Failed, ObjectiveStatus::Submitted).is_ok());
    }
}
