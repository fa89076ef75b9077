//! Data models for objectives, plans and plan tasks.
//!
//! The hierarchy is strictly owned top-down: an [`Objective`] owns its
//! [`Plan`]s and a plan owns its [`PlanTask`]s. Children reference their
//! parents by id only. Child collections use [`Population`] so a response can
//! tell "not requested" apart from "no children".
//!
//! Display implementations for these models live in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use summit_core::models::{Objective, ObjectiveStatus, Population};
//!
//! let objective = Objective {
//!     id: "obj-1".to_string(),
//!     name: "Ship the release".to_string(),
//!     description: None,
//!     status: ObjectiveStatus::default(),
//!     plans: Population::Omitted,
//!     metadata: None,
//!     created_at: summit_core::ids::now(),
//!     updated_at: summit_core::ids::now(),
//! };
//! let json = serde_json::to_value(&objective).unwrap();
//! assert_eq!(json["status"], "submitted");
//! assert!(json.get("plans").is_none());
//! ```

pub mod filters;
pub mod objective;
pub mod plan;
pub mod population;
pub mod requests;
pub mod status;
pub mod task;


pub use filters::{
    ObjectiveFilter, ObjectivePage, PageWindow, StoreCounts, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use objective::Objective;
pub use plan::Plan;
pub use population::Population;
pub use requests::{NewObjective, NewPlan, NewPlanTask, ObjectiveUpdate, PlanTaskUpdate, PlanUpdate};
pub use status::{ObjectiveStatus, PlanStatus, TaskState};
pub use task::PlanTask;

/// Free-form key-value metadata attached to any record.
pub type Metadata = serde_json::Map<String, serde_json::Value>;
