//! Core library for Summit, an objective → plan → task hierarchy layered on
//! top of a single-level task protocol.
//!
//! An [`Objective`](models::Objective) owns ordered [`Plan`](models::Plan)s,
//! and a plan owns indexed [`PlanTask`](models::PlanTask)s that may link to
//! tasks of the external protocol. The crate is organized leaf-first:
//!
//! - [`ids`]: prefixed identifiers and fixed-format UTC timestamps
//! - [`models`]: records, status enums, request and filter types
//! - [`transitions`]: the legal status moves for objectives and plans
//! - [`store`]: the async [`HierarchyStore`] contract and the in-memory
//!   backend; [`db`] adds a SQLite backend
//! - [`hierarchy`]: the [`Hierarchy`] service that validates, checks
//!   transitions and applies population flags
//! - [`rpc`]: JSON-RPC dispatch onto the service
//! - [`linking`]: metadata and header helpers for the external protocol
//! - [`display`]: markdown rendering for terminals
//!
//! # Quick Start
//!
//! ```rust
//! use summit_core::{
//!     HierarchyBuilder,
//!     params::{CreateObjective, CreatePlan, TaskInput},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hierarchy = HierarchyBuilder::new().in_memory().build().await?;
//!
//! let objective = hierarchy
//!     .create_objective(CreateObjective {
//!         name: "Ship v2".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let plan = hierarchy
//!     .create_plan(CreatePlan {
//!         objective_id: objective.id.clone(),
//!         name: "Release".to_string(),
//!         tasks: vec![
//!             TaskInput { name: "Build".to_string(), ..Default::default() },
//!             TaskInput {
//!                 name: "Publish".to_string(),
//!                 dependencies: vec!["task-0".to_string()],
//!                 ..Default::default()
//!             },
//!         ],
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod hierarchy;
pub mod ids;
pub mod linking;
pub mod models;
pub mod params;
pub mod rpc;
pub mod store;
pub mod transitions;

// Re-export commonly used types
pub use db::{Database, SqliteStore};
pub use error::{HierarchyError, Result};
pub use hierarchy::{Hierarchy, HierarchyBuilder, StatusChange, StatusHook};
pub use models::{
    Objective, ObjectivePage, ObjectiveStatus, Plan, PlanStatus, PlanTask, Population, TaskState,
};
pub use rpc::RpcHandler;
pub use store::{HierarchyStore, InMemoryStore};
pub use transitions::{is_valid_objective_transition, is_valid_plan_transition, is_valid_transition};
