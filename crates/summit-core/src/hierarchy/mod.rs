//! High-level service API for the objective → plan → task hierarchy.
//!
//! [`Hierarchy`] sits between the interfaces (RPC handler, CLI) and a
//! [`HierarchyStore`] backend. It owns everything the store deliberately does
//! not: parameter validation, turning lookup misses into not-found errors,
//! existence checks on parents, status transition checks and population
//! flags.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  RpcHandler /   │    │    Hierarchy    │    │ HierarchyStore  │
//! │      CLI        │───▶│ (validation,    │───▶│ (memory/sqlite) │
//! │                 │    │  transitions)   │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Hierarchy`] instances with backend selection
//! - [`objective_ops`]: Objective operations
//! - [`plan_ops`]: Plan operations
//! - [`task_ops`]: Plan task operations
//!
//! # Usage
//!
//! ```rust
//! use summit_core::{
//!     HierarchyBuilder,
//!     models::ObjectiveStatus,
//!     params::{CreateObjective, UpdateObjective},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hierarchy = HierarchyBuilder::new().in_memory().build().await?;
//!
//! let objective = hierarchy
//!     .create_objective(CreateObjective {
//!         name: "Launch".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // submitted -> completed is not an edge of the transition table
//! let rejected = hierarchy
//!     .update_objective(UpdateObjective {
//!         id: objective.id.clone(),
//!         status: Some(ObjectiveStatus::Completed),
//!         ..Default::default()
//!     })
//!     .await;
//! assert!(rejected.is_err());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::{
    error::Result,
    models::{ObjectiveStatus, PlanStatus, StoreCounts, TaskState},
    store::HierarchyStore,
};

pub mod builder;
pub mod objective_ops;
pub mod plan_ops;
pub mod task_ops;


pub use builder::HierarchyBuilder;

/// A status change that has been committed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    Objective {
        id: String,
        from: ObjectiveStatus,
        to: ObjectiveStatus,
    },
    Plan {
        id: String,
        objective_id: String,
        from: PlanStatus,
        to: PlanStatus,
    },
    Task {
        id: String,
        plan_id: String,
        objective_id: String,
        from: Option<TaskState>,
        to: Option<TaskState>,
    },
}

impl StatusChange {
    /// ID of the record whose status changed.
    pub fn id(&self) -> &str {
        match self {
            StatusChange::Objective { id, .. }
            | StatusChange::Plan { id, .. }
            | StatusChange::Task { id, .. } => id,
        }
    }
}

/// Observer invoked after a status update has been stored.
///
/// The hierarchy never propagates status on its own; a hook is the place to
/// implement such a policy. Errors returned by a hook are logged and do not
/// undo or fail the update that triggered it.
#[async_trait]
pub trait StatusHook: Send + Sync {
    async fn status_changed(&self, change: &StatusChange) -> Result<()>;
}

/// Main service interface for managing objectives, plans and tasks.
#[derive(Clone)]
pub struct Hierarchy {
    pub(crate) store: Arc<dyn HierarchyStore>,
    pub(crate) hook: Option<Arc<dyn StatusHook>>,
    pub(crate) default_page_size: usize,
}

impl Hierarchy {
    /// Creates a service over an existing store with default settings.
    pub fn new(store: Arc<dyn HierarchyStore>) -> Self {
        Self {
            store,
            hook: None,
            default_page_size: crate::models::DEFAULT_PAGE_SIZE,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn HierarchyStore> {
        &self.store
    }

    /// Page size used when a listing request does not give one.
    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    /// Number of stored records per entity.
    pub async fn counts(&self) -> Result<StoreCounts> {
        self.store.counts().await
    }

    pub(crate) async fn notify(&self, change: StatusChange) {
        let Some(hook) = &self.hook else {
            return;
        };
        debug!("status changed: {change:?}");
        if let Err(e) = hook.status_changed(&change).await {
            warn!("Status hook failed for {}: {e}", change.id());
        }
    }
}
