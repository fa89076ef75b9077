//! Builder for creating and configuring Hierarchy instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;
use tokio::task;

use super::{Hierarchy, StatusHook};
use crate::{
    db::SqliteStore,
    error::{HierarchyError, Result},
    models::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    store::{HierarchyStore, InMemoryStore},
};

#[derive(Debug, Clone)]
enum Backend {
    Memory,
    Sqlite(Option<PathBuf>),
}

/// Builder for creating and configuring Hierarchy instances.
#[derive(Clone)]
pub struct HierarchyBuilder {
    backend: Backend,
    default_page_size: usize,
    hook: Option<Arc<dyn StatusHook>>,
}

impl HierarchyBuilder {
    /// Creates a builder for the SQLite backend at the default location.
    pub fn new() -> Self {
        Self {
            backend: Backend::Sqlite(None),
            default_page_size: DEFAULT_PAGE_SIZE,
            hook: None,
        }
    }

    /// Uses the in-memory store; nothing survives the process.
    pub fn in_memory(mut self) -> Self {
        self.backend = Backend::Memory;
        self
    }

    /// Sets a custom database file path and selects the SQLite backend.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/summit/summit.db` or `~/.local/share/summit/summit.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.backend = Backend::Sqlite(Some(path.as_ref().to_path_buf()));
        }
        self
    }

    /// Page size for listings that do not request one. Zero keeps the
    /// built-in default; values above the maximum are clamped.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        if size > 0 {
            self.default_page_size = size.min(MAX_PAGE_SIZE);
        }
        self
    }

    /// Registers a hook awaited after every stored status change.
    pub fn with_status_hook(mut self, hook: Arc<dyn StatusHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Builds the configured service.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::XdgDirectory` if the default path cannot be
    /// resolved, `HierarchyError::FileSystem` if the database directory
    /// cannot be created and `HierarchyError::Database` if schema
    /// initialization fails.
    pub async fn build(self) -> Result<Hierarchy> {
        let store: Arc<dyn HierarchyStore> = match self.backend {
            Backend::Memory => {
                info!("Using in-memory store");
                Arc::new(InMemoryStore::new())
            }
            Backend::Sqlite(path) => {
                let db_path = match path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                info!("Using SQLite store at {}", db_path.display());

                let store = task::spawn_blocking(move || SqliteStore::open(db_path))
                    .await
                    .map_err(|e| HierarchyError::Configuration {
                        message: format!("Task join error: {e}"),
                    })??;
                Arc::new(store)
            }
        };

        Ok(Hierarchy {
            store,
            hook: self.hook,
            default_page_size: self.default_page_size,
        })
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("summit")
            .place_data_file("summit.db")
            .map_err(|e| HierarchyError::XdgDirectory(e.to_string()))
    }
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
