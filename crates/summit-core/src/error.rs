//! Error types for the hierarchy library.

use std::path::PathBuf;

use thiserror::Error;

use crate::rpc::ErrorCode;

/// Comprehensive error type for all hierarchy operations.
#[derive(Error, Debug)]
pub enum HierarchyError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Objective not found for the given ID
    #[error("Objective not found: {id}")]
    ObjectiveNotFound { id: String },
    /// Plan not found for the given ID
    #[error("Plan not found: {id}")]
    PlanNotFound { id: String },
    /// Plan task not found for the given ID
    #[error("Task not found: {id}")]
    TaskNotFound { id: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Requested status change is not an edge of the transition table
    #[error("Invalid {entity} status transition: {from} -> {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Anything else raised by a backend (poisoned locks, join failures)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> HierarchyError {
        HierarchyError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> HierarchyError {
        HierarchyError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl HierarchyError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an internal error from anything displayable.
    pub fn internal(message: impl std::fmt::Display) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Maps the error onto the RPC error taxonomy.
    ///
    /// Validation failures become `INVALID_PARAMS`, lookup misses `NOT_FOUND`,
    /// rejected status changes `INVALID_STATE`; every other failure is reported
    /// as `INTERNAL_ERROR`.
    pub fn rpc_code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { .. } => ErrorCode::InvalidParams,
            Self::ObjectiveNotFound { .. }
            | Self::PlanNotFound { .. }
            | Self::TaskNotFound { .. } => ErrorCode::NotFound,
            Self::InvalidTransition { .. } => ErrorCode::InvalidState,
            Self::Database { .. }
            | Self::Serialization { .. }
            | Self::FileSystem { .. }
            | Self::XdgDirectory(_)
            | Self::Configuration { .. }
            | Self::Internal { .. } => ErrorCode::InternalError,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| HierarchyError::database(message).with_source(e))
    }
}

/// Result type alias for hierarchy operations
pub type Result<T> = std::result::Result<T, HierarchyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_code_mapping() {
        assert_eq!(
            HierarchyError::invalid_input("name").with_reason("required").rpc_code(),
            ErrorCode::InvalidParams
        );
        assert_eq!(
            HierarchyError::PlanNotFound { id: "plan-x".into() }.rpc_code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            HierarchyError::InvalidTransition {
                entity: "objective",
                from: "submitted".into(),
                to: "completed".into(),
            }
            .rpc_code(),
            ErrorCode::InvalidState
        );
        assert_eq!(
            HierarchyError::internal("boom").rpc_code(),
            ErrorCode::InternalError
        );
    }

    #[test]
    fn test_transition_message_names_pair() {
        let err = HierarchyError::InvalidTransition {
            entity: "plan",
            from: "completed".into(),
            to: "working".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid plan status transition: completed -> working"
        );
    }
}
