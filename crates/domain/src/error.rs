//! Unified error types for the domain layer
//!
//! Every rejected meal operation surfaces one of these variants. Messages
//! always carry the offending value so callers can report it verbatim.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (bad price, difficulty, or name)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity absent (or soft-deleted, on read paths)
    #[error("{entity_type} with {key} {value} not found")]
    NotFound {
        entity_type: &'static str,
        key: &'static str,
        value: String,
    },

    /// Entity exists but carries the soft-delete tag
    #[error("{entity_type} with ID {id} has been deleted")]
    Deleted { entity_type: &'static str, id: String },

    /// Name collision among active records
    #[error("{entity_type} with name '{name}' already exists")]
    Duplicate {
        entity_type: &'static str,
        name: String,
    },

    /// Operation not allowed in the current state (e.g. combatant slots)
    #[error("{0}")]
    InvalidState(String),

    /// Unknown leaderboard sort key
    #[error("Invalid sort_by parameter: {0}")]
    InvalidSortKey(String),
}

impl DomainError {
    /// Creates a validation error for rejected input values.
    ///
    /// # Example
    /// ```ignore
    /// if value <= 0.0 {
    ///     return Err(DomainError::validation(format!("Invalid price: {value}")));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error for a lookup by numeric ID
    pub fn not_found_id(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            key: "ID",
            value: id.to_string(),
        }
    }

    /// Create a not found error for a lookup by name
    pub fn not_found_name(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            key: "name",
            value: name.into(),
        }
    }

    pub fn deleted(entity_type: &'static str, id: impl ToString) -> Self {
        Self::Deleted {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn duplicate(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            name: name.into(),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn invalid_sort_key(key: impl Into<String>) -> Self {
        Self::InvalidSortKey(key.into())
    }
}
