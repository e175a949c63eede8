//! Error types for the cognition graph.
//!
//! Not-found cases are not errors here: lookups return `Option` and removals
//! return `bool`, so callers only handle `Error` for genuinely rejected
//! input.

use crate::validate::Issue;

/// Errors that can occur in cognition graph operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input failed shape validation; carries the complete defect list
    #[error("validation failed: {}", Issue::join(.0))]
    Validation(Vec<Issue>),

    /// Edge endpoint does not resolve to a stored node
    #[error("dangling endpoint: node '{0}' does not exist")]
    DanglingEndpoint(String),

    /// Whole-document validation failed during hydration
    #[error("hydration failed: {}", Issue::join(.0))]
    Hydration(Vec<Issue>),

    /// Serialization / deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
