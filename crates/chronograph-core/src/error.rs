//! Error types for Chronograph
//!
//! The library distinguishes three failure classes: caller contract
//! violations (malformed input, surfaced immediately with the offending
//! ids), internal invariant violations (programming errors that correct
//! operation never produces), and query-input validation failures.
//! "Not found" for optional lookups is expressed as `Option`/empty
//! collections, never as an error.

use thiserror::Error;

/// The main error type for Chronograph operations
#[derive(Error, Debug)]
pub enum Error {
    // ========== Caller Contract Violations ==========
    #[error("Root(s) not present in data: {0}")]
    RootsNotFound(String),

    // ========== Query Input Errors ==========
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid sort: {0}")]
    InvalidSort(String),

    // ========== Internal Invariant Violations ==========
    #[error("Found {found} vertex where {expected} was expected: {id}")]
    WrongVertexKind {
        expected: &'static str,
        found: &'static str,
        id: String,
    },

    #[error("Link entity {link_entity_id} is missing its {endpoint} endpoint edge")]
    MissingEdgeEndpoint {
        link_entity_id: String,
        endpoint: &'static str,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Chronograph operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true if this error indicates malformed caller input
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Error::RootsNotFound(_) | Error::InvalidFilter(_) | Error::InvalidSort(_)
        )
    }

    /// Returns true if this error is an internal invariant violation,
    /// i.e. a programming error rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::WrongVertexKind { .. } | Error::MissingEdgeEndpoint { .. } | Error::Internal(_)
        )
    }
}
