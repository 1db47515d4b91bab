//! Operation error types

use thiserror::Error;

/// Result type for operation application
pub type OpResult<T> = std::result::Result<T, OpError>;

/// Errors reported by the operation applier
///
/// Every variant carries enough context (operation kind plus offending
/// field) for the caller to build a user-facing message. An error always
/// means the document was left unchanged.
#[derive(Debug, Error)]
pub enum OpError {
    /// Operation payload failed validation
    #[error("{op}: invalid field '{field}': {reason}")]
    Validation {
        /// Operation kind ("update_cell", "sort", ...)
        op: &'static str,
        /// The field that failed
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

impl OpError {
    /// Shorthand for a validation error
    pub fn validation(op: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        OpError::Validation {
            op,
            field,
            reason: reason.into(),
        }
    }
}
