//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Absent optional data (no customer, no attribution, empty candidate list)
/// is never an error; this type only covers malformed input crossing a
/// boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
