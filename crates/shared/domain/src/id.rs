//! Entity identifiers.

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Generate a fresh random identifier.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Parse the canonical text form of an identifier.
///
/// # Errors
/// Returns [`DomainError::InvalidId`] when `s` is not a well-formed UUID.
pub fn parse_id(s: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(s).map_err(|_| DomainError::InvalidId)
}
