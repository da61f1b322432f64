//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Entity invariant violations, reported in validation precedence order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid entity")]
    InvalidEntity,

    #[error("id is required")]
    IdRequired,

    #[error("name is required")]
    NameRequired,

    #[error("description is required")]
    DescriptionRequired,

    #[error("invalid price")]
    InvalidPrice,
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// An entity field broke an invariant
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A string was not a well-formed identifier
    #[error("invalid id")]
    InvalidId,

    /// Password hashing failed
    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

impl DomainError {
    /// Create a password hashing error
    pub fn password_hash(msg: impl Into<String>) -> Self {
        DomainError::PasswordHash(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
