//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! product and user entities, their invariants, and password hashing.

pub mod constants;
pub mod error;
pub mod id;
pub mod password;
pub mod product;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult, ValidationError};
pub use id::{new_id, parse_id};
pub use password::{HashCost, Password};
pub use product::{validate_product, Product, ProductResponse};
pub use user::{User, UserResponse};
