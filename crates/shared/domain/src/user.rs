//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainResult;
use crate::id::new_id;
use crate::password::{HashCost, Password};

/// User domain entity
///
/// The password is held only in hashed form; plaintext is consumed at
/// construction and by [`User::set_password`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: Password,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user, hashing the password with the default cost.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        plain_password: &str,
    ) -> DomainResult<Self> {
        Self::with_cost(name, email, plain_password, &HashCost::default())
    }

    /// Create a new user, hashing the password with `cost`.
    ///
    /// # Errors
    /// Returns [`DomainError::PasswordHash`](crate::DomainError::PasswordHash)
    /// if the password cannot be hashed.
    pub fn with_cost(
        name: impl Into<String>,
        email: impl Into<String>,
        plain_password: &str,
        cost: &HashCost,
    ) -> DomainResult<Self> {
        let password = Password::with_cost(plain_password, cost)?;
        Ok(Self {
            id: new_id(),
            name: name.into(),
            email: email.into(),
            password,
            created_at: Utc::now(),
        })
    }

    /// Rebuild a user from stored fields.
    pub fn from_parts(
        id: Uuid,
        name: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password: Password::from_hash(password_hash),
            created_at,
        }
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> &mut Self {
        self.email = email.into();
        self
    }

    /// Replace the password with a fresh hash of `plain_password`.
    ///
    /// On error the previous hash is kept.
    pub fn set_password(&mut self, plain_password: &str) -> DomainResult<()> {
        self.set_password_with_cost(plain_password, &HashCost::default())
    }

    pub fn set_password_with_cost(
        &mut self,
        plain_password: &str,
        cost: &HashCost,
    ) -> DomainResult<()> {
        self.password = Password::with_cost(plain_password, cost)?;
        Ok(())
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// User display name
    pub name: String,
    /// User email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_PASSWORD_BYTES;
    use crate::error::DomainError;

    fn cheap() -> HashCost {
        HashCost::new(8, 1, 1)
    }

    #[test]
    fn test_new_user() {
        let user = User::with_cost("John Doe", "j@j.com", "123456", &cheap()).unwrap();

        assert!(!user.id.is_nil());
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "j@j.com");
        assert_ne!(user.password.as_str(), "123456");
    }

    #[test]
    fn test_check_password() {
        let user = User::with_cost("John Doe", "j@j.com", "123456", &cheap()).unwrap();

        assert!(user.check_password("123456"));
        assert!(!user.check_password("1234567"));
        assert!(!user.check_password(""));
    }

    #[test]
    fn test_fluent_setters() {
        let mut user = User::with_cost("test", "test@test.com", "test1", &cheap()).unwrap();
        let id = user.id;

        user.set_name("test updated").set_email("updated@test.com");

        assert_eq!(user.id, id);
        assert_eq!(user.name, "test updated");
        assert_eq!(user.email, "updated@test.com");
        assert!(user.check_password("test1"));
    }

    #[test]
    fn test_set_password_rehashes() {
        let mut user = User::with_cost("test", "test@test.com", "test1", &cheap()).unwrap();
        let old_hash = user.password.clone();

        user.set_password_with_cost("test2", &cheap()).unwrap();

        assert_ne!(user.password, old_hash);
        assert_ne!(user.password.as_str(), "test2");
        assert!(user.check_password("test2"));
        assert!(!user.check_password("test1"));
    }

    #[test]
    fn test_failed_set_password_keeps_hash() {
        let mut user = User::with_cost("test", "test@test.com", "test1", &cheap()).unwrap();
        let old_hash = user.password.clone();

        let too_long = "x".repeat(MAX_PASSWORD_BYTES + 1);
        let result = user.set_password_with_cost(&too_long, &cheap());

        assert!(matches!(result, Err(DomainError::PasswordHash(_))));
        assert_eq!(user.password, old_hash);
        assert!(user.check_password("test1"));
    }

    #[test]
    fn test_from_parts_keeps_hash() {
        let user = User::with_cost("test", "test@test.com", "test1", &cheap()).unwrap();
        let restored = User::from_parts(
            user.id,
            user.name.clone(),
            user.email.clone(),
            user.password.as_str().to_string(),
            user.created_at,
        );

        assert_eq!(restored, user);
        assert!(restored.check_password("test1"));
    }

    #[test]
    fn test_response_has_no_password() {
        let user = User::with_cost("test", "test@test.com", "test1", &cheap()).unwrap();
        let response = UserResponse::from(&user);

        assert_eq!(response.id, user.id);
        assert_eq!(response.email, "test@test.com");
        assert!(!format!("{:?}", response).contains("argon2"));
    }
}
