//! User service - account management use cases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{HashCost, User};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user; the password is hashed before persistence
    async fn create_user(&self, name: String, email: String, password: String)
        -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Overwrite name and email; re-hash the password only when one is given
    async fn update_user(
        &self,
        id: Uuid,
        name: String,
        email: String,
        password: Option<String>,
    ) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    hash_cost: HashCost,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>, hash_cost: HashCost) -> Self {
        Self { repo, hash_cost }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AppResult<User> {
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let user = User::with_cost(name, email, &password, &self.hash_cost)?;
        self.repo.create(&user).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await
    }

    async fn update_user(
        &self,
        id: Uuid,
        name: String,
        email: String,
        password: Option<String>,
    ) -> AppResult<User> {
        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        if email != user.email {
            if let Some(other) = self.repo.find_by_email(&email).await? {
                if other.id != id {
                    return Err(AppError::conflict("Email"));
                }
            }
        }

        user.set_name(name).set_email(email);
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            user.set_password_with_cost(&password, &self.hash_cost)?;
        }

        self.repo.update(&user).await?;
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.find_by_id(id).await?.ok_or_not_found()?;
        self.repo.delete(id).await
    }
}
