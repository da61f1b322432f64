//! Application state for dependency injection.

use std::sync::Arc;

use common::JwtConfig;
use domain::HashCost;

use crate::infra::Database;
use crate::repository::{
    InMemoryProductStore, InMemoryUserStore, ProductRepository, ProductStore, UserRepository,
    UserStore,
};
use crate::service::{
    AuthService, Authenticator, ProductManager, ProductService, UserManager, UserService,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub user_service: Arc<dyn UserService>,
    pub auth_service: Arc<dyn AuthService>,
    /// `None` when running on the in-memory stores
    pub database: Option<Database>,
}

impl AppState {
    pub fn new(
        product_service: Arc<dyn ProductService>,
        user_service: Arc<dyn UserService>,
        auth_service: Arc<dyn AuthService>,
        database: Option<Database>,
    ) -> Self {
        Self {
            product_service,
            user_service,
            auth_service,
            database,
        }
    }

    /// Wire the services over the given repositories.
    pub fn from_repositories(
        product_repo: Arc<dyn ProductRepository>,
        user_repo: Arc<dyn UserRepository>,
        jwt: JwtConfig,
        hash_cost: HashCost,
        database: Option<Database>,
    ) -> Self {
        Self::new(
            Arc::new(ProductManager::new(product_repo)),
            Arc::new(UserManager::new(user_repo.clone(), hash_cost)),
            Arc::new(Authenticator::new(user_repo, jwt, hash_cost)),
            database,
        )
    }

    /// State backed by PostgreSQL.
    pub fn with_database(database: Database, jwt: JwtConfig, hash_cost: HashCost) -> Self {
        let conn = database.get_connection();
        Self::from_repositories(
            Arc::new(ProductStore::new(conn.clone())),
            Arc::new(UserStore::new(conn)),
            jwt,
            hash_cost,
            Some(database),
        )
    }

    /// State backed by fresh in-memory stores.
    pub fn in_memory(jwt: JwtConfig, hash_cost: HashCost) -> Self {
        Self::from_repositories(
            Arc::new(InMemoryProductStore::new()),
            Arc::new(InMemoryUserStore::new()),
            jwt,
            hash_cost,
            None,
        )
    }
}
