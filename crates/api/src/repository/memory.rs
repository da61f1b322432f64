//! In-memory repositories for development and tests.
//!
//! Rows are kept in insertion order, so listings sorted by `created_at` are
//! stable for equal timestamps.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductRepository, UserRepository};
use crate::types::{PageRequest, SortDirection};
use common::{AppError, AppResult};
use domain::{Product, User};

/// In-memory implementation of ProductRepository
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductStore {
    async fn create(&self, product: &Product) -> AppResult<()> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id == product.id) {
            return Err(AppError::conflict("Product"));
        }
        products.push(product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(
        &self,
        page: u64,
        limit: u64,
        sort: SortDirection,
    ) -> AppResult<Vec<Product>> {
        let mut sorted = self.products.read().await.clone();

        // Stable sort keeps insertion order on ties
        sorted.sort_by_key(|p| p.created_at);
        if sort == SortDirection::Desc {
            sorted.reverse();
        }

        Ok(PageRequest::new(page, limit).slice(sorted))
    }

    async fn update(&self, product: &Product) -> AppResult<()> {
        let mut products = self.products.write().await;
        let existing = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(AppError::NotFound)?;

        existing.name = product.name.clone();
        existing.description = product.description.clone();
        existing.price = product.price;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        products.remove(index);
        Ok(())
    }
}

/// In-memory implementation of UserRepository
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Email"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users = self.users.read().await.clone();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(AppError::conflict("Email"));
        }

        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(AppError::NotFound)?;

        existing.name = user.name.clone();
        existing.email = user.email.clone();
        existing.password = user.password.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.write().await;
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        users.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domain::HashCost;

    fn cheap() -> HashCost {
        HashCost::new(8, 1, 1)
    }

    async fn seed_products(repo: &InMemoryProductStore, count: usize) -> Vec<Product> {
        let base = Utc::now();
        let mut created = Vec::with_capacity(count);
        for i in 0..count {
            let mut product =
                Product::new(format!("Product {}", i), "Product description", 10.0 + i as f64)
                    .unwrap();
            product.created_at = base + Duration::milliseconds(i as i64);
            repo.create(&product).await.unwrap();
            created.push(product);
        }
        created
    }

    #[tokio::test]
    async fn test_create_and_find_product() {
        let repo = InMemoryProductStore::new();
        let product = Product::new("Product 1", "Product description", 10.0).unwrap();

        repo.create(&product).await.unwrap();

        let found = repo.find_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(found, product);
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_paginates_in_creation_order() {
        let repo = InMemoryProductStore::new();
        let created = seed_products(&repo, 106).await;

        let page = repo.find_all(1, 10, SortDirection::Asc).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].name, "Product 0");
        assert_eq!(page[9].name, "Product 9");

        let page = repo.find_all(2, 10, SortDirection::Asc).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].name, "Product 10");
        assert_eq!(page[9].name, "Product 19");

        let page = repo.find_all(11, 10, SortDirection::Asc).await.unwrap();
        assert_eq!(page.len(), 6);
        assert_eq!(page[0].name, "Product 100");
        assert_eq!(page[5].name, "Product 105");
        assert_eq!(page[5].id, created[105].id);
    }

    #[tokio::test]
    async fn test_find_all_desc_and_unbounded() {
        let repo = InMemoryProductStore::new();
        seed_products(&repo, 25).await;

        let page = repo.find_all(1, 5, SortDirection::Desc).await.unwrap();
        assert_eq!(page[0].name, "Product 24");
        assert_eq!(page[4].name, "Product 20");

        assert_eq!(repo.find_all(0, 5, SortDirection::Asc).await.unwrap().len(), 25);
        assert_eq!(repo.find_all(3, 0, SortDirection::Asc).await.unwrap().len(), 25);
    }

    #[tokio::test]
    async fn test_equal_timestamps_keep_insertion_order() {
        let repo = InMemoryProductStore::new();
        let at = Utc::now();
        for i in 0..5 {
            let mut product = Product::new(format!("P{}", i), "d", 1.0).unwrap();
            product.created_at = at;
            repo.create(&product).await.unwrap();
        }

        let names: Vec<String> = repo
            .find_all(0, 0, SortDirection::Asc)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["P0", "P1", "P2", "P3", "P4"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_product() {
        let repo = InMemoryProductStore::new();
        let mut product = Product::new("Product 1", "Product description", 10.0).unwrap();
        repo.create(&product).await.unwrap();

        product.update("Product 1 updated", "New description", 20.0).unwrap();
        repo.update(&product).await.unwrap();

        let found = repo.find_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Product 1 updated");
        assert_eq!(found.price, 20.0);
        assert_eq!(found.created_at, product.created_at);

        repo.delete(product.id).await.unwrap();
        assert!(repo.find_by_id(product.id).await.unwrap().is_none());
        assert!(matches!(repo.delete(product.id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let repo = InMemoryProductStore::new();
        let product = Product::new("ghost", "never stored", 1.0).unwrap();

        assert!(matches!(repo.update(&product).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_user_store_round_trip() {
        let repo = InMemoryUserStore::new();
        let mut user = User::with_cost("test", "test@test.com", "test1", &cheap()).unwrap();
        repo.create(&user).await.unwrap();

        let by_email = repo.find_by_email("test@test.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        let old_hash = user.password.clone();
        user.set_email("updated@test.com");
        user.set_password_with_cost("test2", &cheap()).unwrap();
        repo.update(&user).await.unwrap();

        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.email, "updated@test.com");
        assert_ne!(found.password, old_hash);
        assert_ne!(found.password.as_str(), "test2");
        assert!(found.check_password("test2"));
        assert!(repo.find_by_email("test@test.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_store_rejects_duplicate_email() {
        let repo = InMemoryUserStore::new();
        let first = User::with_cost("a", "same@test.com", "pw", &cheap()).unwrap();
        let second = User::with_cost("b", "same@test.com", "pw", &cheap()).unwrap();

        repo.create(&first).await.unwrap();
        assert!(matches!(repo.create(&second).await, Err(AppError::Conflict(_))));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let repo = InMemoryUserStore::new();
        let user = User::with_cost("test", "test@test.com", "test1", &cheap()).unwrap();
        repo.create(&user).await.unwrap();

        repo.delete(user.id).await.unwrap();

        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(matches!(repo.delete(user.id).await, Err(AppError::NotFound)));
    }
}
