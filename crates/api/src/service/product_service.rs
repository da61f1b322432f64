//! Product service - product use cases over the repository.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::Product;

use crate::repository::ProductRepository;
use crate::types::SortDirection;

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Validate and persist a new product
    async fn create_product(
        &self,
        name: String,
        description: String,
        price: f64,
    ) -> AppResult<Product>;

    /// Get product by ID
    async fn get_product(&self, id: Uuid) -> AppResult<Product>;

    /// List products, see [`ProductRepository::find_all`]
    async fn list_products(
        &self,
        page: u64,
        limit: u64,
        sort: SortDirection,
    ) -> AppResult<Vec<Product>>;

    /// Replace name, description and price of an existing product
    async fn update_product(
        &self,
        id: Uuid,
        name: String,
        description: String,
        price: f64,
    ) -> AppResult<Product>;

    /// Delete product by ID
    async fn delete_product(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ProductService using repository.
pub struct ProductManager {
    repo: Arc<dyn ProductRepository>,
}

impl ProductManager {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn create_product(
        &self,
        name: String,
        description: String,
        price: f64,
    ) -> AppResult<Product> {
        let product = Product::new(name, description, price)?;
        self.repo.create(&product).await?;

        tracing::debug!(product_id = %product.id, "Product created");
        Ok(product)
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_products(
        &self,
        page: u64,
        limit: u64,
        sort: SortDirection,
    ) -> AppResult<Vec<Product>> {
        self.repo.find_all(page, limit, sort).await
    }

    async fn update_product(
        &self,
        id: Uuid,
        name: String,
        description: String,
        price: f64,
    ) -> AppResult<Product> {
        let mut product = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        product.update(name, description, price)?;
        self.repo.update(&product).await?;

        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        self.repo.find_by_id(id).await?.ok_or_not_found()?;
        self.repo.delete(id).await
    }
}
