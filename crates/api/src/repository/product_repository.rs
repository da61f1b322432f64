//! Product repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::types::{PageRequest, SortDirection};
use common::{AppError, AppResult};
use domain::Product;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product
    async fn create(&self, product: &Product) -> AppResult<()>;

    /// Find product by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// List products ordered by creation time.
    ///
    /// `page` is 1-indexed. When `page` or `limit` is 0 the whole ordered
    /// collection is returned.
    async fn find_all(&self, page: u64, limit: u64, sort: SortDirection)
        -> AppResult<Vec<Product>>;

    /// Overwrite name, description and price. `NotFound` if absent.
    async fn update(&self, product: &Product) -> AppResult<()>;

    /// Delete product by ID. `NotFound` if absent.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn create(&self, product: &Product) -> AppResult<()> {
        ActiveModel::from(product)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn find_all(
        &self,
        page: u64,
        limit: u64,
        sort: SortDirection,
    ) -> AppResult<Vec<Product>> {
        // Id breaks timestamp ties so pages never overlap
        let mut query = match sort {
            SortDirection::Asc => ProductEntity::find()
                .order_by_asc(product::Column::CreatedAt)
                .order_by_asc(product::Column::Id),
            SortDirection::Desc => ProductEntity::find()
                .order_by_desc(product::Column::CreatedAt)
                .order_by_desc(product::Column::Id),
        };

        let request = PageRequest::new(page, limit);
        if !request.is_unbounded() {
            query = query.offset(request.offset()).limit(request.limit);
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn update(&self, product: &Product) -> AppResult<()> {
        ProductEntity::find_by_id(product.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        ActiveModel::from(product)
            .update(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ProductEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
