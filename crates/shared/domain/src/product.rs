//! Product domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::id::new_id;

/// Product domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product with a fresh id and creation time.
    ///
    /// # Errors
    /// Returns the first violated invariant, see [`Product::validate`].
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Result<Self, ValidationError> {
        let product = Self {
            id: new_id(),
            name: name.into(),
            description: description.into(),
            price,
            created_at: Utc::now(),
        };
        product.validate()?;
        Ok(product)
    }

    /// Check all invariants.
    ///
    /// Precedence: id, name, description, price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::IdRequired);
        }
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.description.is_empty() {
            return Err(ValidationError::DescriptionRequired);
        }
        // NaN is rejected too
        if !(self.price > 0.0) {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }

    /// Replace name, description and price.
    ///
    /// The new values are validated before they are applied; on error the
    /// product keeps its previous state. `id` and `created_at` never change.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Result<(), ValidationError> {
        let candidate = Self {
            name: name.into(),
            description: description.into(),
            price,
            ..self.clone()
        };
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }
}

/// Validate an optional product, failing with `InvalidEntity` when absent.
pub fn validate_product(product: Option<&Product>) -> Result<(), ValidationError> {
    product.ok_or(ValidationError::InvalidEntity)?.validate()
}

/// Product response (create/update output)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProductResponse {
    /// Unique product identifier
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Unit price
    pub price: f64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::parse_id;

    #[test]
    fn test_new_product() {
        let cases = [
            ("product test1", "product description 1", 1.0),
            ("product test2", "product description 2", 200.0),
            ("product test3", "product description 3", 300.2),
            ("product test4", "product description 4", 4003333.0),
        ];

        for (name, description, price) in cases {
            let product = Product::new(name, description, price).unwrap();

            assert!(!product.id.is_nil());
            assert_eq!(parse_id(&product.id.to_string()).unwrap(), product.id);
            assert_eq!(product.name, name);
            assert_eq!(product.description, description);
            assert_eq!(product.price, price);
        }
    }

    #[test]
    fn test_new_product_invalid_price() {
        for price in [0.0, -1.0, -33.0, -0.0, f64::NAN] {
            let result = Product::new("product test", "invalid product description", price);
            assert_eq!(result.unwrap_err(), ValidationError::InvalidPrice, "{price}");
        }
    }

    #[test]
    fn test_validation_precedence() {
        assert_eq!(
            Product::new("", "", 0.0).unwrap_err(),
            ValidationError::NameRequired
        );
        assert_eq!(
            Product::new("name", "", -5.0).unwrap_err(),
            ValidationError::DescriptionRequired
        );

        let mut product = Product::new("name", "description", 1.0).unwrap();
        product.id = Uuid::nil();
        product.name.clear();
        assert_eq!(product.validate().unwrap_err(), ValidationError::IdRequired);
    }

    #[test]
    fn test_validate_missing_entity() {
        assert_eq!(
            validate_product(None).unwrap_err(),
            ValidationError::InvalidEntity
        );

        let product = Product::new("name", "description", 9.5).unwrap();
        assert!(validate_product(Some(&product)).is_ok());
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut product = Product::new("product", "description", 21.9).unwrap();
        let id = product.id;
        let created_at = product.created_at;

        product
            .update("product updated", "description updated", 99.99)
            .unwrap();

        assert_eq!(product.id, id);
        assert_eq!(product.created_at, created_at);
        assert_eq!(product.name, "product updated");
        assert_eq!(product.description, "description updated");
        assert_eq!(product.price, 99.99);
    }

    #[test]
    fn test_invalid_update_leaves_product_unchanged() {
        let mut product = Product::new("product", "description", 21.9).unwrap();
        let before = product.clone();

        assert_eq!(
            product.update("new name", "new description", 0.0).unwrap_err(),
            ValidationError::InvalidPrice
        );
        assert_eq!(
            product.update("", "new description", 5.0).unwrap_err(),
            ValidationError::NameRequired
        );
        assert_eq!(product, before);
    }

    #[test]
    fn test_response_from_product() {
        let product = Product::new("product", "description", 3.5).unwrap();
        let response = ProductResponse::from(&product);

        assert_eq!(response.id, product.id);
        assert_eq!(response.name, "product");
        assert_eq!(response.price, 3.5);
    }
}
