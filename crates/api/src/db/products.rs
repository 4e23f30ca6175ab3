//! Product repository over the JSON store.

use marketplace_core::catalog::{Product, ProductFields};
use marketplace_core::pagination::Paginated;
use marketplace_core::types::{CategoryId, ProductId};

use super::records::ProductRecord;
use super::{JsonStore, RepositoryError};

/// Filters for the product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name. Blank matches everything.
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
}

/// Repository for product operations.
pub struct ProductRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// One page of products matching `filter`, in file order.
    ///
    /// `total` counts all matches before paging.
    pub async fn list(&self, filter: &ProductFilter, page: u32, count: u32) -> Paginated<Product> {
        let needle = filter
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase);

        let data = self.store.read().await;
        let matches = data
            .products
            .iter()
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n))
            })
            .filter(|p| {
                filter
                    .category_id
                    .is_none_or(|c| p.category_id == c.as_i64())
            })
            .cloned()
            .map(Product::from);

        Paginated::from_matches(matches, page, count)
    }

    /// Get a product by its ID.
    pub async fn get_by_id(&self, id: ProductId) -> Option<Product> {
        self.store
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id.as_i64())
            .cloned()
            .map(Product::from)
    }

    /// Insert a product with the next free id (max + 1, starting at 1).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::IdsExhausted` if the largest id is `i64::MAX`.
    /// Returns `RepositoryError` if the catalog cannot be persisted.
    pub async fn create(&self, fields: ProductFields) -> Result<Product, RepositoryError> {
        self.store
            .try_write(|data| {
                let next_id = data
                    .products
                    .iter()
                    .map(|p| p.id)
                    .max()
                    .unwrap_or(0)
                    .checked_add(1)
                    .ok_or(RepositoryError::IdsExhausted("product"))?;
                let product = fields.into_product(ProductId::new(next_id));
                data.products.push(ProductRecord::from(product.clone()));
                Ok(product)
            })
            .await
    }

    /// Overwrite every field of an existing product.
    ///
    /// Returns `false` when no product has `id`; nothing is written then.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the catalog cannot be persisted.
    pub async fn update(&self, id: ProductId, fields: ProductFields) -> Result<bool, RepositoryError> {
        if self.get_by_id(id).await.is_none() {
            return Ok(false);
        }

        self.store
            .write(|data| {
                let Some(record) = data.products.iter_mut().find(|p| p.id == id.as_i64()) else {
                    return false;
                };
                *record = ProductRecord::from(fields.into_product(id));
                true
            })
            .await
    }

    /// Remove a product.
    ///
    /// Returns `false` when no product has `id`; nothing is written then.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the catalog cannot be persisted.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        if self.get_by_id(id).await.is_none() {
            return Ok(false);
        }

        self.store
            .write(|data| {
                let before = data.products.len();
                data.products.retain(|p| p.id != id.as_i64());
                data.products.len() != before
            })
            .await
    }
}
