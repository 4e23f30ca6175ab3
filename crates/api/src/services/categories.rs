//! Category use cases.

use marketplace_core::catalog::Category;
use marketplace_core::pagination::Paginated;
use marketplace_core::types::CategoryId;

use super::CatalogError;
use crate::db::{CategoryRepository, JsonStore, RepositoryError};

/// Category operations.
pub struct CategoryService<'a> {
    categories: CategoryRepository<'a>,
}

impl<'a> CategoryService<'a> {
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self {
            categories: CategoryRepository::new(store),
        }
    }

    /// One page of categories.
    pub async fn list(&self, count: u32, page: u32) -> Paginated<Category> {
        self.categories.list(count, page).await
    }

    /// Get a category by its ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` (`API-GCD-01`) for an unknown id.
    pub async fn get(&self, id: CategoryId) -> Result<Category, CatalogError> {
        self.categories.get_by_id(id).await.ok_or_else(|| {
            CatalogError::not_found("API-GCD-01", format!("Category {id} does not exist"))
        })
    }

    /// Create a category with a name not used by any other (ignoring case).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::BusinessRule` (`ATI-CC-01`) for a duplicate name.
    pub async fn create(&self, name: &str) -> Result<Category, CatalogError> {
        let category = match self.categories.create(name).await {
            Ok(category) => category,
            Err(RepositoryError::Conflict(_)) => {
                return Err(CatalogError::business_rule(
                    "ATI-CC-01",
                    format!("A category named '{name}' already exists"),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!(category_id = %category.id, "Category created");

        Ok(category)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing::seeded_store;

    #[tokio::test]
    async fn test_get() {
        let store = seeded_store().await;
        let service = CategoryService::new(&store);
        assert_eq!(service.get(CategoryId::new(3)).await.unwrap().name, "Deportes");

        let err = service.get(CategoryId::new(30)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { code: "API-GCD-01", .. }));
    }

    #[tokio::test]
    async fn test_create() {
        let store = seeded_store().await;
        let service = CategoryService::new(&store);
        let created = service.create("Juguetes").await.unwrap();
        assert_eq!(created.id, CategoryId::new(4));
        assert_eq!(service.list(10, 1).await.total, 4);
    }

    #[tokio::test]
    async fn test_create_duplicate_ignores_case() {
        let store = seeded_store().await;
        let service = CategoryService::new(&store);
        let err = service.create("HOGAR").await.unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule { code: "ATI-CC-01", .. }));
        assert_eq!(service.list(10, 1).await.total, 3);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_creates_admit_one() {
        let store = seeded_store().await;
        let service = CategoryService::new(&store);

        let (first, second) = tokio::join!(service.create("Juguetes"), service.create("juguetes"));
        let codes = [
            first.as_ref().err().and_then(CatalogError::code),
            second.as_ref().err().and_then(CatalogError::code),
        ];

        assert_eq!(u8::from(first.is_ok()) + u8::from(second.is_ok()), 1);
        assert!(codes.contains(&Some("ATI-CC-01")));
        assert_eq!(service.list(10, 1).await.total, 4);
    }
}
