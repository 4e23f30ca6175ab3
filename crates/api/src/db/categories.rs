//! Category repository over the JSON store.

use marketplace_core::catalog::Category;
use marketplace_core::pagination::Paginated;
use marketplace_core::types::CategoryId;

use super::records::CategoryRecord;
use super::{JsonStore, RepositoryError};

/// Repository for category operations.
pub struct CategoryRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// One page of categories in file order.
    pub async fn list(&self, count: u32, page: u32) -> Paginated<Category> {
        let data = self.store.read().await;
        Paginated::from_matches(
            data.categories.iter().cloned().map(Category::from),
            page,
            count,
        )
    }

    /// Get a category by its ID.
    pub async fn get_by_id(&self, id: CategoryId) -> Option<Category> {
        self.store
            .read()
            .await
            .categories
            .iter()
            .find(|c| c.id == id.as_i64())
            .cloned()
            .map(Category::from)
    }

    /// Insert a category with the next free id (max + 1, starting at 1).
    ///
    /// Names are unique ignoring case. The check runs under the write lock,
    /// so concurrent creates with one name cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is taken.
    /// Returns `RepositoryError::IdsExhausted` if the largest id is `i64::MAX`.
    /// Returns `RepositoryError` if the catalog cannot be persisted.
    pub async fn create(&self, name: &str) -> Result<Category, RepositoryError> {
        let lowered = name.to_lowercase();
        self.store
            .try_write(|data| {
                if data.categories.iter().any(|c| c.name.to_lowercase() == lowered) {
                    return Err(RepositoryError::Conflict(format!(
                        "category name '{name}' is taken"
                    )));
                }

                let next_id = data
                    .categories
                    .iter()
                    .map(|c| c.id)
                    .max()
                    .unwrap_or(0)
                    .checked_add(1)
                    .ok_or(RepositoryError::IdsExhausted("category"))?;
                let category = Category {
                    id: CategoryId::new(next_id),
                    name: name.to_string(),
                };
                data.categories.push(CategoryRecord::from(category.clone()));
                Ok(category)
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing::seeded_store;

    #[tokio::test]
    async fn test_list_pages() {
        let store = seeded_store().await;
        let repo = CategoryRepository::new(&store);

        let first = repo.list(2, 1).await;
        assert_eq!(first.total, 3);
        let names: Vec<&str> = first.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Electrónica", "Hogar"]);

        let second = repo.list(2, 2).await;
        assert_eq!(second.items.len(), 1);
        assert!(repo.list(2, 3).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = seeded_store().await;
        let repo = CategoryRepository::new(&store);
        assert_eq!(repo.get_by_id(CategoryId::new(2)).await.unwrap().name, "Hogar");
        assert!(repo.get_by_id(CategoryId::new(42)).await.is_none());
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let store = seeded_store().await;
        let repo = CategoryRepository::new(&store);
        let created = repo.create("Libros").await.unwrap();
        assert_eq!(created.id, CategoryId::new(4));
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_rejects_taken_name() {
        let store = seeded_store().await;
        let repo = CategoryRepository::new(&store);

        let err = repo.create("DEPORTES").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.list(10, 1).await.total, 3);
    }

    #[tokio::test]
    async fn test_create_after_max_id_is_rejected() {
        let store = seeded_store().await;
        store
            .write(|data| data.categories[2].id = i64::MAX)
            .await
            .unwrap();

        let err = CategoryRepository::new(&store).create("Libros").await.unwrap_err();
        assert!(matches!(err, RepositoryError::IdsExhausted("category")));
    }
}
