//! Product use cases.

use marketplace_core::catalog::{ProductDetail, ProductFields, ProductSummary};
use marketplace_core::detail::{EnrichedProductDetail, RelatedProduct};
use marketplace_core::enrich;
use marketplace_core::pagination::Paginated;
use marketplace_core::types::{CategoryId, ProductId};
use rust_decimal::Decimal;

use super::CatalogError;
use crate::db::products::ProductFilter;
use crate::db::{CategoryRepository, JsonStore, ProductRepository};

/// Product listing parameters.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub page: u32,
    pub count: u32,
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
}

/// Product operations.
pub struct ProductService<'a> {
    products: ProductRepository<'a>,
    categories: CategoryRepository<'a>,
}

impl<'a> ProductService<'a> {
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self {
            products: ProductRepository::new(store),
            categories: CategoryRepository::new(store),
        }
    }

    /// One page of product summaries.
    pub async fn list(&self, query: ProductQuery) -> Paginated<ProductSummary> {
        let filter = ProductFilter {
            name: query.name,
            category_id: query.category_id,
        };
        self.products
            .list(&filter, query.page, query.count)
            .await
            .map(ProductSummary::from)
    }

    /// The basic product detail: the product joined with its category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` (`API-GPD-01`) for an unknown id.
    /// Returns `CatalogError::DataIntegrity` if the product's category is gone.
    pub async fn get(&self, id: ProductId) -> Result<ProductDetail, CatalogError> {
        let product = self
            .products
            .get_by_id(id)
            .await
            .ok_or_else(|| CatalogError::not_found("API-GPD-01", format!("Product {id} was not found")))?;

        let category = self
            .categories
            .get_by_id(product.category_id)
            .await
            .ok_or_else(|| {
                CatalogError::DataIntegrity(format!(
                    "category {} of product {id} does not exist",
                    product.category_id
                ))
            })?;

        Ok(ProductDetail::new(product, category))
    }

    /// The full marketplace page for a product.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    pub async fn get_enriched(&self, id: ProductId) -> Result<EnrichedProductDetail, CatalogError> {
        let detail = self.get(id).await?;
        tracing::debug!(product_id = %id, "Enriching product detail");
        Ok(enrich::enrich_product(&detail))
    }

    /// Related product cards for an existing product.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    pub async fn related(
        &self,
        id: ProductId,
        limit: u32,
    ) -> Result<Vec<RelatedProduct>, CatalogError> {
        self.get(id).await?;
        Ok(enrich::related_products(id, limit))
    }

    /// Create a product in an existing category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::BusinessRule` for a non-positive price
    /// (`API-CP-01`) or negative stock (`API-CP-02`).
    /// Returns `CatalogError::BadRequest` (`API-CP-03`) for an unknown category.
    pub async fn create(&self, fields: ProductFields) -> Result<ProductDetail, CatalogError> {
        check_price_and_stock(&fields, "API-CP-01", "API-CP-02")?;

        let category = self
            .categories
            .get_by_id(fields.category_id)
            .await
            .ok_or_else(|| {
                CatalogError::bad_request(
                    "API-CP-03",
                    format!("Category {} does not exist", fields.category_id),
                )
            })?;

        let product = self.products.create(fields).await?;
        tracing::info!(product_id = %product.id, "Product created");

        Ok(ProductDetail::new(product, category))
    }

    /// Replace the fields of an existing product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::BusinessRule` for a non-positive price
    /// (`API-UP-01`) or negative stock (`API-UP-02`).
    /// Returns `CatalogError::NotFound` (`API-UP-03`) for an unknown product.
    /// Returns `CatalogError::BadRequest` (`API-UP-04`) when moving the product
    /// to an unknown category.
    pub async fn update(&self, id: ProductId, fields: ProductFields) -> Result<(), CatalogError> {
        check_price_and_stock(&fields, "API-UP-01", "API-UP-02")?;

        let current = self
            .products
            .get_by_id(id)
            .await
            .ok_or_else(|| CatalogError::not_found("API-UP-03", format!("Product {id} was not found")))?;

        if current.category_id != fields.category_id
            && self.categories.get_by_id(fields.category_id).await.is_none()
        {
            return Err(CatalogError::bad_request(
                "API-UP-04",
                format!("Category {} does not exist", fields.category_id),
            ));
        }

        if !self.products.update(id, fields).await? {
            return Err(CatalogError::not_found(
                "API-UP-03",
                format!("Product {id} was not found"),
            ));
        }
        tracing::info!(product_id = %id, "Product updated");

        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` (`API-DP-01`) for an unknown product.
    pub async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        if !self.products.delete(id).await? {
            return Err(CatalogError::not_found(
                "API-DP-01",
                format!("Product {id} was not found"),
            ));
        }
        tracing::info!(product_id = %id, "Product deleted");

        Ok(())
    }
}

fn check_price_and_stock(
    fields: &ProductFields,
    price_code: &'static str,
    stock_code: &'static str,
) -> Result<(), CatalogError> {
    if fields.price <= Decimal::ZERO {
        return Err(CatalogError::business_rule(
            price_code,
            "The product price must be greater than zero",
        ));
    }
    if fields.stock < 0 {
        return Err(CatalogError::business_rule(
            stock_code,
            "The product stock cannot be negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing::seeded_store;

    fn fields(category_id: i64) -> ProductFields {
        ProductFields {
            name: "Auriculares".to_string(),
            description: "Inalámbricos".to_string(),
            price: Decimal::new(25_000, 0),
            stock: 8,
            category_id: CategoryId::new(category_id),
        }
    }

    fn query() -> ProductQuery {
        ProductQuery {
            page: 1,
            count: 20,
            name: None,
            category_id: None,
        }
    }

    #[tokio::test]
    async fn test_get_joins_category() {
        let store = seeded_store().await;
        let detail = ProductService::new(&store).get(ProductId::new(1)).await.unwrap();
        assert_eq!(detail.name, "Smartphone");
        assert_eq!(detail.category.name, "Electrónica");
        assert_eq!(detail.price, Decimal::new(99_999, 2));
    }

    #[tokio::test]
    async fn test_get_unknown_product() {
        let store = seeded_store().await;
        let err = ProductService::new(&store)
            .get(ProductId::new(i64::MAX))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { code: "API-GPD-01", .. }));
    }

    #[tokio::test]
    async fn test_get_with_missing_category_is_integrity_error() {
        let store = seeded_store().await;
        store.write(|data| data.categories.clear()).await.unwrap();

        let err = ProductService::new(&store)
            .get(ProductId::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::DataIntegrity(_)));
        assert_eq!(err.code(), None);
    }

    #[tokio::test]
    async fn test_enriched_detail_is_stable() {
        let store = seeded_store().await;
        let service = ProductService::new(&store);
        let first = service.get_enriched(ProductId::new(1)).await.unwrap();
        let second = service.get_enriched(ProductId::new(1)).await.unwrap();
        assert_eq!(first.sku, "SKU-001-000001");
        assert_eq!(first.seller, second.seller);
        assert_eq!(first.related_products, second.related_products);
    }

    #[tokio::test]
    async fn test_related_requires_existing_product() {
        let store = seeded_store().await;
        let service = ProductService::new(&store);
        assert_eq!(service.related(ProductId::new(1), 4).await.unwrap().len(), 4);

        let err = service.related(ProductId::new(77), 4).await.unwrap_err();
        assert_eq!(err.code(), Some("API-GPD-01"));
    }

    #[tokio::test]
    async fn test_create() {
        let store = seeded_store().await;
        let service = ProductService::new(&store);

        let created = service.create(fields(2)).await.unwrap();
        assert_eq!(created.id, ProductId::new(2));
        assert_eq!(created.category.name, "Hogar");
        assert_eq!(service.list(query()).await.total, 2);
    }

    #[tokio::test]
    async fn test_create_rule_violations() {
        let store = seeded_store().await;
        let service = ProductService::new(&store);

        let mut free = fields(1);
        free.price = Decimal::ZERO;
        assert_eq!(service.create(free).await.unwrap_err().code(), Some("API-CP-01"));

        let mut negative = fields(1);
        negative.stock = -1;
        assert_eq!(service.create(negative).await.unwrap_err().code(), Some("API-CP-02"));

        let err = service.create(fields(99)).await.unwrap_err();
        assert!(matches!(err, CatalogError::BadRequest { code: "API-CP-03", .. }));

        assert_eq!(service.list(query()).await.total, 1);
    }

    #[tokio::test]
    async fn test_update() {
        let store = seeded_store().await;
        let service = ProductService::new(&store);

        service.update(ProductId::new(1), fields(3)).await.unwrap();
        let detail = service.get(ProductId::new(1)).await.unwrap();
        assert_eq!(detail.name, "Auriculares");
        assert_eq!(detail.category.name, "Deportes");
    }

    #[tokio::test]
    async fn test_update_rule_violations() {
        let store = seeded_store().await;
        let service = ProductService::new(&store);

        let mut free = fields(1);
        free.price = Decimal::new(-5, 0);
        assert_eq!(
            service.update(ProductId::new(1), free).await.unwrap_err().code(),
            Some("API-UP-01")
        );

        let mut negative = fields(1);
        negative.stock = -3;
        assert_eq!(
            service.update(ProductId::new(1), negative).await.unwrap_err().code(),
            Some("API-UP-02")
        );

        assert_eq!(
            service.update(ProductId::new(50), fields(1)).await.unwrap_err().code(),
            Some("API-UP-03")
        );

        assert_eq!(
            service.update(ProductId::new(1), fields(99)).await.unwrap_err().code(),
            Some("API-UP-04")
        );
    }

    #[tokio::test]
    async fn test_update_keeping_a_dangling_category_is_allowed() {
        let store = seeded_store().await;
        store
            .write(|data| data.products[0].category_id = 40)
            .await
            .unwrap();

        ProductService::new(&store)
            .update(ProductId::new(1), fields(40))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete() {
        let store = seeded_store().await;
        let service = ProductService::new(&store);

        service.delete(ProductId::new(1)).await.unwrap();
        assert!(service.list(query()).await.is_empty());
        assert_eq!(
            service.delete(ProductId::new(1)).await.unwrap_err().code(),
            Some("API-DP-01")
        );
    }

    #[tokio::test]
    async fn test_list_maps_summaries() {
        let store = seeded_store().await;
        let page = ProductService::new(&store).list(query()).await;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].category_id, CategoryId::new(1));
    }
}
