//! On-disk record shapes of the catalog data file.
//!
//! The file is a single JSON document `{ "Products": [...], "Categories": [...] }`
//! with PascalCase keys. camelCase keys are accepted on read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use marketplace_core::catalog::{Category, Product};
use marketplace_core::types::{CategoryId, ProductId};

/// Whole contents of the data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoreData {
    #[serde(default, alias = "products")]
    pub products: Vec<ProductRecord>,
    #[serde(default, alias = "categories")]
    pub categories: Vec<CategoryRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductRecord {
    #[serde(alias = "id")]
    pub id: i64,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(default, alias = "description")]
    pub description: String,
    #[serde(alias = "price", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, alias = "stock")]
    pub stock: i32,
    #[serde(alias = "categoryId")]
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryRecord {
    #[serde(alias = "id")]
    pub id: i64,
    #[serde(alias = "name")]
    pub name: String,
}

impl StoreData {
    /// Catalog written when the data file does not exist yet.
    #[must_use]
    pub fn seed() -> Self {
        let categories = [(1, "Electrónica"), (2, "Hogar"), (3, "Deportes")]
            .into_iter()
            .map(|(id, name)| CategoryRecord {
                id,
                name: name.to_string(),
            })
            .collect();

        Self {
            products: vec![ProductRecord {
                id: 1,
                name: "Smartphone".to_string(),
                description: "Teléfono inteligente de última generación".to_string(),
                price: Decimal::new(99_999, 2),
                stock: 10,
                category_id: 1,
            }],
            categories,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: ProductId::new(record.id),
            name: record.name,
            description: record.description,
            price: record.price,
            stock: record.stock,
            category_id: CategoryId::new(record.category_id),
        }
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category_id: product.category_id.as_i64(),
        }
    }
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: CategoryId::new(record.id),
            name: record.name,
        }
    }
}

impl From<Category> for CategoryRecord {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.as_i64(),
            name: category.name,
        }
    }
}
