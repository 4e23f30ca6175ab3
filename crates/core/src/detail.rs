//! Marketplace product-detail view model.
//!
//! Everything here is built fresh by [`crate::enrich::enrich_product`] and
//! serialized straight to the client, so field names follow the wire
//! convention (lowerCamelCase) and decimals serialize as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::types::{
    CategoryId, PaymentMethodType, Price, ProductId, ReputationLevel, SellerId, StockStatus,
    VariantId, WarrantyType,
};

/// The fully populated product page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedProductDetail {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub sku: String,
    /// Always `"new"`.
    pub condition: String,
    pub price: PriceInfo,
    pub stock: StockInfo,
    pub images: Vec<ProductImage>,
    pub category: CategoryInfo,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub seller: SellerInfo,
    pub attributes: Vec<ProductAttribute>,
    pub variants: Vec<ProductVariant>,
    pub shipping: ShippingInfo,
    pub rating: RatingSummary,
    pub questions_count: i32,
    pub reviews_count: i32,
    pub warranty: Option<WarrantyInfo>,
    pub related_products: Vec<RelatedProduct>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub permalink: String,
}

/// Price block with optional discount and payment options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    #[serde(flatten)]
    pub price: Price,
    /// Pre-discount price. Present exactly when `discount_percentage` is.
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<i32>,
    pub payment_methods: Vec<PaymentMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub kind: PaymentMethodType,
    pub name: String,
    pub installments: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub installment_amount: Decimal,
    pub interest_free: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInfo {
    pub available_quantity: i32,
    pub status: StockStatus,
    pub max_purchase_quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: String,
    pub url: String,
    pub thumbnail_url: String,
    pub order: u8,
    pub is_primary: bool,
    pub alt_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub id: CategoryId,
    pub name: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    pub id: i64,
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfo {
    pub id: SellerId,
    pub name: String,
    pub logo_url: String,
    pub reputation: SellerReputation,
    pub location: SellerLocation,
    pub is_official_store: bool,
    pub years_in_platform: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerReputation {
    pub level: ReputationLevel,
    pub total_sales: i32,
    /// Percentage of positive ratings, 85.0 to 100.0.
    #[serde(with = "rust_decimal::serde::float")]
    pub positive_rating: Decimal,
    pub completed_transactions: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerLocation {
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttribute {
    pub id: String,
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub attributes: Vec<VariantAttribute>,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub free_shipping: bool,
    pub options: Vec<ShippingOption>,
    pub origin: ShippingOrigin,
    pub local_pickup_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    pub estimated_delivery_days: i32,
    /// `YYYY-MM-DD`.
    pub estimated_delivery_date: String,
    pub carrier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOrigin {
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// 0.0 to 5.0, one decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub average: Decimal,
    pub total_reviews: i32,
    pub distribution: RatingDistribution,
}

/// Review counts per star rating.
///
/// Serializes as a JSON object keyed `"5"` down to `"1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingDistribution {
    /// Index 0 holds one-star counts, index 4 five-star counts.
    counts: [i32; 5],
}

impl RatingDistribution {
    /// Build from counts ordered five stars first.
    #[must_use]
    pub const fn from_five_down(counts: [i32; 5]) -> Self {
        let [five, four, three, two, one] = counts;
        Self {
            counts: [one, two, three, four, five],
        }
    }

    /// `(stars, count)` pairs from five stars down to one.
    pub fn iter(&self) -> impl Iterator<Item = (u8, i32)> + '_ {
        (1..=5u8)
            .rev()
            .zip(self.counts.iter().rev().copied())
    }

    /// Sum of all bucket counts.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.counts.iter().sum()
    }

    /// Sum of `stars * count` over all buckets.
    #[must_use]
    pub fn weighted_sum(&self) -> i32 {
        self.iter().map(|(stars, count)| i32::from(stars) * count).sum()
    }
}

impl Serialize for RatingDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        for (stars, count) in self.iter() {
            map.serialize_entry(&stars.to_string(), &count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyInfo {
    #[serde(rename = "type")]
    pub kind: WarrantyType,
    pub duration_months: i32,
    pub description: String,
}

/// Compact product card used for related products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub thumbnail_url: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    pub free_shipping: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_serializes_five_stars_first() {
        let dist = RatingDistribution::from_five_down([171, 77, 37, 15, 9]);
        let json = serde_json::to_string(&dist).unwrap();
        assert_eq!(json, r#"{"5":171,"4":77,"3":37,"2":15,"1":9}"#);
    }

    #[test]
    fn test_distribution_lookup_and_sums() {
        let dist = RatingDistribution::from_five_down([171, 77, 37, 15, 9]);
        let pairs: Vec<(u8, i32)> = dist.iter().collect();
        assert_eq!(pairs, vec![(5, 171), (4, 77), (3, 37), (2, 15), (1, 9)]);
        assert_eq!(dist.total(), 309);
        assert_eq!(dist.weighted_sum(), 855 + 308 + 111 + 30 + 9);
    }

    #[test]
    fn test_payment_method_type_field_name() {
        let method = PaymentMethod {
            kind: PaymentMethodType::Transfer,
            name: "Transferencia bancaria".to_string(),
            installments: 1,
            installment_amount: Decimal::new(950, 0),
            interest_free: true,
        };
        let json = serde_json::to_value(&method).unwrap();
        assert_eq!(json["type"], "transfer");
        assert_eq!(json["installmentAmount"], serde_json::json!(950.0));
        assert_eq!(json["interestFree"], true);
    }
}
