//! Deterministic product-detail enrichment.
//!
//! [`enrich_product`] turns the basic product (a product joined with its
//! category) into the full marketplace page: pricing options, seller,
//! shipping, ratings, variants and related products. Every fabricated value
//! comes from a [`SubtractiveRng`] seeded with the product id, drawn in a
//! fixed order, so the same product always renders the same page. Only the
//! timestamp fields depend on the clock.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use marketplace_core::catalog::{Category, ProductDetail};
//! use marketplace_core::enrich::enrich_product_at;
//! use marketplace_core::types::{CategoryId, ProductId};
//! use rust_decimal::Decimal;
//!
//! let detail = ProductDetail {
//!     id: ProductId::new(1),
//!     name: "Smartphone".to_string(),
//!     description: "Teléfono".to_string(),
//!     price: Decimal::new(1000, 0),
//!     stock: 10,
//!     category: Category { id: CategoryId::new(1), name: "Electronics".to_string() },
//! };
//! let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
//!
//! let page = enrich_product_at(&detail, now);
//! assert_eq!(page.sku, "SKU-001-000001");
//! assert_eq!(page, enrich_product_at(&detail, now));
//! ```

pub mod rng;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

pub use rng::SubtractiveRng;

use crate::catalog::{Category, ProductDetail};
use crate::detail::{
    Breadcrumb, CategoryInfo, EnrichedProductDetail, PaymentMethod, PriceInfo, ProductAttribute,
    ProductImage, ProductVariant, RatingDistribution, RatingSummary, RelatedProduct, SellerInfo,
    SellerLocation, SellerReputation, ShippingInfo, ShippingOption, ShippingOrigin, StockInfo,
    VariantAttribute, WarrantyInfo,
};
use crate::types::{
    PaymentMethodType, Price, ProductId, ReputationLevel, SellerId, StockStatus, VariantId,
    WarrantyType,
};

const CDN: &str = "https://cdn.marketplace.com";
const IMAGE_COUNT: u8 = 5;
const MAX_PURCHASE_QUANTITY: i32 = 6;
/// Products with less stock than this are sold without variants.
const VARIANT_MIN_STOCK: i32 = 5;
const VARIANT_COLORS: [&str; 4] = ["Negro", "Blanco", "Azul", "Rojo"];
const SELLER_NAMES: [&str; 10] = [
    "TechStore Oficial",
    "ElectroMax",
    "GadgetWorld",
    "MegaShop",
    "Digital Express",
    "SmartBuy",
    "TecnoPlus",
    "InnovaStore",
    "PrimeDeals",
    "SuperTech",
];
/// Share of reviews per star, five stars first.
const RATING_SHARES: [f64; 5] = [0.55, 0.25, 0.12, 0.05, 0.03];

/// Build the full product page using the current time for timestamps.
#[must_use]
pub fn enrich_product(detail: &ProductDetail) -> EnrichedProductDetail {
    enrich_product_at(detail, Utc::now())
}

/// Build the full product page relative to `now`.
///
/// Given the same `detail` and `now` the result is identical on every call.
#[must_use]
pub fn enrich_product_at(detail: &ProductDetail, now: DateTime<Utc>) -> EnrichedProductDetail {
    let id = detail.id.as_i64();
    let mut rng = SubtractiveRng::for_product(id);

    // Field order below is the draw order; reordering changes every page.
    let sku = format!("SKU-{:03}-{id:06}", detail.category.id.as_i64());
    let price = price_info(detail.price, &mut rng);
    let stock = stock_info(detail.stock);
    let images = images(id, &detail.name);
    let category = category_info(&detail.category);
    let breadcrumbs = breadcrumbs(&detail.category);
    let seller = seller_info(id, &mut rng);
    let attributes = attributes(id, &detail.category);
    let variants = variants(detail, &mut rng);
    let shipping = shipping_info(now, &mut rng);
    let rating = rating_summary(&mut rng);
    let questions_count = rng.next_in_range(5, 150);
    let reviews_count = rng.next_in_range(10, 500);
    let warranty = Some(warranty_info());
    let related_count = rng.next_in_range(4, 7);
    let related_products = (1..=i64::from(related_count))
        .map(|offset| related_card(ProductId::new(related_id(id, offset)), &mut rng))
        .collect();
    let created_at = now - Duration::days(i64::from(rng.next_in_range(30, 365)));
    let updated_at = now - Duration::days(i64::from(rng.next_in_range(1, 30)));

    EnrichedProductDetail {
        id: detail.id,
        name: detail.name.clone(),
        description: detail.description.clone(),
        sku,
        condition: "new".to_string(),
        price,
        stock,
        images,
        category,
        breadcrumbs,
        seller,
        attributes,
        variants,
        shipping,
        rating,
        questions_count,
        reviews_count,
        warranty,
        related_products,
        created_at,
        updated_at,
        permalink: format!("https://marketplace.com/product/{id}/{}", slugify(&detail.name)),
    }
}

/// Related product cards for the standalone related-products listing.
///
/// Uses its own generator seeded from `product_id`, so the cards differ from
/// the ones embedded in the product page. Ids wrap within `1..=100` and
/// never point back at `product_id`.
#[must_use]
pub fn related_products(product_id: ProductId, limit: u32) -> Vec<RelatedProduct> {
    let id = product_id.as_i64();
    let mut rng = SubtractiveRng::for_product(id);

    (1..=i64::from(limit))
        .map(|offset| {
            let mut related = related_id(id, offset);
            if related == id {
                related = related_id(id, offset + 1);
            }
            related_card(ProductId::new(related), &mut rng)
        })
        .collect()
}

/// Id `offset` steps after `id`, wrapped into `1..=100`.
///
/// The sum wraps on overflow, so every `i64` id is accepted.
const fn related_id(id: i64, offset: i64) -> i64 {
    id.wrapping_add(offset).rem_euclid(100) + 1
}

/// URL slug for a product name.
///
/// Lowercases, turns spaces into hyphens and strips the Spanish accents.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' => '-',
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

fn price_info(amount: Decimal, rng: &mut SubtractiveRng) -> PriceInfo {
    let (original_amount, discount_percentage) = if rng.chance(30) {
        let percentage = rng.next_in_range(10, 50);
        let markup = Decimal::ONE + Decimal::new(i64::from(percentage), 2);
        (Some((amount * markup).round_dp(2)), Some(percentage))
    } else {
        (None, None)
    };

    let payment_methods = vec![
        PaymentMethod {
            kind: PaymentMethodType::CreditCard,
            name: "Visa, Mastercard, American Express".to_string(),
            installments: 12,
            installment_amount: (amount / Decimal::from(12)).round_dp(2),
            interest_free: amount > Decimal::from(50_000),
        },
        PaymentMethod {
            kind: PaymentMethodType::DebitCard,
            name: "Visa Débito, Maestro".to_string(),
            installments: 1,
            installment_amount: amount,
            interest_free: true,
        },
        PaymentMethod {
            kind: PaymentMethodType::Transfer,
            name: "Transferencia bancaria".to_string(),
            installments: 1,
            installment_amount: amount * Decimal::new(95, 2),
            interest_free: true,
        },
    ];

    PriceInfo {
        price: Price::local(amount),
        original_amount,
        discount_percentage,
        payment_methods,
    }
}

fn stock_info(stock: i32) -> StockInfo {
    StockInfo {
        available_quantity: stock,
        status: StockStatus::from_stock(stock),
        max_purchase_quantity: stock.min(MAX_PURCHASE_QUANTITY),
    }
}

fn images(id: i64, name: &str) -> Vec<ProductImage> {
    (1..=IMAGE_COUNT)
        .map(|i| ProductImage {
            id: format!("img-{id}-{i}"),
            url: format!("{CDN}/products/{id}/image-{i}.jpg"),
            thumbnail_url: format!("{CDN}/products/{id}/thumb-{i}.jpg"),
            order: i,
            is_primary: i == 1,
            alt_text: format!("{name} - Imagen {i}"),
        })
        .collect()
}

fn category_info(category: &Category) -> CategoryInfo {
    CategoryInfo {
        id: category.id,
        name: category.name.clone(),
        icon_url: format!("{CDN}/icons/category-{}.svg", category.id),
    }
}

fn breadcrumbs(category: &Category) -> Vec<Breadcrumb> {
    vec![
        Breadcrumb {
            id: 1,
            name: "Inicio".to_string(),
            level: 0,
        },
        Breadcrumb {
            id: 100,
            name: "Categorías".to_string(),
            level: 1,
        },
        Breadcrumb {
            id: category.id.as_i64(),
            name: category.name.clone(),
            level: 2,
        },
    ]
}

fn seller_info(id: i64, rng: &mut SubtractiveRng) -> SellerInfo {
    let seller_id = id.rem_euclid(10) + 1;
    let name = usize::try_from(seller_id - 1)
        .ok()
        .and_then(|index| SELLER_NAMES.get(index))
        .copied()
        .unwrap_or_default();

    let is_official_store = rng.chance(20);
    let years_in_platform = rng.next_in_range(1, 10);
    let level = usize::try_from(rng.next_below(5))
        .ok()
        .and_then(|index| ReputationLevel::ALL.get(index))
        .copied()
        .unwrap_or(ReputationLevel::Yellow);
    let total_sales = rng.next_in_range(100, 50_000);
    let positive_rating = round_tenths(85.0 + rng.next_f64() * 15.0);
    let completed_transactions = rng.next_in_range(50, 10_000);

    SellerInfo {
        id: SellerId::new(seller_id),
        name: name.to_string(),
        logo_url: format!("{CDN}/sellers/{seller_id}/logo.png"),
        reputation: SellerReputation {
            level,
            total_sales,
            positive_rating,
            completed_transactions,
        },
        location: SellerLocation {
            city: "Buenos Aires".to_string(),
            state: "Buenos Aires".to_string(),
            country: "Argentina".to_string(),
        },
        is_official_store,
        years_in_platform,
    }
}

fn attribute(
    id: &str,
    name: &str,
    value: String,
    unit: Option<&str>,
    group: &str,
) -> ProductAttribute {
    ProductAttribute {
        id: id.to_string(),
        name: name.to_string(),
        value,
        unit: unit.map(str::to_string),
        group: group.to_string(),
    }
}

fn attributes(id: i64, category: &Category) -> Vec<ProductAttribute> {
    let mut attributes = vec![
        attribute("brand", "Marca", "Generic Brand".to_string(), None, "main"),
        attribute("model", "Modelo", format!("Model-{id}"), None, "main"),
        attribute("sku", "SKU", format!("SKU-{id:06}"), None, "main"),
        attribute("weight", "Peso", "500".to_string(), Some("g"), "dimensions"),
        attribute("height", "Alto", "10".to_string(), Some("cm"), "dimensions"),
        attribute("width", "Ancho", "15".to_string(), Some("cm"), "dimensions"),
        attribute("depth", "Profundidad", "5".to_string(), Some("cm"), "dimensions"),
    ];

    if category.name.to_lowercase().contains("electr") {
        attributes.push(attribute("voltage", "Voltaje", "220".to_string(), Some("V"), "electrical"));
        attributes.push(attribute("power", "Potencia", "50".to_string(), Some("W"), "electrical"));
    }

    attributes
}

fn variants(detail: &ProductDetail, rng: &mut SubtractiveRng) -> Vec<ProductVariant> {
    if detail.stock < VARIANT_MIN_STOCK {
        return Vec::new();
    }

    let id = detail.id.as_i64();
    let count = rng.next_in_range(1, 4);
    let stock = (detail.stock / count).max(1);

    (0_i64..)
        .zip(VARIANT_COLORS.iter().take(usize::try_from(count).unwrap_or_default()))
        .map(|(index, color)| ProductVariant {
            id: VariantId::new(id.wrapping_mul(100).wrapping_add(index)),
            sku: format!("SKU-{id:06}-{}", color.get(..1).unwrap_or_default()),
            price: detail.price + Decimal::from(index * 100),
            stock,
            attributes: vec![VariantAttribute {
                name: "Color".to_string(),
                value: (*color).to_string(),
            }],
            thumbnail_url: format!("{CDN}/products/{id}/variant-{}.jpg", color.to_lowercase()),
        })
        .collect()
}

fn delivery_date(now: DateTime<Utc>, days: i32) -> String {
    (now + Duration::days(i64::from(days)))
        .format("%Y-%m-%d")
        .to_string()
}

fn shipping_info(now: DateTime<Utc>, rng: &mut SubtractiveRng) -> ShippingInfo {
    let free_shipping = rng.chance(40);
    let local_pickup_available = rng.chance(30);

    let standard_cost = if free_shipping {
        Decimal::ZERO
    } else {
        Decimal::from(rng.next_in_range(500, 2000))
    };
    let standard = ShippingOption {
        id: "standard".to_string(),
        name: "Envío estándar".to_string(),
        cost: standard_cost,
        estimated_delivery_days: rng.next_in_range(3, 7),
        estimated_delivery_date: delivery_date(now, rng.next_in_range(3, 7)),
        carrier: "Correo Argentino".to_string(),
    };
    let express = ShippingOption {
        id: "express".to_string(),
        name: "Envío express".to_string(),
        cost: Decimal::from(rng.next_in_range(1500, 4000)),
        estimated_delivery_days: rng.next_in_range(1, 3),
        estimated_delivery_date: delivery_date(now, rng.next_in_range(1, 3)),
        carrier: "Andreani".to_string(),
    };

    ShippingInfo {
        free_shipping,
        options: vec![standard, express],
        origin: ShippingOrigin {
            city: "Buenos Aires".to_string(),
            state: "Buenos Aires".to_string(),
        },
        local_pickup_available,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn rating_summary(rng: &mut SubtractiveRng) -> RatingSummary {
    let total_reviews = rng.next_in_range(10, 500);
    let distribution = RatingDistribution::from_five_down(
        RATING_SHARES.map(|share| (f64::from(total_reviews) * share) as i32),
    );

    let average = if total_reviews > 0 {
        (Decimal::from(distribution.weighted_sum()) / Decimal::from(total_reviews)).round_dp(1)
    } else {
        Decimal::ZERO
    };

    RatingSummary {
        average,
        total_reviews,
        distribution,
    }
}

fn warranty_info() -> WarrantyInfo {
    WarrantyInfo {
        kind: WarrantyType::Seller,
        duration_months: 12,
        description: "Garantía del vendedor por defectos de fabricación".to_string(),
    }
}

fn related_card(id: ProductId, rng: &mut SubtractiveRng) -> RelatedProduct {
    let price = Decimal::from(rng.next_in_range(1000, 50_000));
    // Float samples become decimals at 15 significant digits before scaling.
    let sample = Decimal::from_f64(rng.next_f64())
        .and_then(|d| d.round_sf(15))
        .unwrap_or_default();
    let rating = (Decimal::new(35, 1) + sample * Decimal::new(15, 1)).round_dp(1);
    let free_shipping = rng.chance(40);

    RelatedProduct {
        id,
        name: format!("Producto Relacionado {id}"),
        price,
        thumbnail_url: format!("{CDN}/products/{id}/thumb-1.jpg"),
        rating,
        free_shipping,
    }
}

/// Round half to even at one decimal place, in binary floating point.
#[allow(clippy::cast_possible_truncation)]
fn round_tenths(value: f64) -> Decimal {
    Decimal::new((value * 10.0).round_ties_even() as i64, 1)
}
