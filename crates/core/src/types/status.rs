//! Status enums for catalog and marketplace entities.

use serde::{Deserialize, Serialize};

/// Stock availability classification shown on the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    /// Between one and five units left.
    LastUnits,
    #[default]
    Available,
}

impl StockStatus {
    /// Highest stock count still reported as [`StockStatus::LastUnits`].
    pub const LAST_UNITS_THRESHOLD: i32 = 5;

    /// Classify a stock count.
    #[must_use]
    pub const fn from_stock(stock: i32) -> Self {
        match stock {
            0 => Self::OutOfStock,
            s if s <= Self::LAST_UNITS_THRESHOLD => Self::LastUnits,
            _ => Self::Available,
        }
    }

    /// The wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfStock => "out_of_stock",
            Self::LastUnits => "last_units",
            Self::Available => "available",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seller reputation tier, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationLevel {
    Yellow,
    Orange,
    Green,
    Gold,
    Platinum,
}

impl ReputationLevel {
    /// All tiers in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Yellow,
        Self::Orange,
        Self::Green,
        Self::Gold,
        Self::Platinum,
    ];
}

impl std::fmt::Display for ReputationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yellow => write!(f, "yellow"),
            Self::Orange => write!(f, "orange"),
            Self::Green => write!(f, "green"),
            Self::Gold => write!(f, "gold"),
            Self::Platinum => write!(f, "platinum"),
        }
    }
}

/// Payment method offered on the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    CreditCard,
    DebitCard,
    Transfer,
}

/// Who backs the product warranty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyType {
    Seller,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_status_thresholds() {
        assert_eq!(StockStatus::from_stock(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_stock(1), StockStatus::LastUnits);
        assert_eq!(StockStatus::from_stock(5), StockStatus::LastUnits);
        assert_eq!(StockStatus::from_stock(6), StockStatus::Available);
        assert_eq!(StockStatus::from_stock(50), StockStatus::Available);
    }

    #[test]
    fn test_stock_status_wire_format() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"out_of_stock\"");
        assert_eq!(StockStatus::LastUnits.to_string(), "last_units");
    }

    #[test]
    fn test_reputation_levels_serialize_lowercase() {
        let json = serde_json::to_string(&ReputationLevel::ALL).unwrap();
        assert_eq!(json, r#"["yellow","orange","green","gold","platinum"]"#);
    }

    #[test]
    fn test_payment_method_and_warranty_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethodType::CreditCard).unwrap(),
            "\"credit_card\""
        );
        assert_eq!(
            serde_json::to_string(&WarrantyType::Seller).unwrap(),
            "\"seller\""
        );
    }
}
