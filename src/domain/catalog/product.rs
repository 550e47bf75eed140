use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category embedded in a product. Each product owns its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// A single catalog entry.
///
/// Serialized with camelCase keys. The derived `Deserialize` reads camelCase or
/// all-lowercase keys; [`crate::domain::catalog::decode_envelope`] accepts any
/// casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub stock: u32,
    pub category: Category,
    pub description: String,
    #[serde(alias = "imageurl")]
    pub image_url: String,
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }
}

/// Three-tier stock indicator shown on each product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// More than ten units.
    Plenty,
    /// Between one and ten units.
    Low,
    OutOfStock,
}

impl StockLevel {
    const LOW_STOCK_THRESHOLD: u32 = 10;

    pub fn from_stock(stock: u32) -> Self {
        match stock {
            0 => StockLevel::OutOfStock,
            s if s <= Self::LOW_STOCK_THRESHOLD => StockLevel::Low,
            _ => StockLevel::Plenty,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::Plenty => "plenty",
            StockLevel::Low => "low",
            StockLevel::OutOfStock => "none",
        }
    }
}
