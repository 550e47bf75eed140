//! What the catalog page shows, derived from [`ViewState`] and never stored.

use crate::client::view::ViewState;
use crate::domain::catalog::{CatalogEnvelope, Product, StockLevel};
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub name: String,
    pub description: String,
    /// Price with exactly two decimals.
    pub price: String,
    pub stock: u32,
    pub stock_level: StockLevel,
    pub category: String,
    pub image_url: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: format!("{:.2}", product.price),
            stock: product.stock,
            stock_level: product.stock_level(),
            category: product.category.name.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogScreen {
    /// Indeterminate progress indicator.
    Loading,
    /// Error message plus a retry control.
    Failed { message: String },
    /// Loaded, but the catalog has no products.
    Empty,
    Listing {
        total_count: usize,
        timestamp: DateTime<Utc>,
        cards: Vec<ProductCard>,
    },
}

impl CatalogScreen {
    pub fn from_state(state: &ViewState) -> Self {
        match state {
            ViewState::Loading => CatalogScreen::Loading,
            ViewState::Failed(message) => CatalogScreen::Failed {
                message: message.clone(),
            },
            ViewState::Loaded(envelope) => Self::from_envelope(envelope),
        }
    }

    fn from_envelope(envelope: &CatalogEnvelope) -> Self {
        if envelope.is_empty() {
            return CatalogScreen::Empty;
        }
        CatalogScreen::Listing {
            total_count: envelope.total_count,
            timestamp: envelope.timestamp,
            cards: envelope.products.iter().map(ProductCard::from).collect(),
        }
    }

    pub fn offers_retry(&self) -> bool {
        matches!(self, CatalogScreen::Failed { .. })
    }
}

impl fmt::Display for CatalogScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogScreen::Loading => writeln!(f, "Loading products..."),
            CatalogScreen::Failed { message } => {
                writeln!(f, "Error: {}", message)?;
                writeln!(f, "[r] Retry")
            }
            CatalogScreen::Empty => writeln!(f, "No products available."),
            CatalogScreen::Listing {
                total_count,
                timestamp,
                cards,
            } => {
                writeln!(
                    f,
                    "{} products (as of {})",
                    total_count,
                    timestamp.format("%Y-%m-%d %H:%M:%S UTC")
                )?;
                for card in cards {
                    writeln!(f)?;
                    writeln!(f, "  {}  [{}]", card.name, card.category)?;
                    if !card.description.is_empty() {
                        writeln!(f, "  {}", card.description)?;
                    }
                    writeln!(
                        f,
                        "  ${}  stock: {} ({})",
                        card.price,
                        card.stock,
                        card.stock_level.label()
                    )?;
                }
                Ok(())
            }
        }
    }
}
