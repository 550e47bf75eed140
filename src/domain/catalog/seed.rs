//! The fixed product list served for the lifetime of the process.

use super::envelope::CatalogEnvelope;
use super::product::{Category, Product};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Owns the immutable product list for one service instance.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Arc<[Product]>,
}

impl CatalogStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// The three-item demo catalog.
    pub fn seeded() -> Self {
        Self::new(vec![
            Product {
                id: 1,
                name: "Laptop".to_string(),
                price: Decimal::new(120050, 2),
                stock: 25,
                category: Category {
                    id: 101,
                    name: "Electronics".to_string(),
                },
                description: "14-inch ultrabook with 16 GB RAM and 512 GB SSD".to_string(),
                image_url: "/images/laptop.png".to_string(),
            },
            Product {
                id: 2,
                name: "Headphones".to_string(),
                price: Decimal::new(5000, 2),
                stock: 100,
                category: Category {
                    id: 102,
                    name: "Accessories".to_string(),
                },
                description: "Over-ear wireless headphones with noise cancelling".to_string(),
                image_url: "/images/headphones.png".to_string(),
            },
            Product {
                id: 3,
                name: "Wireless Mouse".to_string(),
                price: Decimal::new(2599, 2),
                stock: 50,
                category: Category {
                    id: 102,
                    name: "Accessories".to_string(),
                },
                description: "Ergonomic mouse with USB receiver".to_string(),
                image_url: "/images/mouse.png".to_string(),
            },
        ])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Builds a fresh envelope stamped with `now`.
    pub fn envelope(&self, now: DateTime<Utc>) -> CatalogEnvelope {
        CatalogEnvelope::new(self.products.to_vec(), now)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::seeded()
    }
}
