//! Catalog domain: the product records, the wire envelope that wraps them, and
//! the fixed seed list the service hands out.

pub mod envelope;
pub mod product;
pub mod seed;

pub use envelope::{decode_envelope, CatalogEnvelope, HealthReport};
pub use product::{Category, Product, StockLevel};
pub use seed::CatalogStore;
