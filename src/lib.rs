pub mod client;
pub mod domain;
pub mod infra;
pub mod telemetry;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use client::{CatalogView, HttpCatalogApi, ViewState};
pub use domain::catalog::{CatalogEnvelope, CatalogStore, Category, Product, StockLevel};
pub use infra::clock::{Clock, ManualClock, SharedClock, SystemClock};
