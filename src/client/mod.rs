//! The catalog client view: fetches the envelope over HTTP, keeps a short-lived
//! local copy, and drives a Loading / Loaded / Failed state machine.

pub mod api;
pub mod error;
pub mod render;
pub mod view;

pub use api::{CatalogApi, HttpCatalogApi, PRODUCT_LIST_PATH};
pub use error::FetchError;
pub use render::{CatalogScreen, ProductCard};
pub use view::{CatalogView, RefreshOutcome, StateObserver, ViewState};
