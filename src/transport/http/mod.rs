pub mod origin;
pub mod output_cache;
pub mod router;
pub mod shutdown;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod products;
}

pub use router::{create_app, create_router, ApiDoc};
pub use types::AppState;
