use crate::domain::catalog::CatalogStore;
use crate::infra::clock::{SharedClock, SystemClock};
use crate::infra::config::ServiceConfig;
use crate::transport::http::origin::AllowedOrigins;
use crate::transport::http::output_cache::OutputCache;
use std::sync::Arc;
use std::time::Duration;

/// Everything a request handler can reach. Cloned per request; the heavy parts
/// sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub clock: SharedClock,
    pub output_cache: Arc<OutputCache>,
    pub allowed_origins: Arc<AllowedOrigins>,
}

impl AppState {
    pub fn new(
        catalog: CatalogStore,
        clock: SharedClock,
        allowed_origins: AllowedOrigins,
        output_cache_ttl: Duration,
    ) -> Self {
        Self {
            output_cache: Arc::new(OutputCache::new(clock.clone(), output_cache_ttl)),
            catalog,
            clock,
            allowed_origins: Arc::new(allowed_origins),
        }
    }

    /// Seeded catalog on the system clock.
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let origins = AllowedOrigins::new(&config.allowed_origins)?;
        Ok(Self::new(
            CatalogStore::seeded(),
            Arc::new(SystemClock),
            origins,
            config.output_cache_ttl,
        ))
    }
}
