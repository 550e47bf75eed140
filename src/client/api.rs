// Catalog service HTTP client.
// One GET per call; no retries, no timeout beyond the transport default.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use std::sync::Arc;

use crate::client::error::FetchError;
use crate::domain::catalog::{decode_envelope, CatalogEnvelope};

pub const PRODUCT_LIST_PATH: &str = "/api/productlist";

/// Source of catalog envelopes for a [`crate::client::CatalogView`].
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CatalogEnvelope, FetchError>;
}

#[async_trait]
impl<T: CatalogApi + ?Sized> CatalogApi for Arc<T> {
    async fn fetch_catalog(&self) -> Result<CatalogEnvelope, FetchError> {
        (**self).fetch_catalog().await
    }
}

/// Fetches the product list from a running catalog service.
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .build()
            .map_err(|e| FetchError::Unexpected(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn product_list_url(&self) -> String {
        format!("{}{}", self.base_url, PRODUCT_LIST_PATH)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn fetch_catalog(&self) -> Result<CatalogEnvelope, FetchError> {
        let url = self.product_list_url();
        tracing::debug!(%url, "fetching catalog");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, "catalog-view")
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::from_transport)?;
        Ok(decode_envelope(&body)?)
    }
}
