//! Wire envelopes served by the catalog service.

use super::product::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// The product list as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEnvelope {
    pub products: Vec<Product>,
    #[serde(alias = "totalcount")]
    pub total_count: usize,
    /// Instant the envelope was built. Cached responses keep the original value.
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

impl CatalogEnvelope {
    /// Wraps `products`, deriving `total_count` from their number.
    pub fn new(products: Vec<Product>, timestamp: DateTime<Utc>) -> Self {
        Self {
            total_count: products.len(),
            products,
            timestamp,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Liveness report for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    pub status: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    pub fn healthy(timestamp: DateTime<Utc>) -> Self {
        Self {
            status: "Healthy".to_string(),
            timestamp,
        }
    }
}

/// Decodes an envelope matching field names without regard to letter case.
///
/// Keys are lowercased throughout the document before the typed decode, so
/// `totalCount`, `TotalCount` and `totalcount` all land in the same field.
pub fn decode_envelope(body: &[u8]) -> Result<CatalogEnvelope, serde_json::Error> {
    let raw: JsonValue = serde_json::from_slice(body)?;
    serde_json::from_value(lowercase_keys(raw))
}

fn lowercase_keys(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect(),
        ),
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
