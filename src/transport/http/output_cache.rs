//! Server-side output cache.
//!
//! Wraps a route and replays the first successful response body for every
//! request to the same path until the entry is older than the TTL. The inner
//! handler is not invoked on a hit, so a cached envelope keeps the timestamp
//! it was built with.

use crate::infra::clock::SharedClock;
use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Upper bound on a body we are willing to buffer for caching.
const MAX_CACHED_BODY_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone)]
struct CachedResponse {
    headers: HeaderMap,
    body: Bytes,
    stored_at: DateTime<Utc>,
}

impl CachedResponse {
    fn to_response(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.headers_mut() = self.headers.clone();
        response
    }
}

pub struct OutputCache {
    entries: RwLock<HashMap<String, CachedResponse>>,
    /// Serializes misses so one window is filled by one handler run.
    fill_lock: Mutex<()>,
    clock: SharedClock,
    ttl: Duration,
}

impl OutputCache {
    pub fn new(clock: SharedClock, ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            fill_lock: Mutex::new(()),
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drops every entry.
    pub async fn invalidate_all(&self) {
        self.entries.write().await.clear();
    }

    async fn lookup(&self, key: &str) -> Option<CachedResponse> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        let age = (self.clock.now() - entry.stored_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        (age < self.ttl).then(|| entry.clone())
    }

    async fn store(&self, key: String, entry: CachedResponse) {
        self.entries.write().await.insert(key, entry);
    }

    fn cache_control(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("public, max-age={}", self.ttl.as_secs()))
            .unwrap_or_else(|_| HeaderValue::from_static("public"))
    }
}

/// `axum::middleware::from_fn_with_state` adapter. Keyed on the request path;
/// query string, client identity and headers do not vary the entry.
pub async fn output_cache_middleware(
    State(cache): State<Arc<OutputCache>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }
    let key = request.uri().path().to_string();

    if let Some(hit) = cache.lookup(&key).await {
        tracing::debug!(path = %key, stored_at = %hit.stored_at, "output cache hit");
        return hit.to_response();
    }

    let _fill = cache.fill_lock.lock().await;
    // Another request may have filled the entry while we waited.
    if let Some(hit) = cache.lookup(&key).await {
        tracing::debug!(path = %key, "output cache hit after wait");
        return hit.to_response();
    }

    tracing::debug!(path = %key, "output cache miss");
    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_CACHED_BODY_BYTES).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(path = %key, error = %e, "failed to buffer response for output cache");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    parts
        .headers
        .insert(header::CACHE_CONTROL, cache.cache_control());

    cache
        .store(
            key,
            CachedResponse {
                headers: parts.headers.clone(),
                body: bytes.clone(),
                stored_at: cache.clock.now(),
            },
        )
        .await;

    Response::from_parts(parts, Body::from(bytes))
}
