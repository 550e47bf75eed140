//! Cross-origin policy: an allowlist guard in front of the CORS layer.
//!
//! `CorsLayer` alone only withholds the CORS response headers, the handler
//! still runs. The guard answers `403` with an empty body for any request whose
//! `Origin` is not on the list, preflights included. Requests that carry no
//! `Origin` header are not cross-origin and pass through. Origins are compared
//! byte for byte, the same rule `AllowOrigin::list` applies, so a request the
//! guard admits always gets its CORS headers.

use anyhow::Context;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Vec<HeaderValue>,
}

impl AllowedOrigins {
    pub fn new<S: AsRef<str>>(origins: &[S]) -> anyhow::Result<Self> {
        let origins = origins
            .iter()
            .map(|o| {
                let o = o.as_ref();
                HeaderValue::from_str(o).with_context(|| format!("invalid allowed origin: {:?}", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { origins })
    }

    pub fn is_allowed(&self, origin: &HeaderValue) -> bool {
        self.origins
            .iter()
            .any(|allowed| allowed == origin)
    }

    /// CORS headers for allowed origins: any method, any header.
    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.origins.clone()))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// `axum::middleware::from_fn_with_state` adapter.
pub async fn origin_guard(
    State(allowed): State<Arc<AllowedOrigins>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if !allowed.is_allowed(origin) {
            tracing::warn!(
                origin = ?origin,
                path = %request.uri().path(),
                "rejected request from origin outside the allowlist"
            );
            return StatusCode::FORBIDDEN.into_response();
        }
    }
    next.run(request).await
}
