use crate::domain::catalog::CatalogEnvelope;
use crate::transport::http::types::AppState;
use axum::extract::State;
use axum::Json;

/// Builds the envelope from the seed list. Runs only on output-cache misses.
#[utoipa::path(
    get,
    path = "/api/productlist",
    responses(
        (status = 200, description = "Full product catalog (served from the output cache for up to 5 minutes)", body = CatalogEnvelope)
    )
)]
pub async fn product_list_handler(State(state): State<AppState>) -> Json<CatalogEnvelope> {
    let envelope = state.catalog.envelope(state.clock.now());
    tracing::debug!(total_count = envelope.total_count, "built catalog envelope");
    Json(envelope)
}
