use crate::domain::catalog::{CatalogEnvelope, Category, HealthReport, Product};
use crate::transport::http::handlers::{health, products};
use crate::transport::http::origin::origin_guard;
use crate::transport::http::output_cache::output_cache_middleware;
use crate::transport::http::types::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::product_list_handler
    ),
    components(schemas(CatalogEnvelope, Product, Category, HealthReport))
)]
pub struct ApiDoc;

/// API routes only. The product list sits behind the output cache; health does not.
pub fn create_router(app_state: AppState) -> Router {
    let cached_product_list = get(products::product_list_handler).layer(from_fn_with_state(
        app_state.output_cache.clone(),
        output_cache_middleware,
    ));

    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/productlist", cached_product_list)
        .with_state(app_state)
}

/// The full service: API routes, Swagger UI, CORS, origin guard and request tracing.
pub fn create_app(app_state: AppState) -> Router {
    let allowed_origins = app_state.allowed_origins.clone();
    let cors = allowed_origins.cors_layer();

    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(from_fn_with_state(allowed_origins, origin_guard))
        .layer(TraceLayer::new_for_http())
}
