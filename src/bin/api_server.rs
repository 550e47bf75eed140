// src/bin/api_server.rs

use inventory_catalog::infra::config::{self, ServiceConfig};
use inventory_catalog::telemetry;
use inventory_catalog::transport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    telemetry::init_tracing();

    let config = ServiceConfig::from_env()?;
    tracing::info!(
        origins = ?config.allowed_origins,
        output_cache_secs = config.output_cache_ttl.as_secs(),
        "initializing catalog service"
    );

    let app_state = transport::http::AppState::from_config(&config)?;
    tracing::info!(
        products = app_state.catalog.products().len(),
        "seed catalog loaded"
    );

    let app = transport::http::create_app(app_state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("catalog service listening on http://{}", listener.local_addr()?);
    tracing::info!("swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(transport::http::shutdown::ctrl_c())
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
