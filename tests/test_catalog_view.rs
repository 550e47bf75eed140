//! Catalog view against real HTTP: a live catalog service, a dead port, and a
//! few misbehaving stand-in servers.

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use chrono::Duration as ChronoDuration;
use inventory_catalog::client::{CatalogScreen, CatalogView, FetchError, HttpCatalogApi, ViewState};
use inventory_catalog::domain::catalog::decode_envelope;
use inventory_catalog::transport;
use inventory_catalog::transport::http::origin::AllowedOrigins;
use inventory_catalog::{CatalogEnvelope, CatalogStore, Clock, ManualClock, StockLevel};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;

const FRESHNESS: Duration = Duration::from_secs(120);

async fn serve(router: Router) -> Result<(String, tokio::task::JoinHandle<()>), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok((format!("http://127.0.0.1:{}", port), handle))
}

async fn start_catalog_service() -> Result<(String, tokio::task::JoinHandle<()>), Box<dyn std::error::Error>> {
    let state = transport::http::AppState::new(
        CatalogStore::seeded(),
        Arc::new(ManualClock::default()),
        AllowedOrigins::new(&["http://localhost:5001"])?,
        Duration::from_secs(300),
    );
    serve(transport::http::create_app(state)).await
}

/// No pooled keep-alive connections, so a stopped server is seen as down at once.
fn unpooled_api(base_url: &str) -> Result<HttpCatalogApi, Box<dyn std::error::Error>> {
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()?;
    Ok(HttpCatalogApi::with_client(client, base_url))
}

async fn closed_port_url() -> Result<String, Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{}", port))
}

#[tokio::test]
async fn test_view_loads_seed_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, _server) = start_catalog_service().await?;
    let view = CatalogView::new(
        HttpCatalogApi::new(base_url)?,
        Arc::new(ManualClock::default()),
        FRESHNESS,
    );

    view.ensure_fresh().await;

    let ViewState::Loaded(envelope) = view.state().await else {
        panic!("expected Loaded, got {:?}", view.state().await);
    };
    assert_eq!(envelope.total_count, 3);
    let levels: Vec<StockLevel> = envelope.products.iter().map(|p| p.stock_level()).collect();
    assert_eq!(levels, vec![StockLevel::Plenty; 3]);

    match view.screen().await {
        CatalogScreen::Listing { cards, .. } => assert_eq!(cards.len(), 3),
        other => panic!("expected listing, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_view_reports_network_error_when_server_is_down() -> Result<(), Box<dyn std::error::Error>> {
    let view = CatalogView::new(
        unpooled_api(&closed_port_url().await?)?,
        Arc::new(ManualClock::default()),
        FRESHNESS,
    );

    view.ensure_fresh().await;

    match view.screen().await {
        CatalogScreen::Failed { message } => assert!(message.starts_with("network error: ")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(view.cached_envelope().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_server_going_down_keeps_last_good_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, server) = start_catalog_service().await?;
    let clock = Arc::new(ManualClock::default());
    let view = CatalogView::new(unpooled_api(&base_url)?, clock.clone(), FRESHNESS);

    view.ensure_fresh().await;
    let good = view.cached_envelope().await.expect("first load succeeds");
    let fetched_at = view.last_fetched_at().await;

    server.abort();
    let _ = server.await;
    clock.advance(ChronoDuration::minutes(3));
    view.ensure_fresh().await;

    assert!(matches!(view.state().await, ViewState::Failed(m) if m.starts_with("network error: ")));
    assert_eq!(view.cached_envelope().await, Some(good));
    assert_eq!(view.last_fetched_at().await, fetched_at);
    Ok(())
}

#[tokio::test]
async fn test_view_reports_http_status() -> Result<(), Box<dyn std::error::Error>> {
    let router = Router::new().route(
        "/api/productlist",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let (base_url, _server) = serve(router).await?;
    let view = CatalogView::new(
        HttpCatalogApi::new(base_url)?,
        Arc::new(ManualClock::default()),
        FRESHNESS,
    );

    view.ensure_fresh().await;
    assert_eq!(
        view.state().await,
        ViewState::Failed("HTTP error: 503 Service Unavailable".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_view_reports_status_without_reason_phrase() -> Result<(), Box<dyn std::error::Error>> {
    let router = Router::new().route(
        "/api/productlist",
        get(|| async { (StatusCode::from_u16(599).unwrap(), "nonstandard") }),
    );
    let (base_url, _server) = serve(router).await?;
    let view = CatalogView::new(
        HttpCatalogApi::new(base_url)?,
        Arc::new(ManualClock::default()),
        FRESHNESS,
    );

    view.ensure_fresh().await;
    assert_eq!(
        view.state().await,
        ViewState::Failed("HTTP error: 599".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_plain_json_decode_reads_live_response() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, _server) = start_catalog_service().await?;
    let envelope: CatalogEnvelope = reqwest::get(format!("{}/api/productlist", base_url))
        .await?
        .json()
        .await?;
    assert_eq!(envelope.total_count, 3);
    assert_eq!(envelope.products[0].image_url, "/images/laptop.png");
    Ok(())
}

#[tokio::test]
async fn test_view_reports_format_error() -> Result<(), Box<dyn std::error::Error>> {
    let router = Router::new().route(
        "/api/productlist",
        get(|| async { r#"{"products": 12, "totalCount": "many"}"# }),
    );
    let (base_url, _server) = serve(router).await?;
    let view = CatalogView::new(
        HttpCatalogApi::new(base_url)?,
        Arc::new(ManualClock::default()),
        FRESHNESS,
    );

    view.ensure_fresh().await;
    match view.state().await {
        ViewState::Failed(message) => assert!(message.starts_with("data format error: ")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(view.last_fetched_at().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_view_renders_empty_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let router = Router::new().route(
        "/api/productlist",
        get(|| async {
            axum::Json(serde_json::json!({
                "products": [],
                "totalCount": 0,
                "timestamp": "2024-05-01T12:00:00Z"
            }))
        }),
    );
    let (base_url, _server) = serve(router).await?;
    let view = CatalogView::new(
        HttpCatalogApi::new(base_url)?,
        Arc::new(ManualClock::default()),
        FRESHNESS,
    );

    view.ensure_fresh().await;
    let screen = view.screen().await;
    assert_eq!(screen, CatalogScreen::Empty);
    assert!(!screen.offers_retry());
    Ok(())
}

#[tokio::test]
async fn test_retry_fetches_inside_freshness_window() -> Result<(), Box<dyn std::error::Error>> {
    let hits = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/api/productlist",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                axum::Json(CatalogStore::seeded().envelope(chrono::Utc::now()))
            }
        }),
    );
    let (base_url, _server) = serve(router).await?;
    let clock = Arc::new(ManualClock::default());
    let view = CatalogView::new(HttpCatalogApi::new(base_url)?, clock.clone(), FRESHNESS);

    view.ensure_fresh().await;
    clock.advance(ChronoDuration::seconds(1));
    view.ensure_fresh().await;
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);

    view.retry().await;
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 2);
    assert!(matches!(view.state().await, ViewState::Loaded(_)));
    Ok(())
}

fn recase_keys(value: JsonValue, recase: &dyn Fn(&str) -> String) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| (recase(&k), recase_keys(v, recase)))
                .collect(),
        ),
        JsonValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(|v| recase_keys(v, recase)).collect())
        }
        other => other,
    }
}

fn pascal(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[test]
fn test_envelope_round_trips_under_any_key_casing() {
    let original = CatalogStore::seeded().envelope(ManualClock::default().now());
    let encoded = serde_json::to_value(&original).unwrap();

    let casings: [&dyn Fn(&str) -> String; 4] = [
        &|k: &str| k.to_string(),
        &|k: &str| k.to_uppercase(),
        &|k: &str| k.to_lowercase(),
        &pascal,
    ];
    for recase in casings {
        let body = recase_keys(encoded.clone(), recase).to_string();
        let decoded: CatalogEnvelope = decode_envelope(body.as_bytes()).unwrap();
        assert_eq!(decoded, original);
    }
}

#[test]
fn test_fetch_error_kinds_are_distinct() {
    let kinds = [
        FetchError::Network("x".into()).to_string(),
        FetchError::Http {
            status: 404,
            reason: "Not Found".into(),
        }
        .to_string(),
        FetchError::Format("x".into()).to_string(),
        FetchError::Unexpected("x".into()).to_string(),
    ];
    let prefixes = ["network error", "HTTP error", "data format error", "unexpected error"];
    for (message, prefix) in kinds.iter().zip(prefixes) {
        assert!(message.starts_with(prefix), "{} should start with {}", message, prefix);
    }
}
