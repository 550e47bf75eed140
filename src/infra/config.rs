//! Centralized configuration (environment variables + defaults).
//!
//! Both binaries call [`load_dotenv`] first, so a `.env` file in the working
//! directory can supply any of these.

use anyhow::Context;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5001,https://localhost:7001";
pub const DEFAULT_OUTPUT_CACHE_SECS: u64 = 5 * 60;
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_FRESHNESS_SECS: u64 = 2 * 60;

pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// Address the catalog service listens on.
pub fn bind_addr() -> anyhow::Result<SocketAddr> {
    parse_var("CATALOG_BIND_ADDR", DEFAULT_BIND_ADDR)
}

/// Browser origins allowed to call the service (comma separated).
pub fn allowed_origins() -> Vec<String> {
    let raw = std::env::var("CATALOG_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
    split_origins(&raw)
}

/// How long a product-list response is reused by the output cache.
pub fn output_cache_ttl() -> anyhow::Result<Duration> {
    let secs: u64 = parse_var(
        "CATALOG_OUTPUT_CACHE_SECS",
        &DEFAULT_OUTPUT_CACHE_SECS.to_string(),
    )?;
    Ok(Duration::from_secs(secs))
}

/// Base URL the catalog view fetches from.
pub fn base_url() -> String {
    std::env::var("CATALOG_BASE_URL")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// How long the catalog view treats its last envelope as fresh.
pub fn freshness_window() -> anyhow::Result<Duration> {
    let secs: u64 = parse_var("CATALOG_FRESHNESS_SECS", &DEFAULT_FRESHNESS_SECS.to_string())?;
    Ok(Duration::from_secs(secs))
}

/// Settings for the `api_server` binary.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
    pub output_cache_ttl: Duration,
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            bind_addr: bind_addr()?,
            allowed_origins: allowed_origins(),
            output_cache_ttl: output_cache_ttl()?,
        })
    }
}

/// Settings for the `catalog_view` binary.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub freshness_window: Duration,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url(),
            freshness_window: freshness_window()?,
        })
    }
}

fn parse_var<T>(name: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{} has an invalid value: {:?}", name, raw))
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
