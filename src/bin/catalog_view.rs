// src/bin/catalog_view.rs
//
// Terminal rendition of the catalog page. Commands on stdin:
//   <enter>  refresh if stale
//   r        retry (always fetches)
//   q        quit

use std::sync::Arc;

use inventory_catalog::client::{CatalogView, HttpCatalogApi};
use inventory_catalog::infra::config::{self, ClientConfig};
use inventory_catalog::telemetry;
use inventory_catalog::SystemClock;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    telemetry::init_tracing();

    let config = ClientConfig::from_env()?;
    let api = HttpCatalogApi::new(config.base_url.clone())?;
    tracing::info!(url = %api.product_list_url(), "catalog view starting");

    let view = CatalogView::new(api, Arc::new(SystemClock), config.freshness_window)
        .with_observer(|state| tracing::debug!(?state, "view state changed"));

    view.ensure_fresh().await;
    print!("{}", view.screen().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "q" | "quit" => break,
            "r" | "retry" => view.retry().await,
            "" => {
                view.ensure_fresh().await;
            }
            other => {
                println!("unknown command {:?} (enter = refresh, r = retry, q = quit)", other);
                continue;
            }
        }
        print!("{}", view.screen().await);
    }

    Ok(())
}
