//! Graceful-shutdown trigger for `axum::serve`.

use std::fmt::Display;
use std::future::Future;

/// Resolves once `signal` fires. If the signal listener itself fails, the
/// error is logged and this never resolves, so the server keeps running
/// instead of stopping right after startup.
pub async fn shutdown_on<F, E>(signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match signal.await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for shutdown signal; graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}

/// Waits for Ctrl+C.
pub async fn ctrl_c() {
    shutdown_on(tokio::signal::ctrl_c()).await
}
