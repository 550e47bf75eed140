//! Client-side state machine for the catalog page.
//!
//! The last good envelope and the instant it was fetched are stored together
//! and replaced as a pair. Observers are told about a state change exactly
//! twice per network attempt: once on entering `Loading`, once when it settles.

use crate::client::api::CatalogApi;
use crate::client::render::CatalogScreen;
use crate::domain::catalog::CatalogEnvelope;
use crate::infra::clock::SharedClock;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Loaded(CatalogEnvelope),
    Failed(String),
}

/// What `ensure_fresh` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The stored envelope was inside the freshness window; no request was made.
    AlreadyFresh,
    /// A request was made; inspect the state for its result.
    Fetched,
}

pub type StateObserver = Box<dyn Fn(&ViewState) + Send + Sync>;

#[derive(Debug, Clone)]
struct CachedEnvelope {
    envelope: CatalogEnvelope,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Inner {
    cached: Option<CachedEnvelope>,
    state: ViewState,
}

pub struct CatalogView<A: CatalogApi> {
    api: A,
    clock: SharedClock,
    freshness_window: Duration,
    inner: Mutex<Inner>,
    /// Held for the whole of a refresh so a second caller queues behind it.
    in_flight: Mutex<()>,
    observers: Vec<StateObserver>,
}

impl<A: CatalogApi> CatalogView<A> {
    pub fn new(api: A, clock: SharedClock, freshness_window: Duration) -> Self {
        Self {
            api,
            clock,
            freshness_window,
            inner: Mutex::new(Inner {
                cached: None,
                state: ViewState::Loading,
            }),
            in_flight: Mutex::new(()),
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: impl Fn(&ViewState) + Send + Sync + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub async fn state(&self) -> ViewState {
        self.inner.lock().await.state.clone()
    }

    pub async fn screen(&self) -> CatalogScreen {
        CatalogScreen::from_state(&self.inner.lock().await.state)
    }

    /// Last successfully decoded envelope, even if the current state is `Failed`.
    pub async fn cached_envelope(&self) -> Option<CatalogEnvelope> {
        self.inner
            .lock()
            .await
            .cached
            .as_ref()
            .map(|c| c.envelope.clone())
    }

    pub async fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.inner.lock().await.cached.as_ref().map(|c| c.fetched_at)
    }

    /// Fetches unless the stored envelope is younger than the freshness window.
    /// A call made while another refresh is running waits for it, then
    /// re-checks freshness.
    pub async fn ensure_fresh(&self) -> RefreshOutcome {
        let _in_flight = self.in_flight.lock().await;
        if self.is_fresh().await {
            tracing::debug!("catalog still fresh, skipping fetch");
            return RefreshOutcome::AlreadyFresh;
        }
        self.fetch_and_apply().await;
        RefreshOutcome::Fetched
    }

    /// Forgets the stored envelope and always fetches.
    pub async fn retry(&self) {
        let _in_flight = self.in_flight.lock().await;
        self.inner.lock().await.cached = None;
        self.fetch_and_apply().await;
    }

    async fn is_fresh(&self) -> bool {
        let inner = self.inner.lock().await;
        match &inner.cached {
            Some(cached) => {
                let age = (self.clock.now() - cached.fetched_at)
                    .to_std()
                    .unwrap_or(Duration::ZERO);
                age < self.freshness_window
            }
            None => false,
        }
    }

    async fn fetch_and_apply(&self) {
        let loading = {
            let mut inner = self.inner.lock().await;
            inner.state = ViewState::Loading;
            inner.state.clone()
        };
        self.notify(&loading);

        let result = self.api.fetch_catalog().await;

        let settled = {
            let mut inner = self.inner.lock().await;
            match result {
                Ok(envelope) => {
                    tracing::info!(total_count = envelope.total_count, "catalog loaded");
                    inner.cached = Some(CachedEnvelope {
                        envelope: envelope.clone(),
                        fetched_at: self.clock.now(),
                    });
                    inner.state = ViewState::Loaded(envelope);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "catalog fetch failed");
                    inner.state = ViewState::Failed(err.to_string());
                }
            }
            inner.state.clone()
        };
        self.notify(&settled);
    }

    fn notify(&self, state: &ViewState) {
        for observer in &self.observers {
            observer(state);
        }
    }
}
