use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cex::{VenueClient, VenueId};
use crate::common::{MarketMeta, OrderBook, ScannerError, Ticker, VenueCredentials};

const RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(1000);

/// Adapter tuning. Defaults match the venues' public-endpoint tolerances.
#[derive(Debug, Clone)]
pub struct AdapterOptions {
    pub enable_rate_limit: bool,
    pub timeout: Duration,
    /// Minimum spacing between two requests to the same venue.
    pub min_request_interval: Duration,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            enable_rate_limit: true,
            timeout: Duration::from_millis(30_000),
            min_request_interval: Duration::from_millis(100),
        }
    }
}

/// Per-venue facade over a [`VenueClient`]: paces requests, enforces a call
/// timeout, and retries once after a rate-limit response. Callers treat any
/// `Err` as "this venue has no data this tick"; nothing propagates further.
pub struct ExchangeAdapter {
    venue: VenueId,
    inner: Box<dyn VenueClient>,
    options: AdapterOptions,
    next_slot: Mutex<Instant>,
}

impl ExchangeAdapter {
    pub fn new(inner: Box<dyn VenueClient>, credentials: Option<VenueCredentials>) -> Self {
        Self::with_options(inner, credentials, AdapterOptions::default())
    }

    pub fn with_options(
        inner: Box<dyn VenueClient>,
        credentials: Option<VenueCredentials>,
        options: AdapterOptions,
    ) -> Self {
        let venue = inner.venue();
        match credentials {
            Some(ref creds) if creds.is_configured() => {
                debug!(venue = %venue, "API credentials configured (unused by read-only endpoints)");
            }
            _ => {
                debug!(venue = %venue, "no API credentials, using public endpoints");
            }
        }
        Self {
            venue,
            inner,
            options,
            next_slot: Mutex::new(Instant::now()),
        }
    }

    pub fn venue(&self) -> VenueId {
        self.venue
    }

    pub async fn load_markets(&self) -> Result<HashMap<String, MarketMeta>, ScannerError> {
        self.with_policy("load_markets", || self.inner.load_markets())
            .await
    }

    pub async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, ScannerError> {
        self.with_policy("fetch_ticker", || self.inner.fetch_ticker(symbol))
            .await
    }

    pub async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<OrderBook, ScannerError> {
        self.with_policy("fetch_order_book", || {
            self.inner.fetch_order_book(symbol, limit)
        })
        .await
    }

    async fn with_policy<T, F, Fut>(&self, op: &str, call: F) -> Result<T, ScannerError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ScannerError>>,
    {
        self.pace().await;
        match self.attempt(call()).await {
            Err(e) if e.is_rate_limit() => {
                warn!(venue = %self.venue, op, error = %e, "rate limited, retrying once");
                tokio::time::sleep(RATE_LIMIT_BACKOFF).await;
                self.pace().await;
                self.attempt(call()).await.map_err(|e| {
                    warn!(venue = %self.venue, op, error = %e, "retry failed");
                    e
                })
            }
            Err(e) => {
                warn!(venue = %self.venue, op, error = %e, "request failed");
                Err(e)
            }
            ok => ok,
        }
    }

    async fn attempt<T, Fut>(&self, fut: Fut) -> Result<T, ScannerError>
    where
        Fut: Future<Output = Result<T, ScannerError>>,
    {
        match tokio::time::timeout(self.options.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(ScannerError::Timeout(self.options.timeout)),
        }
    }

    /// Reserves the next request slot for this venue and sleeps until it
    /// opens. Concurrent callers are spaced `min_request_interval` apart.
    async fn pace(&self) {
        if !self.options.enable_rate_limit {
            return;
        }
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = if *next > now { *next } else { now };
            *next = slot + self.options.min_request_interval;
            slot
        };
        tokio::time::sleep_until(slot).await;
    }
}
