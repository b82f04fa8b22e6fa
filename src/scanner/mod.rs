use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::cex::{venue_client, ExchangeAdapter, MarketsCache, VenueId};
use crate::common::{get_timestamp_millis, ScannerConfig, VenueCredentials};

pub mod engine;
pub mod opportunity;
pub mod pair;
pub mod store;
pub mod universe;

pub use engine::{compute_opportunities, walk_book, AllData, EngineParams, Fill, ScanCounters};
pub use opportunity::Opportunity;
pub use pair::{fetch_pair, PairError, PairSnapshot};
pub use store::{OpportunitySet, Snapshot, SnapshotStore};

const BROADCAST_CAPACITY: usize = 64;

#[derive(Default)]
struct ScanState {
    /// Sorted symbol universe, computed on first need and kept while
    /// non-empty.
    universe: Option<Vec<String>>,
    cursor: usize,
}

/// All scanner state, explicitly owned: the adapter registry, the markets
/// cache, the snapshot store and the broadcast side of the distribution
/// surface. Tests build one per case with mock adapters.
pub struct Core {
    config: ScannerConfig,
    adapters: BTreeMap<VenueId, ExchangeAdapter>,
    markets: MarketsCache,
    store: SnapshotStore,
    updates: broadcast::Sender<Arc<OpportunitySet>>,
    state: Mutex<ScanState>,
}

impl Core {
    /// Builds the core with live venue clients for every configured venue.
    pub fn from_config(config: ScannerConfig) -> Self {
        let adapters = config
            .scan_venues
            .iter()
            .map(|venue| {
                let credentials = VenueCredentials::from_env(*venue);
                (
                    *venue,
                    ExchangeAdapter::new(venue_client(*venue), Some(credentials)),
                )
            })
            .collect();
        Self::with_adapters(config, adapters)
    }

    /// Builds the core around an explicit adapter registry.
    pub fn with_adapters(
        config: ScannerConfig,
        adapters: BTreeMap<VenueId, ExchangeAdapter>,
    ) -> Self {
        let venues: Vec<VenueId> = adapters.keys().copied().collect();
        let (updates, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            config,
            adapters,
            markets: MarketsCache::new(&venues),
            store: SnapshotStore::new(),
            updates,
            state: Mutex::new(ScanState::default()),
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Latest published snapshot, or `None` before the first tick completes.
    pub fn latest_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.store.latest_snapshot()
    }

    /// Latest published opportunity set, or `None` before the first tick.
    pub fn latest_opportunities(&self) -> Option<Arc<OpportunitySet>> {
        self.store.latest_opportunities()
    }

    /// Subscribes to `opportunityUpdate` pushes. The channel is bounded;
    /// a subscriber that falls behind loses its oldest updates and the
    /// scanner never waits on delivery.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<OpportunitySet>> {
        self.updates.subscribe()
    }

    /// Drives the scan loop forever: first tick immediately, then
    /// `scan_interval_ms` of idle time between completion and the next
    /// start, so ticks never overlap.
    pub async fn run(&self) {
        let interval = Duration::from_millis(self.config.scan_interval_ms);
        loop {
            self.tick().await;
            tokio::time::sleep(interval).await;
        }
    }

    /// Executes one tick. Every per-pair failure is recovered; the tick
    /// itself cannot fail. Publishes nothing when the universe is empty.
    pub async fn tick(&self) {
        let Some(batch) = self.next_batch().await else {
            return;
        };

        let mut tasks = Vec::with_capacity(batch.len() * self.adapters.len());
        for symbol in &batch {
            for (venue, adapter) in &self.adapters {
                let symbol = symbol.clone();
                let venue = *venue;
                tasks.push(async move {
                    let result = fetch_pair(adapter, &self.markets, &symbol).await;
                    (symbol, venue, result)
                });
            }
        }

        let mut all_data: AllData = BTreeMap::new();
        for (symbol, venue, result) in join_all(tasks).await {
            match result {
                Ok(snapshot) => {
                    all_data.entry(symbol).or_default().insert(venue, snapshot);
                }
                Err(e) => {
                    debug!(symbol = %symbol, venue = %venue, reason = %e, "pair excluded from tick");
                }
            }
        }

        let ts = get_timestamp_millis();
        let params = EngineParams::from(&self.config);
        let (opportunities, counters) = compute_opportunities(&all_data, &params, ts);

        if self.config.debug {
            debug!(
                pairs_checked = counters.pairs_checked,
                pairs_missing_ob = counters.pairs_missing_ob,
                pairs_insufficient_fill = counters.pairs_insufficient_fill,
                pairs_below_spread = counters.pairs_below_spread,
                pairs_below_notional = counters.pairs_below_notional,
                pairs_limits_fail = counters.pairs_limits_fail,
                "tick counters"
            );
        }

        info!(
            batch = batch.len(),
            symbols = all_data.len(),
            opportunities = opportunities.len(),
            "tick complete"
        );

        let (_, published) = self.store.publish(
            Snapshot {
                timestamp: ts,
                data: all_data,
            },
            OpportunitySet {
                timestamp: ts,
                items: opportunities,
            },
        );

        // no receivers is fine; send only fails when nobody is subscribed
        let _ = self.updates.send(published);
    }

    /// Next round-robin slice of the universe, computing the universe first
    /// when unknown. Returns `None` when the universe is empty; an empty
    /// computation is retried on the next tick.
    async fn next_batch(&self) -> Option<Vec<String>> {
        let mut state = self.state.lock().await;

        if state.universe.is_none() {
            let universe = universe::common_usdt_symbols(&self.adapters, &self.markets).await;
            if universe.is_empty() {
                warn!("symbol universe is empty, skipping tick");
                return None;
            }
            info!(symbols = universe.len(), "computed symbol universe");
            state.universe = Some(universe);
            state.cursor = 0;
        }

        let universe = state.universe.as_ref()?;
        let len = universe.len();
        let start = state.cursor.min(len);
        let end = (start + self.config.scan_batch_size).min(len);
        let batch = universe[start..end].to_vec();
        state.cursor = if end >= len { 0 } else { end };
        Some(batch)
    }
}
