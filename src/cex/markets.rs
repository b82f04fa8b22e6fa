use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::cex::{ExchangeAdapter, VenueId};
use crate::common::MarketMeta;

/// Process-wide market metadata, loaded lazily once per venue and cached for
/// the process lifetime. A failed load caches an empty map; a restart is the
/// only refresh.
pub struct MarketsCache {
    cells: BTreeMap<VenueId, OnceCell<Arc<HashMap<String, MarketMeta>>>>,
}

impl MarketsCache {
    pub fn new(venues: &[VenueId]) -> Self {
        Self {
            cells: venues.iter().map(|v| (*v, OnceCell::new())).collect(),
        }
    }

    /// Markets for `venue`, loading them through `adapter` on first access.
    /// Concurrent first calls for the same venue are serialized; the first
    /// completed load wins.
    pub async fn markets(
        &self,
        venue: VenueId,
        adapter: &ExchangeAdapter,
    ) -> Option<Arc<HashMap<String, MarketMeta>>> {
        let cell = self.cells.get(&venue)?;
        let markets = cell
            .get_or_init(|| async {
                match adapter.load_markets().await {
                    Ok(markets) => {
                        info!(venue = %venue, markets = markets.len(), "loaded markets");
                        Arc::new(markets)
                    }
                    Err(e) => {
                        warn!(venue = %venue, error = %e, "load_markets failed, caching empty map");
                        Arc::new(HashMap::new())
                    }
                }
            })
            .await;
        Some(Arc::clone(markets))
    }
}
