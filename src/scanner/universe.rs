use std::collections::BTreeMap;

use crate::cex::{ExchangeAdapter, MarketsCache, VenueId};

const QUOTE_SUFFIX: &str = "/USDT";

/// USDT-quoted, active, spot symbols listed on one venue.
pub async fn usdt_spot_symbols(
    adapter: &ExchangeAdapter,
    markets_cache: &MarketsCache,
) -> Vec<String> {
    let Some(markets) = markets_cache.markets(adapter.venue(), adapter).await else {
        return Vec::new();
    };
    markets
        .iter()
        .filter(|(symbol, meta)| symbol.ends_with(QUOTE_SUFFIX) && meta.active && meta.spot)
        .map(|(symbol, _)| symbol.clone())
        .collect()
}

/// Symbols tradeable on at least two of the given venues, sorted
/// alphabetically. An empty result is a valid outcome; no symbols are
/// fabricated.
pub async fn common_usdt_symbols(
    adapters: &BTreeMap<VenueId, ExchangeAdapter>,
    markets_cache: &MarketsCache,
) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for adapter in adapters.values() {
        for symbol in usdt_spot_symbols(adapter, markets_cache).await {
            *counts.entry(symbol).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(symbol, _)| symbol)
        .collect()
}
