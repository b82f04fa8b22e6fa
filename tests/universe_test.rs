
use scanner_common::{active_spot_meta, adapter_registry, MockVenue};
use spot_arb_scanner::cex::{MarketsCache, VenueId};
use spot_arb_scanner::common::MarketMeta;
use spot_arb_scanner::scanner::universe::{common_usdt_symbols, usdt_spot_symbols};

fn inactive_meta() -> MarketMeta {
    MarketMeta {
        active: false,
        ..active_spot_meta(0.001)
    }
}

#[tokio::test]
async fn usdt_spot_filter() {
    let client = MockVenue::new(VenueId::Binance)
        .with_market("BTC/USDT", active_spot_meta(0.001))
        .with_market("ETH/USDT", inactive_meta())
        .with_market(
            "SOL/USDT",
            MarketMeta {
                spot: false,
                ..active_spot_meta(0.001)
            },
        )
        .with_market("BTC/USDC", active_spot_meta(0.001));
    let registry = adapter_registry(vec![client]);
    let cache = MarketsCache::new(&[VenueId::Binance]);

    let mut symbols = usdt_spot_symbols(&registry[&VenueId::Binance], &cache).await;
    symbols.sort();

    // inactive, non-spot and non-USDT-quoted symbols all drop out
    assert_eq!(symbols, vec!["BTC/USDT".to_string()]);
}

#[tokio::test]
async fn intersection_needs_two_active_spot_listings() {
    let venue_a = MockVenue::new(VenueId::Binance)
        .with_market("BTC/USDT", active_spot_meta(0.001))
        .with_market("ETH/USDT", inactive_meta());
    let venue_b = MockVenue::new(VenueId::Kucoin).with_market("BTC/USDT", active_spot_meta(0.001));
    let venue_c = MockVenue::new(VenueId::Gate).with_market("ETH/USDT", active_spot_meta(0.002));

    let registry = adapter_registry(vec![venue_a, venue_b, venue_c]);
    let cache = MarketsCache::new(&[VenueId::Binance, VenueId::Kucoin, VenueId::Gate]);

    let symbols = common_usdt_symbols(&registry, &cache).await;

    // ETH/USDT is active-spot on only one venue
    assert_eq!(symbols, vec!["BTC/USDT".to_string()]);
}

#[tokio::test]
async fn universe_is_sorted_alphabetically() {
    let venue_a = MockVenue::new(VenueId::Binance)
        .with_market("SOL/USDT", active_spot_meta(0.001))
        .with_market("ADA/USDT", active_spot_meta(0.001))
        .with_market("BTC/USDT", active_spot_meta(0.001));
    let venue_b = MockVenue::new(VenueId::Kucoin)
        .with_market("SOL/USDT", active_spot_meta(0.001))
        .with_market("ADA/USDT", active_spot_meta(0.001))
        .with_market("BTC/USDT", active_spot_meta(0.001));

    let registry = adapter_registry(vec![venue_a, venue_b]);
    let cache = MarketsCache::new(&[VenueId::Binance, VenueId::Kucoin]);

    let symbols = common_usdt_symbols(&registry, &cache).await;
    assert_eq!(
        symbols,
        vec![
            "ADA/USDT".to_string(),
            "BTC/USDT".to_string(),
            "SOL/USDT".to_string(),
        ]
    );
}

#[tokio::test]
async fn no_overlap_means_empty_universe() {
    let venue_a = MockVenue::new(VenueId::Binance).with_market("BTC/USDT", active_spot_meta(0.001));
    let venue_b = MockVenue::new(VenueId::Kucoin).with_market("ETH/USDT", active_spot_meta(0.001));

    let registry = adapter_registry(vec![venue_a, venue_b]);
    let cache = MarketsCache::new(&[VenueId::Binance, VenueId::Kucoin]);

    assert!(common_usdt_symbols(&registry, &cache).await.is_empty());
}
