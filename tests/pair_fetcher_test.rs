
use scanner_common::{active_spot_meta, book, fast_adapter, ticker, MockVenue};
use spot_arb_scanner::cex::{MarketsCache, VenueId};
use spot_arb_scanner::common::MarketMeta;
use spot_arb_scanner::scanner::{fetch_pair, PairError};

const SYMBOL: &str = "BTC/USDT";

fn cache_for(venue: VenueId) -> MarketsCache {
    MarketsCache::new(&[venue])
}

#[tokio::test]
async fn successful_pair_snapshot() {
    let mut meta = active_spot_meta(0.001);
    meta.maker = 0.0008;
    meta.limits.min_amount = Some(0.0001);
    meta.limits.min_cost = Some(5.0);

    let client = MockVenue::new(VenueId::Binance)
        .with_market(SYMBOL, meta)
        .with_ticker(SYMBOL, ticker(50_000.0, 49_990.0, 50_010.0))
        .with_book(SYMBOL, book(&[(49_990.0, 0.5)], &[(50_010.0, 0.4)]));
    let adapter = fast_adapter(client);
    let cache = cache_for(VenueId::Binance);

    let snap = fetch_pair(&adapter, &cache, SYMBOL).await.expect("snapshot");

    assert_eq!(snap.symbol, SYMBOL);
    assert_eq!(snap.venue, VenueId::Binance);
    assert_eq!(snap.price.last, 50_000.0);
    assert_eq!(snap.price.spread, 20.0);
    assert_eq!(snap.orderbook.best_bid, 49_990.0);
    assert_eq!(snap.orderbook.best_ask, 50_010.0);
    assert_eq!(snap.fees.taker, 0.001);
    assert_eq!(snap.fees.maker, 0.0008);
    assert_eq!(snap.fees.withdrawal, None);
    assert_eq!(snap.fees.deposit, 0.0);
    assert_eq!(snap.fees.network, 0.0);
    assert_eq!(snap.limits.min_amount, Some(0.0001));
    assert_eq!(snap.limits.min_cost, Some(5.0));
}

#[tokio::test]
async fn unknown_symbol_is_typed() {
    let client = MockVenue::new(VenueId::Binance).with_market("ETH/USDT", active_spot_meta(0.001));
    let adapter = fast_adapter(client);
    let cache = cache_for(VenueId::Binance);

    let err = fetch_pair(&adapter, &cache, SYMBOL).await.unwrap_err();
    assert_eq!(err, PairError::UnknownSymbol);
}

#[tokio::test]
async fn inactive_market_is_excluded() {
    let mut meta = active_spot_meta(0.001);
    meta.active = false;
    let client = MockVenue::new(VenueId::Binance).with_market(SYMBOL, meta);
    let adapter = fast_adapter(client);
    let cache = cache_for(VenueId::Binance);

    let err = fetch_pair(&adapter, &cache, SYMBOL).await.unwrap_err();
    assert_eq!(err, PairError::Inactive);
}

#[tokio::test]
async fn non_spot_market_is_excluded() {
    let meta = MarketMeta {
        spot: false,
        ..active_spot_meta(0.001)
    };
    let client = MockVenue::new(VenueId::Binance).with_market(SYMBOL, meta);
    let adapter = fast_adapter(client);
    let cache = cache_for(VenueId::Binance);

    let err = fetch_pair(&adapter, &cache, SYMBOL).await.unwrap_err();
    assert_eq!(err, PairError::NotSpot);
}

#[tokio::test]
async fn ticker_failure_is_typed() {
    let client = MockVenue::new(VenueId::Binance)
        .with_market(SYMBOL, active_spot_meta(0.001))
        .with_book(SYMBOL, book(&[(49_990.0, 0.5)], &[(50_010.0, 0.4)]));
    let adapter = fast_adapter(client);
    let cache = cache_for(VenueId::Binance);

    let err = fetch_pair(&adapter, &cache, SYMBOL).await.unwrap_err();
    assert_eq!(err, PairError::TickerUnavailable);
}

#[tokio::test]
async fn order_book_failure_is_typed() {
    let client = MockVenue::new(VenueId::Binance)
        .with_market(SYMBOL, active_spot_meta(0.001))
        .with_ticker(SYMBOL, ticker(50_000.0, 49_990.0, 50_010.0));
    let adapter = fast_adapter(client);
    let cache = cache_for(VenueId::Binance);

    let err = fetch_pair(&adapter, &cache, SYMBOL).await.unwrap_err();
    assert_eq!(err, PairError::OrderBookUnavailable);
}

#[tokio::test]
async fn empty_book_side_is_order_book_unavailable() {
    let client = MockVenue::new(VenueId::Binance)
        .with_market(SYMBOL, active_spot_meta(0.001))
        .with_ticker(SYMBOL, ticker(50_000.0, 49_990.0, 50_010.0))
        .with_book(SYMBOL, book(&[], &[(50_010.0, 0.4)]));
    let adapter = fast_adapter(client);
    let cache = cache_for(VenueId::Binance);

    let err = fetch_pair(&adapter, &cache, SYMBOL).await.unwrap_err();
    assert_eq!(err, PairError::OrderBookUnavailable);
}

#[tokio::test]
async fn unreachable_markets_endpoint_is_markets_unavailable() {
    let client = MockVenue::offline(VenueId::Binance);
    let adapter = fast_adapter(client);
    let cache = cache_for(VenueId::Binance);

    let err = fetch_pair(&adapter, &cache, SYMBOL).await.unwrap_err();
    assert_eq!(err, PairError::MarketsUnavailable);
}

#[tokio::test]
async fn venue_outside_the_cache_is_unsupported() {
    let client = MockVenue::new(VenueId::Binance).with_market(SYMBOL, active_spot_meta(0.001));
    let adapter = fast_adapter(client);
    // cache built for a different registry
    let cache = MarketsCache::new(&[VenueId::Kucoin]);

    let err = fetch_pair(&adapter, &cache, SYMBOL).await.unwrap_err();
    assert_eq!(err, PairError::UnsupportedVenue);
}

#[tokio::test]
async fn failed_markets_load_is_cached_for_the_process() {
    // first call fails and caches an empty map; the mock would succeed on a
    // fresh cache, proving the cached value is reused
    let client = MockVenue::offline(VenueId::Binance);
    let adapter = fast_adapter(client);
    let cache = cache_for(VenueId::Binance);

    let first = fetch_pair(&adapter, &cache, SYMBOL).await.unwrap_err();
    let second = fetch_pair(&adapter, &cache, SYMBOL).await.unwrap_err();
    assert_eq!(first, PairError::MarketsUnavailable);
    assert_eq!(second, PairError::MarketsUnavailable);
}
