use serde::{Deserialize, Serialize};

use crate::cex::{ExchangeAdapter, MarketsCache, VenueId};
use crate::common::{Level, MarketLimits, MarketPrecision};

/// Order-book depth requested per side.
pub const ORDER_BOOK_DEPTH: usize = 20;

/// Why a `(venue, symbol)` pair produced no snapshot this tick. Pairs failing
/// with any of these are simply absent from the tick's data; nothing retries
/// within the tick.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairError {
    #[error("venue is not in the configured registry")]
    UnsupportedVenue,

    #[error("market metadata unavailable for venue")]
    MarketsUnavailable,

    #[error("symbol not listed on venue")]
    UnknownSymbol,

    #[error("market is inactive")]
    Inactive,

    #[error("market is not a spot market")]
    NotSpot,

    #[error("ticker unavailable")]
    TickerUnavailable,

    #[error("order book unavailable")]
    OrderBookUnavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBlock {
    pub last: f64,
    pub bid: f64,
    pub ask: f64,
    /// Ticker ask − bid.
    pub spread: f64,
    /// 24 h base volume.
    pub volume: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookBlock {
    pub best_bid: f64,
    pub best_ask: f64,
    pub bids: Vec<Level>,
    pub asks: Vec<Level>,
}

/// Withdrawal fees are excluded from the real-time model (balances are
/// assumed pre-funded on both venues), so `withdrawal` stays unset and the
/// transfer fields stay zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeesBlock {
    pub maker: f64,
    pub taker: f64,
    pub withdrawal: Option<f64>,
    pub deposit: f64,
    pub network: f64,
}

/// Everything the engine needs about one `(venue, symbol)` pair, captured in
/// a single tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSnapshot {
    pub symbol: String,
    pub venue: VenueId,
    pub price: PriceBlock,
    pub orderbook: OrderBookBlock,
    pub fees: FeesBlock,
    pub limits: MarketLimits,
    pub precision: MarketPrecision,
}

/// Fetches one pair snapshot, resolving metadata through the markets cache
/// and market data through the adapter. Each failure maps to one
/// [`PairError`] kind; adapter-level errors were already logged there.
pub async fn fetch_pair(
    adapter: &ExchangeAdapter,
    markets_cache: &MarketsCache,
    symbol: &str,
) -> Result<PairSnapshot, PairError> {
    let venue = adapter.venue();

    let markets = markets_cache
        .markets(venue, adapter)
        .await
        .ok_or(PairError::UnsupportedVenue)?;
    if markets.is_empty() {
        return Err(PairError::MarketsUnavailable);
    }

    let meta = markets.get(symbol).ok_or(PairError::UnknownSymbol)?;
    if !meta.active {
        return Err(PairError::Inactive);
    }
    if !meta.spot {
        return Err(PairError::NotSpot);
    }

    let ticker = adapter
        .fetch_ticker(symbol)
        .await
        .map_err(|_| PairError::TickerUnavailable)?;

    let book = adapter
        .fetch_order_book(symbol, ORDER_BOOK_DEPTH)
        .await
        .map_err(|_| PairError::OrderBookUnavailable)?;

    // both sides must have a top of book for the engine to price the pair
    let best_bid = book.best_bid().ok_or(PairError::OrderBookUnavailable)?.price;
    let best_ask = book.best_ask().ok_or(PairError::OrderBookUnavailable)?.price;

    Ok(PairSnapshot {
        symbol: symbol.to_string(),
        venue,
        price: PriceBlock {
            last: ticker.last,
            bid: ticker.bid,
            ask: ticker.ask,
            spread: ticker.ask - ticker.bid,
            volume: ticker.base_volume,
            change_pct: ticker.change_pct,
        },
        orderbook: OrderBookBlock {
            best_bid,
            best_ask,
            bids: book.bids,
            asks: book.asks,
        },
        fees: FeesBlock {
            maker: meta.maker,
            taker: meta.taker,
            withdrawal: None,
            deposit: 0.0,
            network: 0.0,
        },
        limits: meta.limits.clone(),
        precision: meta.precision.clone(),
    })
}
