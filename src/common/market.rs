use serde::{Deserialize, Serialize};

/// Exchange-imposed order limits, in base units (amount), quote units (cost)
/// or price units. Absent bounds are not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketLimits {
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_cost: Option<f64>,
    pub max_cost: Option<f64>,
}

/// Decimal places for price and amount, where the venue publishes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketPrecision {
    pub price: Option<u32>,
    pub amount: Option<u32>,
}

/// Per-symbol market metadata, set once on the first `load_markets` for a
/// venue and immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketMeta {
    pub active: bool,
    pub spot: bool,
    /// Maker fee as a fraction, e.g. 0.001 = 0.1%.
    pub maker: f64,
    /// Taker fee as a fraction.
    pub taker: f64,
    pub limits: MarketLimits,
    pub precision: MarketPrecision,
}

/// Normalized 24 h ticker. `change_pct` is the venue's reported percentage,
/// an opaque magnitude only compared across venues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    pub last: f64,
    pub bid: f64,
    pub ask: f64,
    pub base_volume: f64,
    pub change_pct: f64,
}

/// One order-book level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub price: f64,
    pub amount: f64,
}

impl Level {
    pub fn new(price: f64, amount: f64) -> Self {
        Self { price, amount }
    }
}

/// Order book with asks sorted by non-decreasing price and bids by
/// non-increasing price, truncated to the requested depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    pub bids: Vec<Level>,
    pub asks: Vec<Level>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&Level> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&Level> {
        self.asks.first()
    }

    /// Drops non-positive prices and negative amounts, then re-sorts both
    /// sides into canonical order and truncates to `depth` levels.
    pub fn normalized(mut self, depth: usize) -> Self {
        self.bids.retain(|l| l.price > 0.0 && l.amount >= 0.0);
        self.asks.retain(|l| l.price > 0.0 && l.amount >= 0.0);
        self.bids
            .sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(std::cmp::Ordering::Equal));
        self.asks
            .sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));
        self.bids.truncate(depth);
        self.asks.truncate(depth);
        self
    }
}
