use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GateCurrencyPair {
    pub base: String,
    pub quote: String,
    /// Trading fee in percent, e.g. "0.2".
    pub fee: Option<String>,
    pub min_base_amount: Option<String>,
    pub max_base_amount: Option<String>,
    pub min_quote_amount: Option<String>,
    pub max_quote_amount: Option<String>,
    /// Price decimal places.
    pub precision: Option<u32>,
    pub amount_precision: Option<u32>,
    pub trade_status: String,
}

#[derive(Debug, Deserialize)]
pub struct GateTicker {
    pub last: String,
    pub highest_bid: String,
    pub lowest_ask: String,
    pub base_volume: String,
    /// Percent, e.g. "-1.52".
    pub change_percentage: String,
}

#[derive(Debug, Deserialize)]
pub struct GateOrderBook {
    pub bids: Vec<[String; 2]>,
    pub asks: Vec<[String; 2]>,
}
