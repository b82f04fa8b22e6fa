use serde::Deserialize;

/// Bybit v5 wraps payloads in `{retCode, retMsg, result}`; 0 is success.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitEnvelope<T> {
    pub ret_code: i64,
    #[serde(default)]
    pub ret_msg: Option<String>,
    pub result: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct BybitList<T> {
    pub list: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitInstrument {
    pub base_coin: String,
    pub quote_coin: String,
    pub status: String,
    pub lot_size_filter: Option<BybitLotSizeFilter>,
    pub price_filter: Option<BybitPriceFilter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitLotSizeFilter {
    pub base_precision: Option<String>,
    pub min_order_qty: Option<String>,
    pub max_order_qty: Option<String>,
    pub min_order_amt: Option<String>,
    pub max_order_amt: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitPriceFilter {
    pub tick_size: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitTicker {
    pub last_price: String,
    pub bid1_price: String,
    pub ask1_price: String,
    pub volume24h: String,
    /// 24 h change as a fraction, e.g. "0.0152".
    pub price24h_pcnt: String,
}

/// Order book result: `a` = asks, `b` = bids.
#[derive(Debug, Deserialize)]
pub struct BybitOrderBook {
    pub a: Vec<[String; 2]>,
    pub b: Vec<[String; 2]>,
}
