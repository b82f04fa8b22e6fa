use serde::Deserialize;

/// Bitget wraps payloads in `{code, msg, data}`; "00000" is success.
#[derive(Debug, Deserialize)]
pub struct BitgetEnvelope<T> {
    pub code: String,
    #[serde(default)]
    pub msg: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitgetSymbol {
    pub base_coin: String,
    pub quote_coin: String,
    pub status: String,
    pub maker_fee_rate: Option<String>,
    pub taker_fee_rate: Option<String>,
    pub price_precision: Option<String>,
    pub quantity_precision: Option<String>,
    pub min_trade_amount: Option<String>,
    pub max_trade_amount: Option<String>,
    #[serde(rename = "minTradeUSDT")]
    pub min_trade_usdt: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitgetTicker {
    pub last_pr: String,
    pub bid_pr: String,
    pub ask_pr: String,
    pub base_volume: String,
    /// 24 h change as a fraction, e.g. "0.0152".
    pub change24h: String,
}

#[derive(Debug, Deserialize)]
pub struct BitgetOrderBook {
    pub bids: Vec<[String; 2]>,
    pub asks: Vec<[String; 2]>,
}
