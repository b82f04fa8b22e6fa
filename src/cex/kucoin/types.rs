use serde::Deserialize;

/// KuCoin wraps every payload in `{code, msg, data}`; "200000" is success.
#[derive(Debug, Deserialize)]
pub struct KucoinEnvelope<T> {
    pub code: String,
    #[serde(default)]
    pub msg: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KucoinSymbol {
    pub base_currency: String,
    pub quote_currency: String,
    pub enable_trading: bool,
    pub base_min_size: Option<String>,
    pub base_max_size: Option<String>,
    pub quote_min_size: Option<String>,
    pub quote_max_size: Option<String>,
    pub base_increment: Option<String>,
    pub price_increment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KucoinStats {
    pub last: String,
    /// Best bid.
    pub buy: String,
    /// Best ask.
    pub sell: String,
    pub vol: String,
    /// 24 h change as a fraction, e.g. "0.0521".
    pub change_rate: String,
}

#[derive(Debug, Deserialize)]
pub struct KucoinOrderBook {
    pub bids: Vec<[String; 2]>,
    pub asks: Vec<[String; 2]>,
}
