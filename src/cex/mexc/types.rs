use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MexcExchangeInfo {
    pub symbols: Vec<MexcSymbol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MexcSymbol {
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
    #[serde(default)]
    pub is_spot_trading_allowed: bool,
    pub maker_commission: Option<String>,
    pub taker_commission: Option<String>,
    /// Step size of the base amount, e.g. "0.000001".
    pub base_size_precision: Option<String>,
    pub quote_precision: Option<u32>,
    /// Despite the name, MEXC documents this as the minimum order value in
    /// quote units.
    pub quote_amount_precision: Option<String>,
    pub max_quote_amount: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MexcTicker24h {
    pub last_price: String,
    pub bid_price: String,
    pub ask_price: String,
    pub volume: String,
    pub price_change_percent: String,
}

#[derive(Debug, Deserialize)]
pub struct MexcDepth {
    pub bids: Vec<[String; 2]>,
    pub asks: Vec<[String; 2]>,
}
