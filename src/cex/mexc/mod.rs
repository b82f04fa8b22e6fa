mod types;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::cex::{parse_levels, ExchangeApi, VenueClient, VenueId};
use crate::common::{
    decimals_from_step, parse_f64, parse_opt_f64, MarketLimits, MarketMeta, MarketPrecision,
    OrderBook, ScannerError, Ticker,
};
use crate::create_venue;
use types::{MexcDepth, MexcExchangeInfo, MexcTicker24h};

const MEXC_API_BASE: &str = "https://api.mexc.com/api/v3";
// Fallbacks when exchangeInfo omits the commission fields.
const MEXC_MAKER_FEE: f64 = 0.0;
const MEXC_TAKER_FEE: f64 = 0.0005;

create_venue!(Mexc);

// BTC/USDT -> BTCUSDT
fn native_symbol(symbol: &str) -> String {
    symbol.replace('/', "")
}

fn parse_fee(raw: &Option<String>, default: f64) -> f64 {
    raw.as_deref()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(default)
}

#[async_trait]
impl ExchangeApi for Mexc {
    fn api_base(&self) -> &str {
        MEXC_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "MEXC"
    }
}

#[async_trait]
impl VenueClient for Mexc {
    fn venue(&self) -> VenueId {
        VenueId::Mexc
    }

    async fn load_markets(&self) -> Result<HashMap<String, MarketMeta>, ScannerError> {
        let info: MexcExchangeInfo = self.get("exchangeInfo").await?;

        let mut markets = HashMap::new();
        for sym in info.symbols {
            let canonical = format!(
                "{}/{}",
                sym.base_asset.to_uppercase(),
                sym.quote_asset.to_uppercase()
            );

            let limits = MarketLimits {
                min_amount: sym.base_size_precision.as_deref().and_then(parse_opt_f64),
                min_cost: sym.quote_amount_precision.as_deref().and_then(parse_opt_f64),
                max_cost: sym.max_quote_amount.as_deref().and_then(parse_opt_f64),
                ..MarketLimits::default()
            };
            let precision = MarketPrecision {
                price: sym.quote_precision,
                amount: sym
                    .base_size_precision
                    .as_deref()
                    .and_then(decimals_from_step),
            };

            // "1" on the newer payloads, "ENABLED" on older ones
            let active = sym.status == "1" || sym.status == "ENABLED";

            markets.insert(
                canonical,
                MarketMeta {
                    active,
                    spot: sym.is_spot_trading_allowed,
                    maker: parse_fee(&sym.maker_commission, MEXC_MAKER_FEE),
                    taker: parse_fee(&sym.taker_commission, MEXC_TAKER_FEE),
                    limits,
                    precision,
                },
            );
        }

        Ok(markets)
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, ScannerError> {
        if symbol.is_empty() {
            return Err(ScannerError::InvalidSymbol(
                "Symbol cannot be empty".to_string(),
            ));
        }

        let endpoint = format!("ticker/24hr?symbol={}", native_symbol(symbol));
        let ticker: MexcTicker24h = self.get(&endpoint).await?;

        Ok(Ticker {
            last: parse_f64(&ticker.last_price, "last price")?,
            bid: parse_f64(&ticker.bid_price, "bid price")?,
            ask: parse_f64(&ticker.ask_price, "ask price")?,
            base_volume: parse_f64(&ticker.volume, "volume")?,
            change_pct: parse_f64(&ticker.price_change_percent, "change percent")?,
        })
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<OrderBook, ScannerError> {
        let endpoint = format!("depth?symbol={}&limit={}", native_symbol(symbol), limit);
        let depth: MexcDepth = self.get(&endpoint).await?;

        Ok(OrderBook {
            bids: parse_levels(&depth.bids, "bid level")?,
            asks: parse_levels(&depth.asks, "ask level")?,
        }
        .normalized(limit))
    }
}
