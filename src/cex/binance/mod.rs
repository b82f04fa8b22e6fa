mod types;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::cex::{parse_levels, ExchangeApi, VenueClient, VenueId};
use crate::common::{
    decimals_from_step, parse_f64, parse_opt_f64, MarketLimits, MarketMeta, MarketPrecision,
    OrderBook, ScannerError, Ticker,
};
use crate::create_venue;
use types::{BinanceDepth, BinanceExchangeInfo, BinanceTicker24h};

const BINANCE_API_BASE: &str = "https://api.binance.com/api/v3";
// Default spot tier; exchangeInfo does not expose account fee rates.
const BINANCE_MAKER_FEE: f64 = 0.001;
const BINANCE_TAKER_FEE: f64 = 0.001;

create_venue!(Binance);

// BTC/USDT -> BTCUSDT
fn native_symbol(symbol: &str) -> String {
    symbol.replace('/', "")
}

#[async_trait]
impl ExchangeApi for Binance {
    fn api_base(&self) -> &str {
        BINANCE_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "Binance"
    }
}

#[async_trait]
impl VenueClient for Binance {
    fn venue(&self) -> VenueId {
        VenueId::Binance
    }

    async fn load_markets(&self) -> Result<HashMap<String, MarketMeta>, ScannerError> {
        let info: BinanceExchangeInfo = self.get("exchangeInfo").await?;

        let mut markets = HashMap::new();
        for sym in info.symbols {
            let canonical = format!(
                "{}/{}",
                sym.base_asset.to_uppercase(),
                sym.quote_asset.to_uppercase()
            );

            let mut limits = MarketLimits::default();
            let mut precision = MarketPrecision::default();
            for filter in &sym.filters {
                match filter.filter_type.as_str() {
                    "PRICE_FILTER" => {
                        limits.min_price = filter.min_price.as_deref().and_then(parse_opt_f64);
                        limits.max_price = filter.max_price.as_deref().and_then(parse_opt_f64);
                        precision.price = filter.tick_size.as_deref().and_then(decimals_from_step);
                    }
                    "LOT_SIZE" => {
                        limits.min_amount = filter.min_qty.as_deref().and_then(parse_opt_f64);
                        limits.max_amount = filter.max_qty.as_deref().and_then(parse_opt_f64);
                        precision.amount = filter.step_size.as_deref().and_then(decimals_from_step);
                    }
                    // NOTIONAL superseded MIN_NOTIONAL; older symbols still carry the latter
                    "NOTIONAL" | "MIN_NOTIONAL" => {
                        limits.min_cost = filter.min_notional.as_deref().and_then(parse_opt_f64);
                        limits.max_cost = filter.max_notional.as_deref().and_then(parse_opt_f64);
                    }
                    _ => {}
                }
            }

            markets.insert(
                canonical,
                MarketMeta {
                    active: sym.status == "TRADING",
                    spot: sym.is_spot_trading_allowed,
                    maker: BINANCE_MAKER_FEE,
                    taker: BINANCE_TAKER_FEE,
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
        let ticker: BinanceTicker24h = self.get(&endpoint).await?;

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
        let depth: BinanceDepth = self.get(&endpoint).await?;

        Ok(OrderBook {
            bids: parse_levels(&depth.bids, "bid level")?,
            asks: parse_levels(&depth.asks, "ask level")?,
        }
        .normalized(limit))
    }
}
