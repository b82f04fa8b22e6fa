mod types;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::cex::{parse_levels, ExchangeApi, VenueClient, VenueId};
use crate::common::{
    parse_f64, parse_opt_f64, MarketLimits, MarketMeta, MarketPrecision, OrderBook, ScannerError,
    Ticker,
};
use crate::create_venue;
use types::{GateCurrencyPair, GateOrderBook, GateTicker};

const GATE_API_BASE: &str = "https://api.gateio.ws/api/v4";
// Fallback when a pair omits its fee field.
const GATE_DEFAULT_FEE: f64 = 0.002;

create_venue!(Gate);

// BTC/USDT -> BTC_USDT
fn native_symbol(symbol: &str) -> String {
    symbol.replace('/', "_")
}

#[async_trait]
impl ExchangeApi for Gate {
    fn api_base(&self) -> &str {
        GATE_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "Gate.io"
    }
}

#[async_trait]
impl VenueClient for Gate {
    fn venue(&self) -> VenueId {
        VenueId::Gate
    }

    async fn load_markets(&self) -> Result<HashMap<String, MarketMeta>, ScannerError> {
        let pairs: Vec<GateCurrencyPair> = self.get("spot/currency_pairs").await?;

        let mut markets = HashMap::new();
        for pair in pairs {
            let canonical = format!(
                "{}/{}",
                pair.base.to_uppercase(),
                pair.quote.to_uppercase()
            );

            // Gate publishes the fee in percent units
            let fee = pair
                .fee
                .as_deref()
                .and_then(|s| s.parse::<f64>().ok())
                .map(|pct| pct / 100.0)
                .unwrap_or(GATE_DEFAULT_FEE);

            let limits = MarketLimits {
                min_amount: pair.min_base_amount.as_deref().and_then(parse_opt_f64),
                max_amount: pair.max_base_amount.as_deref().and_then(parse_opt_f64),
                min_cost: pair.min_quote_amount.as_deref().and_then(parse_opt_f64),
                max_cost: pair.max_quote_amount.as_deref().and_then(parse_opt_f64),
                ..MarketLimits::default()
            };
            let precision = MarketPrecision {
                price: pair.precision,
                amount: pair.amount_precision,
            };

            markets.insert(
                canonical,
                MarketMeta {
                    active: pair.trade_status == "tradable",
                    // currency_pairs is the spot listing
                    spot: true,
                    maker: fee,
                    taker: fee,
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

        let endpoint = format!("spot/tickers?currency_pair={}", native_symbol(symbol));
        let tickers: Vec<GateTicker> = self.get(&endpoint).await?;
        let ticker = tickers.into_iter().next().ok_or_else(|| {
            ScannerError::InvalidSymbol(format!("No ticker returned for symbol: {}", symbol))
        })?;

        Ok(Ticker {
            last: parse_f64(&ticker.last, "last price")?,
            bid: parse_f64(&ticker.highest_bid, "bid price")?,
            ask: parse_f64(&ticker.lowest_ask, "ask price")?,
            base_volume: parse_f64(&ticker.base_volume, "volume")?,
            change_pct: parse_f64(&ticker.change_percentage, "change percentage")?,
        })
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<OrderBook, ScannerError> {
        let endpoint = format!(
            "spot/order_book?currency_pair={}&limit={}",
            native_symbol(symbol),
            limit
        );
        let book: GateOrderBook = self.get(&endpoint).await?;

        Ok(OrderBook {
            bids: parse_levels(&book.bids, "bid level")?,
            asks: parse_levels(&book.asks, "ask level")?,
        }
        .normalized(limit))
    }
}
