mod types;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::cex::{parse_levels, ExchangeApi, VenueClient, VenueId};
use crate::common::{
    decimals_from_step, parse_f64, parse_opt_f64, MarketLimits, MarketMeta, MarketPrecision,
    OrderBook, ScannerError, Ticker,
};
use crate::create_venue;
use types::{KucoinEnvelope, KucoinOrderBook, KucoinStats, KucoinSymbol};

const KUCOIN_API_BASE: &str = "https://api.kucoin.com";
// The public symbols endpoint carries no fee rates; base spot tier.
const KUCOIN_MAKER_FEE: f64 = 0.001;
const KUCOIN_TAKER_FEE: f64 = 0.001;

create_venue!(Kucoin);

// BTC/USDT -> BTC-USDT
fn native_symbol(symbol: &str) -> String {
    symbol.replace('/', "-")
}

fn unwrap_envelope<T>(envelope: KucoinEnvelope<T>, what: &str) -> Result<T, ScannerError> {
    if envelope.code != "200000" {
        return Err(ScannerError::ApiError(format!(
            "KuCoin API error: {} - {}",
            envelope.code,
            envelope.msg.unwrap_or_else(|| "Unknown error".to_string())
        )));
    }
    envelope
        .data
        .ok_or_else(|| ScannerError::ApiError(format!("KuCoin returned no data for {}", what)))
}

#[async_trait]
impl ExchangeApi for Kucoin {
    fn api_base(&self) -> &str {
        KUCOIN_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "KuCoin"
    }
}

#[async_trait]
impl VenueClient for Kucoin {
    fn venue(&self) -> VenueId {
        VenueId::Kucoin
    }

    async fn load_markets(&self) -> Result<HashMap<String, MarketMeta>, ScannerError> {
        let envelope: KucoinEnvelope<Vec<KucoinSymbol>> = self.get("api/v2/symbols").await?;
        let symbols = unwrap_envelope(envelope, "symbols")?;

        let mut markets = HashMap::new();
        for sym in symbols {
            let canonical = format!(
                "{}/{}",
                sym.base_currency.to_uppercase(),
                sym.quote_currency.to_uppercase()
            );

            let limits = MarketLimits {
                min_amount: sym.base_min_size.as_deref().and_then(parse_opt_f64),
                max_amount: sym.base_max_size.as_deref().and_then(parse_opt_f64),
                min_cost: sym.quote_min_size.as_deref().and_then(parse_opt_f64),
                max_cost: sym.quote_max_size.as_deref().and_then(parse_opt_f64),
                ..MarketLimits::default()
            };
            let precision = MarketPrecision {
                price: sym.price_increment.as_deref().and_then(decimals_from_step),
                amount: sym.base_increment.as_deref().and_then(decimals_from_step),
            };

            markets.insert(
                canonical,
                MarketMeta {
                    active: sym.enable_trading,
                    // the v2 symbols endpoint lists spot pairs only
                    spot: true,
                    maker: KUCOIN_MAKER_FEE,
                    taker: KUCOIN_TAKER_FEE,
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

        let endpoint = format!("api/v1/market/stats?symbol={}", native_symbol(symbol));
        let envelope: KucoinEnvelope<KucoinStats> = self.get(&endpoint).await?;
        let stats = unwrap_envelope(envelope, symbol)?;

        Ok(Ticker {
            last: parse_f64(&stats.last, "last price")?,
            bid: parse_f64(&stats.buy, "bid price")?,
            ask: parse_f64(&stats.sell, "ask price")?,
            base_volume: parse_f64(&stats.vol, "volume")?,
            change_pct: parse_f64(&stats.change_rate, "change rate")? * 100.0,
        })
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<OrderBook, ScannerError> {
        let endpoint = format!(
            "api/v1/market/orderbook/level2_20?symbol={}",
            native_symbol(symbol)
        );
        let envelope: KucoinEnvelope<KucoinOrderBook> = self.get(&endpoint).await?;
        let book = unwrap_envelope(envelope, symbol)?;

        Ok(OrderBook {
            bids: parse_levels(&book.bids, "bid level")?,
            asks: parse_levels(&book.asks, "ask level")?,
        }
        .normalized(limit))
    }
}
