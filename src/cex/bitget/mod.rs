mod types;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::cex::{parse_levels, ExchangeApi, VenueClient, VenueId};
use crate::common::{
    parse_f64, parse_opt_f64, MarketLimits, MarketMeta, MarketPrecision, OrderBook, ScannerError,
    Ticker,
};
use crate::create_venue;
use types::{BitgetEnvelope, BitgetOrderBook, BitgetSymbol, BitgetTicker};

const BITGET_API_BASE: &str = "https://api.bitget.com";
const BITGET_MAKER_FEE: f64 = 0.001;
const BITGET_TAKER_FEE: f64 = 0.001;

create_venue!(Bitget);

// BTC/USDT -> BTCUSDT
fn native_symbol(symbol: &str) -> String {
    symbol.replace('/', "")
}

fn unwrap_envelope<T>(envelope: BitgetEnvelope<T>, what: &str) -> Result<T, ScannerError> {
    if envelope.code != "00000" {
        return Err(ScannerError::ApiError(format!(
            "Bitget API error: {} - {}",
            envelope.code,
            envelope.msg.unwrap_or_else(|| "Unknown error".to_string())
        )));
    }
    envelope
        .data
        .ok_or_else(|| ScannerError::ApiError(format!("Bitget returned no data for {}", what)))
}

fn parse_fee(raw: &Option<String>, default: f64) -> f64 {
    raw.as_deref()
        .and_then(|s| s.parse::<f64>().ok())
        .map(f64::abs)
        .unwrap_or(default)
}

#[async_trait]
impl ExchangeApi for Bitget {
    fn api_base(&self) -> &str {
        BITGET_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "Bitget"
    }
}

#[async_trait]
impl VenueClient for Bitget {
    fn venue(&self) -> VenueId {
        VenueId::Bitget
    }

    async fn load_markets(&self) -> Result<HashMap<String, MarketMeta>, ScannerError> {
        let envelope: BitgetEnvelope<Vec<BitgetSymbol>> =
            self.get("api/v2/spot/public/symbols").await?;
        let symbols = unwrap_envelope(envelope, "symbols")?;

        let mut markets = HashMap::new();
        for sym in symbols {
            let canonical = format!(
                "{}/{}",
                sym.base_coin.to_uppercase(),
                sym.quote_coin.to_uppercase()
            );

            let limits = MarketLimits {
                min_amount: sym.min_trade_amount.as_deref().and_then(parse_opt_f64),
                max_amount: sym.max_trade_amount.as_deref().and_then(parse_opt_f64),
                min_cost: sym.min_trade_usdt.as_deref().and_then(parse_opt_f64),
                ..MarketLimits::default()
            };
            let precision = MarketPrecision {
                price: sym
                    .price_precision
                    .as_deref()
                    .and_then(|s| s.parse::<u32>().ok()),
                amount: sym
                    .quantity_precision
                    .as_deref()
                    .and_then(|s| s.parse::<u32>().ok()),
            };

            markets.insert(
                canonical,
                MarketMeta {
                    active: sym.status == "online",
                    // the v2 spot symbols listing is spot-only
                    spot: true,
                    maker: parse_fee(&sym.maker_fee_rate, BITGET_MAKER_FEE),
                    taker: parse_fee(&sym.taker_fee_rate, BITGET_TAKER_FEE),
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

        let endpoint = format!("api/v2/spot/market/tickers?symbol={}", native_symbol(symbol));
        let envelope: BitgetEnvelope<Vec<BitgetTicker>> = self.get(&endpoint).await?;
        let ticker = unwrap_envelope(envelope, symbol)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ScannerError::InvalidSymbol(format!("No ticker returned for symbol: {}", symbol))
            })?;

        Ok(Ticker {
            last: parse_f64(&ticker.last_pr, "last price")?,
            bid: parse_f64(&ticker.bid_pr, "bid price")?,
            ask: parse_f64(&ticker.ask_pr, "ask price")?,
            base_volume: parse_f64(&ticker.base_volume, "volume")?,
            change_pct: parse_f64(&ticker.change24h, "change rate")? * 100.0,
        })
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<OrderBook, ScannerError> {
        let endpoint = format!(
            "api/v2/spot/market/orderbook?symbol={}&limit={}",
            native_symbol(symbol),
            limit
        );
        let envelope: BitgetEnvelope<BitgetOrderBook> = self.get(&endpoint).await?;
        let book = unwrap_envelope(envelope, symbol)?;

        Ok(OrderBook {
            bids: parse_levels(&book.bids, "bid level")?,
            asks: parse_levels(&book.asks, "ask level")?,
        }
        .normalized(limit))
    }
}
