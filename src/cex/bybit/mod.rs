mod types;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::cex::{parse_levels, ExchangeApi, VenueClient, VenueId};
use crate::common::{
    decimals_from_step, parse_f64, parse_opt_f64, MarketLimits, MarketMeta, MarketPrecision,
    OrderBook, ScannerError, Ticker,
};
use crate::create_venue;
use types::{BybitEnvelope, BybitInstrument, BybitList, BybitOrderBook, BybitTicker};

const BYBIT_API_BASE: &str = "https://api.bybit.com";
// instruments-info does not expose fee rates; base spot tier.
const BYBIT_MAKER_FEE: f64 = 0.001;
const BYBIT_TAKER_FEE: f64 = 0.001;

create_venue!(Bybit);

// BTC/USDT -> BTCUSDT
fn native_symbol(symbol: &str) -> String {
    symbol.replace('/', "")
}

fn unwrap_envelope<T>(envelope: BybitEnvelope<T>, what: &str) -> Result<T, ScannerError> {
    if envelope.ret_code != 0 {
        return Err(ScannerError::ApiError(format!(
            "Bybit API error: {} - {}",
            envelope.ret_code,
            envelope
                .ret_msg
                .unwrap_or_else(|| "Unknown error".to_string())
        )));
    }
    envelope
        .result
        .ok_or_else(|| ScannerError::ApiError(format!("Bybit returned no result for {}", what)))
}

#[async_trait]
impl ExchangeApi for Bybit {
    fn api_base(&self) -> &str {
        BYBIT_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "Bybit"
    }
}

#[async_trait]
impl VenueClient for Bybit {
    fn venue(&self) -> VenueId {
        VenueId::Bybit
    }

    async fn load_markets(&self) -> Result<HashMap<String, MarketMeta>, ScannerError> {
        let envelope: BybitEnvelope<BybitList<BybitInstrument>> = self
            .get("v5/market/instruments-info?category=spot&limit=1000")
            .await?;
        let instruments = unwrap_envelope(envelope, "instruments")?;

        let mut markets = HashMap::new();
        for inst in instruments.list {
            let canonical = format!(
                "{}/{}",
                inst.base_coin.to_uppercase(),
                inst.quote_coin.to_uppercase()
            );

            let mut limits = MarketLimits::default();
            let mut precision = MarketPrecision::default();
            if let Some(lot) = &inst.lot_size_filter {
                limits.min_amount = lot.min_order_qty.as_deref().and_then(parse_opt_f64);
                limits.max_amount = lot.max_order_qty.as_deref().and_then(parse_opt_f64);
                limits.min_cost = lot.min_order_amt.as_deref().and_then(parse_opt_f64);
                limits.max_cost = lot.max_order_amt.as_deref().and_then(parse_opt_f64);
                precision.amount = lot.base_precision.as_deref().and_then(decimals_from_step);
            }
            if let Some(price) = &inst.price_filter {
                precision.price = price.tick_size.as_deref().and_then(decimals_from_step);
            }

            markets.insert(
                canonical,
                MarketMeta {
                    active: inst.status == "Trading",
                    // category=spot filters the listing already
                    spot: true,
                    maker: BYBIT_MAKER_FEE,
                    taker: BYBIT_TAKER_FEE,
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

        let endpoint = format!(
            "v5/market/tickers?category=spot&symbol={}",
            native_symbol(symbol)
        );
        let envelope: BybitEnvelope<BybitList<BybitTicker>> = self.get(&endpoint).await?;
        let ticker = unwrap_envelope(envelope, symbol)?
            .list
            .into_iter()
            .next()
            .ok_or_else(|| {
                ScannerError::InvalidSymbol(format!("No ticker returned for symbol: {}", symbol))
            })?;

        Ok(Ticker {
            last: parse_f64(&ticker.last_price, "last price")?,
            bid: parse_f64(&ticker.bid1_price, "bid price")?,
            ask: parse_f64(&ticker.ask1_price, "ask price")?,
            base_volume: parse_f64(&ticker.volume24h, "volume")?,
            change_pct: parse_f64(&ticker.price24h_pcnt, "change rate")? * 100.0,
        })
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<OrderBook, ScannerError> {
        let endpoint = format!(
            "v5/market/orderbook?category=spot&symbol={}&limit={}",
            native_symbol(symbol),
            limit
        );
        let envelope: BybitEnvelope<BybitOrderBook> = self.get(&endpoint).await?;
        let book = unwrap_envelope(envelope, symbol)?;

        Ok(OrderBook {
            bids: parse_levels(&book.b, "bid level")?,
            asks: parse_levels(&book.a, "ask level")?,
        }
        .normalized(limit))
    }
}
