pub mod adapter;
pub mod markets;

mod binance;
mod bitget;
mod bybit;
mod gate;
mod kucoin;
mod mexc;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::{parse_f64, Level, MarketMeta, OrderBook, ScannerError, Ticker};

pub use adapter::{AdapterOptions, ExchangeAdapter};
pub use binance::Binance;
pub use bitget::Bitget;
pub use bybit::Bybit;
pub use gate::Gate;
pub use kucoin::Kucoin;
pub use markets::MarketsCache;
pub use mexc::Mexc;

/// Supported venues, declared in registry order. `Ord` follows declaration
/// order, so ordered maps keyed by `VenueId` iterate in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueId {
    Binance,
    Kucoin,
    Gate,
    Bitget,
    Mexc,
    Bybit,
}

pub const ALL_VENUES: [VenueId; 6] = [
    VenueId::Binance,
    VenueId::Kucoin,
    VenueId::Gate,
    VenueId::Bitget,
    VenueId::Mexc,
    VenueId::Bybit,
];

impl VenueId {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueId::Binance => "binance",
            VenueId::Kucoin => "kucoin",
            VenueId::Gate => "gate",
            VenueId::Bitget => "bitget",
            VenueId::Mexc => "mexc",
            VenueId::Bybit => "bybit",
        }
    }

    pub fn from_name(name: &str) -> Option<VenueId> {
        match name.trim().to_lowercase().as_str() {
            "binance" => Some(VenueId::Binance),
            "kucoin" => Some(VenueId::Kucoin),
            "gate" | "gateio" | "gate.io" => Some(VenueId::Gate),
            "bitget" => Some(VenueId::Bitget),
            "mexc" => Some(VenueId::Mexc),
            "bybit" => Some(VenueId::Bybit),
            _ => None,
        }
    }
}

impl std::fmt::Display for VenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Shared REST plumbing for the concrete venue clients.
#[async_trait]
pub trait ExchangeApi {
    // Venue specific methods
    fn api_base(&self) -> &str;
    fn client(&self) -> &reqwest::Client;
    fn venue_name(&self) -> &str;

    // Default implementations
    async fn get<T: for<'de> serde::Deserialize<'de>>(
        &self,
        endpoint: &str,
    ) -> Result<T, ScannerError> {
        let url = format!("{}/{}", self.api_base(), endpoint);
        let response = self.client().get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ScannerError::RateLimited(format!(
                "{} returned 429",
                self.venue_name()
            )));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScannerError::ApiError(format!(
                "{} API error: {} - {}",
                self.venue_name(),
                status,
                error_text
            )));
        }

        Ok(response.json().await?)
    }
}

/// Read-only capability contract every venue implements. Symbols are in
/// canonical `BASE/QUOTE` form at this boundary; venue-native formats stay
/// inside the venue modules.
#[async_trait]
pub trait VenueClient: Send + Sync {
    fn venue(&self) -> VenueId;

    async fn load_markets(&self) -> Result<HashMap<String, MarketMeta>, ScannerError>;

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, ScannerError>;

    async fn fetch_order_book(&self, symbol: &str, limit: usize)
        -> Result<OrderBook, ScannerError>;
}

/// Constructs the live client for a registry venue.
pub fn venue_client(venue: VenueId) -> Box<dyn VenueClient> {
    match venue {
        VenueId::Binance => Box::new(Binance::new()),
        VenueId::Kucoin => Box::new(Kucoin::new()),
        VenueId::Gate => Box::new(Gate::new()),
        VenueId::Bitget => Box::new(Bitget::new()),
        VenueId::Mexc => Box::new(Mexc::new()),
        VenueId::Bybit => Box::new(Bybit::new()),
    }
}

/// Parses raw `[price, amount]` string pairs as returned by every venue's
/// depth endpoint.
pub(crate) fn parse_levels(raw: &[[String; 2]], side: &str) -> Result<Vec<Level>, ScannerError> {
    raw.iter()
        .map(|entry| {
            Ok(Level::new(
                parse_f64(&entry[0], side)?,
                parse_f64(&entry[1], side)?,
            ))
        })
        .collect()
}

// VENUE MACRO EXPORTS
#[macro_export]
macro_rules! create_venue {
    (
        $struct_name:ident
    ) => {
        pub struct $struct_name {
            client: reqwest::Client,
        }

        impl $struct_name {
            pub fn new() -> Self {
                Self {
                    client: $crate::common::create_http_client(),
                }
            }
        }

        impl Default for $struct_name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
