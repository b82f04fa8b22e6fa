pub mod client;
pub mod config;
pub mod errors;
pub mod market;
pub mod utils;

// Re-export
pub use client::create_http_client;
pub use config::{ScannerConfig, VenueCredentials};
pub use errors::ScannerError;
pub use market::{Level, MarketLimits, MarketMeta, MarketPrecision, OrderBook, Ticker};
pub use utils::{decimals_from_step, get_timestamp_millis, parse_f64, parse_opt_f64, round_dp};
