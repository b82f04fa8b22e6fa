pub mod cex;
pub mod common;
pub mod scanner;

// Re-export common types
pub use cex::{
    Binance, Bitget, Bybit, ExchangeAdapter, Gate, Kucoin, MarketsCache, Mexc, VenueClient,
    VenueId, ALL_VENUES,
};
pub use common::{ScannerConfig, ScannerError};
pub use scanner::{Core, Opportunity, OpportunitySet, PairSnapshot, Snapshot};
