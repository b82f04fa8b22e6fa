use serde::{Deserialize, Serialize};

use crate::cex::VenueId;
use crate::common::MarketLimits;

/// Trading-fee breakdown in quote units. `network_abs` is fixed at 0 under
/// the pre-funded balances model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub trading_abs: f64,
    pub network_abs: f64,
    pub taker_buy: f64,
    pub taker_sell: f64,
}

/// Difference between top-of-book and effective fill price, per side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlippageBreakdown {
    pub buy_abs: f64,
    pub sell_abs: f64,
}

/// Exchange limits relevant to sizing the trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeLimits {
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub min_cost: Option<f64>,
    pub max_cost: Option<f64>,
}

impl From<&MarketLimits> for SizeLimits {
    fn from(limits: &MarketLimits) -> Self {
        Self {
            min_amount: limits.min_amount,
            max_amount: limits.max_amount,
            min_cost: limits.min_cost,
            max_cost: limits.max_cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairLimits {
    pub buy: SizeLimits,
    pub sell: SizeLimits,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBlock {
    pub market_volatility: f64,
    pub execution_risk: f64,
    pub liquidity_risk: f64,
    pub fee_risk: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimates {
    pub confidence_score: f64,
}

/// A directed buy→sell pairing on one symbol with its computed economics.
/// Field names follow the published wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub symbol: String,
    pub buy_exchange: VenueId,
    pub sell_exchange: VenueId,
    /// Top-of-book ask on the buy venue.
    pub buy_price: f64,
    /// Top-of-book bid on the sell venue.
    pub sell_price: f64,
    /// Volume-weighted fill price walking the buy-side asks.
    pub buy_effective: f64,
    /// Volume-weighted fill price walking the sell-side bids.
    pub sell_effective: f64,
    /// Executable base quantity, min of both fills.
    pub quantity: f64,
    pub volume_24h: f64,
    pub spread_abs: f64,
    pub spread_pct: f64,
    pub fees: FeeBreakdown,
    pub slippage: SlippageBreakdown,
    pub net_profit_abs: f64,
    pub net_profit_pct: f64,
    /// Min of both side depths, in base units.
    pub liquidity: f64,
    pub buy_liquidity: f64,
    pub sell_liquidity: f64,
    pub limits: PairLimits,
    pub estimates: Estimates,
    pub risk: RiskBlock,
    pub ts: u64,
}
