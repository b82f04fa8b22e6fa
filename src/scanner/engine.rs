use std::collections::BTreeMap;

use crate::cex::VenueId;
use crate::common::{round_dp, Level, ScannerConfig};
use crate::scanner::opportunity::{
    Estimates, FeeBreakdown, Opportunity, PairLimits, RiskBlock, SizeLimits, SlippageBreakdown,
};
use crate::scanner::pair::PairSnapshot;

/// One tick's worth of market data: successful pair snapshots keyed by
/// symbol, then venue. Both maps are ordered so iteration is alphabetical
/// over symbols and registry order over venues.
pub type AllData = BTreeMap<String, BTreeMap<VenueId, PairSnapshot>>;

/// Thresholds the engine applies; extracted from config so the engine stays
/// a pure function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct EngineParams {
    pub trade_size_usdt: f64,
    pub min_raw_spread_pct: f64,
    pub min_trade_usdt: f64,
}

impl From<&ScannerConfig> for EngineParams {
    fn from(config: &ScannerConfig) -> Self {
        Self {
            trade_size_usdt: config.trade_size_usdt,
            min_raw_spread_pct: config.min_raw_spread_pct,
            min_trade_usdt: config.min_trade_usdt,
        }
    }
}

/// Rejection counters for one engine run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanCounters {
    pub pairs_checked: u64,
    pub pairs_missing_ob: u64,
    pub pairs_insufficient_fill: u64,
    pub pairs_below_spread: u64,
    pub pairs_below_notional: u64,
    pub pairs_limits_fail: u64,
}

/// Result of walking a book side for a target quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    /// Base units actually consumed; `target` when depth suffices.
    pub filled: f64,
    /// Quote units spent/received over the consumed slices.
    pub cost: f64,
    /// Volume-weighted average price, `cost / filled`.
    pub effective: f64,
}

/// Consumes levels in order until `target` base units are filled or the side
/// exhausts. Returns `None` when nothing could be filled.
pub fn walk_book(levels: &[Level], target: f64) -> Option<Fill> {
    if target <= 0.0 {
        return None;
    }
    let mut filled = 0.0;
    let mut cost = 0.0;
    for level in levels {
        if filled >= target {
            break;
        }
        let take = (target - filled).min(level.amount);
        if take <= 0.0 {
            continue;
        }
        filled += take;
        cost += level.price * take;
    }
    if filled <= 0.0 {
        return None;
    }
    Some(Fill {
        filled,
        cost,
        effective: cost / filled,
    })
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    if let Some(min) = min {
        if value < min {
            return false;
        }
    }
    if let Some(max) = max {
        if value > max {
            return false;
        }
    }
    true
}

fn passes_limits(q_eff: f64, notional_buy: f64, notional_sell: f64, buy: &PairSnapshot, sell: &PairSnapshot) -> bool {
    within(q_eff, buy.limits.min_amount, buy.limits.max_amount)
        && within(q_eff, sell.limits.min_amount, sell.limits.max_amount)
        && within(notional_buy, buy.limits.min_cost, buy.limits.max_cost)
        && within(notional_sell, sell.limits.min_cost, sell.limits.max_cost)
}

/// Computes the ranked opportunity list for one tick. Deterministic: given
/// identical inputs the output is byte-identical, including ordering. `ts`
/// stamps every emitted opportunity.
pub fn compute_opportunities(
    all_data: &AllData,
    params: &EngineParams,
    ts: u64,
) -> (Vec<Opportunity>, ScanCounters) {
    let mut counters = ScanCounters::default();
    let mut opportunities = Vec::new();

    for (symbol, venues) in all_data {
        for (buy_venue, buy) in venues {
            for (sell_venue, sell) in venues {
                if buy_venue == sell_venue {
                    continue;
                }
                counters.pairs_checked += 1;

                let (buy_top, sell_top) = match (
                    buy.orderbook.asks.first(),
                    sell.orderbook.bids.first(),
                ) {
                    (Some(a), Some(b)) => (*a, *b),
                    _ => {
                        counters.pairs_missing_ob += 1;
                        continue;
                    }
                };

                let q_int = params.trade_size_usdt / buy_top.price;

                let (buy_fill, sell_fill) = match (
                    walk_book(&buy.orderbook.asks, q_int),
                    walk_book(&sell.orderbook.bids, q_int),
                ) {
                    (Some(b), Some(s)) => (b, s),
                    _ => {
                        counters.pairs_insufficient_fill += 1;
                        continue;
                    }
                };

                let q_eff = buy_fill.filled.min(sell_fill.filled);
                if q_eff <= 0.0 {
                    counters.pairs_insufficient_fill += 1;
                    continue;
                }

                let buy_eff = buy_fill.effective;
                let sell_eff = sell_fill.effective;
                let slip_buy = (buy_eff - buy_top.price).abs();
                let slip_sell = (sell_eff - sell_top.price).abs();

                let spread_abs = sell_eff - buy_eff;
                let spread_pct = spread_abs / buy_eff * 100.0;
                if spread_pct <= params.min_raw_spread_pct {
                    counters.pairs_below_spread += 1;
                    continue;
                }

                let notional_buy = buy_eff * q_eff;
                if notional_buy < params.min_trade_usdt {
                    counters.pairs_below_notional += 1;
                    continue;
                }
                let notional_sell = sell_eff * q_eff;

                let taker_buy = buy.fees.taker;
                let taker_sell = sell.fees.taker;
                let fees_abs = q_eff * buy_eff * taker_buy + q_eff * sell_eff * taker_sell;

                let gross = spread_abs * q_eff;
                let net = gross - fees_abs;
                let net_pct = net / notional_buy * 100.0;

                let buy_liq: f64 = buy.orderbook.asks.iter().map(|l| l.amount).sum();
                let sell_liq: f64 = sell.orderbook.bids.iter().map(|l| l.amount).sum();
                let avail = buy_liq.min(sell_liq);

                if !passes_limits(q_eff, notional_buy, notional_sell, buy, sell) {
                    counters.pairs_limits_fail += 1;
                    continue;
                }

                let market_volatility = (buy.price.change_pct - sell.price.change_pct).abs();
                let execution_risk = round_dp(slip_buy + slip_sell, 8);
                let liquidity_risk = if q_eff > avail {
                    1.0
                } else {
                    (1.0 - avail / (q_eff * 5.0)).max(0.0)
                };
                let fee_risk = fees_abs / gross.max(1e-9);

                let slip_score = (1.0 - ((slip_buy + slip_sell) / buy_eff).min(0.02)).max(0.0);
                let liq_score = (avail / (q_eff * 10.0)).min(1.0);
                let fee_score = (1.0 - (fees_abs / gross).min(0.9)).max(0.0);
                let confidence =
                    round_dp(0.5 * slip_score + 0.3 * liq_score + 0.2 * fee_score, 3);

                opportunities.push(Opportunity {
                    symbol: symbol.clone(),
                    buy_exchange: *buy_venue,
                    sell_exchange: *sell_venue,
                    buy_price: buy_top.price,
                    sell_price: sell_top.price,
                    buy_effective: buy_eff,
                    sell_effective: sell_eff,
                    quantity: q_eff,
                    volume_24h: buy.price.volume,
                    spread_abs,
                    spread_pct,
                    fees: FeeBreakdown {
                        trading_abs: fees_abs,
                        network_abs: 0.0,
                        taker_buy,
                        taker_sell,
                    },
                    slippage: SlippageBreakdown {
                        buy_abs: slip_buy,
                        sell_abs: slip_sell,
                    },
                    net_profit_abs: net,
                    net_profit_pct: net_pct,
                    liquidity: avail,
                    buy_liquidity: buy_liq,
                    sell_liquidity: sell_liq,
                    limits: PairLimits {
                        buy: SizeLimits::from(&buy.limits),
                        sell: SizeLimits::from(&sell.limits),
                    },
                    estimates: Estimates {
                        confidence_score: confidence,
                    },
                    risk: RiskBlock {
                        market_volatility,
                        execution_risk,
                        liquidity_risk,
                        fee_risk,
                    },
                    ts,
                });
            }
        }
    }

    // stable sort keeps insertion order on equal spreads
    opportunities.sort_by(|a, b| {
        b.spread_pct
            .partial_cmp(&a.spread_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    (opportunities, counters)
}
