use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use spot_arb_scanner::common::{ScannerConfig, ScannerError};
use spot_arb_scanner::scanner::Core;

#[tokio::main]
async fn main() -> Result<(), ScannerError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config = ScannerConfig::from_env()?;
    info!(
        venues = ?config.scan_venues,
        trade_size_usdt = config.trade_size_usdt,
        interval_ms = config.scan_interval_ms,
        batch_size = config.scan_batch_size,
        "starting spot arbitrage scanner"
    );

    let core = Arc::new(Core::from_config(config));

    // log the head of each published set; a real transport would forward it
    let mut updates = core.subscribe();
    tokio::spawn(async move {
        while let Ok(set) = updates.recv().await {
            for opp in set.items.iter().take(3) {
                info!(
                    symbol = %opp.symbol,
                    buy = %opp.buy_exchange,
                    sell = %opp.sell_exchange,
                    spread_pct = opp.spread_pct,
                    net_pct = opp.net_profit_pct,
                    confidence = opp.estimates.confidence_score,
                    "opportunity"
                );
            }
        }
    });

    core.run().await;

    Ok(())
}
