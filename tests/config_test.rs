use spot_arb_scanner::cex::{VenueId, ALL_VENUES};
use spot_arb_scanner::common::{ScannerConfig, ScannerError};

#[test]
fn defaults_match_the_documented_values() {
    let config = ScannerConfig::default();
    assert_eq!(config.trade_size_usdt, 25.0);
    assert_eq!(config.min_raw_spread_pct, 0.0);
    assert_eq!(config.min_trade_usdt, 1.0);
    assert_eq!(config.scan_interval_ms, 3000);
    assert_eq!(config.scan_batch_size, 30);
    assert_eq!(config.scan_venues, ALL_VENUES.to_vec());
    assert!(!config.debug);
    assert!(config.validate().is_ok());
}

#[test]
fn validation_rejects_out_of_range_values() {
    let bad = ScannerConfig {
        trade_size_usdt: 0.0,
        ..ScannerConfig::default()
    };
    assert!(matches!(bad.validate(), Err(ScannerError::ConfigError(_))));

    let bad = ScannerConfig {
        min_raw_spread_pct: -0.5,
        ..ScannerConfig::default()
    };
    assert!(bad.validate().is_err());

    let bad = ScannerConfig {
        min_trade_usdt: 0.0,
        ..ScannerConfig::default()
    };
    assert!(bad.validate().is_err());

    let bad = ScannerConfig {
        scan_interval_ms: 0,
        ..ScannerConfig::default()
    };
    assert!(bad.validate().is_err());

    let bad = ScannerConfig {
        scan_batch_size: 0,
        ..ScannerConfig::default()
    };
    assert!(bad.validate().is_err());

    let bad = ScannerConfig {
        scan_venues: Vec::new(),
        ..ScannerConfig::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn venue_names_resolve_case_insensitively() {
    assert_eq!(VenueId::from_name("binance"), Some(VenueId::Binance));
    assert_eq!(VenueId::from_name("KuCoin"), Some(VenueId::Kucoin));
    assert_eq!(VenueId::from_name("gate.io"), Some(VenueId::Gate));
    assert_eq!(VenueId::from_name("GATE"), Some(VenueId::Gate));
    assert_eq!(VenueId::from_name("bybit"), Some(VenueId::Bybit));
    assert_eq!(VenueId::from_name("okx"), None);
}

// The only test in this binary that touches process environment.
#[test]
fn from_env_reads_overrides() {
    std::env::set_var("TRADE_SIZE_USDT", "50");
    std::env::set_var("MIN_RAW_SPREAD_PCT", "0.2");
    std::env::set_var("SCAN_INTERVAL_MS", "1500");
    std::env::set_var("SCAN_BATCH_SIZE", "10");
    std::env::set_var("SCAN_VENUES", "binance, kucoin ,gate");
    std::env::set_var("ARB_DEBUG", "true");

    let config = ScannerConfig::from_env().expect("valid config");
    assert_eq!(config.trade_size_usdt, 50.0);
    assert_eq!(config.min_raw_spread_pct, 0.2);
    assert_eq!(config.scan_interval_ms, 1500);
    assert_eq!(config.scan_batch_size, 10);
    assert_eq!(
        config.scan_venues,
        vec![VenueId::Binance, VenueId::Kucoin, VenueId::Gate]
    );
    assert!(config.debug);

    std::env::set_var("SCAN_VENUES", "binance,unknown-venue");
    assert!(ScannerConfig::from_env().is_err());

    for key in [
        "TRADE_SIZE_USDT",
        "MIN_RAW_SPREAD_PCT",
        "SCAN_INTERVAL_MS",
        "SCAN_BATCH_SIZE",
        "SCAN_VENUES",
        "ARB_DEBUG",
    ] {
        std::env::remove_var(key);
    }
}
