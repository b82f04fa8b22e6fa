use crate::cex::{VenueId, ALL_VENUES};
use crate::common::ScannerError;

/// Optional API credentials for one venue. All endpoints the scanner uses
/// are public; keys are accepted so deployments can share one env file with
/// trading-side tooling.
#[derive(Debug, Clone, Default)]
pub struct VenueCredentials {
    pub api_key: Option<String>,
    pub secret: Option<String>,
    pub passphrase: Option<String>,
}

impl VenueCredentials {
    pub fn from_env(venue: VenueId) -> Self {
        let prefix = venue.as_str().to_uppercase();
        Self {
            api_key: std::env::var(format!("{}_API_KEY", prefix)).ok(),
            secret: std::env::var(format!("{}_SECRET", prefix)).ok(),
            passphrase: std::env::var(format!("{}_PASSPHRASE", prefix)).ok(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.secret.is_some()
    }
}

/// Runtime configuration, read from the environment at startup and validated
/// before the scanner starts. Invalid values abort the process.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Intended notional per opportunity, in USDT.
    pub trade_size_usdt: f64,
    /// Minimum spread percentage an opportunity must exceed.
    pub min_raw_spread_pct: f64,
    /// Notional floor in USDT below which opportunities are dropped.
    pub min_trade_usdt: f64,
    pub scan_interval_ms: u64,
    pub scan_batch_size: usize,
    pub scan_venues: Vec<VenueId>,
    /// Emit per-tick rejection counters.
    pub debug: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            trade_size_usdt: 25.0,
            min_raw_spread_pct: 0.0,
            min_trade_usdt: 1.0,
            scan_interval_ms: 3000,
            scan_batch_size: 30,
            scan_venues: ALL_VENUES.to_vec(),
            debug: false,
        }
    }
}

impl ScannerConfig {
    pub fn from_env() -> Result<Self, ScannerError> {
        let mut config = Self::default();

        if let Some(v) = read_f64("TRADE_SIZE_USDT")? {
            config.trade_size_usdt = v;
        }
        if let Some(v) = read_f64("MIN_RAW_SPREAD_PCT")? {
            config.min_raw_spread_pct = v;
        }
        if let Some(v) = read_f64("MIN_TRADE_USDT")? {
            config.min_trade_usdt = v;
        }
        if let Some(v) = read_u64("SCAN_INTERVAL_MS")? {
            config.scan_interval_ms = v;
        }
        if let Some(v) = read_u64("SCAN_BATCH_SIZE")? {
            config.scan_batch_size = v as usize;
        }
        if let Ok(raw) = std::env::var("SCAN_VENUES") {
            config.scan_venues = parse_venue_list(&raw)?;
        }
        if let Ok(raw) = std::env::var("ARB_DEBUG") {
            config.debug = matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.trade_size_usdt <= 0.0 {
            return Err(ScannerError::ConfigError(
                "TRADE_SIZE_USDT must be greater than 0".to_string(),
            ));
        }
        if self.min_raw_spread_pct < 0.0 {
            return Err(ScannerError::ConfigError(
                "MIN_RAW_SPREAD_PCT must not be negative".to_string(),
            ));
        }
        if self.min_trade_usdt <= 0.0 {
            return Err(ScannerError::ConfigError(
                "MIN_TRADE_USDT must be greater than 0".to_string(),
            ));
        }
        if self.scan_interval_ms == 0 {
            return Err(ScannerError::ConfigError(
                "SCAN_INTERVAL_MS must be greater than 0".to_string(),
            ));
        }
        if self.scan_batch_size == 0 {
            return Err(ScannerError::ConfigError(
                "SCAN_BATCH_SIZE must be greater than 0".to_string(),
            ));
        }
        if self.scan_venues.is_empty() {
            return Err(ScannerError::ConfigError(
                "SCAN_VENUES resolved to an empty venue list".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_venue_list(raw: &str) -> Result<Vec<VenueId>, ScannerError> {
    let mut venues = Vec::new();
    for part in raw.split(',') {
        let name = part.trim();
        if name.is_empty() {
            continue;
        }
        let venue = VenueId::from_name(name)
            .ok_or_else(|| ScannerError::ConfigError(format!("Unknown venue in SCAN_VENUES: {}", name)))?;
        if !venues.contains(&venue) {
            venues.push(venue);
        }
    }
    Ok(venues)
}

fn read_f64(key: &str) -> Result<Option<f64>, ScannerError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ScannerError::ConfigError(format!("{} is not a number: {}", key, raw))),
        Err(_) => Ok(None),
    }
}

fn read_u64(key: &str) -> Result<Option<u64>, ScannerError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ScannerError::ConfigError(format!("{} is not an integer: {}", key, raw))),
        Err(_) => Ok(None),
    }
}
