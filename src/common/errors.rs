#[derive(thiserror::Error, Debug)]
pub enum ScannerError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl ScannerError {
    /// Rate-limit outcomes get one 1 s backoff-and-retry in the adapter;
    /// everything else fails the call immediately.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            ScannerError::RateLimited(_) => true,
            ScannerError::HttpError(e) => {
                e.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS)
            }
            _ => false,
        }
    }
}
