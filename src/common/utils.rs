// src/common/utils.rs
use crate::common::ScannerError;

// Parse a string to a f64, return a ScannerError if the parsing fails
pub fn parse_f64(value: &str, field_name: &str) -> Result<f64, ScannerError> {
    value
        .parse::<f64>()
        .map_err(|_| ScannerError::ApiError(format!("Invalid {} format", field_name)))
}

// Parse an optional string field; empty or non-positive values count as absent
pub fn parse_opt_f64(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| *v > 0.0)
}

// get timestamp in milliseconds
pub fn get_timestamp_millis() -> u64 {
    chrono::Utc::now()
        .timestamp_millis()
        .try_into()
        .unwrap_or(0)
}

/// Round to `decimals` decimal places.
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Decimal places implied by a tick/step size string, e.g. "0.0010" -> 3.
/// Venues that publish precision as a step size are normalized through this.
pub fn decimals_from_step(step: &str) -> Option<u32> {
    let v = step.parse::<f64>().ok()?;
    if v <= 0.0 {
        return None;
    }
    let trimmed = step.trim_end_matches('0');
    match trimmed.find('.') {
        Some(dot) => Some((trimmed.len() - dot - 1) as u32),
        None => Some(0),
    }
}
