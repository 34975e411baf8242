//! Preferences commit handling.
//!
//! The preferences surface commits two values: the ticker symbol and the
//! polling interval. Both are normalized and validated here before they
//! reach the settings store.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Intervals (minutes) the preferences surface offers.
pub const SUPPORTED_INTERVALS: [u64; 5] = [1, 5, 15, 30, 60];

/// Default ticker symbol.
pub const DEFAULT_TICKER: &str = "AAPL";

/// Default polling interval in minutes.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 5;

/// User-tunable settings, consumed at each poll tick and never mutated by
/// the polling path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Stock symbol to poll.
    pub ticker: String,
    /// Polling interval in minutes.
    pub interval_minutes: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }
}

impl Settings {
    /// Polling interval as a wall-clock duration.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }
}

/// Reasons a preferences commit is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreferencesError {
    /// Ticker was empty after normalization.
    #[error("ticker must not be empty")]
    EmptyTicker,

    /// Interval outside the supported set.
    #[error("unsupported interval: {0} minutes (expected one of 1, 5, 15, 30, 60)")]
    UnsupportedInterval(u64),
}

/// Normalize a ticker the way the preferences form commits it: uppercased,
/// all whitespace stripped.
#[must_use]
pub fn normalize_ticker(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Validate a candidate ticker, returning the normalized symbol.
pub fn validate_ticker(input: &str) -> Result<String, PreferencesError> {
    let ticker = normalize_ticker(input);
    if ticker.is_empty() {
        return Err(PreferencesError::EmptyTicker);
    }
    Ok(ticker)
}

/// Validate a polling interval against the supported set.
pub fn validate_interval(minutes: u64) -> Result<u64, PreferencesError> {
    if SUPPORTED_INTERVALS.contains(&minutes) {
        Ok(minutes)
    } else {
        Err(PreferencesError::UnsupportedInterval(minutes))
    }
}
