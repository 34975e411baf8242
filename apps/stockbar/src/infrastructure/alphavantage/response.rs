//! Intraday time-series response parsing.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::application::ports::FeedError;
use crate::domain::quote::{Feed, Sample};

/// Timestamp layout of the intraday series keys.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// JSON field holding a bucket's closing price.
const CLOSE_FIELD: &str = "4. close";

/// Top-level keys the provider uses for error and throttling payloads,
/// which arrive with HTTP 200.
const PROVIDER_ERROR_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Convert a parsed response body into a sample feed.
///
/// The series lives under `"Time Series (<interval>)"`. A missing series
/// object yields an empty feed, and entries that fail to parse are skipped,
/// so one bad bucket cannot blank the whole display. A provider-level error
/// payload maps to [`FeedError::Api`].
pub fn parse_time_series(body: &Value, interval: &str) -> Result<Feed, FeedError> {
    if let Some(message) = provider_error(body) {
        return Err(FeedError::Api {
            code: "provider".to_string(),
            message,
        });
    }

    let key = format!("Time Series ({interval})");
    let Some(series) = body.get(&key).and_then(Value::as_object) else {
        return Ok(Feed::new());
    };

    let mut feed = Feed::with_capacity(series.len());
    for (timestamp, bucket) in series {
        match parse_sample(timestamp, bucket) {
            Some(sample) => feed.push(sample),
            None => tracing::debug!(timestamp, "Skipping unparsable series entry"),
        }
    }

    Ok(feed)
}

/// Extract the message of a provider error payload, if present.
fn provider_error(body: &Value) -> Option<String> {
    PROVIDER_ERROR_KEYS
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(ToString::to_string)
}

/// Parse one `timestamp -> bucket` entry into a sample.
fn parse_sample(timestamp: &str, bucket: &Value) -> Option<Sample> {
    let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
    let close = bucket
        .get(CLOSE_FIELD)
        .and_then(Value::as_str)?
        .parse::<Decimal>()
        .ok()?;

    (close >= Decimal::ZERO).then(|| Sample::new(timestamp, close))
}
