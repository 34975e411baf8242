//! Quote delta computation.
//!
//! Converts one poll's raw intraday samples into the quote shown on the
//! status line: the most recent close and the last close of the prior
//! trading day. Pure and stateless; absent data is represented as missing
//! values, never as errors.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

mod format;

pub use format::{CurrencyFormat, format_percent_change, format_price};

/// A single intraday observation from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Timestamp of the sampling bucket, as encoded by the provider.
    pub timestamp: NaiveDateTime,
    /// Last traded price within the bucket. Non-negative by provider
    /// contract, enforced at the parsing boundary.
    pub close: Decimal,
}

impl Sample {
    /// Create a new sample.
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, close: Decimal) -> Self {
        Self { timestamp, close }
    }

    /// Calendar date component of the sample's timestamp.
    #[must_use]
    pub const fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// One poll cycle's samples for a single ticker.
///
/// May arrive unsorted and may be empty; [`compute_quote`] establishes
/// order itself. Discarded once a [`Quote`] has been derived.
pub type Feed = Vec<Sample>;

/// Derived display quote, recomputed on every poll and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Ticker symbol the feed was fetched for.
    pub ticker: String,
    /// Close price of the most recent sample, if any samples exist.
    pub current_price: Option<Decimal>,
    /// Close price of the newest sample from an earlier calendar day.
    pub previous_close: Option<Decimal>,
}

/// Derive the display quote for `ticker` from one poll's samples.
///
/// Samples are ordered most recent first (equal timestamps keep their
/// original relative order, so output is deterministic). The head becomes
/// the current price; the newest sample whose calendar day differs from the
/// head's becomes the previous close.
#[must_use]
pub fn compute_quote(ticker: &str, mut feed: Feed) -> Quote {
    feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let current = feed.first();
    let previous = current.and_then(|head| feed.iter().find(|s| s.day() != head.day()));

    Quote {
        ticker: ticker.to_string(),
        current_price: current.map(|s| s.close),
        previous_close: previous.map(|s| s.close),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample(day: u32, hour: u32, minute: u32, close: Decimal) -> Sample {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        Sample::new(timestamp, close)
    }

    #[test]
    fn empty_feed_yields_absent_prices() {
        let quote = compute_quote("AAPL", Vec::new());
        assert_eq!(quote.ticker, "AAPL");
        assert_eq!(quote.current_price, None);
        assert_eq!(quote.previous_close, None);
    }

    #[test]
    fn picks_max_timestamp_as_current() {
        let feed = vec![
            sample(5, 9, 35, dec!(101)),
            sample(5, 16, 0, dec!(105)),
            sample(5, 12, 0, dec!(103)),
        ];
        let quote = compute_quote("AAPL", feed);
        assert_eq!(quote.current_price, Some(dec!(105)));
    }

    #[test]
    fn previous_close_is_newest_sample_of_prior_day() {
        let feed = vec![
            sample(4, 15, 55, dec!(98)),
            sample(4, 16, 0, dec!(99)),
            sample(5, 9, 35, dec!(101)),
            sample(5, 16, 0, dec!(105)),
        ];
        let quote = compute_quote("AAPL", feed);
        assert_eq!(quote.current_price, Some(dec!(105)));
        assert_eq!(quote.previous_close, Some(dec!(99)));
    }

    #[test]
    fn unsorted_feed_is_ordered_internally() {
        let feed = vec![
            sample(5, 9, 35, dec!(101)),
            sample(4, 16, 0, dec!(99)),
            sample(5, 16, 0, dec!(105)),
            sample(4, 9, 30, dec!(97)),
        ];
        let quote = compute_quote("MSFT", feed);
        assert_eq!(quote.current_price, Some(dec!(105)));
        assert_eq!(quote.previous_close, Some(dec!(99)));
    }

    #[test]
    fn single_day_feed_has_no_previous_close() {
        let feed = vec![sample(5, 9, 35, dec!(101)), sample(5, 16, 0, dec!(105))];
        let quote = compute_quote("AAPL", feed);
        assert_eq!(quote.current_price, Some(dec!(105)));
        assert_eq!(quote.previous_close, None);
    }

    #[test]
    fn skips_over_gap_to_earlier_trading_day() {
        // Friday close followed by Monday samples: the weekend gap is
        // irrelevant, only the calendar day comparison matters.
        let feed = vec![
            sample(1, 16, 0, dec!(90)),
            sample(4, 9, 30, dec!(95)),
            sample(4, 16, 0, dec!(96)),
        ];
        let quote = compute_quote("AAPL", feed);
        assert_eq!(quote.current_price, Some(dec!(96)));
        assert_eq!(quote.previous_close, Some(dec!(90)));
    }

    #[test]
    fn duplicate_timestamps_resolve_deterministically() {
        let feed = vec![sample(5, 16, 0, dec!(105)), sample(5, 16, 0, dec!(106))];
        let first = compute_quote("AAPL", feed.clone());
        let second = compute_quote("AAPL", feed);
        // Stable ordering: the earlier element of the pair wins both times.
        assert_eq!(first.current_price, Some(dec!(105)));
        assert_eq!(first, second);
    }
}
