//! Scheduled quote polling.
//!
//! One repeating timer per poller task. The timer fires immediately on
//! spawn, so every (re)schedule refreshes the display at once instead of
//! waiting a full interval. Each tick performs one fetch, derives the
//! quote, and sends the rendered line through a bounded channel whose
//! single consumer owns the display — display mutation therefore cannot
//! race timer-driven re-entry.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{FeedError, QuoteFeedPort};
use crate::application::services::preferences::Settings;
use crate::domain::quote::{
    CurrencyFormat, Quote, compute_quote, format_percent_change, format_price,
};

/// Capacity of the rendered-line channel to the display consumer.
const LINE_CHANNEL_CAPACITY: usize = 8;

/// Configuration for one scheduled polling task.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Wall-clock tick interval.
    pub interval: Duration,
    /// Currency rendering parameters for the status line.
    pub currency: CurrencyFormat,
}

/// Handle to a running polling task.
///
/// Rescheduling is cancel-and-respawn: [`QuotePoller::shutdown`] the old
/// handle, then [`QuotePoller::spawn`] with the new interval. The fresh
/// timer's immediate first tick keeps the display from going stale across
/// the switch.
pub struct QuotePoller {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl QuotePoller {
    /// Spawn a polling task that fires immediately, then every
    /// `config.interval`.
    ///
    /// The current ticker is re-read from `settings` at each tick, so
    /// ticker edits take effect without respawning. Ticks that fall due
    /// while a fetch is still in flight are skipped; the fetch is awaited
    /// inline, so at most one request is outstanding and the
    /// most-recently-completed response is always the one displayed.
    #[must_use]
    pub fn spawn(
        config: PollerConfig,
        feed: Arc<dyn QuoteFeedPort>,
        settings: watch::Receiver<Settings>,
        line_tx: mpsc::Sender<String>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(config, feed, settings, line_tx, cancel.clone()));
        Self { cancel, task }
    }

    /// Create the rendered-line channel the poller feeds.
    #[must_use]
    pub fn line_channel() -> (mpsc::Sender<String>, mpsc::Receiver<String>) {
        mpsc::channel(LINE_CHANNEL_CAPACITY)
    }

    /// Cancel the polling task and wait for it to stop.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

/// Poll loop body.
async fn run(
    config: PollerConfig,
    feed: Arc<dyn QuoteFeedPort>,
    settings: watch::Receiver<Settings>,
    line_tx: mpsc::Sender<String>,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let ticker = settings.borrow().ticker.clone();
                match poll_once(feed.as_ref(), &ticker, &config.currency).await {
                    Ok(line) => {
                        tracing::debug!(%ticker, %line, "Quote updated");
                        if line_tx.send(line).await.is_err() {
                            // Display consumer is gone; nothing left to update.
                            break;
                        }
                    }
                    Err(e) => {
                        // Previous display value stays; the next tick is the
                        // sole retry mechanism.
                        tracing::warn!(%ticker, error = %e, "Quote fetch failed");
                    }
                }
            }
        }
    }
}

/// Fetch one feed, derive the quote, and render the status line.
async fn poll_once(
    feed: &dyn QuoteFeedPort,
    ticker: &str,
    currency: &CurrencyFormat,
) -> Result<String, FeedError> {
    let samples = feed.fetch_feed(ticker).await?;
    let quote = compute_quote(ticker, samples);
    Ok(render_line(&quote, currency))
}

/// Render `"<ticker>: <price> | <pct>"`.
#[must_use]
pub fn render_line(quote: &Quote, currency: &CurrencyFormat) -> String {
    format!(
        "{}: {} | {}",
        quote.ticker,
        format_price(quote.current_price, currency),
        format_percent_change(quote.current_price, quote.previous_close),
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn renders_full_line() {
        let quote = Quote {
            ticker: "AAPL".to_string(),
            current_price: Some(dec!(1234.5)),
            previous_close: Some(dec!(1222.28)),
        };
        assert_eq!(
            render_line(&quote, &CurrencyFormat::default()),
            "AAPL: $1,234.50 | 1%"
        );
    }

    #[test]
    fn renders_nulls_for_missing_data() {
        let quote = Quote {
            ticker: "AAPL".to_string(),
            current_price: None,
            previous_close: None,
        };
        assert_eq!(
            render_line(&quote, &CurrencyFormat::default()),
            "AAPL: null | null"
        );
    }

    #[test]
    fn renders_null_percent_without_previous_close() {
        let quote = Quote {
            ticker: "GOOG".to_string(),
            current_price: Some(dec!(189.05)),
            previous_close: None,
        };
        assert_eq!(
            render_line(&quote, &CurrencyFormat::default()),
            "GOOG: $189.05 | null"
        );
    }
}
