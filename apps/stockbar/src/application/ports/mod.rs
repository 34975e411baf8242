//! Port definitions for the application layer.
//!
//! Ports decouple the polling service from the concrete quote provider and
//! display surface; infrastructure supplies the adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::quote::Feed;

/// Errors from a quote feed adapter.
#[derive(Debug, Error, Clone)]
pub enum FeedError {
    /// Network-level failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// Provider returned an error status or error payload.
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status or provider error code.
        code: String,
        /// Error message from the provider.
        message: String,
    },

    /// Response body could not be parsed.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Adapter configuration is unusable.
    #[error("feed misconfigured: {0}")]
    Misconfigured(String),
}

/// Source of intraday samples for a ticker.
#[async_trait]
pub trait QuoteFeedPort: Send + Sync {
    /// Fetch the provider's current response window of samples for `ticker`.
    async fn fetch_feed(&self, ticker: &str) -> Result<Feed, FeedError>;
}

/// Sink for the rendered status line.
///
/// Implementations must tolerate being called repeatedly with the same
/// line; each call replaces the previous display wholesale.
pub trait DisplayPort: Send + Sync {
    /// Replace the displayed line.
    fn show(&self, line: &str);
}
