//! Alpha Vantage quote feed adapter.
//!
//! Implements [`QuoteFeedPort`](crate::application::ports::QuoteFeedPort)
//! against the `TIME_SERIES_INTRADAY` query endpoint.

mod client;
mod response;

pub use client::{AlphaVantageClient, AlphaVantageConfig, SAMPLING_INTERVAL};
pub use response::parse_time_series;
