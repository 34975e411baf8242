#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Stockbar - Status Bar Quote Poller
//!
//! Polls the Alpha Vantage intraday API for a single ticker on a
//! user-configurable interval and keeps a one-line display current with
//! the latest price and the percentage change versus the prior trading
//! day's last close.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Pure quote computation
//!   - `quote`: sample feed types, the delta calculator, display formatting
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: interfaces for the quote feed and the display surface
//!   - `services`: the scheduled poller and preferences commit handling
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `alphavantage`: HTTP adapter for the intraday query endpoint
//!   - `settings`: file-backed settings store with change notification
//!   - `config`: process configuration and API-key credential loading
//!   - `display`: terminal status-line sink
//!   - `telemetry`: tracing subscriber setup
//!
//! # Data Flow
//!
//! ```text
//! timer tick ──► Alpha Vantage ──► compute_quote ──► render ──► mpsc ──► display
//!     ▲                                                                  (single
//!     └── reschedule on settings commit ◄── watch ◄── preferences        consumer)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Pure quote computation with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::quote::{
    CurrencyFormat, Feed, Quote, Sample, compute_quote, format_percent_change, format_price,
};

// Application ports
pub use application::ports::{DisplayPort, FeedError, QuoteFeedPort};

// Application services
pub use application::services::poller::{PollerConfig, QuotePoller, render_line};
pub use application::services::preferences::{
    DEFAULT_INTERVAL_MINUTES, DEFAULT_TICKER, PreferencesError, SUPPORTED_INTERVALS, Settings,
    normalize_ticker, validate_interval, validate_ticker,
};

// Infrastructure
pub use infrastructure::alphavantage::{
    AlphaVantageClient, AlphaVantageConfig, SAMPLING_INTERVAL,
};
pub use infrastructure::config::{AppConfig, ConfigError, Credentials};
pub use infrastructure::display::StatusLineDisplay;
pub use infrastructure::settings::{SettingsError, SettingsStore};
pub use infrastructure::telemetry;
