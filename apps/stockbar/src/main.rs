//! Stockbar Binary
//!
//! Starts the quote poller and the preferences control surface.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p stockbar
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOCKBAR_KEY_FILE`: API key file path (default: key.txt)
//! - `STOCKBAR_SETTINGS_FILE`: settings file path (default: settings.json)
//! - `STOCKBAR_API_URL`: provider base URL (default: <https://www.alphavantage.co>)
//! - `STOCKBAR_HTTP_TIMEOUT_SECS`: HTTP timeout in seconds (default: 30)
//! - `RUST_LOG`: Log level (default: info)
//!
//! # Preferences Commands (stdin)
//!
//! - `ticker <SYMBOL>`: change the polled ticker (uppercased, whitespace stripped)
//! - `interval <MINUTES>`: change the polling interval (1, 5, 15, 30, or 60)
//! - `show`: print the current settings
//! - `quit`: terminate the process

use std::sync::Arc;

use stockbar::application::ports::{DisplayPort, QuoteFeedPort};
use stockbar::application::services::poller::{PollerConfig, QuotePoller};
use stockbar::application::services::preferences::{validate_interval, validate_ticker};
use stockbar::domain::quote::CurrencyFormat;
use stockbar::infrastructure::alphavantage::{AlphaVantageClient, AlphaVantageConfig};
use stockbar::infrastructure::config::{AppConfig, Credentials};
use stockbar::infrastructure::display::StatusLineDisplay;
use stockbar::infrastructure::settings::SettingsStore;
use stockbar::infrastructure::telemetry;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    telemetry::init();

    let config = AppConfig::from_env();

    // The API key is a startup requirement; without it there is nothing to
    // poll, so refuse to start rather than limp along.
    let credentials = match Credentials::from_key_file(&config.key_file) {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!(
                error = %e,
                path = %config.key_file.display(),
                "API key unavailable, refusing to start"
            );
            return Err(e.into());
        }
    };

    let store = Arc::new(SettingsStore::load(&config.settings_file)?);
    log_config(&config, &store);

    let feed_config = AlphaVantageConfig::new(credentials)
        .with_base_url(config.api_base_url.clone())
        .with_timeout(config.http_timeout);
    let feed: Arc<dyn QuoteFeedPort> = Arc::new(AlphaVantageClient::new(feed_config)?);

    let shutdown = CancellationToken::new();
    let currency = CurrencyFormat::default();

    // Display consumer: the single owner of the display surface.
    let (line_tx, mut line_rx) = QuotePoller::line_channel();
    let display_task = tokio::spawn(async move {
        let display = StatusLineDisplay::new();
        while let Some(line) = line_rx.recv().await {
            display.show(&line);
        }
    });

    // Preferences surface: line commands on stdin.
    let prefs_store = Arc::clone(&store);
    let prefs_shutdown = shutdown.clone();
    tokio::spawn(async move {
        run_preferences_loop(&prefs_store, &prefs_shutdown).await;
    });

    // Signal watcher: first SIGINT/SIGTERM cancels everything.
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        await_signal().await;
        signal_shutdown.cancel();
    });

    let mut settings_rx = store.subscribe();
    let mut poller = QuotePoller::spawn(
        PollerConfig {
            interval: store.get().poll_interval(),
            currency: currency.clone(),
        },
        Arc::clone(&feed),
        store.subscribe(),
        line_tx.clone(),
    );

    tracing::info!("Stockbar ready");

    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            changed = settings_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                // Every preferences commit reschedules; the fresh timer's
                // immediate first tick refreshes the display at once.
                let settings = settings_rx.borrow_and_update().clone();
                tracing::info!(
                    ticker = %settings.ticker,
                    interval_minutes = settings.interval_minutes,
                    "Settings committed, rescheduling poller"
                );
                poller.shutdown().await;
                poller = QuotePoller::spawn(
                    PollerConfig {
                        interval: settings.poll_interval(),
                        currency: currency.clone(),
                    },
                    Arc::clone(&feed),
                    store.subscribe(),
                    line_tx.clone(),
                );
            }
        }
    }

    poller.shutdown().await;
    drop(line_tx);
    let _ = display_task.await;

    tracing::info!("Stockbar stopped");
    Ok(())
}

/// Outcome of one preferences command.
#[derive(Debug, PartialEq, Eq)]
enum CommandOutcome {
    Continue,
    Quit,
}

/// Read preference commands from stdin until quit, EOF, or shutdown.
async fn run_preferences_loop(store: &SettingsStore, shutdown: &CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        if apply_command(store, line.trim()) == CommandOutcome::Quit {
                            shutdown.cancel();
                            break;
                        }
                    }
                    // stdin closed (e.g. running detached); keep polling.
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read preferences input");
                        break;
                    }
                }
            }
        }
    }
}

/// Parse and apply a single preferences command.
fn apply_command(store: &SettingsStore, input: &str) -> CommandOutcome {
    let (command, argument) = input
        .split_once(char::is_whitespace)
        .map_or((input, ""), |(c, a)| (c, a.trim()));

    match command {
        "quit" => return CommandOutcome::Quit,
        "show" => {
            let settings = store.get();
            tracing::info!(
                ticker = %settings.ticker,
                interval_minutes = settings.interval_minutes,
                "Current settings"
            );
        }
        "ticker" => match validate_ticker(argument) {
            Ok(ticker) => {
                let mut settings = store.get();
                settings.ticker = ticker;
                if let Err(e) = store.set(settings) {
                    tracing::warn!(error = %e, "Ticker not saved");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Ticker rejected"),
        },
        "interval" => {
            let minutes = argument
                .parse::<u64>()
                .ok()
                .and_then(|m| validate_interval(m).ok());
            if let Some(minutes) = minutes {
                let mut settings = store.get();
                settings.interval_minutes = minutes;
                if let Err(e) = store.set(settings) {
                    tracing::warn!(error = %e, "Interval not saved");
                }
            } else {
                tracing::warn!(
                    input = argument,
                    "Interval rejected (expected one of 1, 5, 15, 30, 60)"
                );
            }
        }
        "" => {}
        other => tracing::warn!(command = other, "Unknown preferences command"),
    }

    CommandOutcome::Continue
}

/// Load .env from the current directory or any ancestor.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the effective startup configuration.
fn log_config(config: &AppConfig, store: &SettingsStore) {
    let settings = store.get();
    tracing::info!(
        ticker = %settings.ticker,
        interval_minutes = settings.interval_minutes,
        api_base_url = %config.api_base_url,
        settings_file = %config.settings_file.display(),
        "Configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
#[allow(clippy::expect_used)]
async fn await_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
