//! Persisted user settings.
//!
//! An explicit store replaces ambient key-value storage: load once at
//! startup, `set` validates, persists atomically, and notifies watchers
//! through a `watch` channel. The supervisor observes changes to reschedule
//! the poller.

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::watch;

use crate::application::services::preferences::{
    PreferencesError, Settings, validate_interval, validate_ticker,
};

/// Settings persistence errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file exists but could not be read or written.
    #[error("settings file {} I/O error: {source}", .path.display())]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Settings file exists but holds invalid JSON.
    #[error("settings file {} is corrupt: {source}", .path.display())]
    Corrupt {
        /// Path of the corrupt file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Rejected by preferences validation.
    #[error(transparent)]
    Invalid(#[from] PreferencesError),
}

/// File-backed settings store with change notification.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    tx: watch::Sender<Settings>,
}

impl SettingsStore {
    /// Load the store from `path`, falling back to defaults when no file
    /// exists yet. A present-but-corrupt file is an error; silently
    /// clobbering user data with defaults is worse than refusing to start.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let settings = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| {
                SettingsError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.clone(),
                    source,
                });
            }
        };

        let (tx, _) = watch::channel(settings);
        Ok(Self { path, tx })
    }

    /// Current settings snapshot.
    #[must_use]
    pub fn get(&self) -> Settings {
        self.tx.borrow().clone()
    }

    /// Subscribe to settings changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.tx.subscribe()
    }

    /// Validate, persist, and broadcast new settings.
    ///
    /// Watchers are notified on every successful commit, including commits
    /// that re-submit the current values; the preferences surface relies on
    /// that to force an immediate refresh.
    pub fn set(&self, settings: Settings) -> Result<(), SettingsError> {
        let settings = Settings {
            ticker: validate_ticker(&settings.ticker)?,
            interval_minutes: validate_interval(settings.interval_minutes)?,
        };

        self.persist(&settings)?;
        self.tx.send_replace(settings);
        Ok(())
    }

    /// Write the settings file atomically (temp file, then rename).
    fn persist(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings).map_err(|source| {
            SettingsError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}
