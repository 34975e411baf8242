//! Preferences Round-Trip Tests
//!
//! A commit through the settings store must land on disk normalized and
//! notify watchers so the supervisor can reschedule.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use stockbar::application::services::preferences::Settings;
use stockbar::infrastructure::settings::{SettingsError, SettingsStore};

#[test]
fn lowercase_ticker_round_trips_uppercased() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let store = SettingsStore::load(&path).unwrap();
    store
        .set(Settings {
            ticker: "goog".to_string(),
            interval_minutes: 15,
        })
        .unwrap();

    let reloaded = SettingsStore::load(&path).unwrap();
    let settings = reloaded.get();
    assert_eq!(settings.ticker, "GOOG");
    assert_eq!(settings.interval_minutes, 15);
}

#[test]
fn spaced_ticker_round_trips_stripped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let store = SettingsStore::load(&path).unwrap();
    store
        .set(Settings {
            ticker: " go og ".to_string(),
            interval_minutes: 5,
        })
        .unwrap();

    assert_eq!(SettingsStore::load(&path).unwrap().get().ticker, "GOOG");
}

#[test]
fn rejected_commit_leaves_disk_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let store = SettingsStore::load(&path).unwrap();
    let result = store.set(Settings {
        ticker: "AAPL".to_string(),
        interval_minutes: 7,
    });

    assert!(matches!(result, Err(SettingsError::Invalid(_))));
    // No file was written, so a fresh load still sees defaults.
    assert_eq!(SettingsStore::load(&path).unwrap().get(), Settings::default());
}

#[test]
fn commit_notifies_watchers_for_reschedule() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::load(dir.path().join("settings.json")).unwrap();
    let mut rx = store.subscribe();

    store
        .set(Settings {
            ticker: "MSFT".to_string(),
            interval_minutes: 1,
        })
        .unwrap();

    assert!(rx.has_changed().unwrap());
    let settings = rx.borrow_and_update().clone();
    assert_eq!(settings.ticker, "MSFT");
    assert_eq!(settings.interval_minutes, 1);
}
