//! Web-specific game adapters
//!
//! This module provides browser-backed implementations of the skidle-game
//! platform traits and re-exports the core game logic types. Resort data is
//! bundled into the binary from static assets; session and settings state
//! live in `localStorage`.

use chrono::Utc;
use once_cell::sync::Lazy;
use std::collections::HashMap;

// Re-export all types from skidle-game
pub use skidle_game::*;

static CATALOG_JSON: &str = include_str!("../static/assets/data/resorts.json");
static METADATA_JSON: &str = include_str!("../static/assets/data/resort-metadata.json");

static METADATA_MAP: Lazy<HashMap<String, ResortMetadata>> = Lazy::new(|| {
    serde_json::from_str(METADATA_JSON).unwrap_or_else(|err| {
        log::error!("bundled resort metadata failed to parse: {err}");
        HashMap::new()
    })
});

/// Parse the bundled resort catalog.
///
/// # Errors
///
/// Returns an error if the bundled index is malformed or lists no resorts.
pub fn load_catalog() -> Result<ResortCatalog, CatalogError> {
    ResortCatalog::from_json(CATALOG_JSON)
}

/// Metadata loader backed by the bundled per-resort records.
#[derive(Clone, Copy, Default)]
pub struct WebMetadataLoader;

#[derive(Debug, thiserror::Error)]
#[error("no bundled metadata for {slug}")]
pub struct MetadataMissing {
    slug: String,
}

impl MetadataLoader for WebMetadataLoader {
    type Error = MetadataMissing;

    fn load_metadata(&self, slug: &str) -> Result<ResortMetadata, Self::Error> {
        METADATA_MAP.get(slug).cloned().ok_or_else(|| {
            log::warn!("metadata unavailable for {slug}");
            MetadataMissing {
                slug: slug.to_string(),
            }
        })
    }
}

/// Key-value port backed by browser `localStorage`.
#[derive(Clone, Copy, Default)]
pub struct WebKeyValueStore;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("storage error: {0}")]
    Storage(String),
}

fn storage() -> Result<web_sys::Storage, WebStorageError> {
    crate::dom::local_storage()
        .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))
}

impl KeyValuePort for WebKeyValueStore {
    type Error = WebStorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        storage()?
            .get_item(key)
            .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        storage()?
            .set_item(key, value)
            .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        storage()?
            .remove_item(key)
            .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))
    }
}

/// Create a browser-backed game session for the current instant.
///
/// # Errors
///
/// Returns an error when the bundled catalog is malformed or empty; that is
/// fatal and must surface to the player instead of silently guessing.
pub fn create_web_session() -> anyhow::Result<GameSession<WebMetadataLoader, WebKeyValueStore>> {
    let catalog = load_catalog()?;
    let session = GameSession::start(catalog, WebMetadataLoader, WebKeyValueStore, Utc::now())?;
    Ok(session)
}

/// DOM event name dispatched on `window` whenever settings change, for
/// renderers that listen outside the in-process bus.
pub const SETTINGS_EVENT: &str = "skidle:settings-changed";

/// The saved settings, or defaults when nothing is stored.
#[must_use]
pub fn load_settings() -> Settings {
    SettingsStore::new(WebKeyValueStore).load()
}

/// Persist `settings`, notify bus subscribers, and announce the change to
/// DOM listeners. Failures are logged and swallowed; preferences are
/// non-critical.
pub fn save_settings(settings: Settings, bus: &SettingsBus) {
    if let Err(err) = SettingsStore::new(WebKeyValueStore).save(settings, bus) {
        log::warn!("settings write failed: {err}");
        return;
    }
    dispatch_settings_event();
}

fn dispatch_settings_event() {
    let Some(win) = web_sys::window() else {
        return;
    };
    if let Ok(event) = web_sys::CustomEvent::new(SETTINGS_EVENT) {
        let _ = win.dispatch_event(&event);
    }
}
