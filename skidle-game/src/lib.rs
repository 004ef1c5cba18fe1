//! Skidle Game Engine
//!
//! Platform-agnostic core logic for Skidle, the daily ski-resort guessing
//! game. This crate provides the puzzle rotation, scoring, reveal, and
//! persistence logic without UI or platform-specific dependencies; hosts
//! supply storage and metadata loading through the traits below.

pub mod catalog;
pub mod daily;
pub mod geo;
pub mod numbers;
pub mod reveal;
pub mod score;
pub mod session;
pub mod settings;
pub mod share;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use catalog::{
    CatalogError, Resort, ResortCatalog, ResortMetadata, full_map_url, redacted_map_url,
};
pub use daily::{
    DailyPuzzle, FOCAL_MAX, FOCAL_MIN, FocalPoint, PUZZLE_TZ, ResetCountdown, daily_focal_point,
    daily_puzzle, daily_target, date_label, day_bucket, deterministic_shuffle, puzzle_number,
    time_until_reset,
};
pub use geo::{
    DistanceAndBearing, GeoError, compass_arrow, compass_label, distance_and_bearing,
    format_distance,
};
pub use reveal::{RevealStage, RevealState};
pub use score::{
    FieldVerdict, GuessFeedback, build_guess_feedback, compare_numeric, compare_text,
    resort_identity_matches,
};
pub use session::{GameSession, GuessOutcome, SessionError};
pub use settings::{SETTINGS_KEY, Settings, SettingsBus, SettingsStore};
pub use share::{SHARE_URL, render_share_text};
pub use state::{GameSnapshot, GuessRecord};
pub use store::{GAME_STATE_KEY, GameStateStore, LAST_PLAYED_KEY, StoreError};

/// Trait for the collaborator-supplied per-resort metadata lookup.
/// Platform-specific implementations should provide this.
///
/// A failed load is an expected condition: callers record the resort as
/// present-but-metadata-unavailable and keep the session alive.
pub trait MetadataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the metadata record for one resort slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or unreadable.
    fn load_metadata(&self, slug: &str) -> Result<ResortMetadata, Self::Error>;
}

/// Trait abstracting the host's key-value persistence surface.
/// Platform-specific implementations should provide this.
///
/// Callers treat read failures as absence and write failures as
/// non-critical; nothing in the game is allowed to die on storage trouble.
pub trait KeyValuePort {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage surface is unreachable.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage surface is unreachable.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}
