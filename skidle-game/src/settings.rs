//! Player preferences, persisted independently of game state
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

use crate::KeyValuePort;

/// Storage key for settings; versioned by name like the game snapshot.
pub const SETTINGS_KEY: &str = "skidle.settings.v1";

/// Process-wide preference bag. Both flags default off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Show country names next to resort names in pickers and tables.
    #[serde(default)]
    pub show_country_names: bool,
    /// Render distances in kilometers/meters instead of miles/feet.
    #[serde(default)]
    pub use_metric: bool,
}

type Observer = Box<dyn Fn(Settings)>;

/// Synchronous publish/subscribe channel for settings changes.
///
/// Observers are invoked in registration order after a successful write, but
/// no cross-observer ordering is guaranteed to callers; delivery is
/// fire-and-forget.
#[derive(Default)]
pub struct SettingsBus {
    observers: RefCell<Vec<Observer>>,
}

impl SettingsBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for future settings changes.
    pub fn subscribe(&self, observer: impl Fn(Settings) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// Notify every current observer.
    pub fn publish(&self, settings: Settings) {
        for observer in self.observers.borrow().iter() {
            observer(settings);
        }
    }
}

/// Settings persistence over the injected key-value port.
pub struct SettingsStore<P: KeyValuePort> {
    port: P,
}

impl<P: KeyValuePort> SettingsStore<P> {
    pub const fn new(port: P) -> Self {
        Self { port }
    }

    /// The saved settings, or defaults when absent or unreadable.
    #[must_use]
    pub fn load(&self) -> Settings {
        self.port
            .get(SETTINGS_KEY)
            .ok()
            .flatten()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Persist `settings` and, on success, broadcast the change on `bus`.
    ///
    /// # Errors
    ///
    /// Returns the port error when the write is rejected; observers are not
    /// notified in that case.
    pub fn save(&self, settings: Settings, bus: &SettingsBus) -> Result<(), P::Error> {
        let json = serde_json::to_string(&settings)
            .unwrap_or_else(|_| String::from("{}"));
        self.port.set(SETTINGS_KEY, &json)?;
        bus.publish(settings);
        Ok(())
    }
}
