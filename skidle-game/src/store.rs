//! Game-state persistence over the injected key-value port
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::KeyValuePort;
use crate::state::GameSnapshot;

/// Storage key for the session snapshot. The persisted shape is versioned
/// informally by key name: changing the shape requires a new key so old
/// snapshots read as absent instead of being misread.
pub const GAME_STATE_KEY: &str = "skidle.state.v1";
/// Storage key for the last-played timestamp (RFC 3339).
pub const LAST_PLAYED_KEY: &str = "skidle.last-played";

/// Errors raised when a snapshot cannot be written.
#[derive(Debug, Error)]
pub enum StoreError<E: std::error::Error + Send + Sync + 'static> {
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage rejected write: {0}")]
    Port(#[source] E),
}

/// Durable game-state storage.
///
/// Reads are forgiving: an absent, unreadable, or corrupt snapshot all come
/// back as `None`, since game state is non-critical and recoverable by
/// starting fresh. Only writes surface errors.
pub struct GameStateStore<P: KeyValuePort> {
    port: P,
}

impl<P: KeyValuePort> GameStateStore<P> {
    pub const fn new(port: P) -> Self {
        Self { port }
    }

    /// Write the full snapshot and stamp the last-played timestamp.
    ///
    /// The snapshot is rewritten whole; a reader never observes a partial
    /// update.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the port rejects a write.
    pub fn save(
        &self,
        snapshot: &GameSnapshot,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError<P::Error>> {
        let json = serde_json::to_string(snapshot)?;
        self.port
            .set(GAME_STATE_KEY, &json)
            .map_err(StoreError::Port)?;
        self.port
            .set(LAST_PLAYED_KEY, &now.to_rfc3339())
            .map_err(StoreError::Port)
    }

    /// The last saved snapshot, or `None` when absent or unreadable.
    #[must_use]
    pub fn load(&self) -> Option<GameSnapshot> {
        let json = self.port.get(GAME_STATE_KEY).ok().flatten()?;
        serde_json::from_str(&json).ok()
    }

    /// When a snapshot was last written, or `None` when absent or unreadable.
    #[must_use]
    pub fn last_played(&self) -> Option<DateTime<Utc>> {
        let raw = self.port.get(LAST_PLAYED_KEY).ok().flatten()?;
        DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Remove the persisted snapshot and timestamp. Idempotent.
    pub fn clear(&self) {
        let _ = self.port.remove(GAME_STATE_KEY);
        let _ = self.port.remove(LAST_PLAYED_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::FocalPoint;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryPort {
        entries: Rc<RefCell<HashMap<String, String>>>,
    }

    impl KeyValuePort for MemoryPort {
        type Error = Infallible;

        fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), Self::Error> {
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }

    fn snapshot() -> GameSnapshot {
        GameSnapshot::fresh("alta".to_string(), FocalPoint { x: 35, y: 65 })
    }

    #[test]
    fn save_then_load_roundtrips() {
        let store = GameStateStore::new(MemoryPort::default());
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        store.save(&snapshot(), now).unwrap();

        assert_eq!(store.load(), Some(snapshot()));
        assert_eq!(store.last_played(), Some(now));
    }

    #[test]
    fn missing_state_reads_as_none() {
        let store = GameStateStore::new(MemoryPort::default());
        assert!(store.load().is_none());
        assert!(store.last_played().is_none());
    }

    #[test]
    fn corrupt_state_reads_as_none() {
        let port = MemoryPort::default();
        port.set(GAME_STATE_KEY, "{not json").unwrap();
        port.set(LAST_PLAYED_KEY, "yesterday-ish").unwrap();
        let store = GameStateStore::new(port);
        assert!(store.load().is_none());
        assert!(store.last_played().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = GameStateStore::new(MemoryPort::default());
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        store.save(&snapshot(), now).unwrap();
        store.clear();
        store.clear();
        assert!(store.load().is_none());
        assert!(store.last_played().is_none());
    }
}
