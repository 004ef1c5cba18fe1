//! Session snapshot shapes persisted between page loads
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::ResortMetadata;
use crate::daily::FocalPoint;
use crate::reveal::RevealStage;

/// One submitted guess: the guessed slug plus whatever metadata was
/// available at guess time. Append-only; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub slug: String,
    pub metadata: Option<ResortMetadata>,
}

/// The durable session snapshot.
///
/// Created on the first guess of a day, read back on every load, and
/// discarded when the stored day has passed. Every mutation rewrites the
/// whole snapshot; readers never see a partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub target: String,
    pub guessed_correctly: bool,
    /// Guessed slugs in submission order. Almost always three or fewer.
    pub guessed: SmallVec<[String; 4]>,
    pub records: Vec<GuessRecord>,
    pub reveal_percentage: u8,
    pub focal: FocalPoint,
}

impl GameSnapshot {
    /// Snapshot for a puzzle nobody has guessed at yet.
    #[must_use]
    pub fn fresh(target: String, focal: FocalPoint) -> Self {
        Self {
            target,
            guessed_correctly: false,
            guessed: SmallVec::new(),
            records: Vec::new(),
            reveal_percentage: RevealStage::Hidden33.percentage(),
            focal,
        }
    }

    #[must_use]
    pub fn guess_count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn has_guessed(&self, slug: &str) -> bool {
        self.guessed.iter().any(|g| g == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_snapshot_starts_hidden() {
        let snapshot = GameSnapshot::fresh(
            "alta".to_string(),
            FocalPoint { x: 40, y: 60 },
        );
        assert_eq!(snapshot.reveal_percentage, 33);
        assert!(!snapshot.guessed_correctly);
        assert_eq!(snapshot.guess_count(), 0);
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let mut snapshot =
            GameSnapshot::fresh("alta".to_string(), FocalPoint { x: 40, y: 60 });
        snapshot.guessed.push("vail".to_string());
        snapshot.records.push(GuessRecord {
            slug: "vail".to_string(),
            metadata: None,
        });
        snapshot.reveal_percentage = 66;

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
        assert!(restored.has_guessed("vail"));
        assert!(!restored.has_guessed("alta"));
    }
}
