//! Progressive disclosure of the trail map across guesses
use serde::{Deserialize, Serialize};

use crate::daily::FocalPoint;

/// How much of the trail map is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RevealStage {
    #[default]
    Hidden33,
    Hidden66,
    FullyRevealed,
}

impl RevealStage {
    /// Disclosed fraction of the image, expressed 0-100.
    #[must_use]
    pub const fn percentage(self) -> u8 {
        match self {
            Self::Hidden33 => 33,
            Self::Hidden66 => 66,
            Self::FullyRevealed => 100,
        }
    }

    /// Map a persisted percentage back onto a stage. Values between the
    /// canonical steps resolve to the nearest stage not below them.
    #[must_use]
    pub const fn from_percentage(percentage: u8) -> Self {
        match percentage {
            0..=33 => Self::Hidden33,
            34..=66 => Self::Hidden66,
            _ => Self::FullyRevealed,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::FullyRevealed)
    }

    const fn advanced(self) -> Self {
        match self {
            Self::Hidden33 => Self::Hidden66,
            Self::Hidden66 | Self::FullyRevealed => Self::FullyRevealed,
        }
    }
}

/// Reveal progress for one puzzle instance.
///
/// Transitions are forward-only: an incorrect guess advances one stage, a
/// correct guess jumps straight to full disclosure, and once fully revealed
/// the state stays put until a new puzzle is initialized. The focal point is
/// set at initialization and never re-randomized within the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealState {
    stage: RevealStage,
    focal: FocalPoint,
}

impl RevealState {
    /// Fresh reveal state for a new puzzle, starting at 33%.
    #[must_use]
    pub const fn new(focal: FocalPoint) -> Self {
        Self {
            stage: RevealStage::Hidden33,
            focal,
        }
    }

    /// Rebuild reveal state from a persisted snapshot.
    #[must_use]
    pub const fn resume(percentage: u8, focal: FocalPoint) -> Self {
        Self {
            stage: RevealStage::from_percentage(percentage),
            focal,
        }
    }

    /// Advance the disclosure for one guess outcome and return the new stage.
    pub fn apply_guess(&mut self, correct: bool) -> RevealStage {
        if correct {
            self.stage = RevealStage::FullyRevealed;
        } else {
            self.stage = self.stage.advanced();
        }
        self.stage
    }

    #[must_use]
    pub const fn stage(self) -> RevealStage {
        self.stage
    }

    #[must_use]
    pub const fn percentage(self) -> u8 {
        self.stage.percentage()
    }

    #[must_use]
    pub const fn focal(self) -> FocalPoint {
        self.focal
    }
}
