//! Session controller: resume-or-fresh startup, guess handling, rollover
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::catalog::{
    CatalogError, ResortCatalog, ResortMetadata, full_map_url, redacted_map_url,
};
use crate::daily::{self, FocalPoint, PUZZLE_TZ, ResetCountdown};
use crate::reveal::RevealState;
use crate::score::{GuessFeedback, build_guess_feedback};
use crate::settings::Settings;
use crate::share::render_share_text;
use crate::state::{GameSnapshot, GuessRecord};
use crate::store::GameStateStore;
use crate::{KeyValuePort, MetadataLoader};

/// Errors raised by the session controller for genuinely invalid input.
/// Normal gameplay (wrong guesses, rollovers, missing metadata) never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("resort {0:?} is not in the catalog")]
    UnknownResort(String),
    #[error("today's puzzle is already solved")]
    AlreadySolved,
}

/// What a single submitted guess produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessOutcome {
    pub correct: bool,
    pub feedback: GuessFeedback,
    pub reveal_percentage: u8,
}

/// One player's game for one puzzle day.
///
/// Owns the mutable session state and composes daily selection, scoring,
/// reveal, and persistence. The key-value port and metadata loader are
/// injected so hosts and tests supply their own.
pub struct GameSession<L, P>
where
    L: MetadataLoader,
    P: KeyValuePort,
{
    catalog: ResortCatalog,
    loader: L,
    store: GameStateStore<P>,
    snapshot: GameSnapshot,
    reveal: RevealState,
    target_meta: Option<ResortMetadata>,
    bucket: i64,
}

impl<L, P> GameSession<L, P>
where
    L: MetadataLoader,
    P: KeyValuePort,
{
    /// Start a session for the current moment.
    ///
    /// Resumes the persisted snapshot when it was written on the same puzzle
    /// day; otherwise clears any stale snapshot and derives today's puzzle.
    /// The fresh puzzle is not persisted until the first guess.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] when the catalog has no resorts.
    pub fn start(
        catalog: ResortCatalog,
        loader: L,
        port: P,
        now: DateTime<Utc>,
    ) -> Result<Self, CatalogError> {
        let store = GameStateStore::new(port);
        let bucket = daily::day_bucket(now, PUZZLE_TZ);

        let same_day = store
            .last_played()
            .is_some_and(|ts| daily::day_bucket(ts, PUZZLE_TZ) >= bucket);
        let resumed = if same_day { store.load() } else { None };

        let snapshot = match resumed {
            Some(snapshot) => snapshot,
            None => {
                store.clear();
                let puzzle = daily::daily_puzzle(&catalog, now)?;
                GameSnapshot::fresh(puzzle.slug, puzzle.focal)
            }
        };

        let reveal = RevealState::resume(snapshot.reveal_percentage, snapshot.focal);
        let target_meta = loader.load_metadata(&snapshot.target).ok();

        Ok(Self {
            catalog,
            loader,
            store,
            snapshot,
            reveal,
            target_meta,
            bucket,
        })
    }

    /// Submit one guess and persist the updated session.
    ///
    /// A metadata-load failure for the guessed resort is tolerated: the guess
    /// is recorded without metadata and its fields read as unknown. A
    /// persistence failure is ignored; game state is recoverable by starting
    /// fresh.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadySolved`] once the puzzle is solved and
    /// [`SessionError::UnknownResort`] for a slug outside the catalog.
    pub fn submit_guess(
        &mut self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<GuessOutcome, SessionError> {
        if self.snapshot.guessed_correctly {
            return Err(SessionError::AlreadySolved);
        }
        if !self.catalog.contains(slug) {
            return Err(SessionError::UnknownResort(slug.to_string()));
        }

        let metadata = self.loader.load_metadata(slug).ok();
        let feedback = build_guess_feedback(
            slug,
            metadata.as_ref(),
            &self.snapshot.target,
            self.target_meta.as_ref(),
        );
        let correct = feedback.resort_match;

        self.snapshot.guessed.push(slug.to_string());
        self.snapshot.records.push(GuessRecord {
            slug: slug.to_string(),
            metadata,
        });
        self.reveal.apply_guess(correct);
        self.snapshot.reveal_percentage = self.reveal.percentage();
        if correct {
            self.snapshot.guessed_correctly = true;
        }

        let _ = self.store.save(&self.snapshot, now);

        Ok(GuessOutcome {
            correct,
            feedback,
            reveal_percentage: self.snapshot.reveal_percentage,
        })
    }

    /// Whether at least one puzzle-day boundary has passed since this session
    /// was initialized. Polled by the host's coarse timer.
    #[must_use]
    pub fn needs_rollover(&self, now: DateTime<Utc>) -> bool {
        daily::day_bucket(now, PUZZLE_TZ) > self.bucket
    }

    /// Discard the finished day and derive the new day's puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] when the catalog has no resorts.
    pub fn reinitialize(&mut self, now: DateTime<Utc>) -> Result<(), CatalogError> {
        self.store.clear();
        let puzzle = daily::daily_puzzle(&self.catalog, now)?;
        self.bucket = puzzle.bucket;
        self.snapshot = GameSnapshot::fresh(puzzle.slug.clone(), puzzle.focal);
        self.reveal = RevealState::new(puzzle.focal);
        self.target_meta = self.loader.load_metadata(&puzzle.slug).ok();
        Ok(())
    }

    /// Ordered guess history with per-field verdicts, oldest first.
    #[must_use]
    pub fn feedback_history(&self) -> Vec<GuessFeedback> {
        self.snapshot
            .records
            .iter()
            .map(|record| {
                build_guess_feedback(
                    &record.slug,
                    record.metadata.as_ref(),
                    &self.snapshot.target,
                    self.target_meta.as_ref(),
                )
            })
            .collect()
    }

    /// The share text for the current guess history.
    #[must_use]
    pub fn share_text(&self, settings: Settings) -> String {
        render_share_text(
            &self.snapshot.records,
            &self.snapshot.target,
            self.target_meta.as_ref(),
            self.puzzle_number(),
            &daily::date_label_for_bucket(self.bucket),
            settings.show_country_names,
            settings.use_metric,
        )
    }

    /// Target metadata, disclosed only once the puzzle is solved.
    #[must_use]
    pub fn solved_metadata(&self) -> Option<&ResortMetadata> {
        if self.snapshot.guessed_correctly {
            self.target_meta.as_ref()
        } else {
            None
        }
    }

    /// URL of the redacted trail map for the current target.
    #[must_use]
    pub fn redacted_image_url(&self) -> String {
        redacted_map_url(&self.snapshot.target)
    }

    /// URL of the full trail map for the current target.
    #[must_use]
    pub fn full_image_url(&self) -> String {
        full_map_url(&self.snapshot.target)
    }

    #[must_use]
    pub fn guesses(&self) -> &[GuessRecord] {
        &self.snapshot.records
    }

    #[must_use]
    pub fn guessed_correctly(&self) -> bool {
        self.snapshot.guessed_correctly
    }

    #[must_use]
    pub fn reveal_percentage(&self) -> u8 {
        self.reveal.percentage()
    }

    #[must_use]
    pub fn focal_point(&self) -> FocalPoint {
        self.reveal.focal()
    }

    #[must_use]
    pub const fn puzzle_number(&self) -> i64 {
        self.bucket + 1
    }

    /// Countdown to the next puzzle for the host's once-per-second display.
    #[must_use]
    pub fn countdown(&self, now: DateTime<Utc>) -> ResetCountdown {
        daily::time_until_reset(now)
    }
}
