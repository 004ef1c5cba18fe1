//! Field-level comparison between a guessed resort and the daily target
use serde::{Deserialize, Serialize};

use crate::catalog::ResortMetadata;
use crate::geo::{DistanceAndBearing, distance_and_bearing};

/// Per-field comparison outcome.
///
/// `TooHigh` reads from the guess's perspective: the guessed value exceeds
/// the target's, so the answer is lower. `TooLow` is the inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldVerdict {
    Match,
    Mismatch,
    TooHigh,
    TooLow,
    Unknown,
}

impl FieldVerdict {
    #[must_use]
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Case-insensitive comparison of an optional string field.
/// Unknown when either side is absent.
#[must_use]
pub fn compare_text(guess: Option<&str>, actual: Option<&str>) -> FieldVerdict {
    match (guess, actual) {
        (Some(g), Some(a)) => {
            if g.eq_ignore_ascii_case(a) {
                FieldVerdict::Match
            } else {
                FieldVerdict::Mismatch
            }
        }
        _ => FieldVerdict::Unknown,
    }
}

/// Ordering comparison of an optional numeric field.
///
/// Unknown when either side is absent or the values do not order (NaN);
/// otherwise Match on equality, TooHigh when the guess exceeds the target,
/// TooLow when it falls short.
#[must_use]
pub fn compare_numeric<T: PartialOrd>(guess: Option<T>, actual: Option<T>) -> FieldVerdict {
    match (guess, actual) {
        (Some(g), Some(a)) => match g.partial_cmp(&a) {
            Some(std::cmp::Ordering::Equal) => FieldVerdict::Match,
            Some(std::cmp::Ordering::Greater) => FieldVerdict::TooHigh,
            Some(std::cmp::Ordering::Less) => FieldVerdict::TooLow,
            None => FieldVerdict::Unknown,
        },
        _ => FieldVerdict::Unknown,
    }
}

/// Exact slug equality. The only field with no partial-credit semantics.
#[must_use]
pub fn resort_identity_matches(guess_slug: &str, target_slug: &str) -> bool {
    guess_slug == target_slug
}

/// Structured per-field verdicts for one guess against the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessFeedback {
    pub slug: String,
    pub resort_match: bool,
    pub country: FieldVerdict,
    pub region: FieldVerdict,
    pub continent: FieldVerdict,
    pub acreage: FieldVerdict,
    pub lifts: FieldVerdict,
    pub parent_company: FieldVerdict,
    /// From the guessed resort toward the target. None for a correct guess,
    /// or when either side's coordinates are absent or invalid.
    pub distance: Option<DistanceAndBearing>,
}

/// Compare a guess against the target, field by field.
///
/// Pure function of its inputs: no hidden state, no randomness. A missing
/// metadata record on either side degrades the affected fields to
/// [`FieldVerdict::Unknown`]; it never fails.
#[must_use]
pub fn build_guess_feedback(
    guess_slug: &str,
    guess_meta: Option<&ResortMetadata>,
    target_slug: &str,
    target_meta: Option<&ResortMetadata>,
) -> GuessFeedback {
    let resort_match = resort_identity_matches(guess_slug, target_slug);

    let text = |field: fn(&ResortMetadata) -> Option<&str>| {
        compare_text(guess_meta.and_then(field), target_meta.and_then(field))
    };

    let distance = if resort_match {
        None
    } else {
        match (
            guess_meta.and_then(ResortMetadata::coordinates),
            target_meta.and_then(ResortMetadata::coordinates),
        ) {
            (Some((g_lat, g_lon)), Some((t_lat, t_lon))) => {
                distance_and_bearing(g_lat, g_lon, t_lat, t_lon).ok()
            }
            _ => None,
        }
    };

    GuessFeedback {
        slug: guess_slug.to_string(),
        resort_match,
        country: text(|m| m.country.as_deref()),
        region: text(|m| m.region.as_deref()),
        continent: text(|m| m.continent.as_deref()),
        acreage: compare_numeric(
            guess_meta.and_then(|m| m.skiable_acreage),
            target_meta.and_then(|m| m.skiable_acreage),
        ),
        lifts: compare_numeric(
            guess_meta.and_then(|m| m.lifts),
            target_meta.and_then(|m| m.lifts),
        ),
        parent_company: text(|m| m.parent_company.as_deref()),
        distance,
    }
}
