//! Daily puzzle rotation: day buckets, deterministic shuffle, focal point
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use twox_hash::XxHash64;

use crate::catalog::{CatalogError, Resort, ResortCatalog};

/// Time zone every player's puzzle day is anchored to.
pub const PUZZLE_TZ: Tz = chrono_tz::America::New_York;

/// Inclusive bounds for the reveal focal point, in percent of image size.
pub const FOCAL_MIN: u8 = 30;
pub const FOCAL_MAX: u8 = 70;

// Domain-separated seeds so the rotation order and the focal point draw from
// unrelated streams.
const SHUFFLE_SEED_DOMAIN: u64 = 0x534B_4944_4C45_5348; // "SKIDLESH"
const FOCAL_SEED_DOMAIN: u64 = 0x534B_4944_4C45_4650; // "SKIDLEFP"

fn epoch_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).expect("epoch literal is a valid date")
}

/// Whole calendar days from the epoch start date to the date `now_utc` falls
/// on when rendered in `tz`.
///
/// Monotone non-decreasing as `now_utc` advances and increments exactly at
/// local midnight in `tz`, including across DST transitions. Negative for
/// instants whose local date precedes the epoch.
#[must_use]
pub fn day_bucket(now_utc: DateTime<Utc>, tz: Tz) -> i64 {
    let local_date = now_utc.with_timezone(&tz).date_naive();
    local_date.signed_duration_since(epoch_start()).num_days()
}

/// One-based puzzle number for display and sharing; 1 on the epoch date.
#[must_use]
pub fn puzzle_number(now_utc: DateTime<Utc>) -> i64 {
    day_bucket(now_utc, PUZZLE_TZ) + 1
}

/// Shuffle a copy of `items` with a ChaCha20 stream seeded by `seed`.
///
/// The permutation is stable across processes and restarts: it depends only
/// on the `(items, seed)` pair, never on hash iteration order or ambient
/// randomness.
#[must_use]
pub fn deterministic_shuffle<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);
    shuffled
}

fn cycle_shuffle_seed(cycle: i64) -> u64 {
    XxHash64::oneshot(SHUFFLE_SEED_DOMAIN, &cycle.to_le_bytes())
}

/// The (x%, y%) point the revealed image region is centered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocalPoint {
    pub x: u8,
    pub y: u8,
}

/// Today's puzzle, derived entirely from the day bucket. Never persisted:
/// two calls within one bucket are bit-identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPuzzle {
    pub slug: String,
    pub focal: FocalPoint,
    pub bucket: i64,
}

/// Select today's target resort.
///
/// The catalog is shuffled once per full rotation cycle (seeded by the cycle
/// index) and walked one entry per day, so every resort appears exactly once
/// before the next reshuffle. Days straddling a cycle boundary may repeat a
/// recent resort; that is accepted, and the shuffle must not be reordered to
/// avoid it.
///
/// # Errors
///
/// Returns [`CatalogError::Empty`] when the catalog has no resorts.
pub fn daily_target(catalog: &ResortCatalog, now_utc: DateTime<Utc>) -> Result<Resort, CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }
    let bucket = day_bucket(now_utc, PUZZLE_TZ);
    let len = catalog.len() as i64;
    let cycle = bucket.div_euclid(len);
    let index = usize::try_from(bucket.rem_euclid(len)).unwrap_or(0);

    let resorts: Vec<Resort> = catalog.iter().cloned().collect();
    let order = deterministic_shuffle(&resorts, cycle_shuffle_seed(cycle));
    Ok(order[index].clone())
}

/// Focal point for a specific day bucket; each axis lands in
/// [`FOCAL_MIN`, `FOCAL_MAX`] inclusive.
#[must_use]
pub fn focal_point_for_bucket(bucket: i64) -> FocalPoint {
    let seed = XxHash64::oneshot(FOCAL_SEED_DOMAIN, &bucket.to_le_bytes());
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    FocalPoint {
        x: rng.gen_range(FOCAL_MIN..=FOCAL_MAX),
        y: rng.gen_range(FOCAL_MIN..=FOCAL_MAX),
    }
}

/// Reproducible reveal focal point for the current day.
#[must_use]
pub fn daily_focal_point(now_utc: DateTime<Utc>) -> FocalPoint {
    focal_point_for_bucket(day_bucket(now_utc, PUZZLE_TZ))
}

/// Derive the complete daily puzzle for `now_utc`.
///
/// # Errors
///
/// Returns [`CatalogError::Empty`] when the catalog has no resorts.
pub fn daily_puzzle(
    catalog: &ResortCatalog,
    now_utc: DateTime<Utc>,
) -> Result<DailyPuzzle, CatalogError> {
    let target = daily_target(catalog, now_utc)?;
    let bucket = day_bucket(now_utc, PUZZLE_TZ);
    Ok(DailyPuzzle {
        slug: target.slug,
        focal: focal_point_for_bucket(bucket),
        bucket,
    })
}

/// Time remaining until the next puzzle, split for the countdown display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetCountdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

fn next_local_midnight(now_utc: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now_utc
        .with_timezone(&PUZZLE_TZ)
        .date_naive()
        .succ_opt()
        .expect("date arithmetic stays within chrono range");
    let midnight = tomorrow.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    // The puzzle zone shifts DST at 02:00, so midnight always exists there;
    // the fallback covers zones whose spring-forward gap crosses midnight.
    PUZZLE_TZ
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            PUZZLE_TZ
                .from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .expect("next local midnight is representable")
        .with_timezone(&Utc)
}

/// Countdown from `now_utc` to the next local midnight in the puzzle zone.
#[must_use]
pub fn time_until_reset(now_utc: DateTime<Utc>) -> ResetCountdown {
    let secs = next_local_midnight(now_utc)
        .signed_duration_since(now_utc)
        .num_seconds()
        .max(0);
    ResetCountdown {
        hours: secs / 3600,
        minutes: (secs % 3600) / 60,
        seconds: secs % 60,
    }
}

/// Human-readable label of a bucket's calendar date, e.g. "March 12, 2024".
#[must_use]
pub fn date_label_for_bucket(bucket: i64) -> String {
    (epoch_start() + Duration::days(bucket))
        .format("%B %-d, %Y")
        .to_string()
}

/// Human-readable label of today's date in the puzzle zone.
#[must_use]
pub fn date_label(now_utc: DateTime<Utc>) -> String {
    date_label_for_bucket(day_bucket(now_utc, PUZZLE_TZ))
}
