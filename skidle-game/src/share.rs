//! Shareable text export of the day's guesses
use crate::catalog::ResortMetadata;
use crate::geo::{compass_arrow, format_distance};
use crate::score::{FieldVerdict, build_guess_feedback};
use crate::state::GuessRecord;

/// Site link placed on the share header line.
pub const SHARE_URL: &str = "https://skidle.app";

const MARKER_MATCH: &str = "🟩";
const MARKER_MISMATCH: &str = "🟥";
const MARKER_TOO_HIGH: &str = "⬇️";
const MARKER_TOO_LOW: &str = "⬆️";
const MARKER_UNKNOWN: &str = "⬜";

const fn marker(verdict: FieldVerdict) -> &'static str {
    match verdict {
        FieldVerdict::Match => MARKER_MATCH,
        FieldVerdict::Mismatch => MARKER_MISMATCH,
        FieldVerdict::TooHigh => MARKER_TOO_HIGH,
        FieldVerdict::TooLow => MARKER_TOO_LOW,
        FieldVerdict::Unknown => MARKER_UNKNOWN,
    }
}

/// Render the emoji share text for a guess history.
///
/// One line per guess, fields in table order: resort identity,
/// country (skipped when `show_country` is off), region, continent, acreage,
/// lifts, parent company. Incorrect guesses with known coordinates get a
/// trailing distance-and-direction suffix. Absent fields render the unknown
/// marker; nothing here can fail.
#[must_use]
pub fn render_share_text(
    records: &[GuessRecord],
    target_slug: &str,
    target_meta: Option<&ResortMetadata>,
    puzzle_number: i64,
    date_label: &str,
    show_country: bool,
    use_metric: bool,
) -> String {
    let mut out = format!("{SHARE_URL} #{puzzle_number}\n{date_label}\n\n");

    for record in records {
        let feedback = build_guess_feedback(
            &record.slug,
            record.metadata.as_ref(),
            target_slug,
            target_meta,
        );

        let mut markers: Vec<&str> = Vec::with_capacity(7);
        markers.push(if feedback.resort_match {
            MARKER_MATCH
        } else {
            MARKER_MISMATCH
        });
        if show_country {
            markers.push(marker(feedback.country));
        }
        markers.push(marker(feedback.region));
        markers.push(marker(feedback.continent));
        markers.push(marker(feedback.acreage));
        markers.push(marker(feedback.lifts));
        markers.push(marker(feedback.parent_company));
        out.push_str(&markers.join(" "));

        if let Some(d) = feedback.distance {
            out.push(' ');
            out.push_str(&format_distance(d.distance_km, use_metric));
            out.push(' ');
            out.push_str(compass_arrow(d.bearing_deg));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(region: &str, lifts: u32, coords: Option<(f64, f64)>) -> ResortMetadata {
        ResortMetadata {
            name: "Resort".to_string(),
            country: Some("United States".to_string()),
            region: Some(region.to_string()),
            continent: Some("North America".to_string()),
            parent_company: Some("Vail Resorts".to_string()),
            skiable_acreage: Some(2000.0),
            lifts: Some(lifts),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            boxes: Vec::new(),
        }
    }

    #[test]
    fn correct_guess_line_has_mixed_markers_and_no_distance_suffix() {
        // Correct resort; country matches, region does not, lifts too low.
        let guess_meta = meta("Utah", 7, Some((40.0, -111.0)));
        let target_meta = meta("Colorado", 10, Some((39.5, -106.0)));
        let records = [GuessRecord {
            slug: "breck".to_string(),
            metadata: Some(guess_meta),
        }];

        let text = render_share_text(
            &records,
            "breck",
            Some(&target_meta),
            12,
            "March 12, 2024",
            true,
            true,
        );

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("https://skidle.app #12"));
        assert_eq!(lines.next(), Some("March 12, 2024"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("🟩 🟩 🟥 🟩 🟩 ⬆️ 🟩"));
        assert_eq!(lines.next(), None);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn incorrect_guess_appends_distance_and_direction() {
        let guess_meta = meta("Utah", 7, Some((40.0, -111.0)));
        let target_meta = meta("Colorado", 10, Some((40.0, -105.0)));
        let records = [GuessRecord {
            slug: "alta".to_string(),
            metadata: Some(guess_meta),
        }];

        let text = render_share_text(
            &records,
            "breck",
            Some(&target_meta),
            3,
            "March 3, 2024",
            true,
            true,
        );
        let guess_line = text.lines().nth(3).unwrap();
        assert!(guess_line.starts_with("🟥 "));
        assert!(guess_line.contains(" km "), "expected metric suffix: {guess_line}");
        assert!(guess_line.ends_with("➡️"), "eastbound arrow: {guess_line}");
    }

    #[test]
    fn hidden_country_column_is_skipped() {
        let records = [GuessRecord {
            slug: "alta".to_string(),
            metadata: None,
        }];
        let text = render_share_text(&records, "breck", None, 1, "March 1, 2024", false, false);
        // No metadata anywhere: identity mismatch then five unknowns.
        assert_eq!(text.lines().nth(3), Some("🟥 ⬜ ⬜ ⬜ ⬜ ⬜"));
    }

    #[test]
    fn missing_fields_degrade_to_unknown_markers() {
        let records = [GuessRecord {
            slug: "alta".to_string(),
            metadata: None,
        }];
        let text = render_share_text(&records, "breck", None, 1, "March 1, 2024", true, false);
        assert_eq!(text.lines().nth(3), Some("🟥 ⬜ ⬜ ⬜ ⬜ ⬜ ⬜"));
    }
}
