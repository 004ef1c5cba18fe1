//! Great-circle distance and initial bearing between resort coordinates
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::numbers::round_f64_to_i64;

/// Mean Earth radius in kilometers (IUGG R1).
const EARTH_RADIUS_KM: f64 = 6371.0088;
const MILES_PER_KM: f64 = 0.621_371;
const FEET_PER_MILE: f64 = 5280.0;

/// Errors raised when a coordinate pair is outside the valid range.
#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("coordinate out of range: latitude {lat}, longitude {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },
}

/// Distance and initial compass heading from one point toward another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceAndBearing {
    pub distance_km: f64,
    pub distance_miles: f64,
    /// Degrees clockwise from north, normalized to [0, 360).
    pub bearing_deg: f64,
}

fn validate(lat: f64, lon: f64) -> Result<(), GeoError> {
    if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
        return Err(GeoError::InvalidCoordinate { lat, lon });
    }
    Ok(())
}

/// Compute the great-circle distance and initial bearing from `from` to `to`.
///
/// Distance is symmetric in its two endpoints and zero only for identical
/// points (within floating tolerance). The bearing is the initial heading of
/// the great-circle path; the reverse bearing differs by 180 degrees modulo
/// 360 except at identical or antipodal points.
///
/// # Errors
///
/// Returns [`GeoError::InvalidCoordinate`] when a latitude lies outside
/// [-90, 90] or a longitude outside [-180, 180].
pub fn distance_and_bearing(
    from_lat: f64,
    from_lon: f64,
    to_lat: f64,
    to_lon: f64,
) -> Result<DistanceAndBearing, GeoError> {
    validate(from_lat, from_lon)?;
    validate(to_lat, to_lon)?;

    let phi1 = from_lat.to_radians();
    let phi2 = to_lat.to_radians();
    let d_phi = (to_lat - from_lat).to_radians();
    let d_lambda = (to_lon - from_lon).to_radians();

    // Haversine; clamp guards against rounding pushing the radicand past 1.
    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let distance_km = 2.0 * EARTH_RADIUS_KM * a.min(1.0).sqrt().asin();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    let bearing_deg = y.atan2(x).to_degrees().rem_euclid(360.0);

    Ok(DistanceAndBearing {
        distance_km,
        distance_miles: distance_km * MILES_PER_KM,
        bearing_deg,
    })
}

/// Format a kilometer distance for display in the preferred unit system.
///
/// Below one major unit the minor unit is used, rounded to a whole number
/// ("830 m", "4049 ft"); otherwise the major unit with one decimal
/// ("12.3 km", "7.6 mi").
#[must_use]
pub fn format_distance(km: f64, use_metric: bool) -> String {
    if use_metric {
        if km < 1.0 {
            format!("{} m", round_f64_to_i64(km * 1000.0))
        } else {
            format!("{km:.1} km")
        }
    } else {
        let miles = km * MILES_PER_KM;
        if miles < 1.0 {
            format!("{} ft", round_f64_to_i64(miles * FEET_PER_MILE))
        } else {
            format!("{miles:.1} mi")
        }
    }
}

const COMPASS_ARROWS: [&str; 8] = ["⬆️", "↗️", "➡️", "↘️", "⬇️", "↙️", "⬅️", "↖️"];
const COMPASS_LABELS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

fn compass_sector(bearing_deg: f64) -> usize {
    let normalized = bearing_deg.rem_euclid(360.0);
    (((normalized + 22.5) / 45.0) as usize) % 8
}

/// Arrow emoji for the 8-wind compass sector containing `bearing_deg`.
#[must_use]
pub fn compass_arrow(bearing_deg: f64) -> &'static str {
    COMPASS_ARROWS[compass_sector(bearing_deg)]
}

/// Cardinal label for the 8-wind compass sector containing `bearing_deg`.
#[must_use]
pub fn compass_label(bearing_deg: f64) -> &'static str {
    COMPASS_LABELS[compass_sector(bearing_deg)]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn distance_is_symmetric() {
        let ab = distance_and_bearing(39.6403, -106.3742, 40.6374, -111.4783).unwrap();
        let ba = distance_and_bearing(40.6374, -111.4783, 39.6403, -106.3742).unwrap();
        assert!((ab.distance_km - ba.distance_km).abs() < EPS);
        assert!((ab.distance_miles - ba.distance_miles).abs() < EPS);
    }

    #[test]
    fn distance_is_zero_for_identical_points() {
        let result = distance_and_bearing(45.0, 6.5, 45.0, 6.5).unwrap();
        assert!(result.distance_km.abs() < EPS);
    }

    #[test]
    fn reverse_bearing_differs_by_half_turn() {
        // Exact on a shared meridian and on the equator, where the great
        // circle crosses no converging meridians.
        let ab = distance_and_bearing(46.0, 7.0, 47.5, 7.0).unwrap();
        let ba = distance_and_bearing(47.5, 7.0, 46.0, 7.0).unwrap();
        let delta = (ab.bearing_deg - ba.bearing_deg).rem_euclid(360.0);
        assert!((delta - 180.0).abs() < 1e-6);

        let eq = distance_and_bearing(0.0, 10.0, 0.0, 50.0).unwrap();
        let qe = distance_and_bearing(0.0, 50.0, 0.0, 10.0).unwrap();
        let delta = (eq.bearing_deg - qe.bearing_deg).rem_euclid(360.0);
        assert!((delta - 180.0).abs() < 1e-6);
    }

    #[test]
    fn bearing_stays_normalized() {
        // Heading west across the antimeridian.
        let result = distance_and_bearing(0.0, -179.0, 0.0, 179.0).unwrap();
        assert!(result.bearing_deg >= 0.0 && result.bearing_deg < 360.0);
        assert_eq!(compass_label(result.bearing_deg), "W");
    }

    #[test]
    fn equator_quarter_circumference() {
        let result = distance_and_bearing(0.0, 0.0, 0.0, 90.0).unwrap();
        let quarter = std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_KM;
        assert!((result.distance_km - quarter).abs() < 1e-6);
        assert!((result.bearing_deg - 90.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert_eq!(
            distance_and_bearing(91.0, 0.0, 0.0, 0.0),
            Err(GeoError::InvalidCoordinate { lat: 91.0, lon: 0.0 })
        );
        assert!(distance_and_bearing(0.0, 0.0, 0.0, 180.5).is_err());
        assert!(distance_and_bearing(f64::NAN, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn formats_metric_distances() {
        assert_eq!(format_distance(0.83, true), "830 m");
        assert_eq!(format_distance(12.34, true), "12.3 km");
        assert_eq!(format_distance(1.0, true), "1.0 km");
    }

    #[test]
    fn formats_imperial_distances() {
        // 0.5 km = 0.3107 mi = 1640 ft (rounded)
        assert_eq!(format_distance(0.5, false), "1640 ft");
        assert_eq!(format_distance(10.0, false), "6.2 mi");
    }

    #[test]
    fn compass_sectors_wrap() {
        assert_eq!(compass_arrow(0.0), "⬆️");
        assert_eq!(compass_arrow(44.9), "↗️");
        assert_eq!(compass_arrow(359.0), "⬆️");
        assert_eq!(compass_label(225.0), "SW");
    }
}
