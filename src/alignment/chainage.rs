//! Cumulative-distance station assignment
//!
//! Stations are a running 2D distance sum along the alignment. An
//! earlier version of the workflow interpolated between a caller's
//! start and end station instead; whenever the claimed range
//! disagreed with the measured path length, every intermediate label
//! was silently rescaled to plausible-looking but wrong positions.
//! The cumulative form keeps the labels tied to the surveyed geometry
//! and surfaces a range disagreement as a warning instead of masking
//! it.

use log::warn;

use crate::coordinate::{distance_2d, SurveyError, SurveyResult, SurveyPoint};

/// Tolerance, in the alignment's native unit, beyond which a claimed
/// end station is reported as disagreeing with the measured length
pub const STATION_TOLERANCE: f64 = 0.1;

/// Assign a station to each alignment point by cumulative 2D distance
///
/// station[0] = start_station; station[i] = station[i-1] + the
/// horizontal distance from point i-1 to point i. All points must
/// share one reference system and unit.
pub fn assign_stations(points: &[SurveyPoint], start_station: f64) -> SurveyResult<Vec<f64>> {
    if points.is_empty() {
        return Err(SurveyError::GenericError(
            "Cannot assign stations to an empty alignment".to_string(),
        ));
    }

    let mut stations = Vec::with_capacity(points.len());
    stations.push(start_station);

    for i in 1..points.len() {
        let leg = distance_2d(&points[i - 1], &points[i])?;
        stations.push(stations[i - 1] + leg);
    }

    Ok(stations)
}

/// Compare assigned stations against a claimed end station
///
/// Returns the mismatch between the measured path length and the
/// claimed range, warning when it exceeds the tolerance. The stations
/// themselves are never rescaled.
pub fn check_station_range(stations: &[f64], end_station: f64, tolerance: f64) -> f64 {
    let measured = match (stations.first(), stations.last()) {
        (Some(first), Some(last)) => last - first,
        _ => return 0.0,
    };
    let claimed = end_station - stations[0];
    let mismatch = (measured - claimed).abs();

    if mismatch > tolerance {
        warn!(
            "Measured alignment length {:.2} disagrees with claimed station range {:.2} by {:.2}; \
             keeping measured stations",
            measured, claimed, mismatch
        );
    }

    mismatch
}

/// Distance measured along the alignment between two point indices
///
/// This is the along-alignment counterpart to the straight-line
/// `distance_2d`; the two are deliberately separate operations, since
/// design plans may quote either.
pub fn distance_along(points: &[SurveyPoint], from: usize, to: usize) -> SurveyResult<f64> {
    if from >= points.len() || to >= points.len() {
        return Err(SurveyError::GenericError(format!(
            "Point index out of range: {}..{} of {}",
            from,
            to,
            points.len()
        )));
    }

    let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
    let mut total = 0.0;
    for i in lo..hi {
        total += distance_2d(&points[i], &points[i + 1])?;
    }
    Ok(total)
}
