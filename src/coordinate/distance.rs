//! Distance calculations with unit reconciliation
//!
//! Every distance here requires both operands to already share one
//! reference system and one linear unit. The guard is a hard error,
//! not a convention: comparing points across mismatched units is
//! exactly how the historical "2x" and "3.28x" distance discrepancies
//! were produced, and no function in this module will coerce units
//! behind the caller's back.

use super::errors::{SurveyError, SurveyResult};
use super::point::SurveyPoint;

/// Fail unless both points declare the same reference system and unit
pub fn assert_consistent_units(a: &SurveyPoint, b: &SurveyPoint) -> SurveyResult<()> {
    if a.epsg != b.epsg {
        return Err(SurveyError::SystemMismatch(a.epsg, b.epsg));
    }
    if a.unit != b.unit {
        return Err(SurveyError::UnitMismatch(a.unit, b.unit));
    }
    Ok(())
}

/// Horizontal Euclidean distance, elevation ignored
pub fn distance_2d(a: &SurveyPoint, b: &SurveyPoint) -> SurveyResult<f64> {
    assert_consistent_units(a, b)?;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    Ok((dx * dx + dy * dy).sqrt())
}

/// Euclidean distance including the elevation delta
///
/// Points without an elevation contribute 0.0 for their Z value.
pub fn distance_3d(a: &SurveyPoint, b: &SurveyPoint) -> SurveyResult<f64> {
    assert_consistent_units(a, b)?;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z_value() - a.z_value();
    Ok((dx * dx + dy * dy + dz * dz).sqrt())
}
