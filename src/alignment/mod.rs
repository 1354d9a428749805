//! Alignment geometry and stationing
//!
//! An alignment is the surveyed polyline of a linear feature such as a
//! retaining wall or road centerline. Stations (chainage) label
//! positions along it by cumulative distance from a defined zero point.

mod arc;
mod chainage;
mod station;
mod tests;

pub use self::arc::{arc_points_2d, interpolate_arc, Rotation};
pub use self::chainage::{assign_stations, check_station_range, distance_along, STATION_TOLERANCE};
pub use self::station::{format_station, parse_station};

use crate::coordinate::SurveyPoint;

/// An ordered polyline of survey points along increasing station
///
/// Consecutive points are not required to be equidistant.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Name of the feature, e.g. "Retaining Wall 1"
    pub name: String,
    /// Points in station order
    pub points: Vec<SurveyPoint>,
}

impl Alignment {
    /// Create a new alignment
    pub fn new(name: &str, points: Vec<SurveyPoint>) -> Self {
        Alignment {
            name: name.to_string(),
            points,
        }
    }

    /// Number of points in the alignment
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether the alignment has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
