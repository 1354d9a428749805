//! Circular-arc interpolation
//!
//! LandXML curve elements describe horizontal curves by center,
//! radius, sweep angle and rotation direction. Converting one to a
//! polyline means sampling points along the arc from the start point's
//! angle.

use crate::coordinate::{LinearUnit, SurveyPoint};

/// Rotation direction of a curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Parse the LandXML `rot` attribute ("cw" / "ccw")
    pub fn from_attr(attr: &str) -> Rotation {
        if attr.trim().eq_ignore_ascii_case("cw") {
            Rotation::Clockwise
        } else {
            Rotation::CounterClockwise
        }
    }
}

/// Sample points along a circular arc
///
/// # Arguments
/// * `center` - Arc center
/// * `start` - Arc start point; its angle from the center anchors the sweep
/// * `radius` - Arc radius in the points' unit
/// * `delta_deg` - Sweep angle in degrees
/// * `rotation` - Sweep direction
/// * `num_points` - Number of segments; the result has num_points + 1 points
///
/// # Returns
/// Points from the start of the arc to its end, inclusive, tagged with
/// the center point's reference system and unit
pub fn interpolate_arc(
    center: &SurveyPoint,
    start: &SurveyPoint,
    radius: f64,
    delta_deg: f64,
    rotation: Rotation,
    num_points: usize,
) -> Vec<SurveyPoint> {
    let start_angle = (start.y - center.y).atan2(start.x - center.x);

    let mut delta = delta_deg.to_radians();
    if rotation == Rotation::Clockwise {
        delta = -delta;
    }

    let num_points = num_points.max(1);
    let mut points = Vec::with_capacity(num_points + 1);
    for i in 0..=num_points {
        let fraction = i as f64 / num_points as f64;
        let angle = start_angle + delta * fraction;
        points.push(SurveyPoint::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
            center.epsg,
            center.unit,
        ));
    }

    points
}

/// Convenience for untagged coordinate pairs used by format parsers
pub fn arc_points_2d(
    center: (f64, f64),
    start: (f64, f64),
    radius: f64,
    delta_deg: f64,
    rotation: Rotation,
    num_points: usize,
    epsg: u32,
    unit: LinearUnit,
) -> Vec<SurveyPoint> {
    let center_pt = SurveyPoint::new(center.0, center.1, epsg, unit);
    let start_pt = SurveyPoint::new(start.0, start.1, epsg, unit);
    interpolate_arc(&center_pt, &start_pt, radius, delta_deg, rotation, num_points)
}
