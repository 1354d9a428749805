//! Survey point structure
//!
//! A point's numeric values are meaningless without knowing which
//! reference system and linear unit they are expressed in, so every
//! point carries both tags. Distance and stationing functions refuse
//! to mix points whose tags differ.

use super::unit::LinearUnit;

/// A 2D or 3D point tagged with its reference system and unit
#[derive(Debug, Clone, Copy)]
pub struct SurveyPoint {
    /// Easting (or longitude in geographic systems)
    pub x: f64,
    /// Northing (or latitude in geographic systems)
    pub y: f64,
    /// Elevation, optional
    pub z: Option<f64>,
    /// EPSG code of the reference system the coordinates are expressed in
    pub epsg: u32,
    /// Linear unit of the coordinate values
    pub unit: LinearUnit,
}

impl SurveyPoint {
    /// Create a new 2D point
    pub fn new(x: f64, y: f64, epsg: u32, unit: LinearUnit) -> Self {
        SurveyPoint { x, y, z: None, epsg, unit }
    }

    /// Create a new 3D point
    pub fn new_3d(x: f64, y: f64, z: f64, epsg: u32, unit: LinearUnit) -> Self {
        SurveyPoint { x, y, z: Some(z), epsg, unit }
    }

    /// Check if this point has an elevation
    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    /// Get the elevation, or 0.0 if not present
    pub fn z_value(&self) -> f64 {
        self.z.unwrap_or(0.0)
    }
}
