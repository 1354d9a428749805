//! Coordinate handling for survey data
//!
//! This module provides reference system definitions, point
//! conversion, unit reconciliation and distance calculations.

pub mod errors;
mod crs;
mod distance;
mod point;
mod projection;
mod transform;
mod unit;
mod tests;

// Re-export key types
pub use self::crs::{parse_epsg, ReferenceSystem, ReferenceSystemRegistry, SystemKind};
pub use self::distance::{assert_consistent_units, distance_2d, distance_3d};
pub use self::errors::{SurveyError, SurveyResult};
pub use self::point::SurveyPoint;
pub use self::projection::{LambertConformalConic, LccParameters};
pub use self::transform::CoordinateTransformer;
pub use self::unit::LinearUnit;
