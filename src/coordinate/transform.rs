//! Point conversion between reference systems
//!
//! The horizontal transform always routes through geographic
//! longitude/latitude: source grid -> lon/lat -> target grid. Elevation
//! never participates in the horizontal projection - projected 2D
//! systems carry no vertical datum, so the Z value is carried across
//! with a scalar unit conversion only. Running an elevation through a
//! 2D state-plane transform as if it were a third axis was one of the
//! bugs this tool exists to rule out.

use super::crs::{ReferenceSystemRegistry, SystemKind};
use super::errors::{SurveyError, SurveyResult};
use super::point::SurveyPoint;
use super::unit::LinearUnit;

/// Transformer for converting survey points between reference systems
pub struct CoordinateTransformer<'a> {
    registry: &'a ReferenceSystemRegistry,
}

impl<'a> CoordinateTransformer<'a> {
    /// Create a transformer over the given registry
    pub fn new(registry: &'a ReferenceSystemRegistry) -> Self {
        CoordinateTransformer { registry }
    }

    /// Convert a point into the target reference system
    ///
    /// The point's declared unit must match its system's native unit;
    /// a disagreement means the caller's bookkeeping is already wrong
    /// and is reported rather than silently coerced.
    pub fn convert_point(&self, point: &SurveyPoint, target_epsg: u32) -> SurveyResult<SurveyPoint> {
        let source = self.registry.get(point.epsg)?;
        let target = self.registry.get(target_epsg)?;

        if let SystemKind::Projected(_) = source.kind {
            if point.unit != source.unit {
                return Err(SurveyError::UnitMismatch(point.unit, source.unit));
            }
        }

        if source.epsg == target.epsg {
            return Ok(*point);
        }

        // Source grid -> geographic degrees
        let (lon, lat) = match &source.kind {
            SystemKind::Geographic => (point.x, point.y),
            SystemKind::Projected(projection) => {
                let easting_m = point.x * point.unit.to_meters();
                let northing_m = point.y * point.unit.to_meters();
                projection.inverse(easting_m, northing_m)?
            }
        };

        // Geographic degrees -> target grid, in the target's native unit
        let (x, y) = match &target.kind {
            SystemKind::Geographic => (lon, lat),
            SystemKind::Projected(projection) => {
                let (easting_m, northing_m) = projection.forward(lon, lat)?;
                (
                    easting_m / target.unit.to_meters(),
                    northing_m / target.unit.to_meters(),
                )
            }
        };

        // Elevation: explicit unit conversion only
        let z = point.z.map(|v| point.unit.convert(v, target.unit));

        Ok(SurveyPoint {
            x,
            y,
            z,
            epsg: target.epsg,
            unit: target.unit,
        })
    }

    /// Convert an elevation value between units without touching the
    /// horizontal coordinates
    pub fn convert_elevation(&self, value: f64, from: LinearUnit, to: LinearUnit) -> f64 {
        from.convert(value, to)
    }
}
