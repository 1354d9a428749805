//! Point reconciliation command
//!
//! Compares two tagged points by converting both into one common
//! reference system and printing the resulting offsets and distances.
//! This replaces a drawer full of one-off diagnostic scripts that each
//! restated the same coordinates under a different unit hypothesis.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::coordinate::{
    distance_2d, distance_3d, CoordinateTransformer, LinearUnit, ReferenceSystemRegistry,
    SurveyError, SurveyPoint, SurveyResult,
};
use crate::utils::logger::Logger;

const FT_US_PER_METER: f64 = 3937.0 / 1200.0;

/// Command for reconciling the distance between two points
pub struct DistanceCommand<'a> {
    point_a: SurveyPoint,
    point_b: SurveyPoint,
    /// System both points are converted into before measuring
    common_epsg: u32,
    registry: ReferenceSystemRegistry,
    logger: &'a Logger,
}

impl<'a> DistanceCommand<'a> {
    /// Create a new distance command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SurveyResult<Self> {
        let registry = super::registry_from_args(args)?;

        let epsg_a = super::epsg_from_args(args, "epsg-a")?.unwrap_or(2871);
        let epsg_b = super::epsg_from_args(args, "epsg-b")?.unwrap_or(2767);
        let common_epsg = super::epsg_from_args(args, "common-epsg")?.unwrap_or(epsg_b);

        let point_a = Self::parse_point(args, "point-a", epsg_a, &registry)?;
        let point_b = Self::parse_point(args, "point-b", epsg_b, &registry)?;

        Ok(DistanceCommand {
            point_a,
            point_b,
            common_epsg,
            registry,
            logger,
        })
    }

    fn parse_point(
        args: &ArgMatches,
        name: &str,
        epsg: u32,
        registry: &ReferenceSystemRegistry,
    ) -> SurveyResult<SurveyPoint> {
        let text = args.get_one::<String>(name).ok_or_else(|| {
            SurveyError::GenericError(format!("--distance requires --{}", name))
        })?;
        let (x, y, z) = parse_coordinate_text(text)?;
        let unit = registry.get(epsg)?.unit;
        Ok(match z {
            Some(z) => SurveyPoint::new_3d(x, y, z, epsg, unit),
            None => SurveyPoint::new(x, y, epsg, unit),
        })
    }

    fn report_point(&self, label: &str, original: &SurveyPoint, converted: &SurveyPoint) -> SurveyResult<()> {
        let source = self.registry.get(original.epsg)?;
        self.logger.log(&format!(
            "{}: ({:.3}, {:.3}) in {}",
            label,
            original.x,
            original.y,
            source.description()
        ))?;
        self.logger.log(&format!(
            "{}: ({:.3}, {:.3}) converted, {}",
            label, converted.x, converted.y, converted.unit
        ))?;
        Ok(())
    }
}

/// Parse "easting,northing" or "easting,northing,elevation"
fn parse_coordinate_text(text: &str) -> SurveyResult<(f64, f64, Option<f64>)> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return Err(SurveyError::GenericError(format!(
            "Coordinate must be 'easting,northing' or 'easting,northing,elevation': {}",
            text
        )));
    }

    let parse = |s: &str| -> SurveyResult<f64> {
        s.trim()
            .parse::<f64>()
            .map_err(|_| SurveyError::GenericError(format!("Invalid coordinate value: {}", s.trim())))
    };

    let x = parse(parts[0])?;
    let y = parse(parts[1])?;
    let z = if parts.len() == 3 { Some(parse(parts[2])?) } else { None };
    Ok((x, y, z))
}

impl<'a> Command for DistanceCommand<'a> {
    fn execute(&self) -> SurveyResult<()> {
        let common = self.registry.get(self.common_epsg)?;
        info!("Reconciling two points in {}", common.description());

        let transformer = CoordinateTransformer::new(&self.registry);
        let a = transformer.convert_point(&self.point_a, self.common_epsg)?;
        let b = transformer.convert_point(&self.point_b, self.common_epsg)?;

        self.logger.section("Point reconciliation")?;
        self.report_point("Point A", &self.point_a, &a)?;
        self.report_point("Point B", &self.point_b, &b)?;

        let dist = distance_2d(&a, &b)?;
        let dist_m = a.unit.convert(dist, LinearUnit::Meter);

        self.logger.section("Straight-line distance")?;
        self.logger.log(&format!("  dE = {:.3} {}", b.x - a.x, a.unit))?;
        self.logger.log(&format!("  dN = {:.3} {}", b.y - a.y, a.unit))?;

        println!("2D distance: {:.3} {}", dist, a.unit);
        println!("            = {:.3} m", dist_m);
        println!("            = {:.2} ftUS", dist_m * FT_US_PER_METER);

        if a.has_z() && b.has_z() {
            let dist3 = distance_3d(&a, &b)?;
            let dist3_m = a.unit.convert(dist3, LinearUnit::Meter);
            println!("3D distance: {:.3} {} = {:.3} m", dist3, a.unit, dist3_m);
        }

        // A figure quoted from plans may be chainage, not straight line
        println!("Note: distances measured along an alignment are reported by --stations");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_text() {
        let (x, y, z) = parse_coordinate_text("6829001.34,2187051.01").unwrap();
        assert!((x - 6_829_001.34).abs() < 1e-9);
        assert!((y - 2_187_051.01).abs() < 1e-9);
        assert!(z.is_none());

        let (_, _, z) = parse_coordinate_text("1.0, 2.0, 126.8").unwrap();
        assert!((z.unwrap() - 126.8).abs() < 1e-9);
    }

    #[test]
    fn test_parse_coordinate_text_rejects_bad_input() {
        assert!(parse_coordinate_text("1.0").is_err());
        assert!(parse_coordinate_text("1,2,3,4").is_err());
        assert!(parse_coordinate_text("east,north").is_err());
    }
}
