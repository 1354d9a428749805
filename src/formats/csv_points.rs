//! Control-point CSV reader
//!
//! The survey crew's export has a header row and fixed column
//! positions: station name in column 1, northing in 3, easting in 4,
//! elevation in 5 (zero-based). Rows that don't parse are skipped
//! with a warning.

use std::fs::File;
use std::io::{BufRead, BufReader};

use log::{info, warn};

use crate::coordinate::{LinearUnit, SurveyPoint, SurveyResult};

use super::NamedPoint;

const COL_NAME: usize = 1;
const COL_NORTHING: usize = 3;
const COL_EASTING: usize = 4;
const COL_ELEVATION: usize = 5;

/// Read control points from a CSV file
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `epsg` - Reference system the coordinates are expressed in
/// * `unit` - Linear unit of the coordinate values
///
/// # Returns
/// The points that parsed successfully
pub fn read_control_points(path: &str, epsg: u32, unit: LinearUnit) -> SurveyResult<Vec<NamedPoint>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut points = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line_no == 0 {
            // Header row
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(&line, epsg, unit) {
            Ok(point) => points.push(point),
            Err(e) => warn!("Skipping row {} of {}: {}", line_no + 1, path, e),
        }
    }

    info!("Read {} control points from {}", points.len(), path);
    Ok(points)
}

fn parse_row(line: &str, epsg: u32, unit: LinearUnit) -> Result<NamedPoint, String> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() <= COL_ELEVATION {
        return Err(format!("expected at least {} columns, got {}", COL_ELEVATION + 1, fields.len()));
    }

    let name = fields[COL_NAME].trim().to_string();
    let northing = parse_field(fields[COL_NORTHING], "northing")?;
    let easting = parse_field(fields[COL_EASTING], "easting")?;
    let elevation = parse_field(fields[COL_ELEVATION], "elevation")?;

    let description = format!(
        "Station: {}\nEasting: {:.3}\nNorthing: {:.3}\nElevation: {:.3}",
        name, easting, northing, elevation
    );

    Ok(NamedPoint {
        name,
        description,
        point: SurveyPoint::new_3d(easting, northing, elevation, epsg, unit),
    })
}

fn parse_field(text: &str, what: &str) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid {} value '{}'", what, text.trim()))
}
