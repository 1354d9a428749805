//! IFC property extraction for wall station points
//!
//! The BIM export carries each retaining-wall station as a property
//! set with a "Start Point" value (a comma-joined coordinate triple)
//! and a "Station" value (formatted stationing text). This reader does
//! a named-property lookup over the STEP text; it deliberately does
//! not build the IFC property graph or touch any geometry.

use std::fs;

use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;

use crate::coordinate::{LinearUnit, SurveyPoint, SurveyResult};

use super::NamedPoint;

lazy_static! {
    /// IFCPROPERTYSINGLEVALUE('Name',...,IFCTEXT('value'),...)
    static ref PROPERTY_RE: Regex = Regex::new(
        r"IFCPROPERTYSINGLEVALUE\('([^']+)'[^;]*?IFC(?:TEXT|LABEL|IDENTIFIER)\('([^']*)'\)"
    ).unwrap();
}

/// Read wall station points from an IFC file by property lookup
///
/// Each "Start Point" property becomes one point; the nearest
/// "Station" property in the file supplies its name.
pub fn read_ifc_stations(path: &str, epsg: u32, unit: LinearUnit) -> SurveyResult<Vec<NamedPoint>> {
    let content = fs::read_to_string(path)?;

    // (byte offset, value) per property of interest
    let mut start_points: Vec<(usize, String)> = Vec::new();
    let mut stations: Vec<(usize, String)> = Vec::new();
    for caps in PROPERTY_RE.captures_iter(&content) {
        let offset = caps.get(0).map(|m| m.start()).unwrap_or(0);
        let name = &caps[1];
        let value = caps[2].to_string();
        match name {
            "Start Point" => start_points.push((offset, value)),
            "Station" => stations.push((offset, value)),
            _ => {}
        }
    }

    let mut points = Vec::new();
    for (offset, value) in &start_points {
        let (x, y, z) = match parse_triple(value) {
            Ok(t) => t,
            Err(e) => {
                warn!("Skipping malformed Start Point '{}' in {}: {}", value, path, e);
                continue;
            }
        };

        let name = match nearest_station(&stations, *offset) {
            Some(station) => format!("RW Sta {}", station),
            None => format!("RW point {}", points.len() + 1),
        };
        let description = format!("Start Point: {}", value);

        points.push(NamedPoint {
            name,
            description,
            point: SurveyPoint::new_3d(x, y, z, epsg, unit),
        });
    }

    info!("Extracted {} station points from {}", points.len(), path);
    Ok(points)
}

/// Parse a "x,y,z" coordinate triple
fn parse_triple(value: &str) -> Result<(f64, f64, f64), String> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() < 2 {
        return Err("expected at least two comma-separated values".to_string());
    }

    let parse = |s: &str| -> Result<f64, String> {
        s.trim().parse::<f64>().map_err(|_| format!("invalid number '{}'", s.trim()))
    };

    let x = parse(parts[0])?;
    let y = parse(parts[1])?;
    let z = if parts.len() > 2 { parse(parts[2])? } else { 0.0 };
    Ok((x, y, z))
}

/// Pick the Station property closest in the file to the given offset
///
/// Property sets keep their members adjacent in the STEP text, so file
/// distance is a reliable stand-in for graph membership.
fn nearest_station(stations: &[(usize, String)], offset: usize) -> Option<String> {
    stations
        .iter()
        .min_by_key(|(pos, _)| pos.abs_diff(offset))
        .map(|(_, value)| value.clone())
}
