//! Survey input file readers
//!
//! Each reader is a best-effort parser: malformed records are skipped
//! with a warning and processing continues, so one bad row in a field
//! export doesn't abort a whole conversion. Missing files and unknown
//! formats stay fatal.

mod csv_points;
mod dxf;
mod ifc;
mod landxml;

pub use self::csv_points::read_control_points;
pub use self::dxf::read_dxf;
pub use self::ifc::read_ifc_stations;
pub use self::landxml::read_landxml;

use std::path::Path;

use crate::alignment::Alignment;
use crate::coordinate::SurveyPoint;

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Control-point table (station name, northing, easting, elevation)
    Csv,
    /// Drawing exchange file with POINT and polyline entities
    Dxf,
    /// Building-model exchange file with named property values
    Ifc,
    /// Civil alignment exchange file
    LandXml,
}

impl InputFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<InputFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(InputFormat::Csv),
            "dxf" => Some(InputFormat::Dxf),
            "ifc" => Some(InputFormat::Ifc),
            "xml" | "landxml" => Some(InputFormat::LandXml),
            _ => None,
        }
    }

    /// Parse a format from its CLI name
    pub fn from_name(name: &str) -> Option<InputFormat> {
        match name.trim().to_lowercase().as_str() {
            "csv" => Some(InputFormat::Csv),
            "dxf" => Some(InputFormat::Dxf),
            "ifc" => Some(InputFormat::Ifc),
            "landxml" | "xml" => Some(InputFormat::LandXml),
            _ => None,
        }
    }

    /// Default source reference system for this format
    ///
    /// The CSV, DXF and LandXML exports in this workflow are in the
    /// ftUS state-plane zone; IFC files declare meters as their base
    /// unit, so those default to the meter realization of the same
    /// zone.
    pub fn default_epsg(&self) -> u32 {
        match self {
            InputFormat::Ifc => 2767,
            _ => 2871,
        }
    }
}

/// Load a survey dataset from a file in the given format
///
/// # Arguments
/// * `path` - Input file path
/// * `format` - Which reader to use
/// * `epsg` - Reference system the file's coordinates are expressed in
/// * `unit` - Linear unit of the coordinate values
pub fn load_dataset(
    path: &str,
    format: InputFormat,
    epsg: u32,
    unit: crate::coordinate::LinearUnit,
) -> crate::coordinate::SurveyResult<SurveyDataset> {
    match format {
        InputFormat::Csv => Ok(SurveyDataset {
            points: read_control_points(path, epsg, unit)?,
            alignments: Vec::new(),
        }),
        InputFormat::Dxf => read_dxf(path, epsg, unit),
        InputFormat::Ifc => Ok(SurveyDataset {
            points: read_ifc_stations(path, epsg, unit)?,
            alignments: Vec::new(),
        }),
        InputFormat::LandXml => Ok(SurveyDataset {
            points: Vec::new(),
            alignments: read_landxml(path, epsg, unit)?,
        }),
    }
}

/// A point with display metadata attached
#[derive(Debug, Clone)]
pub struct NamedPoint {
    /// Display name, e.g. "CM 10.99" or "RW Sta 0+035.11"
    pub name: String,
    /// Extra description lines for the output document
    pub description: String,
    /// The tagged coordinate
    pub point: SurveyPoint,
}

/// Everything extracted from one input file
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    /// Standalone named points
    pub points: Vec<NamedPoint>,
    /// Polylines / alignments
    pub alignments: Vec<Alignment>,
}

impl SurveyDataset {
    /// Total number of features across points and alignments
    pub fn feature_count(&self) -> usize {
        self.points.len() + self.alignments.len()
    }
}
