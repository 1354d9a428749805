//! KML document builder
//!
//! Accumulates styled placemarks and writes one Document per output
//! file. Output is deterministic for the same input: features appear
//! in insertion order with fixed formatting.

use std::fs::File;
use std::io::Write;

use log::info;

use crate::coordinate::SurveyResult;
use crate::utils::string_utils::escape_xml;

const POINT_STYLE_ID: &str = "surveyPointStyle";
const LINE_STYLE_ID: &str = "alignmentStyle";

/// A KML document under construction
pub struct KmlDocument {
    name: String,
    description: String,
    /// Rendered placemark fragments, in insertion order
    placemarks: Vec<String>,
    point_count: usize,
    line_count: usize,
}

impl KmlDocument {
    /// Create a new document
    pub fn new(name: &str, description: &str) -> Self {
        KmlDocument {
            name: name.to_string(),
            description: description.to_string(),
            placemarks: Vec::new(),
            point_count: 0,
            line_count: 0,
        }
    }

    /// Add a point placemark
    ///
    /// # Arguments
    /// * `name` - Placemark name
    /// * `description` - Free-text description body
    /// * `lon`, `lat` - Position in decimal degrees
    /// * `altitude` - Altitude in meters
    pub fn add_point(&mut self, name: &str, description: &str, lon: f64, lat: f64, altitude: f64) {
        self.point_count += 1;
        self.placemarks.push(format!(
            "    <Placemark>\n\
             \x20     <name>{}</name>\n\
             \x20     <description>{}</description>\n\
             \x20     <styleUrl>#{}</styleUrl>\n\
             \x20     <Point>\n\
             \x20       <altitudeMode>clampToGround</altitudeMode>\n\
             \x20       <coordinates>{:.9},{:.9},{:.3}</coordinates>\n\
             \x20     </Point>\n\
             \x20   </Placemark>\n",
            escape_xml(name),
            escape_xml(description),
            POINT_STYLE_ID,
            lon,
            lat,
            altitude
        ));
    }

    /// Add a line placemark from (lon, lat, altitude) triples
    pub fn add_line(&mut self, name: &str, coords: &[(f64, f64, f64)]) {
        self.line_count += 1;

        let mut coord_text = String::new();
        for (lon, lat, alt) in coords {
            coord_text.push_str(&format!("{:.9},{:.9},{:.3} ", lon, lat, alt));
        }

        self.placemarks.push(format!(
            "    <Placemark>\n\
             \x20     <name>{}</name>\n\
             \x20     <styleUrl>#{}</styleUrl>\n\
             \x20     <LineString>\n\
             \x20       <tessellate>1</tessellate>\n\
             \x20       <altitudeMode>clampToGround</altitudeMode>\n\
             \x20       <coordinates>{}</coordinates>\n\
             \x20     </LineString>\n\
             \x20   </Placemark>\n",
            escape_xml(name),
            LINE_STYLE_ID,
            coord_text.trim_end()
        ));
    }

    /// Number of features added so far
    pub fn feature_count(&self) -> usize {
        self.point_count + self.line_count
    }

    /// Render the complete KML document
    pub fn to_kml(&self) -> String {
        let mut kml = String::new();
        kml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        kml.push_str("<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n");
        kml.push_str("  <Document>\n");
        kml.push_str(&format!("    <name>{}</name>\n", escape_xml(&self.name)));
        kml.push_str(&format!(
            "    <description>{}</description>\n",
            escape_xml(&self.description)
        ));

        kml.push_str(&format!(
            "    <Style id=\"{}\">\n\
             \x20     <IconStyle>\n\
             \x20       <color>ff0000ff</color>\n\
             \x20       <scale>1.2</scale>\n\
             \x20       <Icon>\n\
             \x20         <href>http://maps.google.com/mapfiles/kml/shapes/placemark_circle.png</href>\n\
             \x20       </Icon>\n\
             \x20     </IconStyle>\n\
             \x20     <LabelStyle>\n\
             \x20       <color>ffffffff</color>\n\
             \x20       <scale>0.9</scale>\n\
             \x20     </LabelStyle>\n\
             \x20   </Style>\n",
            POINT_STYLE_ID
        ));
        kml.push_str(&format!(
            "    <Style id=\"{}\">\n\
             \x20     <LineStyle>\n\
             \x20       <color>ff00ffff</color>\n\
             \x20       <width>3</width>\n\
             \x20     </LineStyle>\n\
             \x20   </Style>\n",
            LINE_STYLE_ID
        ));

        for placemark in &self.placemarks {
            kml.push_str(placemark);
        }

        kml.push_str("  </Document>\n");
        kml.push_str("</kml>\n");
        kml
    }

    /// Write the document to a file
    pub fn write_to(&self, path: &str) -> SurveyResult<()> {
        let mut file = File::create(path)?;
        file.write_all(self.to_kml().as_bytes())?;
        info!(
            "Wrote {} features ({} points, {} lines) to {}",
            self.feature_count(),
            self.point_count,
            self.line_count,
            path
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_structure() {
        let mut doc = KmlDocument::new("Control Points", "Survey control points");
        doc.add_point("CM 10.99", "Station: CM 10.99", -121.05, 39.16, 0.0);
        doc.add_line("RW Line 1", &[(-121.05, 39.16, 0.0), (-121.051, 39.161, 0.0)]);

        let kml = doc.to_kml();
        assert!(kml.starts_with("<?xml version=\"1.0\""));
        assert!(kml.contains("<name>Control Points</name>"));
        assert!(kml.contains("<name>CM 10.99</name>"));
        assert!(kml.contains("<LineString>"));
        assert!(kml.contains("clampToGround"));
        assert!(kml.ends_with("</kml>\n"));
        assert_eq!(doc.feature_count(), 2);
    }

    #[test]
    fn test_output_is_deterministic() {
        let build = || {
            let mut doc = KmlDocument::new("A", "B");
            doc.add_point("P", "D", -121.0, 39.0, 10.0);
            doc.to_kml()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_names_are_escaped() {
        let mut doc = KmlDocument::new("A & B", "");
        doc.add_point("P<1>", "", 0.0, 0.0, 0.0);
        let kml = doc.to_kml();
        assert!(kml.contains("A &amp; B"));
        assert!(kml.contains("P&lt;1&gt;"));
    }

    #[test]
    fn test_coordinates_are_lon_lat_order() {
        let mut doc = KmlDocument::new("A", "");
        doc.add_point("P", "", -121.123456789, 39.987654321, 12.5);
        let kml = doc.to_kml();
        assert!(kml.contains("<coordinates>-121.123456789,39.987654321,12.500</coordinates>"));
    }
}
