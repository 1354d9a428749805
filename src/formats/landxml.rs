//! LandXML alignment reader
//!
//! LandXML stores coordinates as "Northing Easting" text inside Start,
//! End and Center elements, so every pair is swapped to easting-first
//! before use - a reliable source of axis-order bugs when forgotten.
//! Curve elements carry radius, sweep angle and rotation direction and
//! are flattened into polyline points by circular-arc sampling.

use std::io::BufRead;
use std::path::Path;

use log::{info, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::alignment::{arc_points_2d, Alignment, Rotation};
use crate::coordinate::{LinearUnit, SurveyError, SurveyPoint, SurveyResult};

/// Number of segments used to flatten one curve
const ARC_SEGMENTS: usize = 50;

#[derive(Debug, Default, Clone)]
struct CurveAttrs {
    radius: Option<f64>,
    delta: Option<f64>,
    rotation: Option<String>,
}

/// Read alignments from a LandXML file
pub fn read_landxml(path: &str, epsg: u32, unit: LinearUnit) -> SurveyResult<Vec<Alignment>> {
    let mut reader = Reader::from_file(Path::new(path))
        .map_err(|e| SurveyError::GenericError(format!("Failed to open {}: {}", path, e)))?;
    reader.config_mut().trim_text(true);

    let alignments = parse_alignments(&mut reader, epsg, unit)?;
    info!("Read {} alignments from {}", alignments.len(), path);
    Ok(alignments)
}

fn parse_alignments<R: BufRead>(
    reader: &mut Reader<R>,
    epsg: u32,
    unit: LinearUnit,
) -> SurveyResult<Vec<Alignment>> {
    let mut alignments = Vec::new();
    let mut buf = Vec::new();

    // Current parse state
    let mut alignment_name: Option<String> = None;
    let mut points: Vec<SurveyPoint> = Vec::new();
    let mut in_curve = false;
    let mut curve = CurveAttrs::default();
    let mut curve_start: Option<(f64, f64)> = None;
    let mut curve_end: Option<(f64, f64)> = None;
    let mut curve_center: Option<(f64, f64)> = None;
    // Which of Start/End/Center we are inside, if any
    let mut coord_target: Option<&'static str> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| SurveyError::GenericError(format!("XML parse error: {}", e)))?;

        match event {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"Alignment" => {
                    alignment_name = Some(attr_string(e, b"name").unwrap_or_else(|| "Unknown".to_string()));
                    points.clear();
                }
                b"Curve" => {
                    in_curve = true;
                    curve = CurveAttrs {
                        radius: attr_string(e, b"radius").and_then(|v| v.parse().ok()),
                        delta: attr_string(e, b"delta").and_then(|v| v.parse().ok()),
                        rotation: attr_string(e, b"rot"),
                    };
                    curve_start = None;
                    curve_end = None;
                    curve_center = None;
                }
                b"Start" => coord_target = Some("start"),
                b"End" => coord_target = Some("end"),
                b"Center" => coord_target = Some("center"),
                _ => {}
            },
            Event::Text(ref t) => {
                if let Some(target) = coord_target {
                    let text = t
                        .unescape()
                        .map_err(|e| SurveyError::GenericError(format!("XML text error: {}", e)))?;
                    match parse_northing_easting(&text) {
                        Ok(pair) => {
                            if in_curve {
                                match target {
                                    "start" => curve_start = Some(pair),
                                    "end" => curve_end = Some(pair),
                                    _ => curve_center = Some(pair),
                                }
                            } else if target != "center" {
                                points.push(SurveyPoint::new(pair.0, pair.1, epsg, unit));
                            }
                        }
                        Err(e) => warn!("Skipping coordinate text '{}': {}", text, e),
                    }
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"Start" | b"End" | b"Center" => coord_target = None,
                b"Curve" => {
                    in_curve = false;
                    flush_curve(&curve, curve_start, curve_end, curve_center, &mut points, epsg, unit);
                }
                b"Alignment" => {
                    if let Some(name) = alignment_name.take() {
                        if points.is_empty() {
                            warn!("Alignment '{}' contains no coordinate geometry", name);
                        } else {
                            alignments.push(Alignment::new(&name, std::mem::take(&mut points)));
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(alignments)
}

/// Sample the finished curve into the point list
fn flush_curve(
    curve: &CurveAttrs,
    start: Option<(f64, f64)>,
    end: Option<(f64, f64)>,
    center: Option<(f64, f64)>,
    points: &mut Vec<SurveyPoint>,
    epsg: u32,
    unit: LinearUnit,
) {
    let (radius, delta) = match (curve.radius, curve.delta) {
        (Some(r), Some(d)) => (r, d),
        _ => {
            // Without radius and sweep we can still keep the endpoints
            warn!("Curve missing radius/delta attributes; keeping endpoints only");
            for pair in [start, end].into_iter().flatten() {
                points.push(SurveyPoint::new(pair.0, pair.1, epsg, unit));
            }
            return;
        }
    };

    let (start, center) = match (start, center) {
        (Some(s), Some(c)) => (s, c),
        _ => {
            warn!("Curve missing Start/Center coordinates; skipping");
            return;
        }
    };

    let rotation = curve
        .rotation
        .as_deref()
        .map(Rotation::from_attr)
        .unwrap_or(Rotation::CounterClockwise);

    points.extend(arc_points_2d(center, start, radius, delta, rotation, ARC_SEGMENTS, epsg, unit));
}

/// Parse "northing easting" text into an (easting, northing) pair
fn parse_northing_easting(text: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() < 2 {
        return Err("expected two whitespace-separated values".to_string());
    }
    let northing: f64 = parts[0].parse().map_err(|_| format!("invalid northing '{}'", parts[0]))?;
    let easting: f64 = parts[1].parse().map_err(|_| format!("invalid easting '{}'", parts[1]))?;
    // Swap to easting-first
    Ok((easting, northing))
}

fn attr_string(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes() {
        if let Ok(attr) = attr {
            if attr.key.local_name().as_ref() == key {
                return Some(String::from_utf8_lossy(&attr.value).into_owned());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<LandXML xmlns="http://www.landxml.org/schema/LandXML-1.2">
  <Alignments>
    <Alignment name="RW Line 1" length="30.0">
      <CoordGeom>
        <Line>
          <Start>2187000.00 6829000.00</Start>
          <End>2187000.00 6829030.00</End>
        </Line>
      </CoordGeom>
    </Alignment>
  </Alignments>
</LandXML>"#;

    #[test]
    fn test_axis_order_is_swapped() {
        let mut reader = Reader::from_str(SAMPLE);
        reader.config_mut().trim_text(true);
        let alignments = parse_alignments(&mut reader, 2871, LinearUnit::UsSurveyFoot).unwrap();

        assert_eq!(alignments.len(), 1);
        assert_eq!(alignments[0].name, "RW Line 1");
        let p = &alignments[0].points[0];
        // Text order is northing easting; stored point is easting-first
        assert!((p.x - 6_829_000.0).abs() < 1e-9);
        assert!((p.y - 2_187_000.0).abs() < 1e-9);
    }

    const CURVE_SAMPLE: &str = r#"<LandXML>
  <Alignment name="Curved">
    <CoordGeom>
      <Curve rot="ccw" radius="100.0" delta="90.0">
        <Start>0.0 100.0</Start>
        <Center>0.0 0.0</Center>
        <End>100.0 0.0</End>
      </Curve>
    </CoordGeom>
  </Alignment>
</LandXML>"#;

    #[test]
    fn test_curve_is_sampled() {
        let mut reader = Reader::from_str(CURVE_SAMPLE);
        reader.config_mut().trim_text(true);
        let alignments = parse_alignments(&mut reader, 2871, LinearUnit::UsSurveyFoot).unwrap();

        assert_eq!(alignments.len(), 1);
        let points = &alignments[0].points;
        assert_eq!(points.len(), ARC_SEGMENTS + 1);

        // Start is (easting 100, northing 0) after the axis swap; a 90
        // degree ccw sweep about the origin ends at (0, 100)
        assert!((points[0].x - 100.0).abs() < 1e-9);
        assert!((points[0].y - 0.0).abs() < 1e-9);
        let last = points.last().unwrap();
        assert!((last.x - 0.0).abs() < 1e-6);
        assert!((last.y - 100.0).abs() < 1e-6);

        // Every sample sits on the arc
        for p in points {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!((r - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_malformed_coordinate_text_is_skipped() {
        let xml = r#"<Alignment name="Bad"><CoordGeom><Line>
            <Start>not numbers</Start>
            <End>2187000.00 6829030.00</End>
        </Line></CoordGeom></Alignment>"#;
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        let alignments = parse_alignments(&mut reader, 2871, LinearUnit::UsSurveyFoot).unwrap();
        assert_eq!(alignments[0].points.len(), 1);
    }
}
