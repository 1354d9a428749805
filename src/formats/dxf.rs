//! Minimal DXF reader for survey points and polylines
//!
//! DXF text files are a flat stream of group-code / value line pairs.
//! This reader walks the ENTITIES section and picks up POINT entities
//! (codes 10/20/30, layer in 8) and LWPOLYLINE / POLYLINE-VERTEX
//! vertex chains. Everything else in the drawing is ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};

use log::{info, warn};

use crate::alignment::Alignment;
use crate::coordinate::{LinearUnit, SurveyPoint, SurveyResult};

use super::{NamedPoint, SurveyDataset};

#[derive(Debug, PartialEq)]
enum EntityKind {
    None,
    Point,
    LwPolyline,
    Polyline,
    Vertex,
    Other,
}

struct DxfParser {
    epsg: u32,
    unit: LinearUnit,
    dataset: SurveyDataset,
    in_entities: bool,
    entity: EntityKind,
    layer: String,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    /// Accumulated vertices of the polyline being read
    vertices: Vec<SurveyPoint>,
    /// Layer of the enclosing POLYLINE while reading VERTEX entities
    polyline_layer: String,
    point_count: usize,
}

/// Read points and polylines from a DXF file
pub fn read_dxf(path: &str, epsg: u32, unit: LinearUnit) -> SurveyResult<SurveyDataset> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut parser = DxfParser {
        epsg,
        unit,
        dataset: SurveyDataset::default(),
        in_entities: false,
        entity: EntityKind::None,
        layer: String::from("0"),
        x: None,
        y: None,
        z: None,
        vertices: Vec::new(),
        polyline_layer: String::from("0"),
        point_count: 0,
    };

    let mut lines = reader.lines();
    loop {
        let code_line = match lines.next() {
            Some(l) => l?,
            None => break,
        };
        let value_line = match lines.next() {
            Some(l) => l?,
            None => {
                warn!("DXF file {} ends with an unpaired group code", path);
                break;
            }
        };

        let code: i32 = match code_line.trim().parse() {
            Ok(c) => c,
            Err(_) => {
                warn!("Skipping non-numeric group code '{}' in {}", code_line.trim(), path);
                continue;
            }
        };
        parser.handle_pair(code, value_line.trim());
    }
    parser.flush_entity();
    parser.flush_polyline();

    info!(
        "Read {} points and {} polylines from {}",
        parser.dataset.points.len(),
        parser.dataset.alignments.len(),
        path
    );
    Ok(parser.dataset)
}

impl DxfParser {
    fn handle_pair(&mut self, code: i32, value: &str) {
        if code == 0 {
            self.flush_entity();
            match value {
                "SECTION" => {}
                "ENDSEC" => {
                    self.flush_polyline();
                    self.in_entities = false;
                }
                "POINT" if self.in_entities => self.entity = EntityKind::Point,
                "LWPOLYLINE" if self.in_entities => {
                    self.flush_polyline();
                    self.entity = EntityKind::LwPolyline;
                }
                "POLYLINE" if self.in_entities => {
                    self.flush_polyline();
                    self.entity = EntityKind::Polyline;
                }
                "VERTEX" if self.in_entities => self.entity = EntityKind::Vertex,
                "SEQEND" if self.in_entities => {
                    self.flush_polyline();
                    self.entity = EntityKind::None;
                }
                _ if self.in_entities => {
                    self.flush_polyline();
                    self.entity = EntityKind::Other;
                }
                _ => self.entity = EntityKind::None,
            }
            return;
        }

        match (code, &self.entity) {
            (2, _) if value == "ENTITIES" => self.in_entities = true,
            (8, EntityKind::Point) | (8, EntityKind::LwPolyline) => {
                self.layer = value.to_string();
            }
            (8, EntityKind::Polyline) => self.polyline_layer = value.to_string(),
            (10, EntityKind::Point) | (10, EntityKind::Vertex) => self.x = value.parse().ok(),
            (20, EntityKind::Point) | (20, EntityKind::Vertex) => self.y = value.parse().ok(),
            (30, EntityKind::Point) | (30, EntityKind::Vertex) => self.z = value.parse().ok(),
            // LWPOLYLINE repeats code 10/20 per vertex
            (10, EntityKind::LwPolyline) => {
                self.x = value.parse().ok();
            }
            (20, EntityKind::LwPolyline) => {
                self.y = value.parse().ok();
                if let (Some(x), Some(y)) = (self.x.take(), self.y.take()) {
                    self.vertices.push(SurveyPoint::new(x, y, self.epsg, self.unit));
                }
            }
            _ => {}
        }
    }

    /// Finish the entity being read, emitting a point or vertex
    fn flush_entity(&mut self) {
        match self.entity {
            EntityKind::Point => {
                if let (Some(x), Some(y)) = (self.x, self.y) {
                    self.point_count += 1;
                    let point = match self.z {
                        Some(z) => SurveyPoint::new_3d(x, y, z, self.epsg, self.unit),
                        None => SurveyPoint::new(x, y, self.epsg, self.unit),
                    };
                    self.dataset.points.push(NamedPoint {
                        name: format!("Point {}", self.point_count),
                        description: format!("Layer: {}", self.layer),
                        point,
                    });
                } else {
                    warn!("Discarding POINT entity without coordinates");
                }
            }
            EntityKind::Vertex => {
                if let (Some(x), Some(y)) = (self.x, self.y) {
                    let point = match self.z {
                        Some(z) => SurveyPoint::new_3d(x, y, z, self.epsg, self.unit),
                        None => SurveyPoint::new(x, y, self.epsg, self.unit),
                    };
                    self.vertices.push(point);
                }
            }
            _ => {}
        }
        self.x = None;
        self.y = None;
        self.z = None;
    }

    /// Finish the polyline being accumulated, if any
    fn flush_polyline(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        let layer = if self.entity == EntityKind::LwPolyline {
            self.layer.clone()
        } else {
            self.polyline_layer.clone()
        };
        let name = format!(
            "{} polyline {}",
            layer,
            self.dataset.alignments.len() + 1
        );
        let vertices = std::mem::take(&mut self.vertices);
        self.dataset.alignments.push(Alignment::new(&name, vertices));
    }
}
