//! Reference system registry
//!
//! Reference systems are looked up by EPSG code in an explicit,
//! injectable registry rather than a hard-coded table, so tests can
//! substitute fixtures and callers can load additional zone
//! definitions from a TOML file. The bundled `crs_registry.toml`
//! covers WGS 84 and the California zone 2 state-plane realizations
//! that the survey data this tool was written for actually uses.

use std::collections::HashMap;
use std::fs;

use lazy_static::lazy_static;

use super::errors::{SurveyError, SurveyResult};
use super::projection::{LambertConformalConic, LccParameters};
use super::unit::LinearUnit;

lazy_static! {
    /// Registry parsed from the bundled definition file at startup
    static ref DEFAULT_REGISTRY: ReferenceSystemRegistry = {
        let content = include_str!("../../crs_registry.toml");
        ReferenceSystemRegistry::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse bundled CRS registry: {}", e);
            ReferenceSystemRegistry::empty()
        })
    };
}

/// What kind of coordinates a reference system expresses
#[derive(Debug, Clone, Copy)]
pub enum SystemKind {
    /// Longitude/latitude in decimal degrees
    Geographic,
    /// Grid easting/northing through a Lambert Conformal Conic projection
    Projected(LambertConformalConic),
}

/// A named, immutable coordinate reference system
#[derive(Debug, Clone)]
pub struct ReferenceSystem {
    /// EPSG code identifying the system
    pub epsg: u32,
    /// Human-readable name
    pub name: String,
    /// Geographic or projected
    pub kind: SystemKind,
    /// Native linear unit of the easting/northing axes.
    ///
    /// Geographic systems use degrees horizontally; their `unit` is the
    /// meter and applies to elevation values only.
    pub unit: LinearUnit,
}

impl ReferenceSystem {
    /// Get a description like "NAD83(HARN) / California zone 2 (EPSG:2767)"
    pub fn description(&self) -> String {
        format!("{} (EPSG:{})", self.name, self.epsg)
    }

    /// Check whether this is a geographic (degree-based) system
    pub fn is_geographic(&self) -> bool {
        matches!(self.kind, SystemKind::Geographic)
    }
}

/// Registry of reference systems keyed by EPSG code
#[derive(Debug, Clone)]
pub struct ReferenceSystemRegistry {
    systems: HashMap<u32, ReferenceSystem>,
}

impl ReferenceSystemRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        ReferenceSystemRegistry { systems: HashMap::new() }
    }

    /// Get the registry parsed from the bundled definition file
    pub fn bundled() -> &'static ReferenceSystemRegistry {
        &DEFAULT_REGISTRY
    }

    /// Insert a system, replacing any previous entry for its code
    pub fn insert(&mut self, system: ReferenceSystem) {
        self.systems.insert(system.epsg, system);
    }

    /// Look up a system by EPSG code
    pub fn get(&self, epsg: u32) -> SurveyResult<&ReferenceSystem> {
        self.systems
            .get(&epsg)
            .ok_or(SurveyError::UnsupportedSystem(epsg))
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Check whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Load a registry from a TOML definition file
    pub fn from_file(path: &str) -> SurveyResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a registry from a TOML string
    pub fn from_str(content: &str) -> SurveyResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| SurveyError::GenericError(format!("Failed to parse registry TOML: {}", e)))?;

        // Projections first so systems can reference them by name
        let mut projections: HashMap<String, LccParameters> = HashMap::new();
        if let Some(table) = toml_value.get("projections").and_then(|v| v.as_table()) {
            for (name, def) in table {
                let params = Self::parse_projection(name, def)?;
                projections.insert(name.clone(), params);
            }
        }

        let mut registry = ReferenceSystemRegistry::empty();
        if let Some(table) = toml_value.get("systems").and_then(|v| v.as_table()) {
            for (code_str, def) in table {
                let epsg = code_str.parse::<u32>().map_err(|_| {
                    SurveyError::GenericError(format!("Invalid EPSG code in registry: {}", code_str))
                })?;
                registry.insert(Self::parse_system(epsg, def, &projections)?);
            }
        }

        Ok(registry)
    }

    fn parse_projection(name: &str, def: &toml::Value) -> SurveyResult<LccParameters> {
        let kind = def.get("type").and_then(|v| v.as_str()).unwrap_or("");
        if kind != "lambert_conformal_conic_2sp" {
            return Err(SurveyError::GenericError(format!(
                "Projection '{}' has unsupported type '{}'",
                name, kind
            )));
        }

        let field = |key: &str| -> SurveyResult<f64> {
            def.get(key).and_then(|v| v.as_float()).ok_or_else(|| {
                SurveyError::GenericError(format!("Projection '{}' missing parameter '{}'", name, key))
            })
        };

        Ok(LccParameters {
            standard_parallel_1: field("standard_parallel_1")?,
            standard_parallel_2: field("standard_parallel_2")?,
            latitude_of_origin: field("latitude_of_origin")?,
            central_meridian: field("central_meridian")?,
            false_easting: field("false_easting")?,
            false_northing: field("false_northing")?,
        })
    }

    fn parse_system(
        epsg: u32,
        def: &toml::Value,
        projections: &HashMap<String, LccParameters>,
    ) -> SurveyResult<ReferenceSystem> {
        let name = def
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("Unnamed system")
            .to_string();

        match def.get("kind").and_then(|v| v.as_str()) {
            Some("geographic") => Ok(ReferenceSystem {
                epsg,
                name,
                kind: SystemKind::Geographic,
                unit: LinearUnit::Meter,
            }),
            Some("projected") => {
                let unit_name = def.get("unit").and_then(|v| v.as_str()).ok_or_else(|| {
                    SurveyError::GenericError(format!("System {} missing 'unit'", epsg))
                })?;
                let unit = LinearUnit::from_name(unit_name)?;

                let proj_name = def.get("projection").and_then(|v| v.as_str()).ok_or_else(|| {
                    SurveyError::GenericError(format!("System {} missing 'projection'", epsg))
                })?;
                let params = projections.get(proj_name).ok_or_else(|| {
                    SurveyError::GenericError(format!(
                        "System {} references unknown projection '{}'",
                        epsg, proj_name
                    ))
                })?;

                Ok(ReferenceSystem {
                    epsg,
                    name,
                    kind: SystemKind::Projected(LambertConformalConic::new(*params)),
                    unit,
                })
            }
            other => Err(SurveyError::GenericError(format!(
                "System {} has unsupported kind '{}'",
                epsg,
                other.unwrap_or("<missing>")
            ))),
        }
    }
}

/// Parse an EPSG code from a string like "EPSG:2871" or "2871"
pub fn parse_epsg(crs_str: &str) -> SurveyResult<u32> {
    let crs_str = crs_str.trim().to_uppercase();
    let digits = crs_str.strip_prefix("EPSG:").unwrap_or(&crs_str);
    digits
        .parse::<u32>()
        .map_err(|_| SurveyError::GenericError(format!("Invalid EPSG code: {}", crs_str)))
}
