//! Linear unit definitions and conversion factors
//!
//! The US Survey Foot and the International Foot differ by roughly
//! 2 parts per million. At state-plane coordinate magnitudes (millions
//! of feet) that difference compounds into multi-foot position errors,
//! so the unit of every coordinate is tracked explicitly rather than
//! assumed.

use std::fmt;

use super::errors::{SurveyError, SurveyResult};

/// A linear unit used for easting/northing/elevation values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearUnit {
    /// SI meter
    Meter,
    /// US Survey Foot, exactly 1200/3937 m
    UsSurveyFoot,
    /// International Foot, exactly 0.3048 m
    InternationalFoot,
}

impl LinearUnit {
    /// Multiplicative factor converting a value in this unit to meters
    pub fn to_meters(&self) -> f64 {
        match self {
            LinearUnit::Meter => 1.0,
            LinearUnit::UsSurveyFoot => 1200.0 / 3937.0,
            LinearUnit::InternationalFoot => 0.3048,
        }
    }

    /// Convert a scalar value from this unit into another unit
    pub fn convert(&self, value: f64, target: LinearUnit) -> f64 {
        if *self == target {
            return value;
        }
        value * self.to_meters() / target.to_meters()
    }

    /// Parse a unit from its registry/CLI name
    pub fn from_name(name: &str) -> SurveyResult<LinearUnit> {
        match name.trim().to_lowercase().as_str() {
            "m" | "meter" | "metre" => Ok(LinearUnit::Meter),
            "us_survey_foot" | "usft" | "ftus" => Ok(LinearUnit::UsSurveyFoot),
            "international_foot" | "ft" | "foot" => Ok(LinearUnit::InternationalFoot),
            other => Err(SurveyError::UnknownUnit(other.to_string())),
        }
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinearUnit::Meter => write!(f, "meter"),
            LinearUnit::UsSurveyFoot => write!(f, "US survey foot"),
            LinearUnit::InternationalFoot => write!(f, "international foot"),
        }
    }
}
