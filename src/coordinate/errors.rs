//! Custom error types for survey coordinate processing

use std::fmt;
use std::io;

use super::unit::LinearUnit;

/// Survey-specific error types
#[derive(Debug)]
pub enum SurveyError {
    /// I/O error
    IoError(io::Error),
    /// Reference system not present in the registry
    UnsupportedSystem(u32),
    /// Unknown linear unit name
    UnknownUnit(String),
    /// Two points declare different linear units without an explicit conversion
    UnitMismatch(LinearUnit, LinearUnit),
    /// Two points declare different reference systems
    SystemMismatch(u32, u32),
    /// A record in an input file could not be parsed
    MalformedRecord(String),
    /// No usable input files were found
    NoInput(String),
    /// Point falls outside the projection's valid domain
    OutOfDomain(f64, f64),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for SurveyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyError::IoError(e) => write!(f, "I/O error: {}", e),
            SurveyError::UnsupportedSystem(epsg) => write!(f, "Unsupported reference system: EPSG:{}", epsg),
            SurveyError::UnknownUnit(name) => write!(f, "Unknown linear unit: {}", name),
            SurveyError::UnitMismatch(a, b) => write!(f, "Linear unit mismatch: {} vs {}", a, b),
            SurveyError::SystemMismatch(a, b) => write!(f, "Reference system mismatch: EPSG:{} vs EPSG:{}", a, b),
            SurveyError::MalformedRecord(msg) => write!(f, "Malformed record: {}", msg),
            SurveyError::NoInput(msg) => write!(f, "No input: {}", msg),
            SurveyError::OutOfDomain(x, y) => write!(f, "Point ({}, {}) outside projection domain", x, y),
            SurveyError::GenericError(msg) => write!(f, "Survey error: {}", msg),
        }
    }
}

impl std::error::Error for SurveyError {}

impl From<io::Error> for SurveyError {
    fn from(error: io::Error) -> Self {
        SurveyError::IoError(error)
    }
}

/// Result type for survey operations
pub type SurveyResult<T> = Result<T, SurveyError>;

impl From<String> for SurveyError {
    fn from(msg: String) -> Self {
        SurveyError::GenericError(msg)
    }
}
