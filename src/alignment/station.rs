//! Station notation formatting and parsing
//!
//! Civil-engineering stationing writes a linear measure of v feet as
//! `<hundreds>+<remainder>`, e.g. 32.67 -> "0+32.67" and
//! 10048.77 -> "100+48.77".

use lazy_static::lazy_static;
use regex::Regex;

use crate::coordinate::{SurveyError, SurveyResult};

lazy_static! {
    /// Matches "0+35.11", "300+00.00", also the zero-padded "0+035.11"
    /// style some IFC exports use
    static ref STATION_RE: Regex = Regex::new(r"^\s*(\d+)\+(\d+(?:\.\d+)?)\s*$").unwrap();
}

/// Format a station value in `<hundreds>+<remainder>` notation
///
/// The remainder is zero-padded to width 5 with two decimal places.
pub fn format_station(value: f64) -> String {
    let hundreds = (value / 100.0).floor() as i64;
    let remainder = value - (hundreds as f64) * 100.0;
    format!("{}+{:05.2}", hundreds, remainder)
}

/// Parse a station string like "3+00.00" back into a numeric value
///
/// Plain numeric strings are accepted too, so CLI arguments can pass
/// either form.
pub fn parse_station(text: &str) -> SurveyResult<f64> {
    if let Some(caps) = STATION_RE.captures(text) {
        // Both captures are guaranteed numeric by the pattern
        let hundreds: f64 = caps[1].parse().unwrap();
        let remainder: f64 = caps[2].parse().unwrap();
        return Ok(hundreds * 100.0 + remainder);
    }

    text.trim()
        .parse::<f64>()
        .map_err(|_| SurveyError::MalformedRecord(format!("Invalid station value: {}", text)))
}
