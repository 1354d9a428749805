//! KML document generation
//!
//! Writes the open geospatial markup consumed by Google Earth and
//! similar viewers. Coordinates are always emitted as
//! longitude,latitude,altitude triples in decimal degrees.

mod writer;

pub use self::writer::KmlDocument;
