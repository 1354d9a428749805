pub mod coordinate;
pub mod alignment;
pub mod formats;
pub mod kml;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::SurveyKit;

pub use alignment::Alignment;
pub use coordinate::{
    CoordinateTransformer, LinearUnit, ReferenceSystemRegistry, SurveyError, SurveyPoint,
    SurveyResult,
};
pub use formats::InputFormat;
pub use kml::KmlDocument;
