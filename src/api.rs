use log::info;

use crate::alignment::assign_stations;
use crate::commands::ConvertCommand;
use crate::coordinate::{
    distance_2d, CoordinateTransformer, LinearUnit, ReferenceSystemRegistry, SurveyPoint,
    SurveyResult,
};
use crate::formats::InputFormat;
use crate::utils::logger::Logger;

/// Main interface to the surveykit library
pub struct SurveyKit {
    logger: Logger,
    registry: ReferenceSystemRegistry,
}

impl SurveyKit {
    /// Create a new SurveyKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "surveykit.log"
    ///
    /// # Returns
    /// A SurveyKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> SurveyResult<Self> {
        let log_path = log_file.unwrap_or("surveykit.log");
        let logger = Logger::new(log_path)?;
        Ok(SurveyKit {
            logger,
            registry: ReferenceSystemRegistry::bundled().clone(),
        })
    }

    /// Replace the reference system registry, e.g. with fixtures or
    /// additional zone definitions
    pub fn with_registry(mut self, registry: ReferenceSystemRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Convert a survey input file to KML
    ///
    /// # Arguments
    /// * `input_path` - Path to the input file
    /// * `output_path` - Path for the KML document
    /// * `format` - Optional format name; guessed from the extension if omitted
    /// * `source_epsg` - Optional source system; the format default if omitted
    /// * `target_epsg` - Optional target system, defaults to 4326
    ///
    /// # Returns
    /// The number of features written
    pub fn convert(
        &self,
        input_path: &str,
        output_path: &str,
        format: Option<&str>,
        source_epsg: Option<u32>,
        target_epsg: Option<u32>,
    ) -> SurveyResult<usize> {
        let format = match format {
            Some(name) => InputFormat::from_name(name)
                .ok_or_else(|| format!("Unknown input format: {}", name))?,
            None => InputFormat::from_path(std::path::Path::new(input_path))
                .ok_or_else(|| format!("Cannot determine format of {}", input_path))?,
        };

        let count = ConvertCommand::convert_file(
            input_path,
            output_path,
            format,
            source_epsg.unwrap_or_else(|| format.default_epsg()),
            target_epsg.unwrap_or(4326),
            &self.registry,
        )?;
        self.logger
            .log(&format!("{} -> {}: {} features", input_path, output_path, count))?;
        Ok(count)
    }

    /// Convert a point into another reference system
    pub fn convert_point(&self, point: &SurveyPoint, target_epsg: u32) -> SurveyResult<SurveyPoint> {
        CoordinateTransformer::new(&self.registry).convert_point(point, target_epsg)
    }

    /// Straight-line 2D distance between two tagged points, measured in
    /// the common system
    ///
    /// Both points are converted into `common_epsg` first; the result
    /// is in that system's native unit.
    pub fn distance(
        &self,
        point_a: &SurveyPoint,
        point_b: &SurveyPoint,
        common_epsg: u32,
    ) -> SurveyResult<f64> {
        let transformer = CoordinateTransformer::new(&self.registry);
        let a = transformer.convert_point(point_a, common_epsg)?;
        let b = transformer.convert_point(point_b, common_epsg)?;
        let dist = distance_2d(&a, &b)?;
        info!(
            "Distance in EPSG:{}: {:.3} {}",
            common_epsg, dist, a.unit
        );
        Ok(dist)
    }

    /// Assign stations along a polyline by cumulative distance
    pub fn stations(&self, points: &[SurveyPoint], start_station: f64) -> SurveyResult<Vec<f64>> {
        assign_stations(points, start_station)
    }

    /// Native linear unit of a registered system
    pub fn native_unit(&self, epsg: u32) -> SurveyResult<LinearUnit> {
        Ok(self.registry.get(epsg)?.unit)
    }
}
