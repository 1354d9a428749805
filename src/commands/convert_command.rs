//! KML conversion command
//!
//! This module implements the default command: read one or more survey
//! input files, reproject their coordinates into the target reference
//! system, and write one KML document per input.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::coordinate::{
    CoordinateTransformer, ReferenceSystemRegistry, SurveyError, SurveyResult,
};
use crate::formats::{load_dataset, InputFormat, SurveyDataset};
use crate::kml::KmlDocument;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command for converting survey files to KML
pub struct ConvertCommand<'a> {
    /// Input file paths; empty means auto-discover
    inputs: Vec<String>,
    /// Explicit output path, only honored for a single input
    output: Option<String>,
    /// Format override; otherwise guessed per file from the extension
    format: Option<InputFormat>,
    /// Source system override; otherwise the format's default
    source_epsg: Option<u32>,
    /// Target system for the output document
    target_epsg: u32,
    registry: ReferenceSystemRegistry,
    logger: &'a Logger,
}

impl<'a> ConvertCommand<'a> {
    /// Create a new convert command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SurveyResult<Self> {
        let inputs: Vec<String> = args
            .get_many::<String>("input")
            .map(|v| v.cloned().collect())
            .unwrap_or_default();

        let format = match args.get_one::<String>("format") {
            Some(name) => Some(InputFormat::from_name(name).ok_or_else(|| {
                SurveyError::GenericError(format!("Unknown input format: {}", name))
            })?),
            None => None,
        };

        let source_epsg = super::epsg_from_args(args, "source-epsg")?;
        let target_epsg = super::epsg_from_args(args, "target-epsg")?.unwrap_or(4326);

        Ok(ConvertCommand {
            inputs,
            output: args.get_one::<String>("output").cloned(),
            format,
            source_epsg,
            target_epsg,
            registry: super::registry_from_args(args)?,
            logger,
        })
    }

    /// Convert one file to KML, returning the number of features written
    ///
    /// # Arguments
    /// * `input_path` - Input survey file
    /// * `output_path` - Destination KML path
    /// * `format` - Reader to use
    /// * `source_epsg` - System the file's coordinates are expressed in
    /// * `target_epsg` - System for the output document
    /// * `registry` - Reference system registry to resolve both systems
    pub fn convert_file(
        input_path: &str,
        output_path: &str,
        format: InputFormat,
        source_epsg: u32,
        target_epsg: u32,
        registry: &ReferenceSystemRegistry,
    ) -> SurveyResult<usize> {
        let source = registry.get(source_epsg)?;
        let unit = source.unit;
        info!(
            "Converting {} ({:?}, {}) to {}",
            input_path,
            format,
            source.description(),
            output_path
        );

        let dataset = load_dataset(input_path, format, source_epsg, unit)?;
        if dataset.feature_count() == 0 {
            warn!("{} produced no features", input_path);
        }

        let document = build_document(&dataset, input_path, target_epsg, registry)?;
        document.write_to(output_path)?;
        Ok(document.feature_count())
    }
}

/// Reproject a dataset and collect it into a KML document
fn build_document(
    dataset: &SurveyDataset,
    input_path: &str,
    target_epsg: u32,
    registry: &ReferenceSystemRegistry,
) -> SurveyResult<KmlDocument> {
    let transformer = CoordinateTransformer::new(registry);
    let stem = Path::new(input_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Survey data");

    let mut document = KmlDocument::new(stem, &format!("Converted from {}", input_path));
    let progress = ProgressTracker::new(dataset.feature_count() as u64, stem);

    for named in &dataset.points {
        let converted = transformer.convert_point(&named.point, target_epsg)?;
        document.add_point(
            &named.name,
            &named.description,
            converted.x,
            converted.y,
            converted.z_value(),
        );
        progress.increment();
    }

    for alignment in &dataset.alignments {
        let mut coords = Vec::with_capacity(alignment.len());
        for point in &alignment.points {
            let converted = transformer.convert_point(point, target_epsg)?;
            coords.push((converted.x, converted.y, converted.z_value()));
        }
        document.add_line(&alignment.name, &coords);
        progress.increment();
    }

    progress.finish("done");
    Ok(document)
}

/// Find supported survey files in the working directory
fn discover_inputs() -> SurveyResult<Vec<String>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(".")? {
        let path = entry?.path();
        if path.is_file() && InputFormat::from_path(&path).is_some() {
            if let Some(text) = path.to_str() {
                found.push(text.to_string());
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Default output path: the input with a .kml extension
fn default_output(input: &str) -> String {
    let mut path = PathBuf::from(input);
    path.set_extension("kml");
    path.to_string_lossy().into_owned()
}

impl<'a> Command for ConvertCommand<'a> {
    fn execute(&self) -> SurveyResult<()> {
        let inputs = if self.inputs.is_empty() {
            let discovered = discover_inputs()?;
            if discovered.is_empty() {
                return Err(SurveyError::NoInput(
                    "no input files given and none found in the working directory".to_string(),
                ));
            }
            info!("Discovered {} input file(s)", discovered.len());
            discovered
        } else {
            self.inputs.clone()
        };

        if self.output.is_some() && inputs.len() > 1 {
            return Err(SurveyError::GenericError(
                "--output only applies to a single input file".to_string(),
            ));
        }

        let mut total = 0usize;
        for input in &inputs {
            let format = match self.format {
                Some(f) => f,
                None => InputFormat::from_path(Path::new(input)).ok_or_else(|| {
                    SurveyError::GenericError(format!("Cannot determine format of {}", input))
                })?,
            };
            let source_epsg = self.source_epsg.unwrap_or_else(|| format.default_epsg());
            let output = self
                .output
                .clone()
                .unwrap_or_else(|| default_output(input));

            let count = Self::convert_file(
                input,
                &output,
                format,
                source_epsg,
                self.target_epsg,
                &self.registry,
            )?;
            self.logger
                .log(&format!("{} -> {}: {} features", input, output, count))?;
            total += count;
        }

        println!("Converted {} feature(s) from {} file(s)", total, inputs.len());
        Ok(())
    }
}
