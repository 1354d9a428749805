//! Station assignment command
//!
//! Reads an alignment file and labels each point with its station by
//! cumulative distance from a start station. When the caller also
//! passes the end station printed on the design plans, a disagreement
//! between the claimed range and the measured length is reported
//! instead of being rescaled away.

use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::alignment::{
    assign_stations, check_station_range, format_station, parse_station, STATION_TOLERANCE,
};
use crate::commands::command_traits::Command;
use crate::coordinate::{ReferenceSystemRegistry, SurveyError, SurveyResult};
use crate::formats::{load_dataset, InputFormat};
use crate::utils::logger::Logger;

/// Command for assigning stations along an alignment
pub struct StationCommand<'a> {
    input: String,
    format: Option<InputFormat>,
    source_epsg: Option<u32>,
    start_station: f64,
    end_station: Option<f64>,
    registry: ReferenceSystemRegistry,
    logger: &'a Logger,
}

impl<'a> StationCommand<'a> {
    /// Create a new station command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SurveyResult<Self> {
        let input = args
            .get_many::<String>("input")
            .and_then(|mut v| v.next().cloned())
            .ok_or_else(|| SurveyError::NoInput("--stations requires an alignment file".to_string()))?;

        let format = match args.get_one::<String>("format") {
            Some(name) => Some(InputFormat::from_name(name).ok_or_else(|| {
                SurveyError::GenericError(format!("Unknown input format: {}", name))
            })?),
            None => None,
        };

        let start_station = match args.get_one::<String>("start-station") {
            Some(text) => parse_station(text)?,
            None => 0.0,
        };
        let end_station = match args.get_one::<String>("end-station") {
            Some(text) => Some(parse_station(text)?),
            None => None,
        };

        Ok(StationCommand {
            input,
            format,
            source_epsg: super::epsg_from_args(args, "source-epsg")?,
            start_station,
            end_station,
            registry: super::registry_from_args(args)?,
            logger,
        })
    }
}

impl<'a> Command for StationCommand<'a> {
    fn execute(&self) -> SurveyResult<()> {
        let format = match self.format {
            Some(f) => f,
            None => InputFormat::from_path(Path::new(&self.input)).ok_or_else(|| {
                SurveyError::GenericError(format!("Cannot determine format of {}", self.input))
            })?,
        };
        let source_epsg = self.source_epsg.unwrap_or_else(|| format.default_epsg());
        let unit = self.registry.get(source_epsg)?.unit;

        let dataset = load_dataset(&self.input, format, source_epsg, unit)?;
        if dataset.alignments.is_empty() {
            return Err(SurveyError::NoInput(format!(
                "{} contains no alignments or polylines",
                self.input
            )));
        }

        for alignment in &dataset.alignments {
            info!("Stationing '{}' ({} points)", alignment.name, alignment.len());
            let stations = assign_stations(&alignment.points, self.start_station)?;

            self.logger.section(&alignment.name)?;
            for (point, station) in alignment.points.iter().zip(&stations) {
                let line = format!(
                    "  {:>12}  E {:.3}  N {:.3}",
                    format_station(*station),
                    point.x,
                    point.y
                );
                println!("{}", line);
                self.logger.log(&line)?;
            }

            let measured = stations.last().unwrap() - self.start_station;
            println!(
                "'{}': {} points, measured length {:.2} {}",
                alignment.name,
                alignment.len(),
                measured,
                unit
            );

            if let Some(end) = self.end_station {
                let mismatch = check_station_range(&stations, end, STATION_TOLERANCE);
                if mismatch > STATION_TOLERANCE {
                    println!(
                        "WARNING: claimed range {} .. {} disagrees with measured length by {:.2} {}",
                        format_station(self.start_station),
                        format_station(end),
                        mismatch,
                        unit
                    );
                }
            }
        }

        Ok(())
    }
}
