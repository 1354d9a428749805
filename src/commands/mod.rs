//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod convert_command;
pub mod distance_command;
pub mod station_command;

pub use command_traits::{Command, CommandFactory};
pub use convert_command::ConvertCommand;
pub use distance_command::DistanceCommand;
pub use station_command::StationCommand;

use clap::ArgMatches;

use crate::coordinate::{parse_epsg, ReferenceSystemRegistry, SurveyResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct SurveykitCommandFactory;

impl SurveykitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        SurveykitCommandFactory
    }
}

impl<'a> CommandFactory<'a> for SurveykitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> SurveyResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("distance") {
            Ok(Box::new(DistanceCommand::new(args, logger)?))
        } else if args.get_flag("stations") {
            Ok(Box::new(StationCommand::new(args, logger)?))
        } else {
            // Default to KML conversion
            Ok(Box::new(ConvertCommand::new(args, logger)?))
        }
    }
}

/// Load the reference system registry selected by the CLI arguments
///
/// `--registry` overrides the bundled definitions.
pub(crate) fn registry_from_args(args: &ArgMatches) -> SurveyResult<ReferenceSystemRegistry> {
    match args.get_one::<String>("registry") {
        Some(path) => ReferenceSystemRegistry::from_file(path),
        None => Ok(ReferenceSystemRegistry::bundled().clone()),
    }
}

/// Parse an optional EPSG argument
pub(crate) fn epsg_from_args(args: &ArgMatches, name: &str) -> SurveyResult<Option<u32>> {
    match args.get_one::<String>(name) {
        Some(text) => Ok(Some(parse_epsg(text)?)),
        None => Ok(None),
    }
}
