use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

// Import from your library
use surveykit::commands::{CommandFactory, SurveykitCommandFactory};
use surveykit::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("SurveyKit")
        .version("0.2")
        .author("Maurice Schilpp")
        .about("Reconcile survey coordinates and convert survey files to KML")
        .arg(
            Arg::new("input")
                .help("Input survey files (CSV, DXF, IFC, LandXML); discovered in the working directory when omitted")
                .num_args(0..)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output KML file (single input only)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Input format (csv, dxf, ifc, landxml); guessed from the extension by default")
                .value_name("FORMAT")
                .required(false),
        )
        .arg(
            Arg::new("source-epsg")
                .long("source-epsg")
                .help("EPSG code of the input coordinates (defaults per format: IFC 2767, others 2871)")
                .value_name("CODE")
                .required(false),
        )
        .arg(
            Arg::new("target-epsg")
                .long("target-epsg")
                .help("EPSG code for the output coordinates")
                .value_name("CODE")
                .default_value("4326")
                .required(false),
        )
        .arg(
            Arg::new("registry")
                .long("registry")
                .help("Path to a TOML reference system registry overriding the bundled one")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("distance")
                .short('d')
                .long("distance")
                .help("Reconcile two points and print their distance")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("point-a")
                .long("point-a")
                .help("First point as 'easting,northing[,elevation]'")
                .value_name("COORD")
                .required(false),
        )
        .arg(
            Arg::new("point-b")
                .long("point-b")
                .help("Second point as 'easting,northing[,elevation]'")
                .value_name("COORD")
                .required(false),
        )
        .arg(
            Arg::new("epsg-a")
                .long("epsg-a")
                .help("EPSG code of point A")
                .value_name("CODE")
                .default_value("2871")
                .required(false),
        )
        .arg(
            Arg::new("epsg-b")
                .long("epsg-b")
                .help("EPSG code of point B")
                .value_name("CODE")
                .default_value("2767")
                .required(false),
        )
        .arg(
            Arg::new("common-epsg")
                .long("common-epsg")
                .help("EPSG code both points are converted into before measuring (defaults to point B's)")
                .value_name("CODE")
                .required(false),
        )
        .arg(
            Arg::new("stations")
                .short('s')
                .long("stations")
                .help("Assign stations along an alignment file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("start-station")
                .long("start-station")
                .help("Station of the first alignment point, numeric or 'N+NN.NN'")
                .value_name("STATION")
                .default_value("0+00.00")
                .required(false),
        )
        .arg(
            Arg::new("end-station")
                .long("end-station")
                .help("Claimed end station; a mismatch with the measured length is reported")
                .value_name("STATION")
                .required(false),
        )
        .get_matches();

    let log_file = "surveykit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("surveykit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = SurveykitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
