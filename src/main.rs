/*
 * MLRR Simulator Entry Point
 *
 * Command-line front end of the simulator. It handles the whole lifecycle
 * of one run:
 *
 * - installs the logger at the requested level
 * - collects processes from a file or interactively from the terminal
 * - builds the predictor and the engine configuration
 * - runs the simulation and renders the selected report sections
 *
 * Reports go to stdout, log records to stderr.
 */

use core::fmt;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Arg, ArgMatches, Command, value_parser};
use log::SetLoggerError;

use mlrr_sim::input::{self, InputError};
use mlrr_sim::report::{self, ReportSections};
use mlrr_sim::scheduler::predictors::{FallbackPredictor, FixedQuantum, WorkloadTablePredictor};
use mlrr_sim::scheduler::{ProcessSet, Quantum, Scheduler, SchedulerConfig, TimeSlicePredictor};
use mlrr_sim::utils::logger;

/// Errors that end a command-line run
#[derive(Debug)]
enum CliError {
    Logger(SetLoggerError),
    Input(InputError),
    Sections(String),
    Output(io::Error),
    Render,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Logger(err) => write!(f, "Failed to install logger: {}", err),
            CliError::Input(err) => write!(f, "Failed to read processes: {}", err),
            CliError::Sections(message) => write!(f, "Invalid --sections: {}", message),
            CliError::Output(err) => write!(f, "Failed to write report: {}", err),
            CliError::Render => write!(f, "Failed to render report"),
        }
    }
}

impl From<InputError> for CliError {
    fn from(err: InputError) -> Self {
        CliError::Input(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Output(err)
    }
}

fn cli() -> Command {
    Command::new("mlrr-sim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Round-robin CPU scheduling simulator with predicted time slices")
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_name("FILE")
                .help("Process file (arrival burst priority io_estimate memory per line); prompts when omitted"),
        )
        .arg(
            Arg::new("predictor")
                .long("predictor")
                .short('p')
                .value_parser(["table", "fixed", "none"])
                .default_value("table")
                .help("Time slice predictor"),
        )
        .arg(
            Arg::new("quantum")
                .long("quantum")
                .short('q')
                .value_parser(value_parser!(u64).range(1..))
                .default_value("4")
                .help("Quantum returned by the fixed predictor"),
        )
        .arg(
            Arg::new("fallback-quantum")
                .long("fallback-quantum")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("4")
                .help("Quantum used when the predictor fails"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"])
                .default_value("warn")
                .help("Log records at or above this level go to stderr"),
        )
        .arg(
            Arg::new("sections")
                .long("sections")
                .value_delimiter(',')
                .default_value("all")
                .help("Report sections: initial, log, final, metrics, stats or all"),
        )
}

fn build_predictor(matches: &ArgMatches) -> Box<dyn TimeSlicePredictor> {
    let name = matches
        .get_one::<String>("predictor")
        .map(String::as_str)
        .unwrap_or("table");

    match name {
        "fixed" => {
            let ticks = matches.get_one::<u64>("quantum").copied().unwrap_or(4);
            Box::new(FixedQuantum::new(ticks))
        }
        "none" => Box::new(FallbackPredictor::unavailable()),
        _ => Box::new(WorkloadTablePredictor::new()),
    }
}

fn load_processes(matches: &ArgMatches) -> Result<ProcessSet, CliError> {
    match matches.get_one::<String>("input") {
        Some(path) => {
            let contents = std::fs::read_to_string(path).map_err(InputError::from)?;
            Ok(input::parse_process_file(&contents)?)
        }
        None => {
            println!("ML-Enhanced Round Robin CPU Scheduler");
            let stdin = io::stdin();
            Ok(input::prompt_process_set(stdin.lock(), io::stdout())?)
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let level = matches
        .get_one::<String>("log-level")
        .and_then(|name| logger::parse_level(name))
        .unwrap_or(log::LevelFilter::Warn);
    logger::init(level).map_err(CliError::Logger)?;

    let sections = match matches.get_many::<String>("sections") {
        Some(names) => {
            ReportSections::from_names(names.map(String::as_str)).map_err(CliError::Sections)?
        }
        None => ReportSections::all(),
    };

    let processes = load_processes(matches)?;

    let fallback = matches.get_one::<u64>("fallback-quantum").copied().unwrap_or(4);
    let config = SchedulerConfig::with_fallback(Quantum(fallback));
    let mut scheduler = Scheduler::with_config(build_predictor(matches), config);

    let initial = processes.clone();
    let Some(schedule) = scheduler.run(processes) else {
        println!("No processes to schedule!");
        return Ok(());
    };

    let mut text = String::new();
    report::render(&mut text, sections, initial.as_slice(), &schedule)
        .map_err(|_| CliError::Render)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mlrr-sim: {}", err);
            ExitCode::FAILURE
        }
    }
}
