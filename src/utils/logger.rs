/*
 * Simulator Logging System
 *
 * This module implements the `log` backend used by the simulator.
 *
 * Why this is important:
 * - Every component logs through the `log` facade with a bracketed prefix
 *   ([RR], [Predictor], [Input]); this is where those records end up
 * - Records go to stderr so rendered reports on stdout stay clean
 * - Each record is also kept in the in-memory log buffer, so the last
 *   warnings of a run (e.g. predictor fallbacks) can be inspected after it
 */

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use super::log_buffer;

/// Logger writing to stderr and the log buffer
struct SimLogger;

impl log::Log for SimLogger {
    /// Checks the record against the global max level
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}", record.level(), record.args());
        log_buffer::write_log(&line);
        eprintln!("{}", line);
    }

    fn flush(&self) {}
}

static LOGGER: SimLogger = SimLogger;

/// Install the simulator logger with the given level filter
///
/// Fails if another logger has already been installed in this process.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    log::debug!("Logger initialized at level {}", level);
    Ok(())
}

/// Parse a level name as accepted on the command line
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.parse().ok()
}
