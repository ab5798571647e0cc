/*
 * Process Input
 *
 * Builds a validated ProcessSet for the engine, either interactively or
 * from a process file. Invalid values never reach the engine: prompts
 * repeat until the answer parses, file errors carry their line number.
 *
 * Process file format, one process per line, pids numbered from 1:
 *
 *   # arrival burst priority io_estimate memory
 *   0 5 1 0.5 64
 *   1 3 2 4.0 32
 *
 * Blank lines and lines starting with '#' are skipped.
 */

use core::fmt;
use std::io::{BufRead, Write};

use crate::scheduler::{Priority, ProcessError, ProcessSet, Ticks, Workload};

/// Errors raised while collecting processes
#[derive(Debug)]
pub enum InputError {
    /// Reading or writing the terminal failed
    Io(std::io::Error),
    /// Input ended before every field was answered
    UnexpectedEof,
    /// A process file line could not be parsed
    Parse { line: usize, message: String },
    /// The processes parsed but do not form a schedulable set
    Process(ProcessError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io(err) => write!(f, "I/O error: {}", err),
            InputError::UnexpectedEof => write!(f, "Unexpected end of input"),
            InputError::Parse { line, message } => write!(f, "Line {}: {}", line, message),
            InputError::Process(err) => write!(f, "Invalid process set: {}", err),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(err) => Some(err),
            InputError::Process(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InputError {
    fn from(err: std::io::Error) -> Self {
        InputError::Io(err)
    }
}

impl From<ProcessError> for InputError {
    fn from(err: ProcessError) -> Self {
        InputError::Process(err)
    }
}

/// Non-negative whole number of ticks
fn parse_ticks(text: &str) -> Result<Ticks, &'static str> {
    text.parse::<Ticks>()
        .map_err(|_| "expected a whole number >= 0")
}

fn parse_priority(text: &str) -> Result<Priority, &'static str> {
    text.parse::<i32>()
        .map(Priority)
        .map_err(|_| "expected an integer")
}

/// Finite floating point number
fn parse_estimate(text: &str) -> Result<f64, &'static str> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err("expected a number"),
    }
}

fn parse_count(text: &str) -> Result<usize, &'static str> {
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err("please enter a positive number"),
        Err(_) => Err("please enter a valid integer"),
    }
}

/// Parse a process file
pub fn parse_process_file(contents: &str) -> Result<ProcessSet, InputError> {
    let mut workloads = Vec::new();

    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let workload = parse_workload_line(line).map_err(|message| InputError::Parse {
            line: index + 1,
            message,
        })?;
        workloads.push(workload);
    }

    log::info!("[Input] Parsed {} processes from file", workloads.len());
    Ok(ProcessSet::from_workloads(workloads)?)
}

fn parse_workload_line(line: &str) -> Result<Workload, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [arrival, burst, priority, io, memory] = fields[..] else {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    };

    let field = |name: &str, err: &str| format!("{}: {}", name, err);
    Ok(Workload::new(
        parse_ticks(arrival).map_err(|e| field("arrival", e))?,
        parse_ticks(burst).map_err(|e| field("burst", e))?,
        parse_priority(priority).map_err(|e| field("priority", e))?,
        parse_estimate(io).map_err(|e| field("io_estimate", e))?,
        parse_estimate(memory).map_err(|e| field("memory", e))?,
    ))
}

/// Interactive prompter over any line source and sink
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask until `parse` accepts the answer
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, &'static str>,
    ) -> Result<T, InputError> {
        let mut line = String::new();
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(InputError::UnexpectedEof);
            }

            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(reason) => {
                    log::debug!("[Input] Rejected {:?}: {}", line.trim(), reason);
                    writeln!(self.output, "Invalid input, {}.", reason)?;
                }
            }
        }
    }

    /// Collect a whole process set: a count, then each process's fields
    pub fn collect(&mut self) -> Result<ProcessSet, InputError> {
        let count = self.ask("\nEnter the number of processes: ", parse_count)?;
        let mut workloads = Vec::with_capacity(count);

        for pid in 1..=count {
            writeln!(self.output, "\n--- Process {} Details ---", pid)?;
            let arrival = self.ask(&format!("Enter arrival time for process {}: ", pid), parse_ticks)?;
            let burst = self.ask(&format!("Enter burst time for process {}: ", pid), parse_ticks)?;
            let priority = self.ask(&format!("Enter priority for process {}: ", pid), parse_priority)?;
            let io = self.ask(
                &format!("Enter I/O burst estimate for process {}: ", pid),
                parse_estimate,
            )?;
            let memory = self.ask(
                &format!("Enter memory requirement for process {}: ", pid),
                parse_estimate,
            )?;
            workloads.push(Workload::new(arrival, burst, priority, io, memory));
        }

        Ok(ProcessSet::from_workloads(workloads)?)
    }
}

/// Prompt on `output` and read answers from `input`
pub fn prompt_process_set<R: BufRead, W: Write>(
    input: R,
    output: W,
) -> Result<ProcessSet, InputError> {
    Prompter::new(input, output).collect()
}
