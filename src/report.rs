/*
 * Report Rendering
 *
 * Renders the artifacts of a run as fixed-width text tables:
 * - process table (initial state or final results), ordered by pid
 * - execution log, in emission order
 * - performance metrics summary
 * - dispatch statistics per workload class
 *
 * Rendering only reads the Schedule; nothing flows back into the engine.
 * Output goes to any `core::fmt::Write`, so callers pick the sink.
 */

use core::fmt::{self, Write};

use bitflags::bitflags;

use crate::metrics::{DispatchStats, Metrics};
use crate::scheduler::{ExecutionStep, Process, Schedule, Ticks, WorkloadClass};

const TABLE_WIDTH: usize = 120;
const LOG_WIDTH: usize = 88;
const METRICS_WIDTH: usize = 60;

bitflags! {
    /// Sections of a full report
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ReportSections: u8 {
        const INITIAL_TABLE = 1;
        const EXECUTION_LOG = 1 << 1;
        const FINAL_TABLE = 1 << 2;
        const METRICS = 1 << 3;
        const DISPATCH_STATS = 1 << 4;
    }
}

impl ReportSections {
    /// Section for a command-line name (`initial`, `log`, ..., `all`)
    pub fn from_section_name(name: &str) -> Option<Self> {
        match name {
            "initial" => Some(Self::INITIAL_TABLE),
            "log" => Some(Self::EXECUTION_LOG),
            "final" => Some(Self::FINAL_TABLE),
            "metrics" => Some(Self::METRICS),
            "stats" => Some(Self::DISPATCH_STATS),
            "all" => Some(Self::all()),
            _ => None,
        }
    }

    /// Union of the sections in a list of names
    pub fn from_names<'a, I>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().try_fold(Self::empty(), |sections, name| {
            Self::from_section_name(name.trim())
                .map(|section| sections | section)
                .ok_or_else(|| format!("unknown report section '{}'", name))
        })
    }
}

/// Render the selected sections of a run
pub fn render<W: Write>(
    out: &mut W,
    sections: ReportSections,
    initial: &[Process],
    schedule: &Schedule,
) -> fmt::Result {
    if sections.contains(ReportSections::INITIAL_TABLE) {
        write_process_table(out, "INITIAL PROCESS STATE", initial)?;
    }
    if sections.contains(ReportSections::EXECUTION_LOG) {
        write_execution_log(out, schedule.steps())?;
    }
    if sections.contains(ReportSections::FINAL_TABLE) {
        write_process_table(out, "FINAL PROCESS TABLE", schedule.processes())?;
    }
    if sections.contains(ReportSections::METRICS) {
        if let Some(metrics) = Metrics::from_schedule(schedule) {
            write_metrics(out, &metrics)?;
        }
    }
    if sections.contains(ReportSections::DISPATCH_STATS) {
        write_dispatch_stats(out, &DispatchStats::from_schedule(schedule))?;
    }
    Ok(())
}

fn rule<W: Write>(out: &mut W, ch: char, width: usize) -> fmt::Result {
    writeln!(out, "{}", ch.to_string().repeat(width))
}

fn or_dash(value: Option<Ticks>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

/// Process table, sorted by pid
pub fn write_process_table<W: Write>(out: &mut W, title: &str, processes: &[Process]) -> fmt::Result {
    const HEADERS: [&str; 11] = [
        "PID", "Arrival", "Burst", "Priority", "I/O Est", "Memory", "Start", "Completion",
        "Turnaround", "Waiting", "Response",
    ];

    writeln!(out)?;
    rule(out, '=', TABLE_WIDTH)?;
    writeln!(out, "{:^width$}", title, width = TABLE_WIDTH)?;
    rule(out, '=', TABLE_WIDTH)?;

    let header: Vec<String> = HEADERS.iter().map(|h| format!("{:^10}", h)).collect();
    writeln!(out, "{}", header.join(" | "))?;
    rule(out, '-', TABLE_WIDTH)?;

    let mut sorted: Vec<&Process> = processes.iter().collect();
    sorted.sort_by_key(|p| p.id());

    for p in sorted {
        let workload = p.workload();
        let row = [
            format!("{:^10}", p.id().get()),
            format!("{:^10}", workload.arrival_time),
            format!("{:^10}", workload.burst_time),
            format!("{:^10}", workload.priority.get()),
            format!("{:^10.2}", workload.io_burst_estimate),
            format!("{:^10.2}", workload.memory_requirement),
            format!("{:^10}", or_dash(p.start_time())),
            format!("{:^10}", or_dash(p.completion_time())),
            format!("{:^10}", or_dash(p.turnaround_time())),
            format!("{:^10}", or_dash(p.waiting_time())),
            format!("{:^10}", or_dash(p.response_time())),
        ];
        writeln!(out, "{}", row.join(" | "))?;
    }

    rule(out, '=', TABLE_WIDTH)
}

/// Execution log, in emission order
pub fn write_execution_log<W: Write>(out: &mut W, steps: &[ExecutionStep]) -> fmt::Result {
    const HEADERS: [&str; 7] = [
        "Time", "Process", "Action", "Duration", "Remaining", "Quantum", "Prediction",
    ];

    writeln!(out)?;
    rule(out, '-', LOG_WIDTH)?;
    writeln!(out, "{:^width$}", "EXECUTION LOG", width = LOG_WIDTH)?;
    rule(out, '=', LOG_WIDTH)?;

    let header: Vec<String> = HEADERS.iter().map(|h| format!("{:^10}", h)).collect();
    writeln!(out, "{}", header.join(" | "))?;
    rule(out, '-', LOG_WIDTH)?;

    for step in steps {
        let (quantum, prediction) = if step.is_executing() {
            (step.quantum.to_string(), format!("{:.2}", step.predicted_quantum))
        } else {
            ("-".to_owned(), "-".to_owned())
        };
        writeln!(
            out,
            "{:^10} | {:^10} | {:^10} | {:^10} | {:^10} | {:^10} | {:^10}",
            step.time,
            step.pid.to_string(),
            step.action.name(),
            step.duration,
            step.remaining_after,
            quantum,
            prediction
        )?;
    }

    rule(out, '=', LOG_WIDTH)
}

/// Performance metrics summary
pub fn write_metrics<W: Write>(out: &mut W, metrics: &Metrics) -> fmt::Result {
    writeln!(out)?;
    rule(out, '-', METRICS_WIDTH)?;
    writeln!(out, "{:^width$}", "PERFORMANCE METRICS", width = METRICS_WIDTH)?;
    rule(out, '-', METRICS_WIDTH)?;
    writeln!(out, "{:<25} {:<35}", "Metric", "Value")?;
    rule(out, '-', METRICS_WIDTH)?;

    let rows = [
        ("Total Processes", format!("{}", metrics.process_count)),
        ("Average Waiting Time", format!("{:.4} units", metrics.avg_waiting)),
        ("Average Turnaround Time", format!("{:.4} units", metrics.avg_turnaround)),
        ("Average Response Time", format!("{:.4} units", metrics.avg_response)),
        ("CPU Utilization", format!("{:.2}%", metrics.cpu_utilization)),
        ("Throughput", format!("{:.4} processes/unit", metrics.throughput)),
    ];
    for (name, value) in rows {
        writeln!(out, "{:<25} {:<35}", name, value)?;
    }

    rule(out, '-', METRICS_WIDTH)
}

/// Dispatches per workload class
pub fn write_dispatch_stats<W: Write>(out: &mut W, stats: &DispatchStats) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "=== Scheduling Statistics ===")?;
    writeln!(out, "{:<14}{:<11}{}", "Process Type", "Schedules", "Percentage")?;
    writeln!(out, "{:<14}{:<11}{}", "------------", "---------", "----------")?;

    for class in WorkloadClass::ALL {
        writeln!(
            out,
            "{:<14}{:<11}{}%",
            class.name(),
            stats.count(class),
            stats.percentage(class)
        )?;
    }

    writeln!(out, "Total: {} schedules", stats.total())?;
    writeln!(out, "=============================")
}
