/*
 * Performance Metrics
 *
 * Pure reductions over a finished run:
 *
 * - Metrics: averages of waiting / turnaround / response time, CPU
 *   utilization and throughput, folded from the finalized processes
 * - DispatchStats: how the dispatches of a run split across workload classes
 *
 * Nothing here feeds back into the engine.
 */

use crate::scheduler::{Process, Schedule, Ticks, WorkloadClass};

/// Summary statistics of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub process_count: usize,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
    /// Percentage of the makespan the CPU spent executing
    pub cpu_utilization: f64,
    /// Processes finished per tick
    pub throughput: f64,
    /// Latest completion time
    pub makespan: Ticks,
    /// Sum of all burst times
    pub total_burst: Ticks,
}

impl Metrics {
    /// Reduce the finalized processes of `schedule`
    pub fn from_schedule(schedule: &Schedule) -> Option<Metrics> {
        aggregate(schedule.processes())
    }
}

/// Reduce a set of finalized processes into summary statistics
///
/// Returns `None` for an empty set. A makespan of zero (every process
/// finished at tick 0) yields zero utilization and throughput.
pub fn aggregate(processes: &[Process]) -> Option<Metrics> {
    if processes.is_empty() {
        return None;
    }

    let n = processes.len() as f64;
    // sums are widened: per-process times each fit in Ticks, their total may not
    let sum = |time: fn(&Process) -> Option<Ticks>| -> u128 {
        processes.iter().filter_map(time).map(u128::from).sum()
    };
    let waiting = sum(Process::waiting_time);
    let turnaround = sum(Process::turnaround_time);
    let response = sum(Process::response_time);
    let total_burst = sum(|p| Some(p.burst_time()));
    let makespan = processes
        .iter()
        .filter_map(|p| p.completion_time())
        .max()
        .unwrap_or(0);

    let (cpu_utilization, throughput) = if makespan == 0 {
        (0.0, 0.0)
    } else {
        (
            total_burst as f64 / makespan as f64 * 100.0,
            n / makespan as f64,
        )
    };

    Some(Metrics {
        process_count: processes.len(),
        avg_waiting: waiting as f64 / n,
        avg_turnaround: turnaround as f64 / n,
        avg_response: response as f64 / n,
        cpu_utilization,
        throughput,
        makespan,
        total_burst: Ticks::try_from(total_burst).unwrap_or(Ticks::MAX),
    })
}

/// Dispatch counts per workload class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchStats {
    counts: [usize; 3],
    total: usize,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every EXECUTING step of `schedule` under its process's class
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut stats = Self::new();

        for step in schedule.steps().iter().filter(|s| s.is_executing()) {
            let class = schedule
                .process(step.pid)
                .and_then(|p| p.workload_class());
            if let Some(class) = class {
                stats.record(class);
            }
        }

        stats
    }

    pub fn record(&mut self, class: WorkloadClass) {
        self.counts[class.index()] += 1;
        self.total += 1;
    }

    pub fn count(&self, class: WorkloadClass) -> usize {
        self.counts[class.index()]
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Whole-number share of `class` in all dispatches (0 when empty)
    pub fn percentage(&self, class: WorkloadClass) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.count(class) * 100 / self.total
    }
}
