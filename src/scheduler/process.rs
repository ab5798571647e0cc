/*
 * Process Abstraction
 *
 * A Process is one unit of simulated work: an immutable workload description
 * supplied by the caller plus the scheduling results the engine fills in.
 *
 * Lifecycle:
 *
 *   NotStarted --dispatch--> Started --finish--> Completed
 *
 * - NotStarted: admitted or pending, never granted the CPU
 * - Started: first dispatch happened; start and response time are fixed
 * - Completed: remaining time reached zero; all derived times are fixed
 *
 * Why this is important:
 * - start/response time are recorded exactly once, at the first dispatch
 * - completion/turnaround/waiting exist only once the process is done
 * - only the engine (this crate) can drive the transitions
 */

use core::fmt;

use super::traits::ProcessFeatures;
use super::types::{Priority, Ticks, WorkloadClass};

/// Unique identifier for a process, assigned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(pub u32);

impl ProcessId {
    /// Get the raw ID value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Caller-supplied description of the work a process needs
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    /// Tick at which the process becomes eligible for admission
    pub arrival_time: Ticks,

    /// Total CPU ticks needed to finish
    pub burst_time: Ticks,

    pub priority: Priority,

    /// CPU burst estimate handed to predictors
    pub cpu_burst_estimate: Ticks,

    /// I/O burst estimate; stored for predictors, never simulated
    pub io_burst_estimate: f64,

    pub memory_requirement: f64,

    /// CPU time already accounted to the process
    pub total_cpu_used: Ticks,
}

impl Workload {
    /// Build a workload whose CPU estimate and CPU usage equal the burst
    pub fn new(
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: Priority,
        io_burst_estimate: f64,
        memory_requirement: f64,
    ) -> Self {
        Self {
            arrival_time,
            burst_time,
            priority,
            cpu_burst_estimate: burst_time,
            io_burst_estimate,
            memory_requirement,
            total_cpu_used: burst_time,
        }
    }
}

/// Timing results of a finished process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub start_time: Ticks,
    pub response_time: Ticks,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
}

/// Scheduling state of a process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Never dispatched
    NotStarted,

    /// Dispatched at least once, work remaining
    Started {
        start_time: Ticks,
        response_time: Ticks,
    },

    /// All work done
    Completed(Completion),
}

/// A simulated process
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    id: ProcessId,
    workload: Workload,
    remaining_time: Ticks,
    state: ProcessState,
}

impl Process {
    /// Create a fresh, never-dispatched process
    pub fn new(id: ProcessId, workload: Workload) -> Self {
        Process {
            id,
            remaining_time: workload.burst_time,
            workload,
            state: ProcessState::NotStarted,
        }
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    pub fn arrival_time(&self) -> Ticks {
        self.workload.arrival_time
    }

    pub fn burst_time(&self) -> Ticks {
        self.workload.burst_time
    }

    /// CPU ticks still needed
    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Whether the process has been dispatched at least once
    pub fn has_started(&self) -> bool {
        !matches!(self.state, ProcessState::NotStarted)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, ProcessState::Completed(_))
    }

    pub fn start_time(&self) -> Option<Ticks> {
        match self.state {
            ProcessState::NotStarted => None,
            ProcessState::Started { start_time, .. } => Some(start_time),
            ProcessState::Completed(done) => Some(done.start_time),
        }
    }

    pub fn response_time(&self) -> Option<Ticks> {
        match self.state {
            ProcessState::NotStarted => None,
            ProcessState::Started { response_time, .. } => Some(response_time),
            ProcessState::Completed(done) => Some(done.response_time),
        }
    }

    /// Timing results, once the process has finished
    pub fn completion(&self) -> Option<Completion> {
        match self.state {
            ProcessState::Completed(done) => Some(done),
            _ => None,
        }
    }

    pub fn completion_time(&self) -> Option<Ticks> {
        self.completion().map(|done| done.completion_time)
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.completion().map(|done| done.turnaround_time)
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.completion().map(|done| done.waiting_time)
    }

    /// Workload class derived from the burst estimates
    pub fn workload_class(&self) -> Option<WorkloadClass> {
        WorkloadClass::classify(
            self.workload.cpu_burst_estimate as f64,
            self.workload.io_burst_estimate,
        )
    }

    /// Feature vector handed to the time slice predictor
    ///
    /// The waiting and turnaround slots are always zero, whatever the
    /// process has accumulated so far.
    pub fn features(&self) -> ProcessFeatures {
        ProcessFeatures {
            priority: self.workload.priority.get() as f64,
            cpu_burst_estimate: self.workload.cpu_burst_estimate as f64,
            io_burst_estimate: self.workload.io_burst_estimate,
            arrival_time: self.workload.arrival_time as f64,
            memory_requirement: self.workload.memory_requirement,
            total_cpu_used: self.workload.total_cpu_used as f64,
            waiting_time: 0.0,
            turnaround_time: 0.0,
        }
    }

    /// Record a dispatch at `now`
    ///
    /// Returns true on the first dispatch, which fixes start and response
    /// time. Later dispatches leave the state untouched.
    pub(crate) fn dispatch(&mut self, now: Ticks) -> bool {
        if self.has_started() {
            return false;
        }

        self.state = ProcessState::Started {
            start_time: now,
            response_time: now - self.workload.arrival_time,
        };
        true
    }

    /// Consume up to `ticks` of remaining work, returning what is left
    pub(crate) fn consume(&mut self, ticks: Ticks) -> Ticks {
        self.remaining_time -= ticks.min(self.remaining_time);
        self.remaining_time
    }

    /// Mark the process finished at `now`
    ///
    /// Only a started process with no remaining work can finish.
    pub(crate) fn finish(&mut self, now: Ticks) -> Option<Completion> {
        let ProcessState::Started {
            start_time,
            response_time,
        } = self.state
        else {
            return None;
        };

        if self.remaining_time != 0 {
            return None;
        }

        let turnaround_time = now - self.workload.arrival_time;
        let done = Completion {
            start_time,
            response_time,
            completion_time: now,
            turnaround_time,
            waiting_time: turnaround_time - self.workload.burst_time,
        };
        self.state = ProcessState::Completed(done);
        Some(done)
    }
}

/// Errors raised when assembling a process set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    /// Two processes share the same pid
    DuplicatePid(ProcessId),
    /// The process already carries results from an earlier run
    AlreadyScheduled(ProcessId),
    /// The process could finish past the last representable tick
    TickOverflow(ProcessId),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::DuplicatePid(pid) => write!(f, "Duplicate process id {}", pid),
            ProcessError::AlreadyScheduled(pid) => {
                write!(f, "Process {} has already been scheduled", pid)
            }
            ProcessError::TickOverflow(pid) => {
                write!(f, "Process {} could complete past the last representable tick", pid)
            }
        }
    }
}

impl std::error::Error for ProcessError {}

/// The fixed batch of processes handed to one simulation run
///
/// Every pid is unique and every process is fresh (never dispatched).
/// Input order is kept; it breaks ties between equal arrival times.
///
/// The clock of a run never passes the latest arrival plus the total burst
/// of the batch, so that bound must fit in `Ticks`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessSet {
    processes: Vec<Process>,
}

impl ProcessSet {
    /// Validate and wrap a batch of processes
    pub fn new(processes: Vec<Process>) -> Result<Self, ProcessError> {
        let mut seen: Vec<ProcessId> = Vec::with_capacity(processes.len());

        for process in &processes {
            if seen.contains(&process.id()) {
                return Err(ProcessError::DuplicatePid(process.id()));
            }
            if process.has_started() || process.remaining_time() != process.burst_time() {
                return Err(ProcessError::AlreadyScheduled(process.id()));
            }
            seen.push(process.id());
        }

        check_tick_range(&processes)?;
        Ok(Self { processes })
    }

    /// Build a set from workloads, numbering pids from 1 in order
    pub fn from_workloads<I>(workloads: I) -> Result<Self, ProcessError>
    where
        I: IntoIterator<Item = Workload>,
    {
        let processes = workloads
            .into_iter()
            .zip(1u32..)
            .map(|(workload, id)| Process::new(ProcessId(id), workload))
            .collect();

        Self::new(processes)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    pub fn into_inner(self) -> Vec<Process> {
        self.processes
    }
}

/// Reject batches whose run could overflow the tick counter
fn check_tick_range(processes: &[Process]) -> Result<(), ProcessError> {
    let mut total_burst: Ticks = 0;
    for process in processes {
        total_burst = total_burst
            .checked_add(process.burst_time())
            .ok_or(ProcessError::TickOverflow(process.id()))?;
    }

    match processes
        .iter()
        .find(|p| p.arrival_time().checked_add(total_burst).is_none())
    {
        Some(process) => Err(ProcessError::TickOverflow(process.id())),
        None => Ok(()),
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = core::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}
