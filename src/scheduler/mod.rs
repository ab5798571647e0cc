/*
 * Predictor-Driven Round-Robin Scheduler
 *
 * This module implements the simulation engine: a single CPU, a fixed batch
 * of processes, a strict FIFO ready queue and a quantum chosen per dispatch
 * by a TimeSlicePredictor.
 *
 * SCHEDULING ALGORITHM:
 * ====================
 *
 * 1. Processes are ordered by arrival time (stable: input order breaks ties)
 *    to form the arrival stream.
 * 2. The earliest arrival is queued and the clock starts at its arrival.
 * 3. For each slot read from the front of the queue:
 *    a. first dispatch only: record start and response time
 *    b. ask the predictor for a quantum (fallback on failure)
 *    c. run for min(quantum, remaining) ticks and advance the clock
 *    d. admit every pending arrival whose arrival time has been reached
 *    e. finish the process, or append it behind the new arrivals
 * 4. The run ends when the queue is drained and nothing is pending.
 *
 * ADMISSION BEFORE REQUEUE:
 * ========================
 *
 * Arrivals reached during a dispatch are appended before the dispatched
 * process goes back into the queue, so a process arriving on the same tick
 * a quantum expires runs ahead of the process that just used the CPU.
 *
 * IDLE GAPS:
 * =========
 *
 * If the queue drains while arrivals are still pending, the clock jumps to
 * the next arrival and the run restarts from that process, exactly like the
 * initial start.
 */

pub mod events;
pub mod predictors;
pub mod process;
pub mod ready_queue;
pub mod traits;
pub mod types;

pub use events::{ExecutionStep, StepAction};
pub use process::{Completion, Process, ProcessError, ProcessId, ProcessSet, ProcessState, Workload};
pub use ready_queue::ReadyQueue;
pub use traits::{PredictError, ProcessFeatures, TimeSlicePredictor};
pub use types::{Priority, Quantum, SchedulerConfig, Ticks, TimeSlice, WorkloadClass};

/// Result of one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Finalized processes, ordered by pid
    processes: Vec<Process>,

    /// Execution log, in emission order
    steps: Vec<ExecutionStep>,

    /// Dispatches that used the fallback quantum
    fallbacks: usize,

    /// Final front cursor of the ready queue
    queue_cursor: usize,

    /// Final length of the ready queue sequence
    queue_len: usize,
}

impl Schedule {
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn steps(&self) -> &[ExecutionStep] {
        &self.steps
    }

    /// Look up a finalized process by pid
    pub fn process(&self, pid: ProcessId) -> Option<&Process> {
        self.processes
            .binary_search_by_key(&pid, |p| p.id())
            .ok()
            .map(|index| &self.processes[index])
    }

    /// Number of dispatches in the run
    pub fn dispatch_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_executing()).count()
    }

    /// Number of dispatches that used the fallback quantum
    pub fn fallback_count(&self) -> usize {
        self.fallbacks
    }

    /// Slots read from the ready queue over the run
    pub fn queue_cursor(&self) -> usize {
        self.queue_cursor
    }

    /// Slots appended to the ready queue over the run
    pub fn queue_len(&self) -> usize {
        self.queue_len
    }

    /// Latest completion time (the makespan)
    pub fn end_time(&self) -> Ticks {
        self.processes
            .iter()
            .filter_map(|p| p.completion_time())
            .max()
            .unwrap_or(0)
    }

    pub fn into_parts(self) -> (Vec<Process>, Vec<ExecutionStep>) {
        (self.processes, self.steps)
    }
}

/// Simulation engine
///
/// Owns the predictor it was built with and the engine configuration.
/// Each call to `run` simulates one independent batch.
pub struct Scheduler {
    predictor: Box<dyn TimeSlicePredictor>,
    config: SchedulerConfig,
}

impl Scheduler {
    /// Create an engine with the default configuration
    pub fn new(predictor: Box<dyn TimeSlicePredictor>) -> Self {
        Self::with_config(predictor, SchedulerConfig::default())
    }

    pub fn with_config(predictor: Box<dyn TimeSlicePredictor>, config: SchedulerConfig) -> Self {
        log::info!(
            "[RR] Scheduler initialized with predictor: {} (fallback quantum {})",
            predictor.name(),
            config.effective_fallback()
        );
        Self { predictor, config }
    }

    pub fn predictor_name(&self) -> &'static str {
        self.predictor.name()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Simulate `processes` to completion
    ///
    /// Returns `None` when there is nothing to schedule.
    pub fn run(&mut self, processes: ProcessSet) -> Option<Schedule> {
        run_with_config(processes, self.predictor.as_mut(), &self.config)
    }
}

impl core::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scheduler")
            .field("predictor", &self.predictor.name())
            .field("config", &self.config)
            .finish()
    }
}

/// Simulate `processes` with `predictor` and the default configuration
pub fn run(processes: ProcessSet, predictor: &mut dyn TimeSlicePredictor) -> Option<Schedule> {
    run_with_config(processes, predictor, &SchedulerConfig::default())
}

/// Simulate `processes` with `predictor` and an explicit configuration
pub fn run_with_config(
    processes: ProcessSet,
    predictor: &mut dyn TimeSlicePredictor,
    config: &SchedulerConfig,
) -> Option<Schedule> {
    if processes.is_empty() {
        log::info!("[RR] No processes to schedule");
        return None;
    }

    let schedule = Simulation::new(processes.into_inner(), predictor, config).run();
    log::info!(
        "[RR] Run finished at t={} after {} dispatches ({} fallbacks)",
        schedule.end_time(),
        schedule.dispatch_count(),
        schedule.fallback_count()
    );
    Some(schedule)
}

/// State of one run
struct Simulation<'a> {
    predictor: &'a mut dyn TimeSlicePredictor,
    config: &'a SchedulerConfig,

    /// Process table, in input order; queue entries are slots into it
    processes: Vec<Process>,

    /// Slots ordered by arrival time
    arrivals: Vec<usize>,

    /// Arrival stream cursor: arrivals already admitted
    admitted: usize,

    queue: ReadyQueue,

    /// Simulated clock
    now: Ticks,

    steps: Vec<ExecutionStep>,
    fallbacks: usize,
}

impl<'a> Simulation<'a> {
    fn new(
        processes: Vec<Process>,
        predictor: &'a mut dyn TimeSlicePredictor,
        config: &'a SchedulerConfig,
    ) -> Self {
        let mut arrivals: Vec<usize> = (0..processes.len()).collect();
        // sort_by_key is stable: input order breaks ties
        arrivals.sort_by_key(|&slot| processes[slot].arrival_time());

        Self {
            predictor,
            config,
            processes,
            arrivals,
            admitted: 0,
            queue: ReadyQueue::new(),
            now: 0,
            steps: Vec::new(),
            fallbacks: 0,
        }
    }

    fn run(mut self) -> Schedule {
        while self.start_next_arrival() {
            while let Some(slot) = self.queue.pop_front() {
                self.dispatch(slot);
            }
        }
        debug_assert!(self.queue.is_drained());

        let mut processes = self.processes;
        processes.sort_by_key(|p| p.id());

        Schedule {
            processes,
            steps: self.steps,
            fallbacks: self.fallbacks,
            queue_cursor: self.queue.cursor(),
            queue_len: self.queue.total_len(),
        }
    }

    /// Queue the next pending arrival and move the clock to it
    ///
    /// Used to start the run and to leave an idle gap. The started process
    /// gets no ARRIVED step; arrivals sharing its tick are admitted after
    /// its first dispatch.
    fn start_next_arrival(&mut self) -> bool {
        let Some(&slot) = self.arrivals.get(self.admitted) else {
            return false;
        };

        let arrival = self.processes[slot].arrival_time();
        debug_assert_eq!(self.queue.pending(), 0);
        if self.admitted > 0 {
            log::debug!("[RR] CPU idle from t={} to t={}", self.now, arrival);
        }

        self.now = arrival;
        self.queue.push_back(slot);
        self.admitted += 1;
        true
    }

    /// Grant the CPU to the process in `slot` for one quantum
    fn dispatch(&mut self, slot: usize) {
        let start = self.now;
        let process = &mut self.processes[slot];
        let pid = process.id();

        if process.dispatch(start) {
            log::debug!("[RR] {} first dispatch at t={}", pid, start);
        }

        let features = process.features();
        log::trace!("[Predictor] {} features: {}", pid, features);
        let slice = self.predict_quantum(pid, &features);

        let process = &mut self.processes[slot];
        let duration = slice.quantum.get().min(process.remaining_time());
        let remaining = process.consume(duration);

        self.steps
            .push(ExecutionStep::executing(start, pid, duration, remaining, slice));
        self.now += duration;

        self.admit_arrivals();

        if remaining == 0 {
            self.processes[slot].finish(self.now);
            self.steps.push(ExecutionStep::completed(self.now, pid));
            log::debug!("[RR] {} completed at t={}", pid, self.now);
        } else {
            self.queue.push_back(slot);
            self.steps
                .push(ExecutionStep::requeued(self.now, pid, remaining));
        }
    }

    /// Admit every pending process whose arrival time has been reached
    fn admit_arrivals(&mut self) {
        while let Some(&slot) = self.arrivals.get(self.admitted) {
            let process = &self.processes[slot];
            if process.arrival_time() > self.now {
                break;
            }

            self.steps.push(ExecutionStep::arrived(
                process.arrival_time(),
                process.id(),
                process.remaining_time(),
            ));
            self.queue.push_back(slot);
            self.admitted += 1;
        }
    }

    /// Ask the predictor for a quantum, falling back on any failure
    fn predict_quantum(&mut self, pid: ProcessId, features: &ProcessFeatures) -> TimeSlice {
        let fallback = self.config.effective_fallback();

        match self.predictor.predict(features) {
            Ok(raw) => match TimeSlice::from_prediction(raw, self.config.min_quantum) {
                Some(slice) => slice,
                None => {
                    log::warn!(
                        "[Predictor] {} returned {} for {}, using default time slice {}",
                        self.predictor.name(),
                        raw,
                        pid,
                        fallback
                    );
                    self.fallbacks += 1;
                    fallback.into()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Predictor] Prediction failed for {}, using default time slice {}: {}",
                    pid,
                    fallback,
                    err
                );
                self.fallbacks += 1;
                fallback.into()
            }
        }
    }
}
