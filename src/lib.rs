/*
 * MLRR Simulator Library
 *
 * Discrete-time simulation of a single CPU running a fixed batch of
 * processes under round-robin scheduling, where the time slice of every
 * dispatch is chosen by a pluggable predictor.
 *
 * Layout:
 * - `scheduler` - engine, process model, execution log, predictors
 * - `metrics`   - summary statistics and per-class dispatch counts
 * - `input`     - interactive and file-based process collection
 * - `report`    - text rendering of tables, log and metrics
 * - `utils`     - logger backend and in-memory log buffer
 */

pub mod input;
pub mod metrics;
pub mod report;
pub mod scheduler;
pub mod utils;

#[cfg(test)]
mod tests;

pub use metrics::{DispatchStats, Metrics};
pub use report::ReportSections;
pub use scheduler::{
    ExecutionStep, PredictError, Process, ProcessFeatures, ProcessId, ProcessSet, Quantum,
    Schedule, Scheduler, SchedulerConfig, StepAction, TimeSlice, TimeSlicePredictor, Workload,
};
