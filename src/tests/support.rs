//! Test doubles and batch builders

use crate::scheduler::{
    PredictError, Priority, ProcessFeatures, ProcessId, ProcessSet, Schedule, Ticks,
    TimeSlicePredictor, Workload,
};

/// Predictor that fails every query
pub struct FailingPredictor;

impl TimeSlicePredictor for FailingPredictor {
    fn predict(&mut self, _features: &ProcessFeatures) -> Result<f64, PredictError> {
        Err(PredictError::Model("model file missing".into()))
    }

    fn name(&self) -> &'static str {
        "Failing"
    }
}

/// Predictor that answers a fixed script, cycling when it runs out
pub struct ScriptedPredictor {
    script: Vec<f64>,
    next: usize,
}

impl ScriptedPredictor {
    pub fn new(script: &[f64]) -> Self {
        Self {
            script: script.to_vec(),
            next: 0,
        }
    }
}

impl TimeSlicePredictor for ScriptedPredictor {
    fn predict(&mut self, _features: &ProcessFeatures) -> Result<f64, PredictError> {
        let value = self.script[self.next % self.script.len()];
        self.next += 1;
        Ok(value)
    }

    fn name(&self) -> &'static str {
        "Scripted"
    }
}

/// Fixed-quantum predictor that keeps every feature vector it was given
pub struct RecordingPredictor {
    pub quantum: f64,
    pub seen: Vec<ProcessFeatures>,
}

impl RecordingPredictor {
    pub fn new(quantum: f64) -> Self {
        Self {
            quantum,
            seen: Vec::new(),
        }
    }
}

impl TimeSlicePredictor for RecordingPredictor {
    fn predict(&mut self, features: &ProcessFeatures) -> Result<f64, PredictError> {
        self.seen.push(*features);
        Ok(self.quantum)
    }

    fn name(&self) -> &'static str {
        "Recording"
    }
}

/// Batch of (arrival, burst) pairs with neutral priority and estimates
pub fn batch(specs: &[(Ticks, Ticks)]) -> ProcessSet {
    ProcessSet::from_workloads(
        specs
            .iter()
            .map(|&(arrival, burst)| Workload::new(arrival, burst, Priority(1), 0.0, 16.0)),
    )
    .expect("valid set")
}

/// Batch of (arrival, burst, io_estimate) triples
pub fn batch_with_io(specs: &[(Ticks, Ticks, f64)]) -> ProcessSet {
    ProcessSet::from_workloads(
        specs
            .iter()
            .map(|&(arrival, burst, io)| Workload::new(arrival, burst, Priority(1), io, 16.0)),
    )
    .expect("valid set")
}

/// Pids of the EXECUTING steps, in order
pub fn dispatch_order(schedule: &Schedule) -> Vec<ProcessId> {
    schedule
        .steps()
        .iter()
        .filter(|step| step.is_executing())
        .map(|step| step.pid)
        .collect()
}

/// Durations of the EXECUTING steps, in order
pub fn durations(schedule: &Schedule) -> Vec<Ticks> {
    schedule
        .steps()
        .iter()
        .filter(|step| step.is_executing())
        .map(|step| step.duration)
        .collect()
}

/// Granted quanta of the EXECUTING steps, in order
pub fn quanta(schedule: &Schedule) -> Vec<Ticks> {
    schedule
        .steps()
        .iter()
        .filter(|step| step.is_executing())
        .map(|step| step.quantum)
        .collect()
}

/// Predictions behind the EXECUTING steps, in order
pub fn predictions(schedule: &Schedule) -> Vec<f64> {
    schedule
        .steps()
        .iter()
        .filter(|step| step.is_executing())
        .map(|step| step.predicted_quantum)
        .collect()
}
