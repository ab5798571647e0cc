/*
 * Workload Table Predictor
 *
 * Classifies each query into a workload class and answers the burst the
 * class is known to need:
 *
 *   CPU-bound  -> 8 ticks
 *   IO-bound   -> 4 ticks
 *   Balanced   -> 6 ticks
 *
 * Long slices for compute-heavy work, short ones for I/O-heavy work that
 * would otherwise hold the CPU while it is mostly waiting.
 */

use super::super::traits::{PredictError, ProcessFeatures, TimeSlicePredictor};
use super::super::types::{Quantum, WorkloadClass};

/// Predictor backed by a per-class quantum table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadTablePredictor {
    /// Quantum per class, indexed by `WorkloadClass::index`
    table: [Quantum; 3],
}

impl WorkloadTablePredictor {
    pub const CPU_BOUND_QUANTUM: Quantum = Quantum(8);
    pub const IO_BOUND_QUANTUM: Quantum = Quantum(4);
    pub const BALANCED_QUANTUM: Quantum = Quantum(6);

    pub fn new() -> Self {
        Self {
            table: [
                Self::CPU_BOUND_QUANTUM,
                Self::IO_BOUND_QUANTUM,
                Self::BALANCED_QUANTUM,
            ],
        }
    }

    /// Override the quantum of one class
    pub fn with_quantum(mut self, class: WorkloadClass, quantum: Quantum) -> Self {
        self.table[class.index()] = quantum;
        self
    }

    /// Quantum configured for `class`
    pub fn quantum_for(&self, class: WorkloadClass) -> Quantum {
        self.table[class.index()]
    }
}

impl Default for WorkloadTablePredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSlicePredictor for WorkloadTablePredictor {
    fn predict(&mut self, features: &ProcessFeatures) -> Result<f64, PredictError> {
        let class = WorkloadClass::classify(features.cpu_burst_estimate, features.io_burst_estimate)
            .ok_or(PredictError::Unclassifiable)?;

        let quantum = self.quantum_for(class);
        log::debug!("[Predictor] Class {} -> quantum {}", class, quantum);
        Ok(quantum.get() as f64)
    }

    fn name(&self) -> &'static str {
        "Workload-Table"
    }
}
