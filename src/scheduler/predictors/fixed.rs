/*
 * Fixed Quantum Predictor
 *
 * Ignores the features and answers the same quantum for every dispatch.
 * With it the engine degenerates into classic round-robin, which makes it
 * the deterministic baseline for traces and tests.
 */

use super::super::traits::{PredictError, ProcessFeatures, TimeSlicePredictor};
use super::super::types::Quantum;

/// Predictor that always recommends the same quantum
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedQuantum(pub Quantum);

impl FixedQuantum {
    pub fn new(ticks: u64) -> Self {
        FixedQuantum(Quantum(ticks))
    }
}

impl TimeSlicePredictor for FixedQuantum {
    fn predict(&mut self, _features: &ProcessFeatures) -> Result<f64, PredictError> {
        Ok(self.0.get() as f64)
    }

    fn name(&self) -> &'static str {
        "Fixed-Quantum"
    }
}
