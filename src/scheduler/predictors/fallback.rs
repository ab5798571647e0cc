/*
 * Fallback Predictor Adapter
 *
 * Stands in for a model that may not be available. When an inner
 * predictor is present every query is forwarded to it; when it is not,
 * every query fails with `PredictError::Unavailable` and the engine falls
 * back to its configured quantum for each dispatch.
 */

use super::super::traits::{PredictError, ProcessFeatures, TimeSlicePredictor};

/// Optional predictor
pub struct FallbackPredictor {
    inner: Option<Box<dyn TimeSlicePredictor>>,
}

impl FallbackPredictor {
    /// Forward every query to `inner`
    pub fn wrap(inner: Box<dyn TimeSlicePredictor>) -> Self {
        Self { inner: Some(inner) }
    }

    /// No model loaded
    pub fn unavailable() -> Self {
        log::warn!("[Predictor] No model available, every dispatch uses the fallback quantum");
        Self { inner: None }
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }
}

impl TimeSlicePredictor for FallbackPredictor {
    fn predict(&mut self, features: &ProcessFeatures) -> Result<f64, PredictError> {
        match self.inner.as_mut() {
            Some(inner) => inner.predict(features),
            None => Err(PredictError::Unavailable),
        }
    }

    fn name(&self) -> &'static str {
        match self.inner.as_ref() {
            Some(inner) => inner.name(),
            None => "Unavailable",
        }
    }
}

impl core::fmt::Debug for FallbackPredictor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FallbackPredictor")
            .field("inner", &self.name())
            .finish()
    }
}
