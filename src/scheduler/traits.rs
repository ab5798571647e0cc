/*
 * Time Slice Predictor Interface
 *
 * The engine decides *who* runs next (strict FIFO); a predictor decides
 * *how long*. This module defines the boundary between the two:
 *
 * - ProcessFeatures: the feature vector the engine hands out per dispatch
 * - TimeSlicePredictor: the capability that turns features into a quantum
 *
 * Predictors may fail. They never apply a fallback themselves; the engine
 * substitutes its configured fallback quantum and keeps going.
 */

use core::fmt;

/// Number of features in a predictor query
pub const FEATURE_COUNT: usize = 8;

/// Feature vector for one predictor query
///
/// Field order matches `ProcessFeatures::NAMES` and `to_array`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessFeatures {
    pub priority: f64,
    pub cpu_burst_estimate: f64,
    pub io_burst_estimate: f64,
    pub arrival_time: f64,
    pub memory_requirement: f64,
    pub total_cpu_used: f64,
    pub waiting_time: f64,
    pub turnaround_time: f64,
}

impl ProcessFeatures {
    /// Column names, in vector order
    pub const NAMES: [&'static str; FEATURE_COUNT] = [
        "priority",
        "cpu_burst_est",
        "io_burst_est",
        "arrival_time",
        "memory_req",
        "total_cpu_used",
        "waiting_time",
        "turnaround_time",
    ];

    /// Flatten into model input order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.priority,
            self.cpu_burst_estimate,
            self.io_burst_estimate,
            self.arrival_time,
            self.memory_requirement,
            self.total_cpu_used,
            self.waiting_time,
            self.turnaround_time,
        ]
    }

    /// Whether every feature is a finite number
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|value| value.is_finite())
    }
}

impl fmt::Display for ProcessFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in Self::NAMES.iter().zip(self.to_array()).enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

/// Reasons a predictor query can fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// No model is loaded
    Unavailable,
    /// The features do not map to any known workload
    Unclassifiable,
    /// The model rejected the query
    Model(String),
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::Unavailable => write!(f, "Predictor model unavailable"),
            PredictError::Unclassifiable => write!(f, "Features do not match a workload class"),
            PredictError::Model(reason) => write!(f, "Model error: {}", reason),
        }
    }
}

impl std::error::Error for PredictError {}

/// Time slice predictor
///
/// Queried once per dispatch, synchronously, never concurrently. The
/// returned value is raw: the engine clamps it to its quantum floor and
/// rounds it to whole ticks.
pub trait TimeSlicePredictor: Send {
    /// Recommend a quantum for the process described by `features`
    fn predict(&mut self, features: &ProcessFeatures) -> Result<f64, PredictError>;

    /// Predictor name for logs and reports
    fn name(&self) -> &'static str;
}

impl<P: TimeSlicePredictor + ?Sized> TimeSlicePredictor for Box<P> {
    fn predict(&mut self, features: &ProcessFeatures) -> Result<f64, PredictError> {
        (**self).predict(features)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
