/*
 * Scheduler Type Definitions
 *
 * This module defines the core value types used by the simulation engine,
 * the predictors and the reporting layer. They are small, Copy-able and
 * carry no behavior beyond normalization and classification.
 */

use core::fmt;

/// Simulated time, in whole ticks
pub type Ticks = u64;

/// Process priority
///
/// Stored and passed to predictors as a feature. The round-robin engine
/// never preempts or reorders on priority.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Priority(pub i32);

impl Priority {
    /// Get the raw priority value
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time slice granted to one dispatch, in ticks
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantum(pub Ticks);

impl Quantum {
    /// Smallest quantum a dispatch may receive (guarantees progress)
    pub const MIN: Quantum = Quantum(1);

    /// Quantum substituted when the predictor cannot answer
    pub const FALLBACK: Quantum = Quantum(4);

    /// Get the value in ticks
    pub fn get(self) -> Ticks {
        self.0
    }

    /// Turn a raw predictor output into a dispatchable quantum
    ///
    /// The raw value is clamped to `floor` and rounded to the nearest tick.
    /// Non-finite predictions yield `None` and are treated as a failed query.
    pub fn from_prediction(raw: f64, floor: Quantum) -> Option<Quantum> {
        TimeSlice::from_prediction(raw, floor).map(|slice| slice.quantum)
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantum granted to a dispatch, with the prediction behind it
///
/// `prediction` keeps the predictor's value after clamping to the floor,
/// before rounding. A fallback grant carries the fallback quantum itself.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeSlice {
    pub prediction: f64,
    pub quantum: Quantum,
}

impl TimeSlice {
    /// Normalize a raw predictor output; `None` for non-finite values
    pub fn from_prediction(raw: f64, floor: Quantum) -> Option<TimeSlice> {
        if !raw.is_finite() {
            return None;
        }

        let prediction = raw.max(floor.0 as f64);
        Some(TimeSlice {
            prediction,
            quantum: Quantum(prediction.round() as Ticks),
        })
    }
}

impl From<Quantum> for TimeSlice {
    fn from(quantum: Quantum) -> Self {
        TimeSlice {
            prediction: quantum.get() as f64,
            quantum,
        }
    }
}

/// Runtime knobs of the simulation engine
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Quantum used when the predictor fails
    pub fallback_quantum: Quantum,

    /// Lower bound applied to every predicted quantum
    pub min_quantum: Quantum,
}

impl SchedulerConfig {
    /// Config with a custom fallback quantum and the default floor
    pub fn with_fallback(fallback_quantum: Quantum) -> Self {
        Self {
            fallback_quantum,
            ..Self::default()
        }
    }

    /// Fallback quantum, never below the configured floor
    pub fn effective_fallback(&self) -> Quantum {
        self.fallback_quantum.max(self.min_quantum)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fallback_quantum: Quantum::FALLBACK,
            min_quantum: Quantum::MIN,
        }
    }
}

/// Workload class of a process
///
/// Derived from the ratio between the I/O and CPU burst estimates. The
/// workload-table predictor maps each class to a fixed burst and the
/// dispatch statistics are broken down by class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WorkloadClass {
    /// Mostly computes; I/O estimate below half the CPU estimate
    CpuBound,

    /// I/O estimate at least as large as the CPU estimate
    IoBound,

    /// Everything in between
    Balanced,
}

impl WorkloadClass {
    /// All classes, in reporting order
    pub const ALL: [WorkloadClass; 3] = [
        WorkloadClass::CpuBound,
        WorkloadClass::IoBound,
        WorkloadClass::Balanced,
    ];

    /// Classify a workload from its CPU and I/O burst estimates
    ///
    /// Returns `None` when either estimate is not a finite number.
    pub fn classify(cpu_estimate: f64, io_estimate: f64) -> Option<WorkloadClass> {
        if !cpu_estimate.is_finite() || !io_estimate.is_finite() {
            return None;
        }

        let ratio = io_estimate / cpu_estimate.max(1.0);
        let class = if ratio >= 1.0 {
            WorkloadClass::IoBound
        } else if ratio < 0.5 {
            WorkloadClass::CpuBound
        } else {
            WorkloadClass::Balanced
        };
        Some(class)
    }

    /// Stable index into per-class tables
    pub fn index(self) -> usize {
        match self {
            WorkloadClass::CpuBound => 0,
            WorkloadClass::IoBound => 1,
            WorkloadClass::Balanced => 2,
        }
    }

    /// Short name for tables and logs
    pub fn name(self) -> &'static str {
        match self {
            WorkloadClass::CpuBound => "CPU",
            WorkloadClass::IoBound => "IO",
            WorkloadClass::Balanced => "Balanced",
        }
    }
}

impl fmt::Display for WorkloadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
