/*
 * Execution Log Definitions
 *
 * Every observable scheduling decision the engine makes is appended to the
 * execution log as an ExecutionStep. The log is ordered by decision, not by
 * event time: an arrival admitted late is logged when it is admitted, with
 * its own arrival time.
 */

use core::fmt;

use super::{
    process::ProcessId,
    types::{Ticks, TimeSlice},
};

/// What happened in a step
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StepAction {
    /// A pending process was admitted to the ready queue
    Arrived,

    /// A process was granted the CPU for `duration` ticks
    Executing,

    /// A process used its quantum without finishing and went to the back
    Requeued,

    /// A process finished its last tick of work
    Completed,
}

impl StepAction {
    /// Upper-case name used in the execution log
    pub fn name(&self) -> &'static str {
        match self {
            StepAction::Arrived => "ARRIVED",
            StepAction::Executing => "EXECUTING",
            StepAction::Requeued => "REQUEUED",
            StepAction::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the execution log
///
/// `duration`, `quantum` and `predicted_quantum` are zero for every action
/// except `Executing`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExecutionStep {
    /// Simulated clock at the event
    pub time: Ticks,
    pub pid: ProcessId,
    pub action: StepAction,
    /// Ticks actually consumed
    pub duration: Ticks,
    /// Remaining work after the step
    pub remaining_after: Ticks,
    /// Quantum granted to the dispatch, in whole ticks
    pub quantum: Ticks,
    /// Predictor output behind `quantum`, clamped but not rounded
    pub predicted_quantum: f64,
}

impl ExecutionStep {
    /// Admission of a process at its arrival time
    pub fn arrived(time: Ticks, pid: ProcessId, remaining: Ticks) -> Self {
        Self {
            time,
            pid,
            action: StepAction::Arrived,
            duration: 0,
            remaining_after: remaining,
            quantum: 0,
            predicted_quantum: 0.0,
        }
    }

    /// A dispatch starting at `time`
    pub fn executing(
        time: Ticks,
        pid: ProcessId,
        duration: Ticks,
        remaining_after: Ticks,
        slice: impl Into<TimeSlice>,
    ) -> Self {
        let slice = slice.into();
        Self {
            time,
            pid,
            action: StepAction::Executing,
            duration,
            remaining_after,
            quantum: slice.quantum.get(),
            predicted_quantum: slice.prediction,
        }
    }

    /// A process sent back to the end of the queue
    pub fn requeued(time: Ticks, pid: ProcessId, remaining: Ticks) -> Self {
        Self {
            time,
            pid,
            action: StepAction::Requeued,
            duration: 0,
            remaining_after: remaining,
            quantum: 0,
            predicted_quantum: 0.0,
        }
    }

    /// A process that finished at `time`
    pub fn completed(time: Ticks, pid: ProcessId) -> Self {
        Self {
            time,
            pid,
            action: StepAction::Completed,
            duration: 0,
            remaining_after: 0,
            quantum: 0,
            predicted_quantum: 0.0,
        }
    }

    pub fn is_executing(&self) -> bool {
        self.action == StepAction::Executing
    }
}
