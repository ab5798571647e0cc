/*
 * Time Slice Predictors Module
 *
 * Concrete TimeSlicePredictor implementations that can be plugged into
 * the Scheduler at construction time.
 *
 * Available predictors:
 * - FixedQuantum: same quantum for every dispatch (classic round-robin)
 * - WorkloadTablePredictor: quantum looked up from the workload class
 * - FallbackPredictor: wraps an optional model, reports it unavailable
 */

pub mod fallback;
pub mod fixed;
pub mod workload_table;

pub use fallback::FallbackPredictor;
pub use fixed::FixedQuantum;
pub use workload_table::WorkloadTablePredictor;
