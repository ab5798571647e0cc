//! Hand-traced runs of the engine

use log::LevelFilter;

use super::support::{
    FailingPredictor, RecordingPredictor, ScriptedPredictor, batch, batch_with_io, dispatch_order,
    durations, predictions, quanta,
};
use crate::metrics::Metrics;
use crate::scheduler::predictors::{FallbackPredictor, FixedQuantum, WorkloadTablePredictor};
use crate::scheduler::{
    self, ExecutionStep, Priority, Process, ProcessError, ProcessId, ProcessSet, Quantum,
    Scheduler, SchedulerConfig, StepAction, Workload,
};
use crate::utils::{log_buffer, logger};

const P1: ProcessId = ProcessId(1);
const P2: ProcessId = ProcessId(2);
const P3: ProcessId = ProcessId(3);

#[test]
fn test_three_process_trace_with_quantum_two() {
    let mut predictor = FixedQuantum::new(2);
    let schedule = scheduler::run(batch(&[(0, 5), (1, 3), (2, 8)]), &mut predictor)
        .expect("schedule");

    let q = Quantum(2);
    let expected = vec![
        ExecutionStep::executing(0, P1, 2, 3, q),
        ExecutionStep::arrived(1, P2, 3),
        ExecutionStep::arrived(2, P3, 8),
        ExecutionStep::requeued(2, P1, 3),
        ExecutionStep::executing(2, P2, 2, 1, q),
        ExecutionStep::requeued(4, P2, 1),
        ExecutionStep::executing(4, P3, 2, 6, q),
        ExecutionStep::requeued(6, P3, 6),
        ExecutionStep::executing(6, P1, 2, 1, q),
        ExecutionStep::requeued(8, P1, 1),
        ExecutionStep::executing(8, P2, 1, 0, q),
        ExecutionStep::completed(9, P2),
        ExecutionStep::executing(9, P3, 2, 4, q),
        ExecutionStep::requeued(11, P3, 4),
        ExecutionStep::executing(11, P1, 1, 0, q),
        ExecutionStep::completed(12, P1),
        ExecutionStep::executing(12, P3, 2, 2, q),
        ExecutionStep::requeued(14, P3, 2),
        ExecutionStep::executing(14, P3, 2, 0, q),
        ExecutionStep::completed(16, P3),
    ];
    assert_eq!(schedule.steps(), expected.as_slice());

    // (pid, start, response, completion, turnaround, waiting)
    let expected_times = [
        (P1, 0, 0, 12, 12, 7),
        (P2, 2, 1, 9, 8, 5),
        (P3, 4, 2, 16, 14, 6),
    ];
    for (pid, start, response, completion, turnaround, waiting) in expected_times {
        let p = schedule.process(pid).expect("finalized process");
        assert_eq!(p.start_time(), Some(start), "{} start", pid);
        assert_eq!(p.response_time(), Some(response), "{} response", pid);
        assert_eq!(p.completion_time(), Some(completion), "{} completion", pid);
        assert_eq!(p.turnaround_time(), Some(turnaround), "{} turnaround", pid);
        assert_eq!(p.waiting_time(), Some(waiting), "{} waiting", pid);
    }

    let metrics = Metrics::from_schedule(&schedule).expect("metrics");
    assert_eq!(metrics.process_count, 3);
    assert!((metrics.avg_waiting - 6.0).abs() < 1e-9);
    assert!((metrics.avg_turnaround - 34.0 / 3.0).abs() < 1e-9);
    assert!((metrics.avg_response - 1.0).abs() < 1e-9);
    assert!((metrics.cpu_utilization - 100.0).abs() < 1e-9);
    assert!((metrics.throughput - 3.0 / 16.0).abs() < 1e-9);
}

#[test]
fn test_zero_burst_completes_on_first_dispatch() {
    let mut predictor = FixedQuantum::new(2);
    let schedule = scheduler::run(batch(&[(0, 0)]), &mut predictor).expect("schedule");

    assert_eq!(
        schedule.steps(),
        &[
            ExecutionStep::executing(0, P1, 0, 0, Quantum(2)),
            ExecutionStep::completed(0, P1),
        ]
    );

    let p = schedule.process(P1).expect("P1");
    assert_eq!(p.completion_time(), Some(0));
    assert_eq!(p.turnaround_time(), Some(0));
    assert_eq!(p.waiting_time(), Some(0));

    let metrics = Metrics::from_schedule(&schedule).expect("metrics");
    assert_eq!(metrics.cpu_utilization, 0.0);
    assert_eq!(metrics.throughput, 0.0);
}

#[test]
fn test_failing_predictor_uses_fallback_quantum() {
    let schedule = scheduler::run(batch(&[(0, 10)]), &mut FailingPredictor).expect("schedule");

    assert_eq!(durations(&schedule), vec![4, 4, 2]);
    assert_eq!(quanta(&schedule), vec![4, 4, 4]);
    assert_eq!(schedule.fallback_count(), 3);
    assert_eq!(schedule.process(P1).and_then(|p| p.completion_time()), Some(10));
}

#[test]
fn test_unavailable_model_uses_configured_fallback() {
    let config = SchedulerConfig::with_fallback(Quantum(3));
    let mut scheduler = Scheduler::with_config(Box::new(FallbackPredictor::unavailable()), config);
    let schedule = scheduler.run(batch(&[(0, 7)])).expect("schedule");

    assert_eq!(durations(&schedule), vec![3, 3, 1]);
    assert_eq!(schedule.fallback_count(), 3);
}

#[test]
fn test_fallback_below_floor_is_raised() {
    let config = SchedulerConfig {
        fallback_quantum: Quantum(0),
        min_quantum: Quantum::MIN,
    };
    let schedule = scheduler::run_with_config(batch(&[(0, 2)]), &mut FailingPredictor, &config)
        .expect("schedule");

    assert_eq!(durations(&schedule), vec![1, 1]);
}

#[test]
fn test_predictions_are_normalized() {
    // 2.6 rounds to 3, 0.2 is raised to the floor, NaN falls back to 4
    let mut predictor = ScriptedPredictor::new(&[2.6, 0.2, f64::NAN]);
    let schedule = scheduler::run(batch(&[(0, 10)]), &mut predictor).expect("schedule");

    assert_eq!(quanta(&schedule), vec![3, 1, 4, 3]);
    assert_eq!(durations(&schedule), vec![3, 1, 4, 2]);
    assert_eq!(schedule.fallback_count(), 1);
}

#[test]
fn test_fractional_prediction_is_kept_on_the_step() {
    let mut predictor = ScriptedPredictor::new(&[1.4]);
    let schedule = scheduler::run(batch(&[(0, 3)]), &mut predictor).expect("schedule");

    assert_eq!(quanta(&schedule), vec![1, 1, 1]);
    assert_eq!(predictions(&schedule), vec![1.4, 1.4, 1.4]);
}

#[test]
fn test_fallback_steps_record_fallback_prediction() {
    let mut predictor = ScriptedPredictor::new(&[2.5, f64::NAN, 0.5]);
    let schedule = scheduler::run(batch(&[(0, 8)]), &mut predictor).expect("schedule");

    // 2.5 rounds half away from zero; 0.5 is raised to the floor first
    assert_eq!(quanta(&schedule), vec![3, 4, 1]);
    assert_eq!(predictions(&schedule), vec![2.5, 4.0, 1.0]);
}

#[test]
fn test_negative_and_infinite_predictions() {
    let mut predictor = ScriptedPredictor::new(&[-3.0, f64::INFINITY]);
    let schedule = scheduler::run(batch(&[(0, 6)]), &mut predictor).expect("schedule");

    assert_eq!(quanta(&schedule), vec![1, 4, 1]);
    assert_eq!(durations(&schedule), vec![1, 4, 1]);
    assert_eq!(schedule.fallback_count(), 1);
}

#[test]
fn test_workload_table_quanta_follow_class() {
    // P1 CPU-bound, P2 IO-bound, P3 balanced
    let set = batch_with_io(&[(0, 10, 0.0), (0, 3, 5.0), (0, 4, 3.0)]);
    let schedule = scheduler::run(set, &mut WorkloadTablePredictor::new()).expect("schedule");

    assert_eq!(dispatch_order(&schedule), vec![P1, P2, P3, P1]);
    assert_eq!(quanta(&schedule), vec![8, 4, 6, 8]);
    assert_eq!(durations(&schedule), vec![8, 3, 4, 2]);
    assert_eq!(schedule.process(P2).and_then(|p| p.completion_time()), Some(11));
    assert_eq!(schedule.process(P3).and_then(|p| p.completion_time()), Some(15));
    assert_eq!(schedule.process(P1).and_then(|p| p.completion_time()), Some(17));
}

#[test]
fn test_rerun_is_deterministic() {
    let set = batch_with_io(&[(0, 9, 1.0), (2, 4, 7.0), (2, 6, 4.0), (11, 3, 0.0)]);

    let first = scheduler::run(set.clone(), &mut WorkloadTablePredictor::new());
    let second = scheduler::run(set, &mut WorkloadTablePredictor::new());
    assert_eq!(first, second);
}

#[test]
fn test_equal_arrivals_keep_input_order() {
    let set = ProcessSet::new(vec![
        Process::new(P3, Workload::new(0, 2, Priority(1), 0.0, 0.0)),
        Process::new(P1, Workload::new(0, 2, Priority(1), 0.0, 0.0)),
        Process::new(P2, Workload::new(0, 2, Priority(1), 0.0, 0.0)),
    ])
    .expect("valid set");
    let schedule = scheduler::run(set, &mut FixedQuantum::new(2)).expect("schedule");

    assert_eq!(dispatch_order(&schedule), vec![P3, P1, P2]);
    let head: Vec<_> = schedule.steps()[..4].iter().map(|s| (s.action, s.pid)).collect();
    assert_eq!(
        head,
        vec![
            (StepAction::Executing, P3),
            (StepAction::Arrived, P1),
            (StepAction::Arrived, P2),
            (StepAction::Completed, P3),
        ]
    );
    // processes come back ordered by pid
    let pids: Vec<_> = schedule.processes().iter().map(|p| p.id()).collect();
    assert_eq!(pids, vec![P1, P2, P3]);
}

#[test]
fn test_idle_gap_restart_admits_same_tick_arrivals_after_dispatch() {
    let schedule = scheduler::run(batch(&[(0, 2), (5, 2), (5, 1)]), &mut FixedQuantum::new(2))
        .expect("schedule");

    let actions: Vec<_> = schedule.steps().iter().map(|s| (s.action, s.pid, s.time)).collect();
    assert_eq!(
        actions,
        vec![
            (StepAction::Executing, P1, 0),
            (StepAction::Completed, P1, 2),
            (StepAction::Executing, P2, 5),
            (StepAction::Arrived, P3, 5),
            (StepAction::Completed, P2, 7),
            (StepAction::Executing, P3, 7),
            (StepAction::Completed, P3, 8),
        ]
    );

    let metrics = Metrics::from_schedule(&schedule).expect("metrics");
    assert_eq!(metrics.makespan, 8);
    assert!((metrics.cpu_utilization - 62.5).abs() < 1e-9);
}

#[test]
fn test_late_admission_logs_own_arrival_time() {
    // P2 arrives at 1 but is only admitted when P1's quantum ends at 5
    let schedule = scheduler::run(batch(&[(0, 8), (1, 2)]), &mut FixedQuantum::new(5))
        .expect("schedule");

    assert_eq!(schedule.steps()[1], ExecutionStep::arrived(1, P2, 2));
    assert_eq!(schedule.steps()[2], ExecutionStep::requeued(5, P1, 3));
    let p2 = schedule.process(P2).expect("P2");
    assert_eq!(p2.response_time(), Some(4));
}

#[test]
fn test_predictor_sees_static_features() {
    let set = ProcessSet::from_workloads(vec![Workload::new(3, 5, Priority(7), 2.5, 64.0)])
        .expect("valid set");
    let mut predictor = RecordingPredictor::new(2.0);
    let schedule = scheduler::run(set, &mut predictor).expect("schedule");

    assert_eq!(schedule.dispatch_count(), 3);
    assert_eq!(predictor.seen.len(), 3);
    for features in &predictor.seen {
        assert_eq!(features.priority, 7.0);
        assert_eq!(features.cpu_burst_estimate, 5.0);
        assert_eq!(features.io_burst_estimate, 2.5);
        assert_eq!(features.arrival_time, 3.0);
        assert_eq!(features.memory_requirement, 64.0);
        assert_eq!(features.total_cpu_used, 5.0);
        assert_eq!(features.waiting_time, 0.0);
        assert_eq!(features.turnaround_time, 0.0);
    }
}

#[test]
fn test_duplicate_pids_are_rejected() {
    let result = ProcessSet::new(vec![
        Process::new(P1, Workload::new(0, 2, Priority(1), 0.0, 0.0)),
        Process::new(P1, Workload::new(1, 3, Priority(1), 0.0, 0.0)),
    ]);
    assert_eq!(result, Err(ProcessError::DuplicatePid(P1)));
}

#[test]
fn test_finished_processes_cannot_be_rescheduled() {
    let schedule = scheduler::run(batch(&[(0, 2)]), &mut FixedQuantum::new(2)).expect("schedule");
    let (processes, _) = schedule.into_parts();
    assert_eq!(
        ProcessSet::new(processes),
        Err(ProcessError::AlreadyScheduled(P1))
    );
}

#[test]
fn test_prediction_failures_are_logged() {
    // Another suite may have installed the logger first
    let _ = logger::init(LevelFilter::Warn);

    let set = ProcessSet::new(vec![Process::new(
        ProcessId(9001),
        Workload::new(0, 1, Priority(1), 0.0, 0.0),
    )])
    .expect("valid set");
    scheduler::run(set, &mut FailingPredictor).expect("schedule");

    assert!(log_buffer::contains("Prediction failed for P9001"));
    assert!(log_buffer::contains("model file missing"));
}
