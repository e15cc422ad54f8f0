use np_schedulability_engine::prelude::*;

fn job(task: u64, prio: u64, arrival: (u64, u64), cost: (u64, u64), deadline: u64) -> Job {
    Job::new(
        JobId::new(task, 0),
        0,
        Interval::new(Time::from_nanos(arrival.0), Time::from_nanos(arrival.1)),
        Interval::new(Time::from_nanos(cost.0), Time::from_nanos(cost.1)),
        Time::from_nanos(prio),
        Time::from_nanos(deadline),
        vec![],
        None,
    )
}

fn reindex(mut jobs: Vec<Job>) -> Vec<Job> {
    for (i, j) in jobs.iter_mut().enumerate() {
        j.index = i;
    }
    jobs
}

#[test]
fn cost_uncertainty_bounds_response_time() {
    let jobs = reindex(vec![
        job(1, 1, (0, 0), (1, 3), 10),
        job(2, 2, (0, 2), (1, 2), 10),
    ]);
    let problem = Problem::build(jobs, &[], &[]).unwrap();
    let analysis = explore(&problem, &AnalysisOptions::default()).unwrap();

    assert!(analysis.is_schedulable());
    let rt1 = analysis.get_finish_times(JobId::new(1, 0)).unwrap();
    assert_eq!(rt1, Interval::new(Time::from_nanos(1), Time::from_nanos(3)));

    let rt2 = analysis.get_finish_times(JobId::new(2, 0)).unwrap();
    assert_eq!(rt2.upto(), Time::from_nanos(5));
}

#[test]
fn equal_priority_jobs_explore_both_dispatch_orders() {
    let jobs = reindex(vec![
        job(1, 1, (0, 0), (3, 3), 5),
        job(2, 1, (0, 0), (3, 3), 5),
    ]);
    let problem = Problem::build(jobs, &[], &[]).unwrap();
    let analysis = explore(&problem, &AnalysisOptions { early_exit: false, ..Default::default() }).unwrap();

    // Whichever job runs second finishes at 6, past the deadline of 5.
    assert!(!analysis.is_schedulable());
    assert!(analysis.observed_deadline_miss());
}

#[test]
fn deadline_earlier_than_minimal_completion_is_infeasible_immediately() {
    let jobs = reindex(vec![job(1, 1, (2, 2), (3, 3), 4)]);
    let problem = Problem::build(jobs, &[], &[]).unwrap();
    let analysis = explore(&problem, &AnalysisOptions::default()).unwrap();

    assert!(!analysis.is_schedulable());
}

#[test]
fn naive_and_merged_exploration_agree_on_verdict() {
    let jobs = reindex(vec![
        job(1, 1, (0, 0), (1, 1), 10),
        job(2, 1, (0, 0), (1, 1), 10),
        job(3, 2, (0, 0), (2, 2), 10),
    ]);

    let naive = explore(
        &Problem::build(jobs.clone(), &[], &[]).unwrap(),
        &AnalysisOptions { be_naive: true, ..Default::default() },
    )
    .unwrap();
    let merged = explore(&Problem::build(jobs, &[], &[]).unwrap(), &AnalysisOptions::default()).unwrap();

    assert_eq!(naive.is_schedulable(), merged.is_schedulable());
    assert!(merged.number_of_nodes() <= naive.number_of_nodes());
}

#[test]
fn rerunning_the_same_workload_is_byte_identical() {
    let jobs = reindex(vec![
        job(1, 1, (0, 0), (1, 2), 10),
        job(2, 2, (0, 1), (1, 1), 10),
    ]);
    let problem = Problem::build(jobs, &[], &[]).unwrap();

    let a = explore(&problem, &AnalysisOptions::default()).unwrap();
    let b = explore(&problem, &AnalysisOptions::default()).unwrap();

    assert_eq!(a.is_schedulable(), b.is_schedulable());
    assert_eq!(a.response_times().len(), b.response_times().len());
    for (id, range) in a.response_times() {
        assert_eq!(b.response_times().get(id), Some(range));
    }
}

#[test]
fn an_hour_long_timeout_budget_never_fires_on_a_tiny_workload() {
    let jobs = reindex(vec![job(1, 1, (0, 0), (1, 1), 10)]);
    let problem = Problem::build(jobs, &[], &[]).unwrap();
    let analysis = explore(&problem, &AnalysisOptions { timeout_s: 3600.0, ..Default::default() }).unwrap();

    assert!(!analysis.was_timed_out());
    assert!(analysis.is_schedulable());
}

#[test]
fn a_one_nanosecond_timeout_budget_fires_on_a_nontrivial_workload() {
    let jobs = reindex(vec![
        job(1, 1, (0, 0), (1, 1), 100),
        job(2, 2, (0, 0), (1, 1), 100),
        job(3, 3, (0, 0), (1, 1), 100),
        job(4, 4, (0, 0), (1, 1), 100),
        job(5, 5, (0, 0), (1, 1), 100),
    ]);
    let problem = Problem::build(jobs, &[], &[]).unwrap();
    let analysis = explore(&problem, &AnalysisOptions { timeout_s: 1e-9, ..Default::default() }).unwrap();

    assert!(analysis.was_timed_out());
    assert!(!analysis.is_schedulable());
}

#[test]
fn dangling_abort_target_is_rejected() {
    let jobs = reindex(vec![job(1, 1, (0, 0), (1, 1), 10)]);
    let dangling = JobId::new(42, 0);
    let abort = AbortAction {
        trigger: Interval::degenerate(Time::from_nanos(1)),
        cleanup_cost: Interval::degenerate(Time::from_nanos(1)),
    };
    let err = Problem::build(jobs, &[], &[(dangling, abort)]).unwrap_err();
    assert_eq!(err, EngineError::InvalidAbortTarget(dangling));
}
