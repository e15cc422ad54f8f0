//! Successor-job eligibility and finish-time derivation.
//!
//! These are free functions rather than methods on [`super::Analysis`] so
//! that the eligibility rules can be unit-tested against bare
//! `(jobs, index, iip, scheduled, state)` tuples without spinning up a full
//! exploration run.

use crate::iip::Iip;
use crate::job::{Job, Workload};
use crate::index::JobIndex;
use crate::interval::Interval;
use crate::scheduled_set::ScheduledSet;
use crate::state::ScheduleState;
use crate::time::Time;

fn incomplete(scheduled: &ScheduledSet, j: &Job) -> bool {
    !scheduled.contains(j.index)
}

/// All predecessors of `j` have completed in `scheduled`.
pub fn ready(scheduled: &ScheduledSet, j: &Job) -> bool {
    scheduled.includes(&j.predecessors)
}

fn iip_eligible(iip: &impl Iip, j: &Job, t: Time, s: &ScheduleState) -> bool {
    !iip.can_block() || t <= iip.latest_start(j, t, s)
}

/// True if some incomplete, ready, higher-priority-than-`reference` job is
/// certainly released (`latest_arrival <= at`).
fn exists_certainly_released_higher_prio_job(
    jobs: &Workload,
    index: &JobIndex,
    scheduled: &ScheduledSet,
    reference: &Job,
    at: Time,
) -> bool {
    for idx in index.by_latest_arrival_all() {
        let j = &jobs[idx];
        if j.latest_arrival() > at {
            break;
        }
        if j.index == reference.index {
            continue;
        }
        if !incomplete(scheduled, j) {
            continue;
        }
        if !ready(scheduled, j) {
            continue;
        }
        if j.higher_priority_than(reference) {
            return true;
        }
    }
    false
}

fn priority_eligible(
    jobs: &Workload,
    index: &JobIndex,
    scheduled: &ScheduledSet,
    j: &Job,
    t: Time,
) -> bool {
    !exists_certainly_released_higher_prio_job(jobs, index, scheduled, j, t)
}

/// The earliest `latest_arrival` over every incomplete job that is, at its
/// own latest arrival, both priority- and IIP-eligible: the earliest moment
/// the processor is certainly forced to start *something*.
///
/// Scans the full workload rather than starting from the state's earliest
/// finish time: an already-scheduled job can have an arbitrarily early
/// `latest_arrival` and must still be excluded via `incomplete`, not via
/// where the scan starts.
pub fn next_eligible_job_ready(
    jobs: &Workload,
    index: &JobIndex,
    scheduled: &ScheduledSet,
    iip: &impl Iip,
    s: &ScheduleState,
) -> Time {
    for idx in index.by_latest_arrival_all() {
        let j = &jobs[idx];
        if !incomplete(scheduled, j) {
            continue;
        }
        let t = j.latest_arrival().max(s.latest_finish_time());
        if priority_eligible(jobs, index, scheduled, j, t) && iip_eligible(iip, j, t, s) {
            return j.latest_arrival();
        }
    }
    Time::INFINITY
}

/// The earliest certain release, among incomplete jobs of strictly higher
/// priority than `reference`, falling back to `+INF`.
fn next_certain_higher_priority_job_release(
    jobs: &Workload,
    index: &JobIndex,
    scheduled: &ScheduledSet,
    reference: &Job,
) -> Time {
    for idx in index.by_latest_arrival_all() {
        let j = &jobs[idx];
        if !incomplete(scheduled, j) {
            continue;
        }
        if !j.higher_priority_than(reference) {
            continue;
        }
        return j.latest_arrival();
    }
    Time::INFINITY
}

pub fn next_earliest_start_time(s: &ScheduleState, j: &Job) -> Time {
    s.earliest_finish_time().max(j.earliest_arrival())
}

fn next_earliest_finish_time(s: &ScheduleState, j: &Job) -> Time {
    next_earliest_start_time(s, j) + j.least_cost()
}

fn next_latest_finish_time(
    jobs: &Workload,
    index: &JobIndex,
    scheduled: &ScheduledSet,
    iip: &impl Iip,
    s: &ScheduleState,
    j: &Job,
) -> Time {
    let t_s = next_earliest_start_time(s, j);
    let other_certain_start = next_certain_higher_priority_job_release(jobs, index, scheduled, j);
    let iip_latest_start = iip.latest_start(j, t_s, s);

    let own_latest_start =
        s.latest_finish_time().max(next_eligible_job_ready(jobs, index, scheduled, iip, s));

    let last_start_before_other =
        (other_certain_start - Time::EPSILON).min(iip_latest_start);

    own_latest_start.min(last_start_before_other) + j.maximal_cost()
}

/// `true` unless some other incomplete, IIP-eligible job is guaranteed to
/// be released strictly before `j` while `j` isn't trivially next.
fn potentially_next(
    jobs: &Workload,
    index: &JobIndex,
    scheduled: &ScheduledSet,
    iip: &impl Iip,
    s: &ScheduleState,
    j: &Job,
) -> bool {
    if s.latest_finish_time() >= j.earliest_arrival() {
        return true;
    }

    for idx in index.by_latest_arrival_all() {
        let k = &jobs[idx];
        if !incomplete(scheduled, k) {
            continue;
        }
        if k.latest_arrival() >= j.earliest_arrival() {
            continue;
        }
        let t = k.latest_arrival().max(s.latest_finish_time());
        if iip_eligible(iip, k, t, s) {
            return false;
        }
    }
    true
}

pub fn is_eligible_successor(
    jobs: &Workload,
    index: &JobIndex,
    scheduled: &ScheduledSet,
    iip: &impl Iip,
    s: &ScheduleState,
    j: &Job,
) -> bool {
    if !incomplete(scheduled, j) {
        return false;
    }
    if !ready(scheduled, j) {
        return false;
    }
    let t_s = next_earliest_start_time(s, j);
    if !priority_eligible(jobs, index, scheduled, j, t_s) {
        return false;
    }
    if !potentially_next(jobs, index, scheduled, iip, s, j) {
        return false;
    }
    if !iip_eligible(iip, j, t_s, s) {
        return false;
    }
    true
}

/// `true` if `j` carries an abort action whose trigger has certainly
/// already passed in `s` — meaning `j` is skipped entirely rather than
/// dispatched.
pub fn is_abort_skip(s: &ScheduleState, j: &Job) -> bool {
    match &j.abort {
        Some(abort) => s.earliest_finish_time() >= abort.earliest_trigger_time(),
        None => false,
    }
}

/// The earliest arrival among incomplete jobs other than `ignored`, scanning
/// forward from `from`. Becomes the new state's `earliest_pending_release`.
pub fn earliest_possible_job_release(
    jobs: &Workload,
    index: &JobIndex,
    scheduled: &ScheduledSet,
    ignored: &Job,
    from: Time,
) -> Time {
    for idx in index.by_earliest_arrival_from(from) {
        let j = &jobs[idx];
        if j.index == ignored.index {
            continue;
        }
        if incomplete(scheduled, j) {
            return j.earliest_arrival();
        }
    }
    Time::INFINITY
}

/// The successor's finish-time interval, including the abort
/// skip/completion handling.
pub fn next_finish_times(
    jobs: &Workload,
    index: &JobIndex,
    scheduled: &ScheduledSet,
    iip: &impl Iip,
    s: &ScheduleState,
    j: &Job,
) -> Interval {
    if let Some(abort) = &j.abort {
        let et = abort.earliest_trigger_time();
        if s.earliest_finish_time() >= et {
            // certainly past the trigger: the job never starts, is skipped
            return s.finish_range();
        }

        let eft = next_earliest_finish_time(s, j);
        let lft = next_latest_finish_time(jobs, index, scheduled, iip, s, j);

        let eat = abort.earliest_completion();
        let lat = abort.latest_completion();

        Interval::new(eft.min(eat), lft.min(lat))
    } else {
        Interval::new(
            next_earliest_finish_time(s, j),
            next_latest_finish_time(jobs, index, scheduled, iip, s, j),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iip::NullIip;
    use crate::job::JobId;

    fn job(index: usize, prio: u64, arrival: (u64, u64), cost: (u64, u64), deadline: u64) -> Job {
        Job::new(
            JobId::new(0, index as u64),
            index,
            Interval::new(Time::from_nanos(arrival.0), Time::from_nanos(arrival.1)),
            Interval::new(Time::from_nanos(cost.0), Time::from_nanos(cost.1)),
            Time::from_nanos(prio),
            Time::from_nanos(deadline),
            vec![],
            None,
        )
    }

    #[test]
    fn higher_priority_job_blocks_lower_priority_successor() {
        let jobs = vec![
            job(0, 1, (0, 0), (1, 1), 10),
            job(1, 2, (0, 0), (1, 1), 10),
        ];
        let index = JobIndex::build(&jobs, 4);
        let scheduled = ScheduledSet::empty(2);
        let s = ScheduleState::initial();

        // J1 (index 1, lower priority) is not eligible while J0 is still pending.
        assert!(!is_eligible_successor(&jobs, &index, &scheduled, &NullIip, &s, &jobs[1]));
        assert!(is_eligible_successor(&jobs, &index, &scheduled, &NullIip, &s, &jobs[0]));
    }

    #[test]
    fn predecessor_not_ready_blocks_eligibility() {
        let mut jobs = vec![
            job(0, 2, (0, 0), (1, 1), 10),
            job(1, 1, (0, 0), (1, 1), 10),
        ];
        jobs[1].predecessors.push(0);
        let index = JobIndex::build(&jobs, 4);
        let scheduled = ScheduledSet::empty(2);
        let s = ScheduleState::initial();

        // J2 (index 1) has higher priority but isn't ready: predecessor J1 hasn't run.
        assert!(!is_eligible_successor(&jobs, &index, &scheduled, &NullIip, &s, &jobs[1]));

        let scheduled_after_j1 = scheduled.with(0);
        assert!(is_eligible_successor(&jobs, &index, &scheduled_after_j1, &NullIip, &s, &jobs[1]));
    }

    #[test]
    fn finish_times_match_s2_scenario() {
        // J1 arr=[0,0] cost=[2,2] prio=1 dl=5; J2 arr=[0,0] cost=[2,2] prio=2 dl=5
        let jobs = vec![
            job(0, 1, (0, 0), (2, 2), 5),
            job(1, 2, (0, 0), (2, 2), 5),
        ];
        let index = JobIndex::build(&jobs, 4);
        let scheduled = ScheduledSet::empty(2);
        let s = ScheduleState::initial();

        let range_j1 = next_finish_times(&jobs, &index, &scheduled, &NullIip, &s, &jobs[0]);
        assert_eq!(range_j1, Interval::new(Time::from_nanos(2), Time::from_nanos(2)));

        let after_j1 = ScheduleState::new(range_j1, Time::ZERO);
        let scheduled_after_j1 = scheduled.with(0);
        let range_j2 = next_finish_times(&jobs, &index, &scheduled_after_j1, &NullIip, &after_j1, &jobs[1]);
        assert_eq!(range_j2, Interval::new(Time::from_nanos(4), Time::from_nanos(4)));
    }

    #[test]
    fn abort_skips_job_once_state_is_past_trigger() {
        use crate::job::AbortAction;

        let mut j = job(0, 1, (0, 0), (5, 5), 100);
        j.abort = Some(AbortAction {
            trigger: Interval::degenerate(Time::from_nanos(1)),
            cleanup_cost: Interval::degenerate(Time::from_nanos(1)),
        });
        let jobs = vec![j];
        let index = JobIndex::build(&jobs, 4);
        let scheduled = ScheduledSet::empty(1);

        // A state whose earliest finish has already reached the trigger:
        // the job is skipped, finish range is the state's own range.
        let s = ScheduleState::new(Interval::degenerate(Time::from_nanos(1)), Time::ZERO);
        let range = next_finish_times(&jobs, &index, &scheduled, &NullIip, &s, &jobs[0]);
        assert_eq!(range, s.finish_range());
    }
}
