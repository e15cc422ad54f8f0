//! A schedule state: the abstraction of "all concrete schedules that have
//! dispatched a specific set of jobs and whose processor finish-time lies
//! in an interval". The scheduled set itself lives on the enclosing
//! [`crate::node::ScheduleNode`], not here.

use crate::interval::Interval;
use crate::time::Time;

pub mod prelude {
    pub use super::ScheduleState;
}

#[derive(Clone, Copy, Debug)]
#[derive(PartialEq)]
pub struct ScheduleState {
    finish_time: Interval,
    /// A lower bound on the earliest arrival of any job not yet dispatched
    /// along the path that reached this state. Used to avoid rescanning
    /// jobs the engine already knows can't be candidates.
    earliest_pending_release: Time,
}

impl ScheduleState {
    pub fn new(finish_time: Interval, earliest_pending_release: Time) -> Self {
        ScheduleState { finish_time, earliest_pending_release }
    }

    pub fn initial() -> Self {
        ScheduleState {
            finish_time: Interval::degenerate(Time::ZERO),
            earliest_pending_release: Time::ZERO,
        }
    }

    pub fn finish_range(&self) -> Interval {
        self.finish_time
    }

    pub fn earliest_finish_time(&self) -> Time {
        self.finish_time.from()
    }

    pub fn latest_finish_time(&self) -> Time {
        self.finish_time.upto()
    }

    pub fn earliest_pending_release(&self) -> Time {
        self.earliest_pending_release
    }

    /// Widen this state's finish interval to also cover `other`, and its
    /// pending-release bound to the lower (more conservative) of the two,
    /// so the merged state remains a sound lower bound for both of the
    /// paths it now represents.
    pub fn widen(&mut self, other: Interval, other_pending_release: Time) {
        self.finish_time.widen(other);
        self.earliest_pending_release = self.earliest_pending_release.min(other_pending_release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_zero_zero() {
        let s = ScheduleState::initial();
        assert_eq!(s.finish_range(), Interval::degenerate(Time::ZERO));
    }

    #[test]
    fn widen_only_grows_the_interval() {
        let mut s = ScheduleState::new(Interval::new(Time::from_nanos(3), Time::from_nanos(5)), Time::from_nanos(9));
        s.widen(Interval::new(Time::from_nanos(1), Time::from_nanos(4)), Time::from_nanos(2));
        assert_eq!(s.finish_range(), Interval::new(Time::from_nanos(1), Time::from_nanos(5)));
        assert_eq!(s.earliest_pending_release(), Time::from_nanos(2));
    }
}
