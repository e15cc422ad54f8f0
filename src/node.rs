//! A schedule node: the merge unit grouping every [`ScheduleState`] that
//! shares a scheduled-set and key.

use crate::interval::Interval;
use crate::scheduled_set::ScheduledSet;
use crate::state::ScheduleState;
use crate::time::Time;

pub mod prelude {
    pub use super::ScheduleNode;
}

#[derive(Clone, Debug)]
pub struct ScheduleNode {
    scheduled: ScheduledSet,
    key: u64,
    states: Vec<ScheduleState>,
}

impl ScheduleNode {
    pub fn initial(num_jobs: usize) -> Self {
        ScheduleNode {
            scheduled: ScheduledSet::empty(num_jobs),
            key: 0,
            states: vec![ScheduleState::initial()],
        }
    }

    pub fn new(scheduled: ScheduledSet, key: u64, finish_range: Interval, earliest_pending_release: Time) -> Self {
        ScheduleNode { scheduled, key, states: vec![ScheduleState::new(finish_range, earliest_pending_release)] }
    }

    pub fn scheduled(&self) -> &ScheduledSet {
        &self.scheduled
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn states(&self) -> &[ScheduleState] {
        &self.states
    }

    /// Merge `finish_range` into this node: widen an existing state whose
    /// interval intersects it, or append a new disjoint state. Returns
    /// `true` if an existing state was widened (as opposed to a new one
    /// being appended).
    pub fn merge_or_append(&mut self, finish_range: Interval, earliest_pending_release: Time) -> bool {
        for state in &mut self.states {
            if state.finish_range().intersects(&finish_range) {
                state.widen(finish_range, earliest_pending_release);
                return true;
            }
        }
        self.states.push(ScheduleState::new(finish_range, earliest_pending_release));
        false
    }
}
