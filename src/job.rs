//! The immutable job descriptor the engine analyzes, and its stable identity.

use crate::interval::Interval;
use crate::time::Time;

pub mod prelude {
    pub use super::{Job, JobId, AbortAction, Workload};
}

/// Stable identity of a job as a `(task, job)` pair: a task may release many
/// jobs over time, each with its own `job_id`.
#[derive(Clone, Copy, Debug, Default)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct JobId {
    pub task_id: u64,
    pub job_id: u64,
}

impl JobId {
    pub fn new(task_id: u64, job_id: u64) -> Self {
        JobId { task_id, job_id }
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}J{}", self.task_id, self.job_id)
    }
}

/// An optional rule attached to a job: past `trigger`, the job either
/// completes via a cleanup action or is skipped outright (see
/// [`crate::successors::next_finish_times`]).
#[derive(Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AbortAction {
    pub trigger: Interval,
    pub cleanup_cost: Interval,
}

impl AbortAction {
    pub fn earliest_trigger_time(&self) -> Time {
        self.trigger.from()
    }

    pub fn latest_trigger_time(&self) -> Time {
        self.trigger.upto()
    }

    pub fn earliest_completion(&self) -> Time {
        self.trigger.from() + self.cleanup_cost.from()
    }

    pub fn latest_completion(&self) -> Time {
        self.trigger.upto() + self.cleanup_cost.upto()
    }
}

/// An immutable job descriptor.
///
/// `priority` follows the convention that a *lower* value means *higher*
/// priority, matching the fixed-priority scheduling literature this engine
/// implements.
#[derive(Clone, Debug)]
pub struct Job {
    pub id: JobId,
    pub index: usize,
    pub arrival: Interval,
    pub cost: Interval,
    pub priority: Time,
    pub deadline: Time,
    pub predecessors: Vec<usize>,
    pub abort: Option<AbortAction>,
    key: u64,
}

impl Job {
    pub fn new(
        id: JobId,
        index: usize,
        arrival: Interval,
        cost: Interval,
        priority: Time,
        deadline: Time,
        predecessors: Vec<usize>,
        abort: Option<AbortAction>,
    ) -> Self {
        let key = Self::derive_key(id);
        Job { id, index, arrival, cost, priority, deadline, predecessors, abort, key }
    }

    /// Deterministic per-job hash contribution, used to build a node's key
    /// as the XOR of its scheduled jobs' keys. Derived from the stable
    /// identity (not randomized) so that re-running the engine on the same
    /// input produces byte-identical node keys (see property `RT1`).
    fn derive_key(id: JobId) -> u64 {
        // splitmix64-style finalizer, applied to the packed (task_id, job_id)
        // pair so that adjacent ids don't produce adjacent, easily-colliding
        // keys.
        let mut x = id.task_id
            .wrapping_mul(0x9E3779B97F4A7C15)
            .wrapping_add(id.job_id.wrapping_mul(0xBF58476D1CE4E5B9));
        x ^= x >> 30;
        x = x.wrapping_mul(0xBF58476D1CE4E5B9);
        x ^= x >> 27;
        x = x.wrapping_mul(0x94D049BB133111EB);
        x ^= x >> 31;
        x
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn earliest_arrival(&self) -> Time {
        self.arrival.from()
    }

    pub fn latest_arrival(&self) -> Time {
        self.arrival.upto()
    }

    pub fn least_cost(&self) -> Time {
        self.cost.from()
    }

    pub fn maximal_cost(&self) -> Time {
        self.cost.upto()
    }

    /// `[earliest_arrival, deadline]`, used to bucket this job in the
    /// scheduling-window lookup table.
    pub fn scheduling_window(&self) -> Interval {
        Interval::new(self.earliest_arrival(), self.deadline)
    }

    pub fn exceeds_deadline(&self, finish_time: Time) -> bool {
        finish_time > self.deadline
    }

    /// Lower `priority` value wins.
    pub fn higher_priority_than(&self, other: &Job) -> bool {
        self.priority < other.priority
    }
}

pub type Workload = Vec<Job>;
