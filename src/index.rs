//! Lookup structures over a workload: jobs ordered by arrival/deadline, and
//! a bucketed scheduling-window table for `O(1+k)` lookups by time.

use std::collections::BTreeMap;

use crate::job::{Job, Workload};
use crate::time::Time;

pub mod prelude {
    pub use super::JobIndex;
}

/// Precomputed views over a [`Workload`] that the engine consults on every
/// successor-eligibility check.
pub struct JobIndex {
    by_earliest_arrival: BTreeMap<Time, Vec<usize>>,
    by_latest_arrival: BTreeMap<Time, Vec<usize>>,
    by_deadline: BTreeMap<Time, Vec<usize>>,
    buckets: Vec<Vec<usize>>,
    bucket_width: Time,
}

impl JobIndex {
    pub fn build(jobs: &Workload, num_buckets: usize) -> Self {
        let mut by_earliest_arrival: BTreeMap<Time, Vec<usize>> = BTreeMap::new();
        let mut by_latest_arrival: BTreeMap<Time, Vec<usize>> = BTreeMap::new();
        let mut by_deadline: BTreeMap<Time, Vec<usize>> = BTreeMap::new();

        for job in jobs {
            by_earliest_arrival.entry(job.earliest_arrival()).or_default().push(job.index);
            by_latest_arrival.entry(job.latest_arrival()).or_default().push(job.index);
            by_deadline.entry(job.deadline).or_default().push(job.index);
        }

        let max_deadline = jobs.iter().map(|j| j.deadline).max().unwrap_or(Time::ZERO);
        let num_buckets = num_buckets.max(1);
        let bucket_width = Time::from_nanos(
            (max_deadline.as_nanos() / num_buckets as u64).max(1),
        );

        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); num_buckets];
        for job in jobs {
            let window = job.scheduling_window();
            let first = Self::bucket_of(window.from(), bucket_width, num_buckets);
            let last = Self::bucket_of(window.upto(), bucket_width, num_buckets);
            for bucket in &mut buckets[first..=last] {
                bucket.push(job.index);
            }
        }

        JobIndex { by_earliest_arrival, by_latest_arrival, by_deadline, buckets, bucket_width }
    }

    fn bucket_of(t: Time, bucket_width: Time, num_buckets: usize) -> usize {
        if t.is_infinite() {
            return num_buckets - 1;
        }
        ((t.as_nanos() / bucket_width.as_nanos()) as usize).min(num_buckets - 1)
    }

    /// Job indices whose `scheduling_window` contains `t`, in `O(1+k)`.
    pub fn lookup(&self, t: Time) -> &[usize] {
        let bucket = Self::bucket_of(t, self.bucket_width, self.buckets.len());
        &self.buckets[bucket]
    }

    /// Job indices, ordered by earliest arrival, from `from` onward.
    pub fn by_earliest_arrival_from(&self, from: Time) -> impl Iterator<Item = usize> + '_ {
        self.by_earliest_arrival.range(from..).flat_map(|(_, idxs)| idxs.iter().copied())
    }

    /// Job indices, ordered by latest arrival, over the whole workload.
    pub fn by_latest_arrival_all(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_latest_arrival.values().flat_map(|idxs| idxs.iter().copied())
    }

    /// Job indices, ordered by deadline, from `from` onward. The built-in
    /// exploration loop doesn't query it, but it's available to IIP
    /// implementations and other consumers.
    pub fn by_deadline_from(&self, from: Time) -> impl Iterator<Item = usize> + '_ {
        self.by_deadline.range(from..).flat_map(|(_, idxs)| idxs.iter().copied())
    }
}
