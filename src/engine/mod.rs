//! The fixed-point exploration engine: frontier management, node/state
//! merging, response-time accumulation, and the exploration's termination
//! conditions.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Instant;

use crate::error::EngineError;
use crate::iip::{Iip, NullIip};
use crate::index::JobIndex;
use crate::interval::Interval;
use crate::job::JobId;
use crate::node::ScheduleNode;
use crate::problem::{AnalysisOptions, Problem};
use crate::time::Time;

pub mod successors;

pub mod prelude {
    pub use super::{explore, explore_with_iip, Analysis};
}

/// A single dispatch edge, only retained when the `schedule_graph` feature
/// is enabled.
#[cfg(feature = "schedule_graph")]
#[derive(Clone, Copy, Debug)]
pub struct ScheduleEdge {
    pub job: JobId,
    pub source_node: usize,
    pub target_node: usize,
    pub finish_range: Interval,
}

/// The result of an exploration run: verdict, per-job response times, and
/// bookkeeping statistics.
pub struct Analysis {
    response_times: BTreeMap<JobId, Interval>,
    num_nodes: u64,
    num_states: u64,
    num_edges: u64,
    max_exploration_front_width: usize,
    aborted: bool,
    timed_out: bool,
    observed_deadline_miss: bool,
    cpu_time_s: f64,
    #[cfg(feature = "schedule_graph")]
    nodes: Vec<ScheduleNode>,
    #[cfg(feature = "schedule_graph")]
    edges: Vec<ScheduleEdge>,
}

impl Analysis {
    pub fn is_schedulable(&self) -> bool {
        !self.aborted && !self.observed_deadline_miss
    }

    pub fn was_timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn observed_deadline_miss(&self) -> bool {
        self.observed_deadline_miss
    }

    pub fn get_finish_times(&self, job: JobId) -> Option<Interval> {
        self.response_times.get(&job).copied()
    }

    pub fn response_times(&self) -> &BTreeMap<JobId, Interval> {
        &self.response_times
    }

    pub fn number_of_nodes(&self) -> u64 {
        self.num_nodes
    }

    pub fn number_of_states(&self) -> u64 {
        self.num_states
    }

    pub fn number_of_edges(&self) -> u64 {
        self.num_edges
    }

    pub fn max_exploration_front_width(&self) -> usize {
        self.max_exploration_front_width
    }

    pub fn get_cpu_time(&self) -> f64 {
        self.cpu_time_s
    }

    #[cfg(feature = "schedule_graph")]
    pub fn nodes(&self) -> &[ScheduleNode] {
        &self.nodes
    }

    #[cfg(feature = "schedule_graph")]
    pub fn edges(&self) -> &[ScheduleEdge] {
        &self.edges
    }
}

/// Explore `problem` under the trivial (never-blocking) IIP.
pub fn explore(problem: &Problem, options: &AnalysisOptions) -> Result<Analysis, EngineError> {
    explore_with_iip(problem, options, &NullIip)
}

/// Explore `problem`'s reachable schedule state-space under `iip`.
pub fn explore_with_iip(
    problem: &Problem,
    options: &AnalysisOptions,
    iip: &impl Iip,
) -> Result<Analysis, EngineError> {
    debug_assert_eq!(problem.num_processors, 1, "this engine only analyzes a single processor");

    let start = Instant::now();
    let jobs = &problem.jobs;
    let index = JobIndex::build(jobs, options.num_buckets);

    let mut nodes: Vec<ScheduleNode> = vec![ScheduleNode::initial(jobs.len())];
    let mut lookup: HashMap<u64, Vec<usize>> = HashMap::new();
    lookup.entry(0).or_default().push(0);

    let mut queues: [VecDeque<usize>; 3] = [VecDeque::new(), VecDeque::new(), VecDeque::new()];
    queues[0].push_back(0);

    let mut response_times: BTreeMap<JobId, Interval> = BTreeMap::new();
    let mut num_edges: u64 = 0;
    let mut aborted = false;
    let mut timed_out = false;
    let mut observed_deadline_miss = false;
    let mut max_front_width: usize = 1;
    let mut depth: usize = 0;

    #[cfg(feature = "schedule_graph")]
    let mut edges: Vec<ScheduleEdge> = Vec::new();

    'outer: loop {
        while queues[depth % 3].is_empty() {
            if queues.iter().all(VecDeque::is_empty) {
                break 'outer;
            }
            depth += 1;
        }

        if options.max_depth != 0 && depth as u32 > options.max_depth {
            aborted = true;
            break 'outer;
        }

        let node_idx = queues[depth % 3].pop_front().expect("just checked non-empty");
        max_front_width = max_front_width.max(queues[depth % 3].len() + 1);
        log::trace!("processing node {node_idx} at depth {depth}");

        let scheduled = nodes[node_idx].scheduled().clone();
        let key = nodes[node_idx].key();
        let states = nodes[node_idx].states().to_vec();
        let num_scheduled = scheduled.len();

        for s in &states {
            let mut any_successor = false;

            for j in jobs {
                if !successors::is_eligible_successor(jobs, &index, &scheduled, iip, s, j) {
                    continue;
                }
                any_successor = true;

                let finish_range = successors::next_finish_times(jobs, &index, &scheduled, iip, s, j);
                let skip = successors::is_abort_skip(s, j);
                let (succ_scheduled, succ_key) = if skip {
                    (scheduled.clone(), key)
                } else {
                    (scheduled.with(j.index), key ^ j.key())
                };
                let pending_release = successors::earliest_possible_job_release(
                    jobs,
                    &index,
                    &succ_scheduled,
                    j,
                    Time::ZERO,
                );

                let entry = response_times.entry(j.id).or_insert(finish_range);
                entry.widen(finish_range);
                if entry.upto() > j.deadline {
                    observed_deadline_miss = true;
                    log::debug!("deadline miss for {} (response time {entry})", j.id);
                    if options.early_exit {
                        aborted = true;
                    }
                }
                num_edges += 1;

                // A skip transition's successor is, by construction, the
                // source node itself: it must always resolve back to
                // `node_idx` as a self-merge, even under `be_naive`, or the
                // engine would re-enqueue the same node onto its own queue
                // slot forever.
                let existing = if skip {
                    Some(node_idx)
                } else if options.be_naive {
                    None
                } else {
                    lookup.get(&succ_key).and_then(|candidates| {
                        candidates.iter().copied().find(|&idx| nodes[idx].scheduled() == &succ_scheduled)
                    })
                };

                let target_idx = match existing {
                    Some(idx) => {
                        nodes[idx].merge_or_append(finish_range, pending_release);
                        idx
                    }
                    None => {
                        let new_idx = nodes.len();
                        nodes.push(ScheduleNode::new(succ_scheduled.clone(), succ_key, finish_range, pending_release));
                        lookup.entry(succ_key).or_default().push(new_idx);
                        let succ_depth = succ_scheduled.len();
                        queues[succ_depth % 3].push_back(new_idx);
                        max_front_width = max_front_width.max(queues[succ_depth % 3].len());
                        new_idx
                    }
                };

                #[cfg(feature = "schedule_graph")]
                edges.push(ScheduleEdge { job: j.id, source_node: node_idx, target_node: target_idx, finish_range });
                #[cfg(not(feature = "schedule_graph"))]
                let _ = target_idx;

                if aborted {
                    break 'outer;
                }
            }

            if !any_successor && num_scheduled < jobs.len() {
                observed_deadline_miss = true;
                log::debug!("dead end at node {node_idx}: no eligible successor with {num_scheduled}/{} jobs scheduled", jobs.len());
                if options.early_exit {
                    aborted = true;
                    break 'outer;
                }
            }

            if options.timeout_s > 0.0 && start.elapsed().as_secs_f64() > options.timeout_s {
                aborted = true;
                timed_out = true;
                log::debug!("exploration timed out after {:.3}s", start.elapsed().as_secs_f64());
                break 'outer;
            }
        }
    }

    let num_states: u64 = nodes.iter().map(|n| n.states().len() as u64).sum();

    Ok(Analysis {
        response_times,
        num_nodes: nodes.len() as u64,
        num_states,
        num_edges,
        max_exploration_front_width: max_front_width,
        aborted,
        timed_out,
        observed_deadline_miss,
        cpu_time_s: start.elapsed().as_secs_f64(),
        #[cfg(feature = "schedule_graph")]
        nodes,
        #[cfg(feature = "schedule_graph")]
        edges,
    })
}
