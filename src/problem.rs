//! The engine's input: a workload plus precedence/abort side-tables, and the
//! knobs that govern exploration.

use crate::error::EngineError;
use crate::job::{AbortAction, Job, JobId, Workload};

pub mod prelude {
    pub use super::{AnalysisOptions, Problem};
}

/// A scheduling problem: the workload to analyze, its precedence DAG, and
/// any abort actions, plus the (fixed at one, for this engine) processor
/// count.
pub struct Problem {
    pub jobs: Workload,
    pub num_processors: u32,
}

impl Problem {
    /// Build a `Problem` from a flat job list, a set of precedence edges
    /// `(from, to)` meaning `from` must complete before `to`, and abort
    /// actions keyed by job id.
    ///
    /// Precedence indices and abort targets are resolved and validated
    /// here: an edge or action naming an id absent from `jobs` is rejected
    /// before any exploration state is built.
    pub fn build(
        mut jobs: Workload,
        dag_edges: &[(JobId, JobId)],
        aborts: &[(JobId, AbortAction)],
    ) -> Result<Self, EngineError> {
        fn index_of(jobs: &[Job], id: JobId) -> Option<usize> {
            jobs.iter().position(|j| j.id == id)
        }

        for &(from, to) in dag_edges {
            let from_idx = index_of(&jobs, from).ok_or(EngineError::InvalidPrecedence(from))?;
            let to_idx = index_of(&jobs, to).ok_or(EngineError::InvalidPrecedence(to))?;
            jobs[to_idx].predecessors.push(from_idx);
        }

        for &(id, action) in aborts {
            let idx = index_of(&jobs, id).ok_or(EngineError::InvalidAbortTarget(id))?;
            jobs[idx].abort = Some(action);
        }

        Ok(Problem { jobs, num_processors: 1 })
    }
}

/// Knobs controlling a single [`crate::engine::explore`] run.
#[derive(Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Skip node/state merging: every successor creates a new node. Useful
    /// as a reference oracle for testing (see property `RT2`).
    pub be_naive: bool,
    /// Wall-clock budget in seconds; `0.0` means unlimited.
    pub timeout_s: f64,
    /// Maximum number of scheduled jobs to explore to; `0` means unlimited.
    pub max_depth: u32,
    /// Number of buckets in the scheduling-window lookup table.
    pub num_buckets: usize,
    /// Halt exploration the moment a deadline miss is observed.
    pub early_exit: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            be_naive: false,
            timeout_s: 0.0,
            max_depth: 0,
            num_buckets: 1000,
            early_exit: true,
        }
    }
}
