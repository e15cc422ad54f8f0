//! The on-disk JSON workload document the CLI reads, converted into the
//! engine's [`Problem`] at load time.

use std::path::Path;

use crate::error::EngineError;
use crate::interval::Interval;
use crate::job::{AbortAction, Job, JobId};
use crate::problem::Problem;
use crate::time::Time;

pub mod prelude {
    pub use super::{WorkloadDocument, WorkloadParseError};
}

#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
struct JobRecord {
    id: JobId,
    arrival: Interval,
    cost: Interval,
    priority: Time,
    deadline: Time,
}

#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
struct AbortRecord {
    job: JobId,
    action: AbortAction,
}

/// The on-disk workload shape: a flat job list plus precedence edges and
/// abort actions, all referencing jobs by [`JobId`] rather than by index
/// (indices are an exploration-engine-internal detail).
#[derive(Clone, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct WorkloadDocument {
    jobs: Vec<JobRecord>,
    #[serde(default)]
    dag: Vec<(JobId, JobId)>,
    #[serde(default)]
    aborts: Vec<AbortRecord>,
}

/// Failures loading a workload document, from the I/O and deserialization
/// layer below [`EngineError`] (which only covers already-parsed, in-memory
/// inconsistencies).
#[derive(Debug)]
pub enum WorkloadParseError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Engine(EngineError),
}

impl std::fmt::Display for WorkloadParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkloadParseError::Io(err) => write!(f, "could not read workload file: {err}"),
            WorkloadParseError::Json(err) => write!(f, "malformed workload document: {err}"),
            WorkloadParseError::Engine(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WorkloadParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkloadParseError::Io(err) => Some(err),
            WorkloadParseError::Json(err) => Some(err),
            WorkloadParseError::Engine(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for WorkloadParseError {
    fn from(err: std::io::Error) -> Self {
        WorkloadParseError::Io(err)
    }
}

impl From<serde_json::Error> for WorkloadParseError {
    fn from(err: serde_json::Error) -> Self {
        WorkloadParseError::Json(err)
    }
}

impl From<EngineError> for WorkloadParseError {
    fn from(err: EngineError) -> Self {
        WorkloadParseError::Engine(err)
    }
}

impl WorkloadDocument {
    pub fn from_json_str(data: &str) -> Result<Self, WorkloadParseError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, WorkloadParseError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Convert into the in-memory [`Problem`] the engine consumes, assigning
    /// each job its 0-based index in document order and validating every
    /// precedence/abort reference.
    pub fn into_problem(self) -> Result<Problem, WorkloadParseError> {
        let jobs: Vec<Job> = self
            .jobs
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Job::new(record.id, index, record.arrival, record.cost, record.priority, record.deadline, vec![], None)
            })
            .collect();

        let aborts: Vec<(JobId, AbortAction)> = self.aborts.into_iter().map(|r| (r.job, r.action)).collect();

        Ok(Problem::build(jobs, &self.dag, &aborts)?)
    }
}
