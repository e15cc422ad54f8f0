//! Errors raised before exploration begins. Infeasibility itself is a
//! verdict, not an error: see [`crate::engine::Analysis::is_schedulable`].

use crate::job::JobId;

pub mod prelude {
    pub use super::EngineError;
}

#[derive(Clone, Debug)]
#[derive(PartialEq, Eq)]
pub enum EngineError {
    /// A precedence edge names a job that isn't in the workload.
    InvalidPrecedence(JobId),
    /// An abort action names a job that isn't in the workload.
    InvalidAbortTarget(JobId),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidPrecedence(id) =>
                write!(f, "precedence constraint references unknown job {id}"),
            EngineError::InvalidAbortTarget(id) =>
                write!(f, "abort action references unknown job {id}"),
        }
    }
}

impl std::error::Error for EngineError {}
