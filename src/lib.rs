pub mod prelude {
    pub use super::engine::prelude::*;
    pub use super::error::prelude::*;
    pub use super::iip::prelude::*;
    pub use super::index::prelude::*;
    pub use super::interval::prelude::*;
    pub use super::job::prelude::*;
    pub use super::node::prelude::*;
    pub use super::problem::prelude::*;
    pub use super::scheduled_set::prelude::*;
    pub use super::state::prelude::*;
    pub use super::time::prelude::*;
    pub use super::workload_doc::prelude::*;
}

pub mod engine;
pub mod error;
pub mod iip;
pub mod index;
pub mod interval;
pub mod job;
pub mod node;
pub mod problem;
pub mod scheduled_set;
pub mod state;
pub mod time;
pub mod workload_doc;
