pub mod prelude {
    pub use super::{Args, ExplorationArgs, WorkloadArgs};
}

const DEFAULT_AFTER_HELP: &str = "Refer to the crate's documentation for further help";

#[derive(clap::Parser, Debug)]
#[command(after_help=DEFAULT_AFTER_HELP)]
pub struct Args {
    /// Quiet mode / Exit code as analysis result
    ///
    /// When enabled, a zero exit code means the workload is schedulable, a
    /// one means it isn't, any other code means that an error has happened.
    #[arg(short='q', default_value="false", action=clap::ArgAction::SetTrue)]
    pub quiet: bool,

    #[command(flatten, next_help_heading="Exploration Options")]
    pub exploration: ExplorationArgs,

    #[command(flatten, next_help_heading="Workload Specification")]
    pub workload: WorkloadArgs,
}

#[derive(clap::Args, Debug)]
pub struct ExplorationArgs {
    /// Explore without node/state merging (exponential; reference oracle)
    #[arg(long="naive", default_value="false", action=clap::ArgAction::SetTrue)]
    pub naive: bool,

    /// Wall-clock exploration budget in seconds (0 = unlimited)
    #[arg(long="timeout", value_name="SECONDS", default_value="0")]
    pub timeout_s: f64,

    /// Maximum number of scheduled jobs to explore to (0 = unlimited)
    #[arg(long="max-depth", value_name="JOBS", default_value="0")]
    pub max_depth: u32,

    /// Number of buckets in the scheduling-window lookup table
    #[arg(long="buckets", value_name="COUNT", default_value="1000")]
    pub num_buckets: usize,

    /// Keep exploring past the first observed deadline miss
    #[arg(long="no-early-exit", default_value="false", action=clap::ArgAction::SetTrue)]
    pub no_early_exit: bool,

    /// Run the scheduler specification from a JSON config file instead of flags
    #[arg(long="config", value_name="CONFIG FILE")]
    pub config_file: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct WorkloadArgs {
    /// Workload document (JSON)
    #[arg(short='i', value_name="WORKLOAD FILE")]
    pub workload_file: String,
}
