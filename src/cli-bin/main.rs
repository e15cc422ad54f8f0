use crate::prelude::*;
use np_schedulability_engine::prelude::*;

pub mod prelude {
    pub use super::args::prelude::*;
}

pub mod args;

fn main() {
    env_logger::init();

    let args = match <Args as clap::Parser>::try_parse() {
        Ok(args) => args,
        Err(err) => {
            use clap::error::ErrorKind::*;

            let exit_code = match err.kind() {
                DisplayHelp |
                DisplayHelpOnMissingArgumentOrSubcommand |
                DisplayVersion => 0,
                _ => 2,
            };

            err.print().unwrap();
            std::process::exit(exit_code);
        },
    };

    let quiet = args.quiet;
    match main_wo_exit_code(args) {
        Ok(schedulable) => {
            if quiet {
                if schedulable {
                    std::process::exit(0);
                } else {
                    std::process::exit(1);
                }
            }
        },
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        },
    };
}

fn resolve_options(args: &ExplorationArgs) -> Result<AnalysisOptions, Box<dyn std::error::Error>> {
    if let Some(config_file) = &args.config_file {
        let config_data = std::fs::read_to_string(config_file)
            .map_err(|err| format!("config file error: {err}"))?;
        let options: AnalysisOptions = serde_json::from_str(&config_data)
            .map_err(|err| format!("config parse error: {err}"))?;
        Ok(options)
    } else {
        Ok(AnalysisOptions {
            be_naive: args.naive,
            timeout_s: args.timeout_s,
            max_depth: args.max_depth,
            num_buckets: args.num_buckets,
            early_exit: !args.no_early_exit,
        })
    }
}

fn main_wo_exit_code(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    let problem = WorkloadDocument::from_json_file(&args.workload.workload_file)?.into_problem()?;
    let options = resolve_options(&args.exploration)?;

    log::info!("exploring workload with {} jobs", problem.jobs.len());
    let analysis = explore(&problem, &options)?;

    if !args.quiet {
        print_report(&problem, &analysis);
    }

    Ok(analysis.is_schedulable())
}

fn print_report(problem: &Problem, analysis: &Analysis) {
    if analysis.is_schedulable() {
        println!("verdict: schedulable");
    } else if analysis.was_timed_out() {
        println!("verdict: inconclusive (timed out)");
    } else {
        println!("verdict: not schedulable");
    }

    println!();
    println!("response times:");
    for job in &problem.jobs {
        match analysis.get_finish_times(job.id) {
            Some(range) => println!("  {}: {range}", job.id),
            None => println!("  {}: never dispatched", job.id),
        }
    }

    println!();
    println!("nodes: {}", analysis.number_of_nodes());
    println!("states: {}", analysis.number_of_states());
    println!("edges: {}", analysis.number_of_edges());
    println!("max exploration front width: {}", analysis.max_exploration_front_width());
    println!("cpu time: {:.3}s", analysis.get_cpu_time());
}
