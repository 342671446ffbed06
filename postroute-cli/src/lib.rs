//! Command-line interface for planning postcode routes.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};
#[cfg(test)]
use plan::{
    PlanConfig, PlanOutput, PlanResolverBuilder, config_from_layers_for_test, load_plan_request,
    run_plan_with,
};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_PLAN_START: &str = "start";
const ARG_PLAN_DESTINATION: &str = "destination";
const ARG_PLAN_LOCATION: &str = "location";
const ARG_PLAN_GEOCODER_BASE_URL: &str = "geocoder-base-url";
const ARG_PLAN_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_PLAN_MAX_CONCURRENT_REQUESTS: &str = "max-concurrent-requests";
const ARG_PLAN_STRATEGY: &str = "strategy";
const ARG_PLAN_OUTPUT: &str = "output";
const ENV_PLAN_START: &str = "POSTROUTE_CMDS_PLAN_START";
const ENV_PLAN_DESTINATION: &str = "POSTROUTE_CMDS_PLAN_DESTINATION";

/// Run the Postroute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration loading,
/// geocoding or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "postroute",
    about = "Order postcodes into a short visiting route",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve postcodes and print them in visiting order.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
