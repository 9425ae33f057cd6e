//! Command-line interface for ridemap trip estimates.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod estimate;
mod fs;
mod location;
mod logging;
mod report;

pub use error::CliError;
pub use logging::init_logging;

use estimate::{EstimateArgs, run_estimate};

pub(crate) const ARG_ORIGIN: &str = "origin";
pub(crate) const ARG_DESTINATION: &str = "destination";
pub(crate) const ARG_LOCATION: &str = "location";
pub(crate) const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_OFFERS: &str = "offers";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ENV_ORIGIN: &str = "RIDEMAP_ORIGIN";
pub(crate) const ENV_DESTINATION: &str = "RIDEMAP_DESTINATION";

/// Run the ridemap CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or inputs are invalid,
/// or when the report cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Estimate(args) => run_estimate(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ridemap",
    about = "Trip estimate maps backed by an OSRM routing service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a trip route and print the resulting map state as JSON.
    Estimate(EstimateArgs),
}

#[cfg(test)]
mod tests;
