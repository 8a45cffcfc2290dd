//! Command line interface for gathering-rs
//!
//! - Argument parsing with clap
//! - Merging CLI overrides into file-based configuration
//! - Dispatch to the `serve` and `migrate` handlers

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::{Outcome, execute_command};
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::Environment as AppEnvironment;
use crate::config::settings::Settings;
use crate::logger::{LogLevelHandle, init_logger};

/// Load configuration and apply CLI overrides
///
/// Returns the merged, validated settings together with the environment
/// they were loaded for.
///
/// # Errors
/// Returns error if loading, merging or validation fails
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<(Settings, AppEnvironment)> {
    let merger = ConfigurationMerger::from_cli(cli).context("Failed to load configuration")?;
    let settings = merger
        .merge_cli_args(cli)
        .context("Invalid command line overrides")?;
    Ok((settings, merger.environment()))
}

/// Initialize the global tracing subscriber from `settings.logger`.
///
/// # Errors
/// Returns error if the logger section is invalid or a subscriber is
/// already installed
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<LogLevelHandle> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Invalid logger configuration")?;
    init_logger(logger_config)
}
