//! Merges command line overrides on top of file-based configuration.
//!
//! Precedence, lowest to highest: configuration files, `GATHERING_*`
//! environment variables, global flags (`--verbose`/`--quiet`), then
//! command flags (`serve --host/--port/--log-level`).

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, settings::Settings};

/// Holds the loaded settings until CLI overrides are applied.
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Loads settings the way `cli` asks for.
    ///
    /// `--config` selects a single file, otherwise the layered loader reads
    /// `GATHERING_CONFIG_DIR`/`GATHERING_CONFIG_FILE`. `--env` replaces
    /// `GATHERING_APP_ENV` for the environment layer.
    ///
    /// # Errors
    /// Returns ConfigError if loading, parsing or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match &cli.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        let settings = loader.load()?;
        Ok(Self::new(settings, loader.environment()))
    }

    /// Environment the settings were loaded for.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns a validated copy of the base settings with CLI overrides applied.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Commands::Serve {
            host,
            port,
            log_level,
            ..
        } = cli.command()
        {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn merger() -> ConfigurationMerger {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/gathering_test".to_string();
        ConfigurationMerger::new(config, Environment::Test)
    }

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        merger().merge_cli_args(&cli).unwrap()
    }

    #[test]
    fn test_verbose_and_quiet_set_log_level() {
        assert_eq!(merge(&["gathering-rs", "--verbose"]).logger.level, "debug");
        assert_eq!(merge(&["gathering-rs", "--quiet"]).logger.level, "error");
    }

    #[test]
    fn test_serve_overrides_host_and_port() {
        let merged = merge(&["gathering-rs", "serve", "--host", "0.0.0.0", "--port", "8080"]);
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["gathering-rs", "--verbose", "serve", "--log-level", "warn"]);
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_migrate_leaves_server_untouched() {
        let merged = merge(&["gathering-rs", "migrate"]);
        assert_eq!(merged.server, merger().config().server);
    }

    #[test]
    fn test_from_cli_reads_config_file() {
        let _lock = crate::config::loader::tests::TEST_MUTEX
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 4321

[storage]
backend = "memory"
"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["gathering-rs", "--config", path.as_str(), "--env", "staging"])
            .unwrap();
        let merger = ConfigurationMerger::from_cli(&cli).unwrap();

        assert_eq!(merger.config().server.port, 4321);
        assert_eq!(merger.environment(), Environment::Staging);
    }
}
