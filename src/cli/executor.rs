//! Dispatches a parsed command once settings are loaded and logging is up.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// What `main` should do after [`execute_command`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Start the HTTP server with the merged settings
    StartServer,
    /// The command finished on its own
    Done,
}

/// Execute a CLI command with merged settings
///
/// `serve` without `--dry-run` is not run here; it yields
/// [`Outcome::StartServer`] so `main` owns the server lifecycle.
///
/// # Errors
/// Returns errors from the command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<Outcome> {
    match cli.command() {
        Commands::Serve { dry_run: true, .. } => {
            ServeCommandHandler::new(settings).dry_run()?;
            Ok(Outcome::Done)
        }
        Commands::Serve { .. } => {
            warn_on_privileged_port(&settings);
            Ok(Outcome::StartServer)
        }
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await?;
            Ok(Outcome::Done)
        }
    }
}

fn warn_on_privileged_port(settings: &Settings) {
    if settings.server.port < 1024 {
        tracing::warn!(
            port = settings.server.port,
            "Binding to a port below 1024 usually requires elevated privileges"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use clap::Parser;

    fn memory_settings() -> Settings {
        let mut settings = Settings::default();
        settings.storage.backend = StorageBackend::Memory;
        settings
    }

    #[tokio::test]
    async fn test_serve_dry_run_is_done() {
        let cli = Cli::try_parse_from(["gathering-rs", "serve", "--dry-run"]).unwrap();
        let outcome = execute_command(&cli, memory_settings()).await.unwrap();
        assert_eq!(outcome, Outcome::Done);
    }

    #[tokio::test]
    async fn test_serve_and_bare_invocation_start_server() {
        for args in [vec!["gathering-rs"], vec!["gathering-rs", "serve"]] {
            let cli = Cli::try_parse_from(args).unwrap();
            let outcome = execute_command(&cli, memory_settings()).await.unwrap();
            assert_eq!(outcome, Outcome::StartServer);
        }
    }

    #[tokio::test]
    async fn test_migrate_without_database_url_fails() {
        let cli = Cli::try_parse_from(["gathering-rs", "migrate"]).unwrap();
        assert!(execute_command(&cli, memory_settings()).await.is_err());
    }
}
