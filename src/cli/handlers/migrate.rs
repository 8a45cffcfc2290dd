//! Migrate command handler
//!
//! Applies, lists or reverts the migrations embedded from `migrations/`.

use diesel_migrations::MigrationHarness;

use crate::config::StorageBackend;
use crate::config::settings::Settings;
use crate::db::{MIGRATIONS, run_pending_migrations, with_migration_connection};
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command
    ///
    /// # Arguments
    /// * `dry_run` - list pending migrations without applying them
    /// * `rollback` - revert this many of the most recent migrations
    ///
    /// # Errors
    /// - Invalid `database` section
    /// - Connection or migration failures
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if rollback == Some(0) {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        // Migrations always target `database.url`, whichever backend serves requests.
        self.config.database.validate()?;
        if self.config.storage.backend == StorageBackend::Memory {
            tracing::warn!("storage.backend is memory; migrating the configured database anyway");
        }

        match rollback {
            _ if dry_run => self.show_pending_migrations().await,
            Some(steps) => self.rollback_migrations(steps).await,
            None => self.run_migrations().await,
        }
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        let pending = with_migration_connection(&self.config.database.url, |conn| {
            let pending = conn
                .pending_migrations(MIGRATIONS)
                .map_err(|e| AppError::Database {
                    operation: "check pending migrations".to_string(),
                    source: anyhow::anyhow!("Migration error: {}", e),
                })?;
            Ok(pending
                .iter()
                .map(|m| m.name().to_string())
                .collect::<Vec<_>>())
        })
        .await?;

        if pending.is_empty() {
            println!("✓ No pending migrations, database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
            println!("\nRun without --dry-run to apply them");
        }

        Ok(())
    }

    async fn run_migrations(&self) -> AppResult<()> {
        tracing::info!("Running database migrations");
        let applied = run_pending_migrations(&self.config.database.url).await?;

        if applied.is_empty() {
            println!("✓ No migrations to apply, database is up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for name in &applied {
                println!("  - {}", name);
            }
        }

        Ok(())
    }

    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        tracing::info!(steps, "Rolling back database migrations");

        let reverted = with_migration_connection(&self.config.database.url, move |conn| {
            let applied = conn.applied_migrations().map_err(|e| AppError::Database {
                operation: "list applied migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })?;

            if applied.len() < steps as usize {
                return Err(AppError::Validation {
                    field: "rollback_steps".to_string(),
                    reason: format!(
                        "Cannot roll back {} migrations, only {} applied",
                        steps,
                        applied.len()
                    ),
                });
            }

            let mut reverted = Vec::with_capacity(steps as usize);
            for _ in 0..steps {
                let version = conn
                    .revert_last_migration(MIGRATIONS)
                    .map_err(|e| AppError::Database {
                        operation: "revert migration".to_string(),
                        source: anyhow::anyhow!("Migration rollback error: {}", e),
                    })?;
                reverted.push(version.to_string());
            }
            Ok(reverted)
        })
        .await?;

        println!("✓ Rolled back {} migration(s):", reverted.len());
        for version in &reverted {
            println!("  - {}", version);
        }

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/gathering_test".to_string();
        config
    }

    #[tokio::test]
    async fn test_zero_rollback_steps_is_rejected() {
        let handler = MigrateCommandHandler::new(postgres_config());

        match handler.execute(false, Some(0)).await {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("greater than 0"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_database_url_is_rejected_before_connecting() {
        let mut config = Settings::default();
        config.storage.backend = StorageBackend::Memory;
        let handler = MigrateCommandHandler::new(config);

        let err = handler.execute(true, None).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration { ref key, .. } if key == "database.url"));
    }
}
