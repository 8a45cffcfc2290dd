//! Serve command handler
//!
//! Only the dry run lives here; starting the server is left to `main`.

use crate::config::StorageBackend;
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate configuration and report what `serve` would do.
    ///
    /// # Errors
    /// Returns the first configuration section that fails validation
    pub fn dry_run(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.storage.backend {
            StorageBackend::Postgres => println!(
                "✓ Storage: postgres (pool {}..{} connections, auto_migrate = {})",
                self.config.database.min_connections,
                self.config.database.max_connections,
                self.config.database.auto_migrate
            ),
            StorageBackend::Memory => println!("✓ Storage: in-memory, data is lost on shutdown"),
        }
        println!("✓ ID generator node: {}", self.config.id_generator.node_id);
        println!("✓ Log level: {}", self.config.logger.level);

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
