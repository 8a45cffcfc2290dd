use clap::Parser;

use gathering_rs::cli::{self, Cli, Outcome};
use gathering_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (settings, environment) = cli::load_and_merge_config(&cli)?;
    let _log_handle = cli::init_logger_from_settings(&settings)?;

    match cli::execute_command(&cli, settings.clone()).await? {
        Outcome::StartServer => Server::new(settings, environment).run().await,
        Outcome::Done => Ok(()),
    }
}
