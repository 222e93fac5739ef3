use anyhow::Result;
use clap::Parser;
use essay_grader::cli::{Cli, CliHandler};
use essay_grader::{logging, App, HttpGradingClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config_path()?;
    let config = cli.load_config().await?;

    // Handle CLI commands
    if let Some(command) = cli.command {
        logging::init_stderr(cli.debug)?;
        let handler = CliHandler::new(config, config_path);
        return handler.handle_command(command).await;
    }

    // The UI owns the terminal, so logs go to a file when one is available
    match config.log_path() {
        Some(path) => logging::init_file(&path, cli.debug)?,
        None => tracing::debug!("No data directory, logging disabled"),
    }

    if cli.debug {
        tracing::info!("Debug mode enabled - verbose logging active");
    }

    let client = HttpGradingClient::from_config(&config)?;
    tracing::info!("Grading endpoint: {}", client.url());

    let mut app = App::new(Arc::new(client));
    app.run().await?;

    Ok(())
}
