use clap::Parser;
use tracing::info;
use tracing::warn;
use viarag::cli::Cli;
use viarag::cli::Commands;
use viarag::cli::{
    self,
};
use viarag::config::AppConfig;
use viarag::config::ConfigSource;
use viarag::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let (config, source) = match &cli.config {
        Some(path) => (AppConfig::from_file(path)?, ConfigSource::File(path.clone())),
        None => AppConfig::load()?,
    };

    // Initialize logging
    let level_override = cli.verbose.then_some("debug");
    viarag::logging::init_logging(&config.logging, level_override)?;

    match &source {
        ConfigSource::File(path) => info!("Configuration loaded from {}", path.display()),
        ConfigSource::Example(path) => warn!(
            "Using {}. Please create config.toml for production use.",
            path.display()
        ),
        ConfigSource::Defaults => warn!("No config file found, using built-in defaults"),
    }

    // Execute the requested command
    let outcome = match cli.command {
        Commands::Serve { host, port, cors } => {
            cli::handle_serve_api(&config, host, port, cors).await
        }
        Commands::Ask { question, topic } => {
            cli::handle_ask_command(&config, question, topic).await
        }
        Commands::Retrieve {
            query,
            topic,
            context,
        } => cli::handle_retrieve_command(&config, &query, topic.as_deref(), context),
        Commands::Config => cli::handle_config_command(&config),
    };

    if let Err(e) = &outcome {
        cli::print_error(&e.to_string());
    }
    outcome
}
