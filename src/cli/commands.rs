//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "viarag")]
#[command(about = "VIA knowledge-base chat server and query tool")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat API server
    Serve {
        /// Host to bind to (default: from config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (default: from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable CORS
        #[arg(long)]
        cors: bool,
    },
    /// Ask one question through the full chat pipeline
    Ask {
        /// The question
        question: String,
        /// Answer as a follow-up within this topic
        #[arg(short, long)]
        topic: Option<String>,
    },
    /// Show ranked records and the assembled context without calling the provider
    Retrieve {
        /// The query
        query: String,
        /// Restrict or reorder by this topic instead of the detected one
        #[arg(short, long)]
        topic: Option<String>,
        /// Print the assembled context block
        #[arg(long)]
        context: bool,
    },
    /// Show the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["viarag", "serve", "--port", "8080", "--cors"]);
        match cli.command {
            Commands::Serve { host, port, cors } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(8080));
                assert!(cors);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "viarag",
            "retrieve",
            "who is melinda",
            "-v",
            "--config",
            "custom.toml",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Retrieve { .. }));
    }

    #[test]
    fn test_parse_ask_with_topic() {
        let cli = Cli::parse_from(["viarag", "ask", "what are the hours?", "--topic", "melinda"]);
        match cli.command {
            Commands::Ask { question, topic } => {
                assert_eq!(question, "what are the hours?");
                assert_eq!(topic.as_deref(), Some("melinda"));
            }
            _ => panic!("expected ask"),
        }
    }
}
