//! API server handlers

use crate::cli::output::*;
use crate::AppConfig;
use crate::Result;

/// Start the chat server; command-line values override the config file
pub async fn handle_serve_api(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: bool,
) -> Result<()> {
    use crate::api::serve_api;

    let mut config = config.clone();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.server.enable_cors |= cors;

    println!("🚀 Starting VIA Chat Server");
    println!("===========================\n");
    println!("📍 Host: {}", config.server.host);
    println!("🔌 Port: {}", config.server.port);
    println!(
        "🌐 CORS: {}",
        if config.server.enable_cors {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    if config.llm.resolved_api_key().is_empty() {
        print_warning("No API key configured; every answered question will return the provider error");
    }
    println!();

    serve_api(&config).await
}
