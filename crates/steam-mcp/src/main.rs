//! Steam MCP Server — entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use steam_community::SteamService;
use steam_mcp::config::{resolve_client_config, ConfigOverrides};
use steam_mcp::protocol::ProtocolHandler;
use steam_mcp::tools::ToolRegistry;
use steam_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "steam-mcp",
    about = "MCP server for Steam Community — game search, details, and user reviews",
    version
)]
struct Cli {
    /// Steam Community base URL (also STEAM_COMMUNITY_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds (also STEAM_MCP_TIMEOUT_SECS).
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Attempts per request, including the first (also STEAM_MCP_RETRIES).
    #[arg(long, global = true)]
    retries: Option<u32>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Start MCP server over HTTP.
    #[cfg(feature = "sse")]
    ServeHttp {
        /// Listen address (host:port).
        #[arg(long, default_value = "127.0.0.1:3100")]
        addr: String,

        /// Bearer token for authentication.
        /// Also reads from STEAM_MCP_TOKEN env var.
        #[arg(long)]
        token: Option<String>,
    },

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   steam-mcp completions bash > ~/.local/share/bash-completion/completions/steam-mcp
    ///   steam-mcp completions zsh > ~/.zfunc/_steam-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn build_handler(cli: &Cli) -> anyhow::Result<ProtocolHandler> {
    let config = resolve_client_config(&ConfigOverrides {
        base_url: cli.base_url.clone(),
        timeout_secs: cli.timeout_secs,
        retries: cli.retries,
    });
    tracing::info!(
        "Steam Community: {} (timeout {:?}, {} attempts)",
        config.base_url,
        config.timeout,
        config.max_attempts
    );
    let service = SteamService::new(config)?;
    Ok(ProtocolHandler::new(Arc::new(service)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol; logs go to stderr.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.as_ref().unwrap_or(&Commands::Serve) {
        Commands::Serve => {
            tracing::info!("Steam MCP server");
            let handler = build_handler(&cli)?;
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        #[cfg(feature = "sse")]
        Commands::ServeHttp { addr, token } => {
            use steam_mcp::config::resolve_token;
            use steam_mcp::transport::SseTransport;

            let handler = build_handler(&cli)?;
            let effective_token = resolve_token(token.clone());
            if effective_token.is_some() {
                tracing::info!("Auth: bearer token required");
            }

            let transport = SseTransport::new(handler, effective_token);
            transport.run(addr).await?;
        }

        Commands::Info => {
            let capabilities = steam_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "steam-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}
