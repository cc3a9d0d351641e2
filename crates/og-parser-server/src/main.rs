//! og-parser — entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use og_parser_server::config::ServerConfig;
use og_parser_server::fetch::HttpFetcher;
use og_parser_server::transport::{self, http::parse_url, AppState};
use og_parser_server::types::ParseResponse;

#[derive(Parser)]
#[command(
    name = "og-parser",
    about = "Extract Open Graph and Twitter Card metadata from web pages",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service (default).
    Serve {
        /// Listen address (host:port). Also reads OG_PARSER_ADDR, then PORT.
        #[arg(long)]
        addr: Option<String>,

        /// Upstream fetch timeout in milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Fetch a URL and print its metadata as JSON.
    Parse {
        url: String,

        /// Upstream fetch timeout in milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Resolve metadata from a local HTML file and print it as JSON.
    ParseFile { path: String },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   og-parser completions bash > ~/.local/share/bash-completion/completions/og-parser
    ///   og-parser completions zsh > ~/.zfunc/_og-parser
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        addr: None,
        timeout_ms: None,
    }) {
        Commands::Serve { addr, timeout_ms } => {
            let config = ServerConfig::resolve(addr.as_deref(), timeout_ms);
            tracing::info!("og-parser {}", env!("CARGO_PKG_VERSION"));
            tracing::info!("Fetch timeout: {}ms", config.fetch_timeout_ms);
            let state = Arc::new(AppState::new(Arc::new(HttpFetcher::new(&config)?)));
            transport::serve(&config.addr, state).await?;
        }

        Commands::Parse { url, timeout_ms } => {
            if !og_parser::is_valid_absolute_url(&url) {
                anyhow::bail!("Invalid URL Provided: {url}");
            }
            let config = ServerConfig::resolve(None, timeout_ms);
            let state = AppState::new(Arc::new(HttpFetcher::new(&config)?));
            let response = parse_url(&state, &url).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::ParseFile { path } => {
            let html = std::fs::read_to_string(&path)?;
            let (tags, attempted) = og_parser::parse_html(&html)?;
            let response = ParseResponse::success(tags, attempted);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "og-parser", &mut std::io::stdout());
        }
    }

    Ok(())
}
