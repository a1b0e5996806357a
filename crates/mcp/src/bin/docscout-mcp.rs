// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use docscout_core::{DocumentSource, MarkdownDocStore};
use docscout_mcp::resources::ResourceCatalog;
use docscout_mcp::server::McpServer;
use docscout_mcp::tools::default_registry;
use docscout_mcp::ServerConfig;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "docscout-mcp")]
#[command(about = "MCP server for fuzzy lookup of provider resource and data source docs", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "DOCSCOUT_CONFIG", default_value = "docscout.toml")]
    config: PathBuf,

    /// Documentation root containing r/ and d/ directories
    #[arg(short, long, env = "DOCSCOUT_DOCS_DIR")]
    docs_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    tracing::info!("docscout MCP server starting...");

    let config = ServerConfig::load(&args.config, args.docs_dir)?;
    tracing::info!("Documentation directory: {}", config.docs_dir.display());

    let source: Arc<dyn DocumentSource> = Arc::new(MarkdownDocStore::new(
        config.docs_dir.clone(),
        config.resolver.doc_extension.clone(),
    ));

    let registry = default_registry(source.clone(), &config.resolver);
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry, ResourceCatalog::new(source));
    server.start().await?;

    Ok(())
}
