//! hashdrop server binary
//!
//! Serves the content-addressable text store over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use hashdrop::config::{BackendType, Config, FileBackendConfig};
use hashdrop::http;
use hashdrop::store::{ContentStore, FileStore, MemoryStore};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "hashdrop")]
#[command(about = "Content-addressable text store over HTTP", long_about = None)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Bind address (e.g., 127.0.0.1:8080), overrides the config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Comma-separated set of accepted request hosts, overrides the config file
    #[arg(short, long)]
    allowed_hosts: Option<String>,

    /// Store entries under this directory instead of in memory
    #[arg(short, long)]
    storage: Option<String>,
}

/// Merge the config file (if any) with command line overrides
fn effective_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => Config::default(),
    };

    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(hosts) = &args.allowed_hosts {
        config.server.allowed_hosts = hosts.clone();
    }
    if let Some(path) = &args.storage {
        config.storage.backend = BackendType::File;
        config.storage.file = Some(FileBackendConfig { path: path.clone() });
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = effective_config(&args)?;

    env_logger::Builder::from_env(Env::default().default_filter_or(&config.server.log_level))
        .init();

    log::info!("hashdrop v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ContentStore> = match config.storage.backend {
        BackendType::Memory => {
            log::info!("Using in-memory storage");
            Arc::new(MemoryStore::new())
        }
        BackendType::File => {
            let file = config
                .storage
                .file
                .as_ref()
                .expect("file config validated");
            log::info!("Using file storage at {}", file.path);
            Arc::new(
                FileStore::new(&file.path)
                    .with_context(|| format!("failed to open store at {}", file.path))?,
            )
        }
    };

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind))?;

    let app = http::router(store, config.allowed_host_set());

    log::info!("Listening on http://{}", addr);
    log::info!("Accepting hosts: {}", config.server.allowed_hosts);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
