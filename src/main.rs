mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use config::{Config, Overrides};
use kubeserve_http::AppState;
use kubeserve_k8s::KubeClient;

/// Kubeserve - Serve Kubernetes namespaces, deployments, pods and services as JSON
#[derive(Parser, Debug)]
#[command(name = "kubeserve")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(args).await;

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply(args.overrides);

    info!("Starting kubeserve v{}", env!("CARGO_PKG_VERSION"));

    let client = KubeClient::connect(&config.connect_options())
        .await
        .context("Error loading Kubernetes config")?;
    info!("Using cluster config from {}", client.source());

    if !config.index_file.is_file() {
        tracing::warn!(
            "Index file {} not found, `/` will return 404",
            config.index_file.display()
        );
    }

    let state = AppState::new(Arc::new(client), config.index_file.clone());
    let app = kubeserve_http::router(state);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Error starting HTTP server on {}", addr))?;

    kubeserve_http::serve(listener, app).await
}
