// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fpsearch_client::{Fingerprint, HttpTransport, SearchRequest, SearchSession};
use fpsearch_config::{load as load_config, AppConfig, ServiceConfig};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fpsearch")]
#[command(author, version, about = "Fingerprint metadata search client", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a fingerprint and print the matches as JSON
    Search {
        /// Base64-encoded fingerprint
        #[arg(short, long)]
        fingerprint: String,

        /// Duration covered by the fingerprint, in seconds
        #[arg(short, long)]
        duration: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        Commands::Search {
            fingerprint,
            duration,
        } => run_search(&config.service, Fingerprint::new(fingerprint, duration)).await,
    }
}

fn init_tracing(config: &AppConfig) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true)
        .with_level(true);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.telemetry.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_transport(service: &ServiceConfig) -> Result<HttpTransport> {
    let mut builder = HttpTransport::builder(&service.base_url)
        .timeout(service.timeout())
        .poll_interval(service.poll_interval());

    if let Some(key) = &service.api_key {
        builder = builder.api_key(key);
    }

    Ok(builder.build()?)
}

async fn run_search(service: &ServiceConfig, fingerprint: Fingerprint) -> Result<()> {
    let session = SearchSession::new(build_transport(service)?);

    let future = session.start(&SearchRequest::new(fingerprint)).await?;
    info!(target: "cli", "search submitted, lookup id {}", future.lookup_id());

    let result = future.get().await?;
    info!(
        target: "cli",
        "lookup {} returned {} matches",
        result.lookup_id,
        result.matches.len()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
