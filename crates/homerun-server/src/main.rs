// Home-run dashboard backend entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Initialize tracing (log to file; stdout is reserved for query output)
// 3. Load config
// 4. Load the dataset once and wrap it in a swappable store
// 5. Either answer a single query and exit, or serve queries until Ctrl+C

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use homerun_core::loader;
use homerun_core::store::DatasetStore;
use homerun_server::cli::Cli;
use homerun_server::config;
use homerun_server::handler::QueryHandler;
use homerun_server::ws_server;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse the command line (usage errors exit with status 2)
    let cli = Cli::parse();

    // 2. Initialize tracing
    init_tracing()?;
    info!("Homerun backend starting up");

    // 3. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: data={}, port={}, histogram_bins={}",
        config.data_path.display(),
        config.port,
        config.histogram_bins
    );

    // 4. Load the dataset
    let dataset = loader::load_dataset(&config.data_path)
        .with_context(|| format!("failed to load dataset {}", config.data_path.display()))?;
    let store = Arc::new(DatasetStore::new(dataset));
    let handler = Arc::new(QueryHandler::from_config(store, &config));

    // 5. Run
    match cli.query() {
        Some(request) => {
            let response = handler.handle(request).await;
            let json = serde_json::to_string_pretty(&response)
                .context("failed to encode query response")?;
            println!("{json}");
        }
        None => {
            let listener = ws_server::bind(config.port)
                .await
                .with_context(|| format!("failed to bind port {}", config.port))?;
            info!("Application ready. Serving queries on 127.0.0.1:{}", config.port);

            tokio::select! {
                result = ws_server::run(listener, handler) => {
                    if let Err(e) = result {
                        error!("Query server error: {}", e);
                        return Err(e);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Ctrl+C received, shutting down");
                }
            }
        }
    }

    info!("Homerun backend shut down cleanly");
    Ok(())
}

/// Log to `logs/homerun.log`; stdout carries query output only.
/// `RUST_LOG` overrides the default filter.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all("logs").context("failed to create logs/")?;
    let log_file =
        std::fs::File::create("logs/homerun.log").context("failed to create logs/homerun.log")?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("homerun_server=info,homerun_core=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))
}
