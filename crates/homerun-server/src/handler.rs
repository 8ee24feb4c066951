// Request dispatch: decodes a query, runs it against the current dataset
// snapshot and encodes the response.

use std::path::PathBuf;
use std::sync::Arc;

use homerun_core::comparison::build_comparison;
use homerun_core::dashboard::build_dashboard;
use homerun_core::loader::load_dataset;
use homerun_core::store::DatasetStore;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::protocol::{QueryRequest, QueryResponse};

pub struct QueryHandler {
    store: Arc<DatasetStore>,
    data_path: PathBuf,
    histogram_bins: usize,
}

impl QueryHandler {
    pub fn new(store: Arc<DatasetStore>, data_path: PathBuf, histogram_bins: usize) -> Self {
        Self {
            store,
            data_path,
            histogram_bins,
        }
    }

    pub fn from_config(store: Arc<DatasetStore>, config: &Config) -> Self {
        Self::new(store, config.data_path.clone(), config.histogram_bins)
    }

    /// Handle one raw JSON frame and return the JSON reply.
    pub async fn handle_text(&self, json_str: &str) -> String {
        let response = match serde_json::from_str::<QueryRequest>(json_str) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!("Rejecting malformed request: {e}");
                QueryResponse::error("bad_request", e.to_string())
            }
        };
        encode(&response)
    }

    pub async fn handle(&self, request: QueryRequest) -> QueryResponse {
        debug!("Handling {request:?}");
        // One snapshot per request; a concurrent reload does not affect it.
        let dataset = self.store.snapshot();
        match request {
            QueryRequest::ListPlayers => QueryResponse::Players {
                players: dataset
                    .player_names()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
            QueryRequest::GetComparison { player } => match build_comparison(&dataset, &player) {
                Ok(comparison) => QueryResponse::Comparison {
                    comparison: Box::new(comparison),
                },
                Err(e) => {
                    warn!("Comparison for '{player}' failed: {e}");
                    e.into()
                }
            },
            QueryRequest::GetDashboard { player } => {
                match build_dashboard(&dataset, &player, self.histogram_bins) {
                    Ok(dashboard) => QueryResponse::Dashboard {
                        dashboard: Box::new(dashboard),
                    },
                    Err(e) => {
                        warn!("Dashboard for '{player}' failed: {e}");
                        e.into()
                    }
                }
            }
            QueryRequest::Reload => self.reload().await,
        }
    }

    /// Re-read the CSV on the blocking pool, then swap it in.
    async fn reload(&self) -> QueryResponse {
        let path = self.data_path.clone();
        let loaded = tokio::task::spawn_blocking(move || load_dataset(&path)).await;
        match loaded {
            Ok(Ok(dataset)) => {
                let records = dataset.len();
                let players = dataset.summaries().len();
                self.store.replace(dataset);
                info!("Reloaded dataset from {}", self.data_path.display());
                QueryResponse::Reloaded { records, players }
            }
            Ok(Err(e)) => {
                warn!("Reload from {} failed: {e}", self.data_path.display());
                QueryResponse::error("reload_failed", e.to_string())
            }
            Err(e) => {
                warn!("Reload task for {} did not finish: {e}", self.data_path.display());
                QueryResponse::error("reload_failed", e.to_string())
            }
        }
    }
}

fn encode(response: &QueryResponse) -> String {
    match serde_json::to_string(response) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to encode response: {e}");
            r#"{"type":"ERROR","kind":"internal","message":"failed to encode response"}"#
                .to_string()
        }
    }
}
