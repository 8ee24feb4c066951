// Wire protocol between the dashboard front-end and the query server.
//
// Every frame is a JSON object tagged by `type`. Requests carry at most a
// player name; responses carry the computed chart data or a typed error.

use homerun_core::comparison::ComparisonResult;
use homerun_core::dashboard::Dashboard;
use homerun_core::AnalysisError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryRequest {
    ListPlayers,
    GetComparison { player: String },
    GetDashboard { player: String },
    /// Re-read the dataset from disk and swap it in.
    Reload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryResponse {
    Players { players: Vec<String> },
    Comparison { comparison: Box<ComparisonResult> },
    Dashboard { dashboard: Box<Dashboard> },
    Reloaded { records: usize, players: usize },
    Error { kind: String, message: String },
}

impl QueryResponse {
    pub fn error(kind: &str, message: impl Into<String>) -> Self {
        QueryResponse::Error {
            kind: kind.to_string(),
            message: message.into(),
        }
    }
}

impl From<AnalysisError> for QueryResponse {
    fn from(err: AnalysisError) -> Self {
        QueryResponse::error(err.kind(), err.to_string())
    }
}
