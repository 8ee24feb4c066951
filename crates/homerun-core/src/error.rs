// Error types shared by the analytics queries.

use thiserror::Error;

/// Failures raised by dataset construction and the per-request queries.
///
/// Every variant is deterministic for a given dataset, so callers surface
/// them directly rather than retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("unknown player: {player}")]
    UnknownEntity { player: String },

    #[error(
        "inconsistent summary field `{field}` for player {player}: expected {expected}, found {found}"
    )]
    InconsistentSummaryFields {
        player: String,
        field: String,
        expected: f64,
        found: f64,
    },

    #[error("histogram bin count must be greater than 0")]
    InvalidBinCount,
}

impl AnalysisError {
    /// Short machine-readable name, used by the wire protocol.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::EmptyDataset => "empty_dataset",
            AnalysisError::UnknownEntity { .. } => "unknown_entity",
            AnalysisError::InconsistentSummaryFields { .. } => "inconsistent_summary",
            AnalysisError::InvalidBinCount => "invalid_bin_count",
        }
    }
}
