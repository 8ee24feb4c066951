// Full dashboard payload for one player: the single-player profile plus the
// comparison against the best player.

use serde::Serialize;

use crate::comparison::{build_comparison, ComparisonResult};
use crate::dataset::Dataset;
use crate::error::AnalysisError;
use crate::profile::{build_profile, PlayerProfile};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub profile: PlayerProfile,
    pub comparison: ComparisonResult,
}

/// Build every chart's data for `player` in one pass over the snapshot.
pub fn build_dashboard(
    dataset: &Dataset,
    player: &str,
    histogram_bins: usize,
) -> Result<Dashboard, AnalysisError> {
    let comparison = build_comparison(dataset, player)?;
    let profile = build_profile(dataset, player, histogram_bins)?;
    Ok(Dashboard {
        profile,
        comparison,
    })
}
