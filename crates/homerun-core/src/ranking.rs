// Best-player ranking.

use std::cmp::Ordering;

use crate::dataset::{Dataset, Record};
use crate::error::AnalysisError;

/// Sort key for one record. Rows are ranked by the owning player's max home
/// runs, then player name, then exit velocity, then hit distance, all
/// descending.
#[derive(Debug, Clone, Copy)]
struct RankKey<'a> {
    max_homeruns: u32,
    player: &'a str,
    exit_velocity: f64,
    hit_distance: f64,
}

impl RankKey<'_> {
    /// Ascending comparison; the best row is the maximum.
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.max_homeruns
            .cmp(&other.max_homeruns)
            .then_with(|| self.player.cmp(other.player))
            .then_with(|| self.exit_velocity.total_cmp(&other.exit_velocity))
            .then_with(|| self.hit_distance.total_cmp(&other.hit_distance))
    }
}

fn rank_key<'a>(dataset: &Dataset, record: &'a Record) -> RankKey<'a> {
    // Dataset guarantees a summary for every record's player.
    let max_homeruns = dataset
        .summary(&record.player)
        .map_or(0, |s| s.max_homeruns);
    RankKey {
        max_homeruns,
        player: &record.player,
        exit_velocity: record.exit_velocity,
        hit_distance: record.hit_distance,
    }
}

/// Name of the best player in the dataset.
///
/// Equivalent to sorting every record by the descending key tuple
/// `(max_homeruns, player, exit_velocity, hit_distance)` and taking the
/// first row's player. Only the first key carries meaning; the rest make the
/// choice deterministic (ties on max home runs go to the lexically greatest
/// name).
pub fn find_best_player(dataset: &Dataset) -> Result<&str, AnalysisError> {
    dataset
        .records()
        .iter()
        .map(|r| rank_key(dataset, r))
        .max_by(|a, b| a.rank_cmp(b))
        .map(|key| key.player)
        .ok_or(AnalysisError::EmptyDataset)
}
