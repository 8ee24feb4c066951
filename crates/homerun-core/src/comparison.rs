// Selected-player versus best-player comparison.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::dataset::{Dataset, PlayerSummary, Record};
use crate::error::AnalysisError;
use crate::ranking::find_best_player;
use crate::series::build_series;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Dataset-wide maxima, used as gauge axis upper bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlobalMaxima {
    pub exit_velocity: f64,
    pub hit_distance: f64,
    pub mean_power: f64,
}

/// Everything the comparison charts need for one selected player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub selected_player: String,
    pub best_player: String,
    pub selected_series: Vec<Record>,
    pub best_series: Vec<Record>,
    /// Longest hit per player across the two series. Holds a single entry
    /// when the selected player is the best player.
    pub max_hit_distance: BTreeMap<String, f64>,
    pub selected_summary: PlayerSummary,
    pub global_maxima: GlobalMaxima,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Maxima of exit velocity and hit distance over every record, and of mean
/// power over every player.
pub fn global_maxima(dataset: &Dataset) -> Result<GlobalMaxima, AnalysisError> {
    if dataset.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let records = dataset.records();
    let exit_velocity = records
        .iter()
        .map(|r| r.exit_velocity)
        .fold(f64::NEG_INFINITY, f64::max);
    let hit_distance = records
        .iter()
        .map(|r| r.hit_distance)
        .fold(f64::NEG_INFINITY, f64::max);
    let mean_power = dataset
        .summaries()
        .values()
        .map(|s| s.mean_power)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(GlobalMaxima {
        exit_velocity,
        hit_distance,
        mean_power,
    })
}

/// Maximum hit distance per player over the concatenation of `series`
/// (no deduplication).
pub fn max_hit_distance_by_player<'a, I>(series: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut out: BTreeMap<String, f64> = BTreeMap::new();
    for record in series {
        out.entry(record.player.clone())
            .and_modify(|best| *best = best.max(record.hit_distance))
            .or_insert(record.hit_distance);
    }
    out
}

/// Compare `player` against the best player in the dataset.
///
/// Selecting the best player is valid and yields identical series.
pub fn build_comparison(dataset: &Dataset, player: &str) -> Result<ComparisonResult, AnalysisError> {
    let best_player = find_best_player(dataset)?;
    let selected_series = build_series(dataset, player)?;
    let best_series = build_series(dataset, best_player)?;

    let max_hit_distance = max_hit_distance_by_player(selected_series.iter().chain(&best_series));

    let selected_summary = *dataset
        .summary(player)
        .ok_or_else(|| AnalysisError::UnknownEntity {
            player: player.to_string(),
        })?;
    let global_maxima = global_maxima(dataset)?;

    debug!(
        "comparison {} vs {}: {} and {} home runs",
        player,
        best_player,
        selected_series.len(),
        best_series.len()
    );

    Ok(ComparisonResult {
        selected_player: player.to_string(),
        best_player: best_player.to_string(),
        selected_series,
        best_series,
        max_hit_distance,
        selected_summary,
        global_maxima,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
