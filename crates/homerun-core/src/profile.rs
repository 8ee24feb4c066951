// Single-player chart data: season tallies, hit-distance histogram, shot
// direction breakdown and performance gauges.

use serde::Serialize;

use crate::comparison::global_maxima;
use crate::dataset::{Dataset, Record};
use crate::error::AnalysisError;
use crate::series::build_series;

/// Default number of histogram bins for hit distance.
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Home runs in one season: the number of records, and the highest running
/// counter the source reported for that season (`None` if it never did).
/// The counter can exceed the record count when the data only holds part of
/// a season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonHomeRuns {
    pub season: u32,
    pub home_runs: usize,
    pub max_counter: Option<f64>,
}

/// One equal-width histogram bin. Bins are half-open `[lower, upper)` except
/// the last, which also includes `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionSummary {
    pub shot_direction: f64,
    pub home_runs: usize,
    pub total_distance: f64,
    pub max_distance: f64,
}

/// A player's value on one metric and the dataset-wide maximum it is
/// plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gauge {
    pub value: f64,
    pub axis_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerGauges {
    pub exit_velocity: Gauge,
    pub hit_distance: Gauge,
    pub power: Gauge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player: String,
    pub series: Vec<Record>,
    pub season_home_runs: Vec<SeasonHomeRuns>,
    pub hit_distance_histogram: Vec<HistogramBin>,
    pub direction_breakdown: Vec<DirectionSummary>,
    pub gauges: PlayerGauges,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Home-run tallies per season, ascending by season.
///
/// Expects records as loaded: `max_counter` reads the source running
/// counter, which [`build_series`] overwrites.
pub fn season_home_runs<'a>(
    records: impl IntoIterator<Item = &'a Record>,
) -> Vec<SeasonHomeRuns> {
    let mut rows: Vec<(u32, Option<f64>)> = records
        .into_iter()
        .map(|r| (r.season, r.homeruns_so_far))
        .collect();
    rows.sort_by_key(|(season, _)| *season);

    let mut out: Vec<SeasonHomeRuns> = Vec::new();
    for (season, counter) in rows {
        match out.last_mut() {
            Some(last) if last.season == season => {
                last.home_runs += 1;
                last.max_counter = match (last.max_counter, counter) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
            }
            _ => out.push(SeasonHomeRuns {
                season,
                home_runs: 1,
                max_counter: counter,
            }),
        }
    }
    out
}

/// Equal-width histogram of `values` spanning `[min, max]`.
///
/// Returns no bins for empty input and a single bin when every value is
/// equal.
pub fn histogram(values: &[f64], bins: usize) -> Result<Vec<HistogramBin>, AnalysisError> {
    if bins == 0 {
        return Err(AnalysisError::InvalidBinCount);
    }
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min <= 0.0 {
        return Ok(vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }]);
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    Ok(out)
}

/// Home-run count, total and longest distance per shot direction, ascending
/// by direction.
pub fn direction_breakdown(series: &[Record]) -> Vec<DirectionSummary> {
    let mut shots: Vec<(f64, f64)> = series
        .iter()
        .map(|r| (r.shot_direction, r.hit_distance))
        .collect();
    shots.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut out: Vec<DirectionSummary> = Vec::new();
    for (direction, distance) in shots {
        match out.last_mut() {
            Some(last) if last.shot_direction == direction => {
                last.home_runs += 1;
                last.total_distance += distance;
                last.max_distance = last.max_distance.max(distance);
            }
            _ => out.push(DirectionSummary {
                shot_direction: direction,
                home_runs: 1,
                total_distance: distance,
                max_distance: distance,
            }),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Profile builder
// ---------------------------------------------------------------------------

/// Chart data for a single player.
pub fn build_profile(
    dataset: &Dataset,
    player: &str,
    bins: usize,
) -> Result<PlayerProfile, AnalysisError> {
    if bins == 0 {
        return Err(AnalysisError::InvalidBinCount);
    }
    let maxima = global_maxima(dataset)?;
    let series = build_series(dataset, player)?;
    let summary = dataset
        .summary(player)
        .ok_or_else(|| AnalysisError::UnknownEntity {
            player: player.to_string(),
        })?;

    let distances: Vec<f64> = series.iter().map(|r| r.hit_distance).collect();
    let hit_distance_histogram = histogram(&distances, bins)?;

    let gauges = PlayerGauges {
        exit_velocity: Gauge {
            value: summary.mean_exit_velocity,
            axis_max: maxima.exit_velocity,
        },
        hit_distance: Gauge {
            value: summary.mean_hit_distance,
            axis_max: maxima.hit_distance,
        },
        power: Gauge {
            value: summary.mean_power,
            axis_max: maxima.mean_power,
        },
    };

    Ok(PlayerProfile {
        player: player.to_string(),
        season_home_runs: season_home_runs(dataset.records_for(player)),
        direction_breakdown: direction_breakdown(&series),
        hit_distance_histogram,
        gauges,
        series,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
