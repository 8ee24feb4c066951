// Home-run CSV loading.
//
// The source file is a single denormalized table: one row per home run, with
// the player's summary columns (MaxHomeruns, MeanExitVel, MeanHitDist,
// MeanPowerOfTheShot) repeated on each row. Extra columns are ignored.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::dataset::{Dataset, PlayerSummary, Record};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Failure while reading from an in-memory reader (no path attached yet).
#[derive(Debug, thiserror::Error)]
enum ReaderError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// One CSV row. Counting columns are read as f64 because pandas exports
/// write integer columns as `1.0` once any value in them was missing.
///
/// The running counter is only a sort hint: a blank or unreadable value
/// becomes `None` instead of rejecting the home run.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawHomerunRow {
    PlayerName: String,
    Season: f64,
    #[serde(deserialize_with = "csv::invalid_option")]
    HomerunsOfSeasonSoFar: Option<f64>,
    ExitVelocity: f64,
    HitDistance: f64,
    ShotDirection: f64,
    MaxHomeruns: f64,
    #[serde(alias = "MeanExitVelocity")]
    MeanExitVel: f64,
    #[serde(alias = "MeanHitDistance")]
    MeanHitDist: f64,
    #[serde(alias = "MeanPower")]
    MeanPowerOfTheShot: f64,
}

/// A whole, non-negative count. `2.0` is accepted, `2.5` and `-1` are not.
fn whole_count(value: f64) -> Option<u32> {
    let in_range = value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX);
    (in_range && value.fract() == 0.0).then(|| value as u32)
}

impl RawHomerunRow {

    fn measures(&self) -> [f64; 6] {
        [
            self.ExitVelocity,
            self.HitDistance,
            self.ShotDirection,
            self.MeanExitVel,
            self.MeanHitDist,
            self.MeanPowerOfTheShot,
        ]
    }

    /// Split into a record and its summary, or `None` when the season or
    /// max home runs is not a whole count.
    fn into_parts(self) -> Option<(Record, PlayerSummary)> {
        let season = whole_count(self.Season)?;
        let max_homeruns = whole_count(self.MaxHomeruns)?;
        let record = Record {
            player: self.PlayerName.trim().to_string(),
            season,
            homeruns_so_far: self.HomerunsOfSeasonSoFar.filter(|v| v.is_finite()),
            exit_velocity: self.ExitVelocity,
            hit_distance: self.HitDistance,
            shot_direction: self.ShotDirection,
        };
        let summary = PlayerSummary {
            max_homeruns,
            mean_exit_velocity: self.MeanExitVel,
            mean_hit_distance: self.MeanHitDist,
            mean_power: self.MeanPowerOfTheShot,
        };
        Some((record, summary))
    }
}

// ---------------------------------------------------------------------------
// Reader-based loader (private, enables testing without temp files)
// ---------------------------------------------------------------------------

fn load_from_reader<R: Read>(rdr: R) -> Result<Dataset, ReaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(rdr);
    let mut builder = Dataset::builder();
    for result in reader.deserialize::<RawHomerunRow>() {
        match result {
            Ok(raw) => {
                if raw.PlayerName.trim().is_empty() {
                    warn!("skipping home run row with blank PlayerName");
                    continue;
                }
                if !raw.measures().iter().all(|v| v.is_finite()) {
                    warn!(
                        "skipping home run row for '{}': non-finite measure",
                        raw.PlayerName.trim()
                    );
                    continue;
                }
                let name = raw.PlayerName.trim().to_string();
                let Some((record, summary)) = raw.into_parts() else {
                    warn!(
                        "skipping home run row for '{}': Season or MaxHomeruns is not a whole count",
                        name
                    );
                    continue;
                };
                builder.push(record, summary)?;
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("skipping malformed home run row: {}", e);
            }
        }
    }
    Ok(builder.build())
}

// ---------------------------------------------------------------------------
// Public loaders
// ---------------------------------------------------------------------------

/// Load the dataset from CSV text already in memory.
pub fn load_from_str(data: &str) -> Result<Dataset, LoadError> {
    finish(load_from_reader(data.as_bytes()), "<memory>")
}

/// Load the home-run dataset from a CSV file.
///
/// Malformed rows are skipped with a warning; a file with no valid rows is
/// rejected, as is a player whose summary columns differ between rows.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let path_str = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    let dataset = finish(load_from_reader(file), &path_str)?;
    info!(
        "Loaded {} home runs for {} players from {}",
        dataset.len(),
        dataset.summaries().len(),
        path_str
    );
    Ok(dataset)
}

fn finish(result: Result<Dataset, ReaderError>, path: &str) -> Result<Dataset, LoadError> {
    let dataset = result.map_err(|e| match e {
        ReaderError::Csv(source) => LoadError::Csv {
            path: path.to_string(),
            source,
        },
        ReaderError::Analysis(err) => LoadError::Analysis(err),
    })?;
    if dataset.is_empty() {
        return Err(LoadError::Validation(format!(
            "{path} produced zero valid home run rows"
        )));
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
