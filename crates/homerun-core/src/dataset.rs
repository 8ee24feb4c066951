// In-memory home-run dataset.
//
// Records are stored as loaded. Per-player summary values (max home runs,
// mean exit velocity, ...) are kept once per player in a separate map rather
// than repeated on every record; the builder checks that the legacy
// denormalized rows agree before accepting them.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One home run hit by a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub player: String,
    pub season: u32,
    /// Running home-run count within the season, as found in the source
    /// data (`None` when blank or unreadable). Only trusted as a sort key;
    /// [`crate::series::build_series`] rewrites it to 1..N.
    pub homeruns_so_far: Option<f64>,
    pub exit_velocity: f64,
    pub hit_distance: f64,
    pub shot_direction: f64,
}

/// Precomputed per-player values. Constant across all of a player's records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub max_homeruns: u32,
    pub mean_exit_velocity: f64,
    pub mean_hit_distance: f64,
    pub mean_power: f64,
}

impl PlayerSummary {
    /// Returns the first field that differs from `other` as
    /// `(field, self_value, other_value)`.
    fn first_mismatch(&self, other: &PlayerSummary) -> Option<(&'static str, f64, f64)> {
        let fields = [
            (
                "max_homeruns",
                f64::from(self.max_homeruns),
                f64::from(other.max_homeruns),
            ),
            (
                "mean_exit_velocity",
                self.mean_exit_velocity,
                other.mean_exit_velocity,
            ),
            (
                "mean_hit_distance",
                self.mean_hit_distance,
                other.mean_hit_distance,
            ),
            ("mean_power", self.mean_power, other.mean_power),
        ];
        fields.into_iter().find(|(_, a, b)| a != b)
    }
}

/// Immutable table of home-run records plus one summary per player.
///
/// Every record's player is guaranteed to have a summary entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    summaries: BTreeMap<String, PlayerSummary>,
}

impl Dataset {
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self, player: &str) -> Option<&PlayerSummary> {
        self.summaries.get(player)
    }

    pub fn summaries(&self) -> &BTreeMap<String, PlayerSummary> {
        &self.summaries
    }

    pub fn contains_player(&self, player: &str) -> bool {
        self.summaries.contains_key(player)
    }

    /// Distinct player names in order of first appearance.
    pub fn player_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.player.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// All records belonging to `player`, in dataset order.
    pub fn records_for<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.player == player)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Accumulates legacy rows (a record with its denormalized summary) and
/// enforces that each player's summary is identical on every row.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    records: Vec<Record>,
    summaries: BTreeMap<String, PlayerSummary>,
}

impl DatasetBuilder {
    /// Add one row. Fails if `summary` disagrees with the summary already
    /// recorded for the same player.
    pub fn push(&mut self, record: Record, summary: PlayerSummary) -> Result<(), AnalysisError> {
        match self.summaries.get(&record.player) {
            Some(existing) => {
                if let Some((field, expected, found)) = existing.first_mismatch(&summary) {
                    return Err(AnalysisError::InconsistentSummaryFields {
                        player: record.player,
                        field: field.to_string(),
                        expected,
                        found,
                    });
                }
            }
            None => {
                self.summaries.insert(record.player.clone(), summary);
            }
        }
        self.records.push(record);
        Ok(())
    }

    /// Chainable variant of [`DatasetBuilder::push`].
    pub fn with(mut self, record: Record, summary: PlayerSummary) -> Result<Self, AnalysisError> {
        self.push(record, summary)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn build(self) -> Dataset {
        Dataset {
            records: self.records,
            summaries: self.summaries,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
