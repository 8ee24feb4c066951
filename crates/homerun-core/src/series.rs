// Per-player chronological series.

use std::cmp::Ordering;

use crate::dataset::{Dataset, Record};
use crate::error::AnalysisError;

/// One player's home runs in chronological order, as a fresh copy.
///
/// Records are stably sorted by `(season, homeruns_so_far)` using the raw
/// source counter (missing counters after present ones), then
/// `homeruns_so_far` is overwritten with 1..N so the series has a clean,
/// strictly increasing x-axis across season boundaries. Rows that tie on
/// both keys keep their dataset order.
pub fn build_series(dataset: &Dataset, player: &str) -> Result<Vec<Record>, AnalysisError> {
    let mut series: Vec<Record> = dataset.records_for(player).cloned().collect();
    if series.is_empty() {
        return Err(AnalysisError::UnknownEntity {
            player: player.to_string(),
        });
    }

    series.sort_by(|a, b| {
        a.season
            .cmp(&b.season)
            .then_with(|| counter_cmp(a.homeruns_so_far, b.homeruns_so_far))
    });
    for (idx, record) in series.iter_mut().enumerate() {
        record.homeruns_so_far = Some((idx + 1) as f64);
    }
    Ok(series)
}

fn counter_cmp(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
