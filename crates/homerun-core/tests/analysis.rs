// Integration tests for the analytics core.
//
// These load the CSV fixture through the public loader and exercise ranking,
// series building, comparison and dashboard assembly together.

use std::path::Path;

use homerun_core::comparison::build_comparison;
use homerun_core::dashboard::build_dashboard;
use homerun_core::dataset::{Dataset, PlayerSummary, Record};
use homerun_core::loader::{load_dataset, LoadError};
use homerun_core::ranking::find_best_player;
use homerun_core::series::build_series;
use homerun_core::AnalysisError;

// ===========================================================================
// Test helpers
// ===========================================================================

const FIXTURE: &str = "tests/fixtures/homeruns.csv";

fn fixture() -> Dataset {
    load_dataset(Path::new(FIXTURE)).expect("fixture should load")
}

fn record(player: &str, season: u32, hint: u32, ev: f64, dist: f64) -> Record {
    Record {
        player: player.into(),
        season,
        homeruns_so_far: Some(f64::from(hint)),
        exit_velocity: ev,
        hit_distance: dist,
        shot_direction: 0.0,
    }
}

fn summary(max_homeruns: u32) -> PlayerSummary {
    PlayerSummary {
        max_homeruns,
        mean_exit_velocity: 14.0,
        mean_hit_distance: 60.0,
        mean_power: 2.0,
    }
}

// ===========================================================================
// Fixture-driven tests
// ===========================================================================

#[test]
fn fixture_loads_all_rows() {
    let ds = fixture();
    assert_eq!(ds.len(), 7);
    assert_eq!(
        ds.player_names(),
        vec!["Aaron Judge", "Pete Alonso", "Kyle Schwarber"]
    );
}

#[test]
fn best_player_ties_broken_by_name_descending() {
    // Judge and Schwarber both have 4 max home runs; "Kyle" > "Aaron".
    assert_eq!(find_best_player(&fixture()).unwrap(), "Kyle Schwarber");
}

#[test]
fn judge_series_is_chronological() {
    let ds = fixture();
    let series = build_series(&ds, "Aaron Judge").unwrap();

    let order: Vec<(u32, f64)> = series.iter().map(|r| (r.season, r.exit_velocity)).collect();
    assert_eq!(
        order,
        vec![(1, 49.5), (1, 46.9), (2, 48.1), (2, 44.3)]
    );
    let counters: Vec<Option<f64>> = series.iter().map(|r| r.homeruns_so_far).collect();
    assert_eq!(counters, vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
}

#[test]
fn every_player_series_is_one_through_n() {
    let ds = fixture();
    for name in ds.player_names() {
        let series = build_series(&ds, name).unwrap();
        let expected: Vec<Option<f64>> = (1..=series.len()).map(|n| Some(n as f64)).collect();
        let counters: Vec<Option<f64>> = series.iter().map(|r| r.homeruns_so_far).collect();
        assert_eq!(counters, expected, "series for {name}");
        assert_eq!(series.len(), ds.records_for(name).count());
    }
}

#[test]
fn comparison_is_deterministic() {
    let ds = fixture();
    let first = serde_json::to_string(&build_comparison(&ds, "Pete Alonso").unwrap()).unwrap();
    for _ in 0..5 {
        let again = serde_json::to_string(&build_comparison(&ds, "Pete Alonso").unwrap()).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn queries_do_not_mutate_dataset() {
    let ds = fixture();
    let before = ds.clone();

    build_series(&ds, "Aaron Judge").unwrap();
    build_comparison(&ds, "Pete Alonso").unwrap();
    build_dashboard(&ds, "Aaron Judge", 20).unwrap();

    assert_eq!(ds, before);
}

#[test]
fn dashboard_for_fixture_player() {
    let ds = fixture();
    let dashboard = build_dashboard(&ds, "Aaron Judge", 20).unwrap();

    let comparison = &dashboard.comparison;
    assert_eq!(comparison.best_player, "Kyle Schwarber");
    assert!((comparison.max_hit_distance["Aaron Judge"] - 140.2).abs() < 1e-9);
    assert!((comparison.max_hit_distance["Kyle Schwarber"] - 145.0).abs() < 1e-9);
    assert!((comparison.global_maxima.exit_velocity - 51.0).abs() < 1e-9);
    assert!((comparison.global_maxima.mean_power - 5.2).abs() < 1e-9);

    let profile = &dashboard.profile;
    let seasons: Vec<(u32, usize)> = profile
        .season_home_runs
        .iter()
        .map(|s| (s.season, s.home_runs))
        .collect();
    assert_eq!(seasons, vec![(1, 2), (2, 2)]);
    assert!(profile
        .season_home_runs
        .iter()
        .all(|s| s.max_counter == Some(2.0)));
    assert_eq!(profile.direction_breakdown.len(), 3);
    assert!((profile.gauges.hit_distance.value - 131.5).abs() < 1e-9);

    let json = serde_json::to_value(&dashboard).unwrap();
    assert!(json["comparison"]["selected_series"].is_array());
    assert!(json["profile"]["gauges"]["power"]["axis_max"].is_number());
}

#[test]
fn missing_fixture_is_io_error() {
    let err = load_dataset(Path::new("tests/fixtures/missing.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

// ===========================================================================
// Scenario tests
// ===========================================================================

#[test]
fn two_player_scenario() {
    let ds = Dataset::builder()
        .with(record("A", 1, 1, 10.0, 50.0), summary(2))
        .unwrap()
        .with(record("A", 1, 2, 12.0, 55.0), summary(2))
        .unwrap()
        .with(record("A", 2, 1, 9.0, 40.0), summary(2))
        .unwrap()
        .with(record("B", 1, 1, 20.0, 90.0), summary(5))
        .unwrap()
        .build();

    assert_eq!(find_best_player(&ds).unwrap(), "B");

    let series = build_series(&ds, "A").unwrap();
    let rows: Vec<(u32, f64, f64, Option<f64>)> = series
        .iter()
        .map(|r| (r.season, r.exit_velocity, r.hit_distance, r.homeruns_so_far))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, 10.0, 50.0, Some(1.0)),
            (1, 12.0, 55.0, Some(2.0)),
            (2, 9.0, 40.0, Some(3.0)),
        ]
    );
}

#[test]
fn single_player_scenario() {
    let ds = Dataset::builder()
        .with(record("Only", 1, 3, 10.0, 50.0), summary(1))
        .unwrap()
        .with(record("Only", 1, 1, 11.0, 52.0), summary(1))
        .unwrap()
        .build();

    assert_eq!(find_best_player(&ds).unwrap(), "Only");
    let result = build_comparison(&ds, "Only").unwrap();
    assert_eq!(result.selected_series, result.best_series);
    assert_eq!(result.best_player, "Only");
}

#[test]
fn unknown_player_scenario() {
    let ds = fixture();
    assert_eq!(
        build_series(&ds, "Babe Ruth").unwrap_err(),
        AnalysisError::UnknownEntity {
            player: "Babe Ruth".into()
        }
    );
}

#[test]
fn empty_dataset_scenario() {
    assert_eq!(
        find_best_player(&Dataset::default()).unwrap_err(),
        AnalysisError::EmptyDataset
    );
}
