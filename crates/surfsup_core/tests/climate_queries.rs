mod common;

use common::{build_store, measurement, sample_measurements, sample_store, station, MOST_ACTIVE};
use std::collections::HashMap;
use surfsup_core::{ClimateService, ObservationDate, SqliteClimateRepository, WINDOW_DAYS};

#[test]
fn recent_precipitation_only_covers_trailing_window() {
    let fixture = sample_store();
    let conn = fixture.store.connect().unwrap();
    let service = ClimateService::new(SqliteClimateRepository::new(&conn));

    let data = service.recent_precipitation().unwrap().unwrap();
    let keys: Vec<&str> = data.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["2016-08-23", "2017-01-01", "2017-07-04", "2017-08-23"]
    );

    let window_start = ObservationDate::parse("2017-08-23")
        .unwrap()
        .days_before(WINDOW_DAYS)
        .to_iso_string();
    assert!(data.keys().all(|date| *date >= window_start));
}

#[test]
fn recent_precipitation_keeps_last_row_per_date_and_passes_nulls() {
    let fixture = sample_store();
    let conn = fixture.store.connect().unwrap();
    let service = ClimateService::new(SqliteClimateRepository::new(&conn));

    let data = service.recent_precipitation().unwrap().unwrap();
    assert_eq!(data["2016-08-23"], None);
    assert_eq!(data["2017-01-01"], Some(0.29));
    assert_eq!(data["2017-07-04"], None);
    assert_eq!(data["2017-08-23"], Some(0.45));
}

#[test]
fn stations_match_station_table() {
    let fixture = sample_store();
    let conn = fixture.store.connect().unwrap();
    let service = ClimateService::new(SqliteClimateRepository::new(&conn));

    let stations = service.stations().unwrap();
    assert_eq!(stations, vec!["USC00519397", MOST_ACTIVE, "USC00513117"]);
}

#[test]
fn most_active_station_matches_independent_count() {
    let fixture = sample_store();
    let conn = fixture.store.connect().unwrap();
    let service = ClimateService::new(SqliteClimateRepository::new(&conn));

    let mut counts: HashMap<String, u64> = HashMap::new();
    for row in sample_measurements() {
        *counts.entry(row.station).or_default() += 1;
    }
    let (expected, expected_count) = counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(station, count)| (station.clone(), *count))
        .unwrap();

    let result = service.most_active_station_observations().unwrap().unwrap();
    assert_eq!(result.station, expected);
    assert_eq!(result.row_count, expected_count);
    assert_eq!(result.window_start.to_string(), "2016-08-23");

    let observed: Vec<(&str, f64)> = result
        .observations
        .iter()
        .map(|obs| (obs.date.as_str(), obs.tobs))
        .collect();
    assert_eq!(
        observed,
        vec![("2016-08-23", 76.0), ("2017-01-01", 62.0), ("2017-08-23", 81.0)]
    );
}

#[test]
fn temperature_stats_from_start_aggregates_all_later_rows() {
    let fixture = sample_store();
    let conn = fixture.store.connect().unwrap();
    let service = ClimateService::new(SqliteClimateRepository::new(&conn));

    let stats = service.temperature_stats_from("2017-01-01").unwrap().unwrap();
    assert_eq!(stats.tmin, 62.0);
    assert_eq!(stats.tmax, 82.0);
    assert!((stats.tavg - 73.0).abs() < 1e-9);
    assert!(stats.tmin <= stats.tavg && stats.tavg <= stats.tmax);
}

#[test]
fn temperature_stats_between_is_inclusive() {
    let fixture = build_store(
        &[station(MOST_ACTIVE)],
        &[
            measurement(MOST_ACTIVE, "2016-12-31", Some(0.1), 60.0),
            measurement(MOST_ACTIVE, "2017-01-02", Some(0.0), 70.0),
            measurement(MOST_ACTIVE, "2017-01-03", Some(0.0), 90.0),
        ],
    );
    let conn = fixture.store.connect().unwrap();
    let service = ClimateService::new(SqliteClimateRepository::new(&conn));

    let stats = service
        .temperature_stats_between("2017-01-01", "2017-01-02")
        .unwrap()
        .unwrap();
    assert_eq!((stats.tmin, stats.tavg, stats.tmax), (70.0, 70.0, 70.0));
}

#[test]
fn temperature_stats_without_matches_are_no_data() {
    let fixture = sample_store();
    let conn = fixture.store.connect().unwrap();
    let service = ClimateService::new(SqliteClimateRepository::new(&conn));

    assert!(service.temperature_stats_from("2018-01-01").unwrap().is_none());
    assert!(service
        .temperature_stats_between("2017-08-23", "2017-01-01")
        .unwrap()
        .is_none());

    let all = service.temperature_stats_from("1800-01-01").unwrap().unwrap();
    assert_eq!(all.tmin, 62.0);
}

#[test]
fn empty_store_reports_no_data_everywhere() {
    let fixture = build_store(&[station(MOST_ACTIVE)], &[]);
    let conn = fixture.store.connect().unwrap();
    let service = ClimateService::new(SqliteClimateRepository::new(&conn));

    assert!(service.recent_precipitation().unwrap().is_none());
    assert!(service.most_active_station_observations().unwrap().is_none());
    assert!(service.temperature_stats_from("1800-01-01").unwrap().is_none());
    assert_eq!(service.stations().unwrap(), vec![MOST_ACTIVE]);
}

#[test]
fn summary_counts_rows() {
    let fixture = sample_store();
    let conn = fixture.store.connect().unwrap();
    let service = ClimateService::new(SqliteClimateRepository::new(&conn));

    let summary = service.summary().unwrap();
    assert_eq!(summary.station_count, 3);
    assert_eq!(summary.measurement_count, 9);
    assert_eq!(
        summary.latest_date.map(|date| date.to_string()).as_deref(),
        Some("2017-08-23")
    );
}
