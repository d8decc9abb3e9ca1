#![allow(dead_code)]

use rusqlite::Connection;
use std::path::PathBuf;
use surfsup_core::db::schema::{create_tables, insert_measurements, insert_stations};
use surfsup_core::{Measurement, ObservationDate, Station, Store};
use tempfile::TempDir;

pub const MOST_ACTIVE: &str = "USC00519281";

/// Temporary store file kept alive for the duration of a test.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
    pub store: Store,
}

pub fn station(id: &str) -> Station {
    Station {
        station: id.to_string(),
        name: Some(format!("{id} HI US")),
        latitude: Some(21.3),
        longitude: Some(-157.8),
        elevation: Some(3.0),
    }
}

pub fn measurement(station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Measurement {
    Measurement {
        station: station.to_string(),
        date: ObservationDate::parse(date).unwrap(),
        prcp,
        tobs,
    }
}

pub fn sample_stations() -> Vec<Station> {
    vec![
        station("USC00519397"),
        station(MOST_ACTIVE),
        station("USC00513117"),
    ]
}

/// Rows ending at 2017-08-23 with duplicate dates across stations.
pub fn sample_measurements() -> Vec<Measurement> {
    vec![
        measurement("USC00519397", "2010-01-01", Some(0.08), 65.0),
        measurement(MOST_ACTIVE, "2016-08-22", Some(0.5), 70.0),
        measurement(MOST_ACTIVE, "2016-08-23", Some(0.7), 76.0),
        measurement("USC00519397", "2016-08-23", None, 80.0),
        measurement(MOST_ACTIVE, "2017-01-01", Some(0.0), 62.0),
        measurement("USC00513117", "2017-01-01", Some(0.29), 66.0),
        measurement(MOST_ACTIVE, "2017-08-23", Some(0.0), 81.0),
        measurement("USC00519397", "2017-08-23", Some(0.45), 82.0),
        measurement("USC00513117", "2017-07-04", None, 74.0),
    ]
}

pub fn build_store(stations: &[Station], measurements: &[Measurement]) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");

    let mut conn = Connection::open(&path).unwrap();
    create_tables(&conn).unwrap();
    insert_stations(&mut conn, stations).unwrap();
    insert_measurements(&mut conn, measurements).unwrap();
    drop(conn);

    let store = Store::open(&path).unwrap();
    Fixture {
        _dir: dir,
        path,
        store,
    }
}

pub fn sample_store() -> Fixture {
    build_store(&sample_stations(), &sample_measurements())
}
