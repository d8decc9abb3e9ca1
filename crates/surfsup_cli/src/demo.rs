//! Deterministic demo store for local runs.

use anyhow::{bail, Context};
use log::info;
use rusqlite::Connection;
use std::path::Path;
use surfsup_core::db::schema::{create_tables, insert_measurements, insert_stations};
use surfsup_core::{Measurement, ObservationDate, Station};

const DEMO_LATEST_DATE: &str = "2017-08-23";
const DEMO_SPAN_DAYS: i64 = 600;

/// `(station, name, latitude, longitude, elevation, report_every_n_days)`
const DEMO_STATIONS: &[(&str, &str, f64, f64, f64, i64)] = &[
    ("USC00519281", "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9, 1),
    ("USC00519397", "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0, 2),
    ("USC00513117", "KANEOHE 838.1, HI US", 21.4234, -157.8015, 14.6, 3),
];

/// Writes a small synthetic store to `path`.
///
/// Refuses to overwrite an existing file.
pub fn seed_demo_store(path: &Path) -> anyhow::Result<u64> {
    if path.exists() {
        bail!("refusing to overwrite existing file `{}`", path.display());
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }

    let stations = demo_stations();
    let measurements = demo_measurements()?;

    let mut conn = Connection::open(path)
        .with_context(|| format!("failed to create demo store `{}`", path.display()))?;
    create_tables(&conn)?;
    insert_stations(&mut conn, &stations)?;
    insert_measurements(&mut conn, &measurements)?;

    let rows = measurements.len() as u64;
    info!(
        "event=demo_seed module=cli status=ok path={} stations={} measurements={}",
        path.display(),
        stations.len(),
        rows
    );
    Ok(rows)
}

fn demo_stations() -> Vec<Station> {
    DEMO_STATIONS
        .iter()
        .map(|&(id, name, latitude, longitude, elevation, _)| Station {
            station: id.to_string(),
            name: Some(name.to_string()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            elevation: Some(elevation),
        })
        .collect()
}

fn demo_measurements() -> anyhow::Result<Vec<Measurement>> {
    let latest = ObservationDate::parse(DEMO_LATEST_DATE)?;
    let mut rows = Vec::new();

    for offset in (0..=DEMO_SPAN_DAYS).rev() {
        let date = latest.days_before(offset);
        for (index, &(id, _, _, _, _, every)) in DEMO_STATIONS.iter().enumerate() {
            if offset % every != 0 {
                continue;
            }
            let index = index as i64;
            let prcp = (offset % 7 != 3).then(|| ((offset * 13 + index * 5) % 40) as f64 / 100.0);
            let tobs = 62.0 + ((offset * 7 + index * 3) % 20) as f64;
            rows.push(Measurement {
                station: id.to_string(),
                date,
                prcp,
                tobs,
            });
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::seed_demo_store;
    use surfsup_core::{ClimateService, SqliteClimateRepository, Store};

    #[test]
    fn demo_store_is_queryable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("demo.sqlite");

        let rows = seed_demo_store(&path).unwrap();
        assert!(rows > 0);

        let store = Store::open(&path).unwrap();
        let conn = store.connect().unwrap();
        let service = ClimateService::new(SqliteClimateRepository::new(&conn));

        let summary = service.summary().unwrap();
        assert_eq!(summary.measurement_count, rows);
        assert_eq!(summary.station_count, 3);

        let active = service.most_active_station_observations().unwrap().unwrap();
        assert_eq!(active.station, "USC00519281");
        assert_eq!(active.observations.len(), 366);
    }

    #[test]
    fn demo_store_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.sqlite");
        std::fs::write(&path, b"").unwrap();

        assert!(seed_demo_store(&path).is_err());
    }
}
