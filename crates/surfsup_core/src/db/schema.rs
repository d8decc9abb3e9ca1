//! Fixed schema of the climate store.
//!
//! The two tables are known in advance, so the layout is declared here and
//! checked against the opened file instead of being discovered at runtime.
//! The create/insert helpers exist for fixture and demo stores only.

use crate::db::{DbError, DbResult};
use crate::model::climate::{Measurement, Station};
use rusqlite::{params, Connection};

pub const MEASUREMENT_TABLE: &str = "measurement";
pub const STATION_TABLE: &str = "station";

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (MEASUREMENT_TABLE, &["station", "date", "prcp", "tobs"]),
    (STATION_TABLE, &["station"]),
];

const CREATE_TABLES_SQL: &str = "
CREATE TABLE IF NOT EXISTS station (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL UNIQUE,
    name TEXT,
    latitude REAL,
    longitude REAL,
    elevation REAL
);
CREATE TABLE IF NOT EXISTS measurement (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    date TEXT NOT NULL,
    prcp REAL,
    tobs REAL NOT NULL
);
";

/// Checks that every table and column the queries depend on exists.
///
/// # Errors
/// - `DbError::MissingTable` when a table is absent.
/// - `DbError::MissingColumn` when a required column is absent.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    for &(table, columns) in REQUIRED_COLUMNS {
        let present = table_columns(conn, table)?;
        if present.is_empty() {
            return Err(DbError::MissingTable { table });
        }
        for &column in columns {
            if !present.iter().any(|name| name == column) {
                return Err(DbError::MissingColumn { table, column });
            }
        }
    }
    Ok(())
}

/// Creates the `station` and `measurement` tables when absent.
///
/// Only used to build fixture and demo databases; the query service opens
/// the store read-only.
pub fn create_tables(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_TABLES_SQL)?;
    Ok(())
}

/// Inserts station rows inside one transaction.
pub fn insert_stations(conn: &mut Connection, stations: &[Station]) -> DbResult<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO station (station, name, latitude, longitude, elevation)
             VALUES (?1, ?2, ?3, ?4, ?5);",
        )?;
        for station in stations {
            stmt.execute(params![
                station.station.as_str(),
                station.name.as_deref(),
                station.latitude,
                station.longitude,
                station.elevation,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Inserts measurement rows inside one transaction, preserving slice order.
pub fn insert_measurements(conn: &mut Connection, measurements: &[Measurement]) -> DbResult<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO measurement (station, date, prcp, tobs)
             VALUES (?1, ?2, ?3, ?4);",
        )?;
        for measurement in measurements {
            stmt.execute(params![
                measurement.station.as_str(),
                measurement.date.to_iso_string(),
                measurement.prcp,
                measurement.tobs,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let rows = stmt.query_map([table], |row| row.get::<_, String>(0))?;
    let mut columns = Vec::new();
    for name in rows {
        columns.push(name?);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::{create_tables, verify_schema};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn created_tables_pass_verification() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        verify_schema(&conn).unwrap();
    }

    #[test]
    fn empty_database_reports_missing_measurement_table() {
        let conn = Connection::open_in_memory().unwrap();
        let err = verify_schema(&conn).unwrap_err();
        assert!(matches!(err, DbError::MissingTable { table: "measurement" }));
    }

    #[test]
    fn missing_column_is_reported() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE measurement (station TEXT, date TEXT, tobs REAL);
             CREATE TABLE station (station TEXT);",
        )
        .unwrap();
        let err = verify_schema(&conn).unwrap_err();
        assert!(matches!(
            err,
            DbError::MissingColumn {
                table: "measurement",
                column: "prcp"
            }
        ));
    }
}
