//! Climate repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Run the aggregate and filter queries behind every service operation.
//! - Return rows in the order the store yields them.
//!
//! # Invariants
//! - Date filters compare ISO text, which matches chronological order.
//! - Ties for most active station follow the store's grouping order.

use crate::db::DbError;
use crate::model::climate::{
    ActiveStation, DateRange, PrecipitationByDate, TemperatureObservation, TemperatureStats,
};
use crate::model::date::ObservationDate;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for climate store reads.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored climate data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read-only queries over `measurement` and `station`.
pub trait ClimateRepository {
    /// Most recent measurement date, or `None` for an empty table.
    fn latest_date(&self) -> RepoResult<Option<ObservationDate>>;
    /// `(date, prcp)` rows on or after `start`, folded into a date map.
    fn precipitation_since(&self, start: ObservationDate) -> RepoResult<PrecipitationByDate>;
    fn station_ids(&self) -> RepoResult<Vec<String>>;
    fn most_active_station(&self) -> RepoResult<Option<ActiveStation>>;
    fn temperature_observations(
        &self,
        station: &str,
        since: ObservationDate,
    ) -> RepoResult<Vec<TemperatureObservation>>;
    /// `MIN/AVG/MAX(tobs)`; `None` when no row matches.
    fn temperature_stats(&self, range: &DateRange) -> RepoResult<Option<TemperatureStats>>;
    fn station_count(&self) -> RepoResult<u64>;
    fn measurement_count(&self) -> RepoResult<u64>;
}

/// SQLite-backed climate repository borrowing a request-scoped connection.
pub struct SqliteClimateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClimateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ClimateRepository for SqliteClimateRepository<'_> {
    fn latest_date(&self) -> RepoResult<Option<ObservationDate>> {
        let latest: Option<String> =
            self.conn
                .query_row("SELECT MAX(date) FROM measurement;", [], |row| row.get(0))?;

        latest
            .map(|text| parse_stored_date(&text, "measurement.date"))
            .transpose()
    }

    fn precipitation_since(&self, start: ObservationDate) -> RepoResult<PrecipitationByDate> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, prcp FROM measurement WHERE date >= ?1;")?;
        let mut rows = stmt.query([start.to_iso_string()])?;
        let mut by_date = PrecipitationByDate::new();

        while let Some(row) = rows.next()? {
            let date: String = row.get(0)?;
            let prcp: Option<f64> = row.get(1)?;
            // Later rows for the same date overwrite earlier ones.
            by_date.insert(date, prcp);
        }

        Ok(by_date)
    }

    fn station_ids(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT station FROM station;")?;
        let mut rows = stmt.query([])?;
        let mut stations = Vec::new();

        while let Some(row) = rows.next()? {
            stations.push(row.get(0)?);
        }

        Ok(stations)
    }

    fn most_active_station(&self) -> RepoResult<Option<ActiveStation>> {
        let mut stmt = self.conn.prepare(
            "SELECT station, COUNT(*) AS row_count
             FROM measurement
             GROUP BY station
             ORDER BY row_count DESC
             LIMIT 1;",
        )?;
        let mut rows = stmt.query([])?;

        if let Some(row) = rows.next()? {
            let row_count: i64 = row.get("row_count")?;
            return Ok(Some(ActiveStation {
                station: row.get("station")?,
                row_count: count_to_u64(row_count, "measurement row count")?,
            }));
        }

        Ok(None)
    }

    fn temperature_observations(
        &self,
        station: &str,
        since: ObservationDate,
    ) -> RepoResult<Vec<TemperatureObservation>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, tobs
             FROM measurement
             WHERE station = ?1
               AND date >= ?2;",
        )?;
        let mut rows = stmt.query(params![station, since.to_iso_string()])?;
        let mut observations = Vec::new();

        while let Some(row) = rows.next()? {
            observations.push(TemperatureObservation {
                date: row.get("date")?,
                tobs: row.get("tobs")?,
            });
        }

        Ok(observations)
    }

    fn temperature_stats(&self, range: &DateRange) -> RepoResult<Option<TemperatureStats>> {
        let (tmin, tavg, tmax) = self.conn.query_row(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs)
             FROM measurement
             WHERE date >= ?1
               AND (?2 IS NULL OR date <= ?2);",
            params![
                range.start.to_iso_string(),
                range.end.map(ObservationDate::to_iso_string),
            ],
            |row| {
                Ok((
                    row.get::<_, Option<f64>>(0)?,
                    row.get::<_, Option<f64>>(1)?,
                    row.get::<_, Option<f64>>(2)?,
                ))
            },
        )?;

        match (tmin, tavg, tmax) {
            (Some(tmin), Some(tavg), Some(tmax)) => Ok(Some(TemperatureStats { tmin, tavg, tmax })),
            (None, _, _) => Ok(None),
            _ => Err(RepoError::InvalidData(
                "temperature aggregate returned a partial result".to_string(),
            )),
        }
    }

    fn station_count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM station;", [], |row| row.get(0))?;
        count_to_u64(count, "station row count")
    }

    fn measurement_count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM measurement;", [], |row| row.get(0))?;
        count_to_u64(count, "measurement row count")
    }
}

fn parse_stored_date(text: &str, column: &str) -> RepoResult<ObservationDate> {
    ObservationDate::parse(text)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{text}` in {column}")))
}

fn count_to_u64(value: i64, label: &str) -> RepoResult<u64> {
    u64::try_from(value).map_err(|_| RepoError::InvalidData(format!("negative {label} `{value}`")))
}
