//! Climate store records and query projections.
//!
//! # Responsibility
//! - Mirror the `measurement` and `station` tables as typed records.
//! - Define the shapes returned by query service operations.
//!
//! # Invariants
//! - `prcp` stays `None` when the store has no reading; it is never coerced to zero.
//! - `TemperatureStats` always satisfies `tmin <= tavg <= tmax`.

use crate::model::date::ObservationDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Length of the trailing window ending at the latest recorded date.
pub const WINDOW_DAYS: i64 = 365;

/// One station/date reading from the `measurement` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station: String,
    pub date: ObservationDate,
    /// Precipitation; `None` when not recorded.
    pub prcp: Option<f64>,
    /// Observed temperature.
    pub tobs: f64,
}

/// One row of the `station` table.
///
/// Descriptive columns are carried for completeness; current queries only
/// read `station`.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Precipitation keyed by date.
///
/// When several stations report the same date, the row returned last by the
/// store wins.
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// Temperature reading for the most active station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
}

/// Station with the highest measurement row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveStation {
    pub station: String,
    pub row_count: u64,
}

/// Window observations for the most active station.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStationObservations {
    pub station: String,
    pub row_count: u64,
    pub window_start: ObservationDate,
    pub observations: Vec<TemperatureObservation>,
}

/// Temperature aggregate over a date filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub tmin: f64,
    #[serde(rename = "TAVG")]
    pub tavg: f64,
    #[serde(rename = "TMAX")]
    pub tmax: f64,
}

/// Inclusive date filter for temperature aggregates.
///
/// `end = None` leaves the range open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: ObservationDate,
    pub end: Option<ObservationDate>,
}

/// Coarse dataset description used by health checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub latest_date: Option<ObservationDate>,
    pub station_count: u64,
    pub measurement_count: u64,
}

#[cfg(test)]
mod tests {
    use super::TemperatureStats;

    #[test]
    fn temperature_stats_serialize_with_upper_case_keys() {
        let stats = TemperatureStats {
            tmin: 54.0,
            tavg: 71.5,
            tmax: 85.0,
        };
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["TMIN"], 54.0);
        assert_eq!(value["TAVG"], 71.5);
        assert_eq!(value["TMAX"], 85.0);
    }
}
