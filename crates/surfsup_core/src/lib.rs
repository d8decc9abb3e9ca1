//! Core query logic for the SurfsUp climate API.
//! This crate owns the store schema, the SQL, and the query semantics.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::climate::{
    ActiveStation, ActiveStationObservations, DatasetSummary, DateRange, Measurement,
    PrecipitationByDate, Station, TemperatureObservation, TemperatureStats, WINDOW_DAYS,
};
pub use model::date::{DateParseError, ObservationDate};
pub use repo::climate_repo::{ClimateRepository, RepoError, RepoResult, SqliteClimateRepository};
pub use service::climate_service::{ClimateService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
