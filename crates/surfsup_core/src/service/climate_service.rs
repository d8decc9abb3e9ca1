//! Climate query service.
//!
//! # Responsibility
//! - Implement the recent-window, station, most-active-station and
//!   temperature-stats operations.
//! - Separate caller mistakes (bad dates) from store failures.
//!
//! # Invariants
//! - "No matching rows" is `Ok(None)`, never an error.
//! - The trailing window starts `WINDOW_DAYS` before the latest stored date.
//! - Range queries do not require `start <= end`; an inverted range yields no data.

use crate::model::climate::{
    ActiveStationObservations, DatasetSummary, DateRange, PrecipitationByDate, TemperatureStats,
    WINDOW_DAYS,
};
use crate::model::date::{DateParseError, ObservationDate};
use crate::repo::climate_repo::{ClimateRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by query operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller supplied a date that is not strict `YYYY-MM-DD`.
    InvalidDate(DateParseError),
    Repo(RepoError),
}

impl ServiceError {
    /// Whether the failure was caused by caller input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidDate(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<DateParseError> for ServiceError {
    fn from(value: DateParseError) -> Self {
        Self::InvalidDate(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service over a climate repository.
pub struct ClimateService<R: ClimateRepository> {
    repo: R,
}

impl<R: ClimateRepository> ClimateService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Start of the trailing window, or `None` for an empty store.
    pub fn window_start(&self) -> ServiceResult<Option<ObservationDate>> {
        Ok(self
            .repo
            .latest_date()?
            .map(|latest| latest.days_before(WINDOW_DAYS)))
    }

    /// Precipitation for every date in the trailing window.
    ///
    /// Duplicate dates from different stations keep the last row returned.
    pub fn recent_precipitation(&self) -> ServiceResult<Option<PrecipitationByDate>> {
        let Some(window_start) = self.window_start()? else {
            return Ok(None);
        };

        let by_date = self.repo.precipitation_since(window_start)?;
        if by_date.is_empty() {
            return Ok(None);
        }
        Ok(Some(by_date))
    }

    /// All station identifiers in store order.
    pub fn stations(&self) -> ServiceResult<Vec<String>> {
        Ok(self.repo.station_ids()?)
    }

    /// Trailing-window temperature readings for the station with most rows.
    pub fn most_active_station_observations(
        &self,
    ) -> ServiceResult<Option<ActiveStationObservations>> {
        let Some(window_start) = self.window_start()? else {
            return Ok(None);
        };
        let Some(active) = self.repo.most_active_station()? else {
            return Ok(None);
        };

        let observations = self
            .repo
            .temperature_observations(&active.station, window_start)?;
        if observations.is_empty() {
            return Ok(None);
        }

        Ok(Some(ActiveStationObservations {
            station: active.station,
            row_count: active.row_count,
            window_start,
            observations,
        }))
    }

    /// `TMIN/TAVG/TMAX` for every measurement on or after `start`.
    ///
    /// # Errors
    /// - `ServiceError::InvalidDate` when `start` is not `YYYY-MM-DD`.
    pub fn temperature_stats_from(&self, start: &str) -> ServiceResult<Option<TemperatureStats>> {
        let range = DateRange {
            start: ObservationDate::parse(start)?,
            end: None,
        };
        Ok(self.repo.temperature_stats(&range)?)
    }

    /// `TMIN/TAVG/TMAX` for measurements in `[start, end]`.
    ///
    /// # Errors
    /// - `ServiceError::InvalidDate` when either bound is not `YYYY-MM-DD`.
    pub fn temperature_stats_between(
        &self,
        start: &str,
        end: &str,
    ) -> ServiceResult<Option<TemperatureStats>> {
        let range = DateRange {
            start: ObservationDate::parse(start)?,
            end: Some(ObservationDate::parse(end)?),
        };
        Ok(self.repo.temperature_stats(&range)?)
    }

    pub fn summary(&self) -> ServiceResult<DatasetSummary> {
        Ok(DatasetSummary {
            latest_date: self.repo.latest_date()?,
            station_count: self.repo.station_count()?,
            measurement_count: self.repo.measurement_count()?,
        })
    }
}
