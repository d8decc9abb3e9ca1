//! Route handlers.
//!
//! Each handler runs one query on the blocking pool with a connection that
//! lives only for that task.

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use log::{error, info, warn};
use std::time::Instant;
use surfsup_core::{
    ClimateService, ObservationDate, PrecipitationByDate, RepoError, ServiceError, ServiceResult,
    SqliteClimateRepository, TemperatureObservation, TemperatureStats,
};

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

pub(crate) async fn precipitation(State(state): State<AppState>) -> ApiResult<PrecipitationByDate> {
    let data = run_query(&state, "api_precipitation", |service| {
        service.recent_precipitation()
    })
    .await?;

    Ok(Json(Envelope::from_option(
        data,
        |by_date| {
            format!(
                "Precipitation for {} dates in the last 12 months of data",
                by_date.len()
            )
        },
        || "No precipitation data found for the last 12 months".to_string(),
    )))
}

pub(crate) async fn stations(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let stations = run_query(&state, "api_stations", |service| service.stations()).await?;

    Ok(Json(Envelope::with_data(
        format!("List of all {} stations", stations.len()),
        stations,
    )))
}

pub(crate) async fn tobs(State(state): State<AppState>) -> ApiResult<Vec<TemperatureObservation>> {
    let result = run_query(&state, "api_tobs", |service| {
        service.most_active_station_observations()
    })
    .await?;

    let Some(active) = result else {
        return Ok(Json(Envelope::no_data(
            "No temperature observations found for the most active station",
        )));
    };

    Ok(Json(Envelope::with_data(
        format!(
            "Temperature observations for the most active station {} since {}",
            active.station, active.window_start
        ),
        active.observations,
    )))
}

pub(crate) async fn stats_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> ApiResult<TemperatureStats> {
    reject_malformed_dates(&state, "api_stats_from", &[start.as_str()])?;
    let query_start = start.clone();
    let data = run_query(&state, "api_stats_from", move |service| {
        service.temperature_stats_from(&query_start)
    })
    .await?;

    Ok(Json(Envelope::from_option(
        data,
        |_| format!("Temperature stats from {start}"),
        || format!("No temperature data found from {start}"),
    )))
}

pub(crate) async fn stats_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<TemperatureStats> {
    reject_malformed_dates(&state, "api_stats_between", &[start.as_str(), end.as_str()])?;
    let (query_start, query_end) = (start.clone(), end.clone());
    let data = run_query(&state, "api_stats_between", move |service| {
        service.temperature_stats_between(&query_start, &query_end)
    })
    .await?;

    Ok(Json(Envelope::from_option(
        data,
        |_| format!("Temperature stats from {start} to {end}"),
        || format!("No temperature data found between {start} and {end}"),
    )))
}

/// Validates path dates before any store connection is opened.
fn reject_malformed_dates(
    state: &AppState,
    event: &'static str,
    dates: &[&str],
) -> Result<(), ApiError> {
    for date in dates {
        if let Err(err) = ObservationDate::parse(date) {
            warn!("event={event} module=api status=rejected error={err}");
            let err = ServiceError::from(err);
            return Err(ApiError::from_service(&err, state.expose_error_details));
        }
    }
    Ok(())
}

/// Opens a fresh connection, runs `query`, and closes the connection on every path.
async fn run_query<T, F>(state: &AppState, event: &'static str, query: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: for<'conn> FnOnce(&ClimateService<SqliteClimateRepository<'conn>>) -> ServiceResult<T>
        + Send
        + 'static,
{
    let started_at = Instant::now();
    let store = state.store.clone();

    let joined = tokio::task::spawn_blocking(move || -> ServiceResult<T> {
        let conn = store.connect().map_err(RepoError::from)?;
        let service = ClimateService::new(SqliteClimateRepository::new(&conn));
        query(&service)
    })
    .await;

    let elapsed_ms = started_at.elapsed().as_millis();
    match joined {
        Ok(Ok(value)) => {
            info!("event={event} module=api status=ok duration_ms={elapsed_ms}");
            Ok(value)
        }
        Ok(Err(err)) if err.is_client_error() => {
            warn!(
                "event={event} module=api status=rejected duration_ms={elapsed_ms} error={err}"
            );
            Err(ApiError::from_service(&err, state.expose_error_details))
        }
        Ok(Err(err)) => {
            error!(
                "event={event} module=api status=error duration_ms={elapsed_ms} error_code=store_query_failed error={err}"
            );
            Err(ApiError::from_service(&err, state.expose_error_details))
        }
        Err(join_err) => {
            error!(
                "event={event} module=api status=error duration_ms={elapsed_ms} error_code=task_failed error={join_err}"
            );
            Err(ApiError::Internal("query task failed".to_string()))
        }
    }
}

/// Rejects date paths with extra segments, e.g. `2013/01/01`.
pub(crate) async fn malformed_date_path(Path(dates): Path<String>) -> ApiError {
    warn!("event=api_stats module=api status=rejected error_code=malformed_date_path path={dates}");
    ApiError::BadRequest(format!(
        "invalid date path `{dates}`; expected YYYY-MM-DD or YYYY-MM-DD/YYYY-MM-DD"
    ))
}

pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound("resource not found".to_string())
}
