//! HTTP error mapping.
//!
//! # Invariants
//! - Caller mistakes map to 400; everything else maps to 500.
//! - Store failure text reaches the client only when explicitly enabled.

use crate::envelope::ErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt::{Display, Formatter};
use surfsup_core::ServiceError;

const GENERIC_STORE_ERROR: &str = "internal error while querying the climate store";

/// Error returned by route handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    /// Maps a service failure, hiding store details unless `expose_details` is set.
    pub fn from_service(err: &ServiceError, expose_details: bool) -> Self {
        if err.is_client_error() {
            return Self::BadRequest(err.to_string());
        }
        if expose_details {
            Self::Internal(err.to_string())
        } else {
            Self::Internal(GENERIC_STORE_ERROR.to_string())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) | Self::Internal(message) => {
                message
            }
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status().as_u16(), self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
