//! HTTP surface for the SurfsUp climate API.
//!
//! # Responsibility
//! - Map the `/api/v1.0/...` routes onto core query operations.
//! - Render the `{message, data}` / `{error}` JSON envelopes.
//!
//! # Invariants
//! - Every request opens its own store connection inside a blocking task.
//! - A failing request never affects other requests or the process.

pub mod envelope;
pub mod error;
mod handlers;
mod index;
mod routes;
mod state;

pub use envelope::{Envelope, ErrorBody};
pub use error::ApiError;
pub use routes::{router, serve};
pub use state::AppState;
