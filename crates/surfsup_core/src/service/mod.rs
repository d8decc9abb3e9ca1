//! Query use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the public query operations.
//! - Validate caller-provided dates before touching the store.

pub mod climate_service;
