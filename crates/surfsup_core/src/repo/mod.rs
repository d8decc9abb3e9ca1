//! Repository layer over the climate store.
//!
//! # Responsibility
//! - Define use-case oriented read contracts.
//! - Keep SQL details out of the query service.
//!
//! # Invariants
//! - Repository APIs only issue `SELECT` statements.
//! - Malformed persisted dates surface as `InvalidData`, never silently skipped.

pub mod climate_repo;
