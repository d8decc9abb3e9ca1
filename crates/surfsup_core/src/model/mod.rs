//! Typed records and query projections for the climate store.
//!
//! # Responsibility
//! - Declare the two fixed entities (`Measurement`, `Station`) as plain records.
//! - Define validated calendar dates used for window and range filters.
//!
//! # Invariants
//! - Stored dates are ISO `YYYY-MM-DD` text, so string order is date order.

pub mod climate;
pub mod date;
