//! Form availability scheduling engine.
//!
//! This crate provides:
//! - serde schema types for a form's schedule configuration
//! - the availability evaluator: (schedule, now) -> open / expired / late-eligible
//! - close-date, recurrence-window, and late-eligibility helpers
//! - structured validation of schedule configurations
//!
//! Evaluation is a pure, synchronous computation over its inputs: no I/O,
//! no shared state, no clock reads. Callers pass `now` explicitly.

pub mod availability;
pub mod error;
pub mod schema;
pub mod validation;

pub use availability::{evaluate, AvailabilityWindow};
pub use error::ScheduleError;
pub use schema::{FormSchedule, IntervalType, ScheduleType, Verdict};
