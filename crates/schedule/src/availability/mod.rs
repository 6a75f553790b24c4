//! Availability evaluation for scheduled forms.
//!
//! Composes three helper algorithms under one evaluator:
//! - [`compute_close_date`]: effective close bound for the current cycle
//! - [`enumerate_windows`]: ordered (start, close, grace) recurrence windows
//! - [`is_late_eligible`]: whether "now" sits inside a grace interval
//!
//! The evaluator is a pure function of (schedule, now). Windows are computed
//! fresh on every call; callers must not assume stability across calls if
//! `now` changes between them.

mod close_date;
mod evaluator;
mod late;
mod recurrence;


pub use self::close_date::compute_close_date;
pub use self::evaluator::evaluate;
pub use self::late::is_late_eligible;
pub use self::recurrence::{enumerate_windows, AvailabilityWindow};
