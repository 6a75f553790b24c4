//! Schedule configuration schema types with serde deserialization.
//!
//! Field names follow the persisted camelCase form (`openSubmissionDateTime`,
//! `keepOpenForTerm`, ...) so configurations round-trip unchanged through
//! JSON and the flat storage columns.

mod interval;
mod period;
mod schedule;
mod verdict;

pub(crate) use interval::advance_by;
pub use interval::*;
pub use period::*;
pub use schedule::*;
pub use verdict::*;
