//! Shared types for the maintenance documentation validator.
//!
//! Rows, statuses and date ranges live here so that the rule, classifier,
//! filter and report crates agree on one vocabulary without depending on
//! each other.

pub mod error;
pub mod range;
pub mod row;
pub mod status;

pub use error::DateRangeError;
pub use range::{DATE_FORMAT, DateRange};
pub use row::{ActionRow, Dated};
pub use status::ValidationStatus;
