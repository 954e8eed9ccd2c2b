//! Action date filtering for work-package batches.
//!
//! [`DateRangeFilter`] first trims rows to the file's own date range and
//! then to the user's requested range clamped to it. Relative bounds such
//! as `-7d` are resolved with [`resolve_date_expr`].

pub mod error;
mod filter;
pub mod relative;

pub use error::DateExprError;
pub use filter::{DateRangeFilter, EffectiveRange, FilterOutcome, apply_range, compute_effective_range};
pub use relative::resolve_date_expr;
