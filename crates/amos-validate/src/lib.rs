//! Documentation-compliance classification of maintenance action text.
//!
//! [`Classifier`] runs an ordered list of guards (sequence code, header,
//! null text, skip phrases and patterns), normalizes common typing errors,
//! and then detects reference keywords, document identifiers and revision
//! markers to settle on one [`ValidationStatus`](amos_model::ValidationStatus).

mod classifier;
mod normalize;

pub use classifier::{
    AUTO_VALID_SEQUENCE_PREFIXES, Classifier, Decision, DecisionStep, NULL_MARKERS,
};
pub use normalize::normalize;
