//! Documentation-compliance status assigned to each maintenance step.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result of classifying one maintenance action text.
///
/// The set is closed: every row receives exactly one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// Cites a reference document together with a revision marker, or is
    /// exempt from the requirement.
    #[serde(rename = "Valid")]
    Valid,
    /// Neither a document-type keyword nor a document identifier is present.
    #[serde(rename = "Missing reference")]
    MissingReference,
    /// A document identifier is present but no document-type keyword explains it.
    #[serde(rename = "Missing reference type")]
    MissingReferenceType,
    /// A document-type keyword is present without any revision marker.
    #[serde(rename = "Missing revision")]
    MissingRevision,
    /// Blank or null-marker text.
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl ValidationStatus {
    /// All variants in report order.
    pub const ALL: [ValidationStatus; 5] = [
        ValidationStatus::Valid,
        ValidationStatus::NotApplicable,
        ValidationStatus::MissingReference,
        ValidationStatus::MissingReferenceType,
        ValidationStatus::MissingRevision,
    ];

    /// Label written to the `Reason` column of the annotated output.
    pub fn label(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "Valid",
            ValidationStatus::MissingReference => "Missing reference",
            ValidationStatus::MissingReferenceType => "Missing reference type",
            ValidationStatus::MissingRevision => "Missing revision",
            ValidationStatus::NotApplicable => "N/A",
        }
    }

    /// Returns true for the statuses that count as documentation errors.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ValidationStatus::MissingReference
                | ValidationStatus::MissingReferenceType
                | ValidationStatus::MissingRevision
        )
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ValidationStatus {
    type Err = String;

    /// Parse a report label (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_uppercase().as_str() {
            "VALID" => Ok(ValidationStatus::Valid),
            "MISSING REFERENCE" => Ok(ValidationStatus::MissingReference),
            "MISSING REFERENCE TYPE" => Ok(ValidationStatus::MissingReferenceType),
            "MISSING REVISION" => Ok(ValidationStatus::MissingRevision),
            "N/A" => Ok(ValidationStatus::NotApplicable),
            _ => Err(format!("Unknown validation status: {s}")),
        }
    }
}
