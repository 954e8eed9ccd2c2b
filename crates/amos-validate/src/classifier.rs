use std::fmt;
use std::sync::Arc;

use amos_model::{ActionRow, ValidationStatus};
use amos_rules::{NamedPattern, RuleTables, RulesError};
use serde::Serialize;
use tracing::trace;

use crate::normalize::{collapse, normalize};

/// Sequence-code prefixes that exempt a step from documentation checks.
pub const AUTO_VALID_SEQUENCE_PREFIXES: &[&str] = &["1.", "2.", "3.", "10."];

/// Texts treated as "no entry".
pub const NULL_MARKERS: &[&str] = &["", "N/A", "NA", "NONE"];

/// The guard or detection stage that settled a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStep {
    SequenceCode,
    HeaderSkip,
    NullText,
    SkipPhrase,
    SkipPattern,
    SpecialPattern,
    /// Reference, document id and revision detection.
    Detection,
}

impl DecisionStep {
    pub fn label(&self) -> &'static str {
        match self {
            DecisionStep::SequenceCode => "sequence_code",
            DecisionStep::HeaderSkip => "header_skip",
            DecisionStep::NullText => "null_text",
            DecisionStep::SkipPhrase => "skip_phrase",
            DecisionStep::SkipPattern => "skip_pattern",
            DecisionStep::SpecialPattern => "special_pattern",
            DecisionStep::Detection => "detection",
        }
    }
}

impl fmt::Display for DecisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A status together with the reason it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub status: ValidationStatus,
    pub step: DecisionStep,
    /// The keyword, phrase or pattern name that matched, when there is one.
    pub rule: Option<String>,
}

impl Decision {
    fn new(status: ValidationStatus, step: DecisionStep, rule: Option<String>) -> Self {
        Self { status, step, rule }
    }
}

/// Assigns a [`ValidationStatus`] to maintenance action text.
///
/// Cloning is cheap; the rule tables are shared.
#[derive(Debug, Clone)]
pub struct Classifier {
    tables: Arc<RuleTables>,
}

impl Classifier {
    pub fn new(tables: Arc<RuleTables>) -> Self {
        Self { tables }
    }

    /// Classifier over the built-in rule tables.
    pub fn with_defaults() -> Result<Self, RulesError> {
        Ok(Self::new(Arc::new(RuleTables::build()?)))
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    /// Classify one action text. Never fails; degenerate input maps to
    /// [`ValidationStatus::NotApplicable`].
    pub fn classify(&self, text: Option<&str>, sequence_code: Option<&str>) -> ValidationStatus {
        self.explain(text, sequence_code).status
    }

    /// Classify a row, also honouring header skip keywords.
    pub fn classify_row(&self, row: &ActionRow) -> ValidationStatus {
        self.explain_row(row).status
    }

    pub fn explain(&self, text: Option<&str>, sequence_code: Option<&str>) -> Decision {
        self.decide(text, sequence_code, None)
    }

    pub fn explain_row(&self, row: &ActionRow) -> Decision {
        self.decide(
            row.text.as_deref(),
            row.sequence_code.as_deref(),
            row.header.as_deref(),
        )
    }

    /// Normalize text with this classifier's typo rules.
    pub fn normalize(&self, text: &str) -> String {
        normalize(text, &self.tables)
    }

    fn decide(&self, text: Option<&str>, sequence_code: Option<&str>, header: Option<&str>) -> Decision {
        let decision = self.decide_inner(text, sequence_code, header);
        trace!(
            status = %decision.status,
            step = %decision.step,
            rule = decision.rule.as_deref().unwrap_or(""),
            "classified action"
        );
        decision
    }

    fn decide_inner(
        &self,
        text: Option<&str>,
        sequence_code: Option<&str>,
        header: Option<&str>,
    ) -> Decision {
        if let Some(prefix) = sequence_code.and_then(auto_valid_prefix) {
            return Decision::new(
                ValidationStatus::Valid,
                DecisionStep::SequenceCode,
                Some(prefix.to_string()),
            );
        }

        if let Some(keyword) = header.and_then(|h| self.header_skip_keyword(h)) {
            return Decision::new(
                ValidationStatus::Valid,
                DecisionStep::HeaderSkip,
                Some(keyword.to_string()),
            );
        }

        let Some(text) = text.filter(|t| !is_null_marker(t)) else {
            return Decision::new(ValidationStatus::NotApplicable, DecisionStep::NullText, None);
        };

        let collapsed = collapse(text);
        if let Some(phrase) = self.skip_phrase(&collapsed) {
            return Decision::new(
                ValidationStatus::Valid,
                DecisionStep::SkipPhrase,
                Some(phrase.to_string()),
            );
        }
        if let Some(pattern) = first_match(self.tables.skip_patterns(), &collapsed) {
            return Decision::new(
                ValidationStatus::Valid,
                DecisionStep::SkipPattern,
                Some(pattern.name.clone()),
            );
        }

        let normalized = self.normalize(text);
        if let Some(pattern) = first_match(self.tables.special_patterns(), &normalized) {
            return Decision::new(
                ValidationStatus::Valid,
                DecisionStep::SpecialPattern,
                Some(pattern.name.clone()),
            );
        }

        let reference = self.find_reference(&normalized);
        let document_id = self.find_document_id(&normalized);
        let revision = self.find_revision(&normalized);

        let (status, rule) = match (reference, document_id) {
            (None, None) => (ValidationStatus::MissingReference, None),
            (None, Some(id)) => (ValidationStatus::MissingReferenceType, Some(id.to_string())),
            (Some(keyword), _) => match revision {
                None => (ValidationStatus::MissingRevision, Some(keyword)),
                Some(rev) => (ValidationStatus::Valid, Some(rev.to_string())),
            },
        };
        Decision::new(status, DecisionStep::Detection, rule)
    }

    /// The reference keyword found in normalized text, uppercase.
    pub fn find_reference(&self, normalized: &str) -> Option<String> {
        let standalone = self
            .tables
            .reference_pattern()
            .and_then(|re| re.find(normalized));
        let linked = self
            .tables
            .linked_reference_pattern()
            .and_then(|re| re.find(normalized));
        let found = match (standalone, linked) {
            (Some(a), Some(b)) => Some(if a.start() <= b.start() { a } else { b }),
            (a, b) => a.or(b),
        }?;
        Some(collapse(found.as_str()))
    }

    /// Name of the first document-id pattern matching normalized text.
    pub fn find_document_id(&self, normalized: &str) -> Option<&str> {
        first_match(self.tables.document_id_patterns(), normalized).map(|p| p.name.as_str())
    }

    /// Name of the first revision pattern matching normalized text.
    pub fn find_revision(&self, normalized: &str) -> Option<&str> {
        first_match(self.tables.revision_patterns(), normalized).map(|p| p.name.as_str())
    }

    fn skip_phrase(&self, collapsed: &str) -> Option<&str> {
        self.tables
            .skip_phrases()
            .iter()
            .find(|phrase| collapsed.contains(phrase.as_str()))
            .map(String::as_str)
    }

    fn header_skip_keyword(&self, header: &str) -> Option<&str> {
        let collapsed = collapse(header);
        self.tables
            .header_skip_keywords()
            .iter()
            .find(|keyword| collapsed.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

fn auto_valid_prefix(sequence_code: &str) -> Option<&'static str> {
    let trimmed = sequence_code.trim();
    AUTO_VALID_SEQUENCE_PREFIXES
        .iter()
        .copied()
        .find(|prefix| trimmed.starts_with(prefix))
}

fn is_null_marker(text: &str) -> bool {
    let upper = text.trim().to_uppercase();
    NULL_MARKERS.contains(&upper.as_str())
}

fn first_match<'a>(patterns: &'a [NamedPattern], text: &str) -> Option<&'a NamedPattern> {
    patterns.iter().find(|p| p.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_valid_prefixes() {
        assert_eq!(auto_valid_prefix(" 10.3"), Some("10."));
        assert_eq!(auto_valid_prefix("1.12"), Some("1."));
        assert_eq!(auto_valid_prefix("4.1"), None);
        assert_eq!(auto_valid_prefix("11.1"), None);
        assert_eq!(auto_valid_prefix("100.1"), None);
    }

    #[test]
    fn null_markers_are_case_insensitive() {
        for text in ["", "  ", "N/A", "na", "None", "NONE", " n/a "] {
            assert!(is_null_marker(text), "{text:?}");
        }
        assert!(!is_null_marker("NAN"));
        assert!(!is_null_marker("N/A SEE ABOVE"));
    }
}
