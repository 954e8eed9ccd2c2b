use regex::Regex;

use crate::builder::RuleTablesBuilder;
use crate::error::RulesError;

/// A document-type keyword such as `AMM` or `SRM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceKeyword {
    /// Uppercase code; multi-word codes keep single spaces.
    pub code: String,
    /// Only counts when a linking word directly precedes it.
    pub requires_linking_word: bool,
}

impl ReferenceKeyword {
    pub fn new(code: impl AsRef<str>, requires_linking_word: bool) -> Self {
        Self {
            code: canonical_phrase(code.as_ref()),
            requires_linking_word,
        }
    }

    /// True when the code is a single token (no inner whitespace).
    pub fn is_single_token(&self) -> bool {
        !self.code.contains(' ')
    }
}

/// A compiled, named pattern.
#[derive(Debug, Clone)]
pub struct NamedPattern {
    pub name: String,
    pub regex: Regex,
}

impl NamedPattern {
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// A compiled substitution applied during typo normalization.
#[derive(Debug, Clone)]
pub struct TypoRule {
    pub name: String,
    pub regex: Regex,
    pub replacement: String,
}

/// Immutable rule configuration consumed by the classifier.
///
/// Built once through [`RuleTables::build`] or [`RuleTablesBuilder`];
/// there is no mutation API, so a single instance can be shared across
/// threads without locking.
#[derive(Debug, Clone)]
pub struct RuleTables {
    pub(crate) reference_keywords: Vec<ReferenceKeyword>,
    pub(crate) linking_words: Vec<String>,
    pub(crate) skip_phrases: Vec<String>,
    pub(crate) skip_patterns: Vec<NamedPattern>,
    pub(crate) header_skip_keywords: Vec<String>,
    pub(crate) document_id_patterns: Vec<NamedPattern>,
    pub(crate) revision_patterns: Vec<NamedPattern>,
    pub(crate) special_patterns: Vec<NamedPattern>,
    pub(crate) typo_rules: Vec<TypoRule>,
    pub(crate) reference_pattern: Option<Regex>,
    pub(crate) linked_reference_pattern: Option<Regex>,
}

impl RuleTables {
    /// Build the built-in rule tables.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidPattern`] if a pattern fails to compile.
    pub fn build() -> Result<Self, RulesError> {
        RuleTablesBuilder::with_defaults().build()
    }

    pub fn builder() -> RuleTablesBuilder {
        RuleTablesBuilder::with_defaults()
    }

    pub fn reference_keywords(&self) -> &[ReferenceKeyword] {
        &self.reference_keywords
    }

    pub fn linking_words(&self) -> &[String] {
        &self.linking_words
    }

    /// Skip phrases, uppercase with single spaces.
    pub fn skip_phrases(&self) -> &[String] {
        &self.skip_phrases
    }

    pub fn skip_patterns(&self) -> &[NamedPattern] {
        &self.skip_patterns
    }

    /// Header skip keywords, uppercase with single spaces.
    pub fn header_skip_keywords(&self) -> &[String] {
        &self.header_skip_keywords
    }

    pub fn document_id_patterns(&self) -> &[NamedPattern] {
        &self.document_id_patterns
    }

    pub fn revision_patterns(&self) -> &[NamedPattern] {
        &self.revision_patterns
    }

    pub fn special_patterns(&self) -> &[NamedPattern] {
        &self.special_patterns
    }

    pub fn typo_rules(&self) -> &[TypoRule] {
        &self.typo_rules
    }

    /// Standalone match of any keyword that needs no linking word.
    pub fn reference_pattern(&self) -> Option<&Regex> {
        self.reference_pattern.as_ref()
    }

    /// Linking word followed by a keyword that requires one.
    pub fn linked_reference_pattern(&self) -> Option<&Regex> {
        self.linked_reference_pattern.as_ref()
    }
}

/// Uppercase and collapse inner whitespace to single spaces.
pub fn canonical_phrase(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn tables_are_shareable() {
        assert_send_sync::<RuleTables>();
    }

    #[test]
    fn canonical_phrase_collapses_spacing() {
        assert_eq!(canonical_phrase("  get\taccess  "), "GET ACCESS");
        assert_eq!(canonical_phrase(""), "");
    }

    #[test]
    fn multi_word_keywords_are_not_single_tokens() {
        assert!(ReferenceKeyword::new("amm", false).is_single_token());
        assert!(!ReferenceKeyword::new("ndt  manual", false).is_single_token());
        assert_eq!(ReferenceKeyword::new("ndt  manual", false).code, "NDT MANUAL");
    }
}
