//! TOML rule files.
//!
//! A rules file extends the built-in tables:
//!
//! ```toml
//! replace_defaults = false
//!
//! [keywords]
//! reference = ["ESM"]
//! linked_reference = ["MP"]
//! linking = ["ACC TO"]
//!
//! [phrases]
//! skip = ["REMOVE COVER"]
//! header_skip = ["PREPARATION"]
//!
//! [patterns.revision]
//! amendment = '\bAMDT\s*\d+\b'
//!
//! [[patterns.typo]]
//! name = "amendment_separator"
//! pattern = '\bAMDT\s*[:.]\s*(\d+)\b'
//! replacement = "AMDT ${1}"
//! ```
//!
//! Named patterns whose name matches a built-in pattern replace it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::builder::RuleTablesBuilder;
use crate::error::RulesError;
use crate::tables::RuleTables;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Start from empty tables instead of the built-in ones.
    pub replace_defaults: bool,
    pub keywords: KeywordConfig,
    pub phrases: PhraseConfig,
    pub patterns: PatternConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordConfig {
    pub reference: Vec<String>,
    /// Keywords that count only after a linking word.
    pub linked_reference: Vec<String>,
    pub linking: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhraseConfig {
    pub skip: Vec<String>,
    pub header_skip: Vec<String>,
}

/// Named pattern tables. TOML tables carry no order, so appended entries
/// are added sorted by name after the built-in ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternConfig {
    pub skip: BTreeMap<String, String>,
    pub document_id: BTreeMap<String, String>,
    pub revision: BTreeMap<String, String>,
    pub special: BTreeMap<String, String>,
    pub typo: Vec<TypoConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypoConfig {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
}

impl RuleConfig {
    /// Read and parse a rules file.
    ///
    /// # Errors
    ///
    /// [`RulesError::Io`] if the file cannot be read, [`RulesError::Toml`]
    /// if it is not a valid rules document.
    pub fn from_path(path: &Path) -> Result<Self, RulesError> {
        let text = std::fs::read_to_string(path).map_err(|e| RulesError::io(path, e))?;
        let config = toml::from_str(&text).map_err(|source| RulesError::Toml {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        info!(path = %path.display(), "loaded rules file");
        Ok(config)
    }

    /// Builder seeded according to `replace_defaults`, with this file's
    /// entries appended.
    pub fn to_builder(&self) -> RuleTablesBuilder {
        let base = if self.replace_defaults {
            RuleTablesBuilder::empty()
        } else {
            RuleTablesBuilder::with_defaults()
        };
        self.apply(base)
    }

    /// Append this file's entries to an existing builder.
    pub fn apply(&self, mut builder: RuleTablesBuilder) -> RuleTablesBuilder {
        for code in &self.keywords.reference {
            builder = builder.reference_keyword(code, false);
        }
        for code in &self.keywords.linked_reference {
            builder = builder.reference_keyword(code, true);
        }
        for word in &self.keywords.linking {
            builder = builder.linking_word(word);
        }
        for phrase in &self.phrases.skip {
            builder = builder.skip_phrase(phrase);
        }
        for keyword in &self.phrases.header_skip {
            builder = builder.header_skip_keyword(keyword);
        }
        for (name, pattern) in &self.patterns.skip {
            builder = builder.skip_pattern(name, pattern);
        }
        for (name, pattern) in &self.patterns.document_id {
            builder = builder.document_id_pattern(name, pattern);
        }
        for (name, pattern) in &self.patterns.revision {
            builder = builder.revision_pattern(name, pattern);
        }
        for (name, pattern) in &self.patterns.special {
            builder = builder.special_pattern(name, pattern);
        }
        for rule in &self.patterns.typo {
            builder = builder.typo_rule(&rule.name, &rule.pattern, &rule.replacement);
        }
        builder
    }

    /// Compile the configured tables.
    ///
    /// # Errors
    ///
    /// See [`RuleTablesBuilder::build`].
    pub fn build(&self) -> Result<RuleTables, RulesError> {
        self.to_builder().build()
    }
}

impl std::str::FromStr for RuleConfig {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}
