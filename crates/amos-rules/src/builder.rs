//! Assembly and compilation of [`RuleTables`].

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::defaults;
use crate::error::RulesError;
use crate::tables::{NamedPattern, ReferenceKeyword, RuleTables, TypoRule, canonical_phrase};

/// Alternation that can never match, used when a placeholder list is empty.
const NEVER: &str = r"\b\B";

#[derive(Debug, Clone)]
struct PatternSource {
    name: String,
    pattern: String,
}

#[derive(Debug, Clone)]
struct TypoSource {
    name: String,
    pattern: String,
    replacement: String,
}

/// Collects rule entries and compiles them into [`RuleTables`].
///
/// Entries are appended in call order; ordered lists keep that order.
/// Adding a pattern under a name that already exists replaces the earlier
/// source in place, so a rules file can override one built-in pattern.
#[derive(Debug, Clone, Default)]
pub struct RuleTablesBuilder {
    reference_keywords: Vec<ReferenceKeyword>,
    linking_words: Vec<String>,
    skip_phrases: Vec<String>,
    skip_patterns: Vec<PatternSource>,
    header_skip_keywords: Vec<String>,
    document_id_patterns: Vec<PatternSource>,
    revision_patterns: Vec<PatternSource>,
    special_patterns: Vec<PatternSource>,
    typo_rules: Vec<TypoSource>,
}

impl RuleTablesBuilder {
    /// A builder with no entries at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A builder pre-filled with the built-in tables.
    pub fn with_defaults() -> Self {
        let mut builder = Self::empty();
        for (code, linked) in defaults::REFERENCE_KEYWORDS {
            builder = builder.reference_keyword(code, *linked);
        }
        for word in defaults::LINKING_WORDS {
            builder = builder.linking_word(word);
        }
        for phrase in defaults::SKIP_PHRASES {
            builder = builder.skip_phrase(phrase);
        }
        for (name, pattern) in defaults::SKIP_PATTERNS {
            builder = builder.skip_pattern(name, pattern);
        }
        for keyword in defaults::HEADER_SKIP_KEYWORDS {
            builder = builder.header_skip_keyword(keyword);
        }
        for (name, pattern) in defaults::DOCUMENT_ID_PATTERNS {
            builder = builder.document_id_pattern(name, pattern);
        }
        for (name, pattern) in defaults::REVISION_PATTERNS {
            builder = builder.revision_pattern(name, pattern);
        }
        for (name, pattern) in defaults::SPECIAL_PATTERNS {
            builder = builder.special_pattern(name, pattern);
        }
        for (name, pattern, replacement) in defaults::TYPO_RULES {
            builder = builder.typo_rule(name, pattern, replacement);
        }
        builder
    }

    #[must_use]
    pub fn reference_keyword(mut self, code: &str, requires_linking_word: bool) -> Self {
        let keyword = ReferenceKeyword::new(code, requires_linking_word);
        if let Some(existing) = self
            .reference_keywords
            .iter_mut()
            .find(|k| k.code == keyword.code)
        {
            existing.requires_linking_word = requires_linking_word;
        } else {
            self.reference_keywords.push(keyword);
        }
        self
    }

    #[must_use]
    pub fn linking_word(mut self, word: &str) -> Self {
        push_phrase(&mut self.linking_words, word);
        self
    }

    #[must_use]
    pub fn skip_phrase(mut self, phrase: &str) -> Self {
        push_phrase(&mut self.skip_phrases, phrase);
        self
    }

    #[must_use]
    pub fn skip_pattern(mut self, name: &str, pattern: &str) -> Self {
        upsert_pattern(&mut self.skip_patterns, name, pattern);
        self
    }

    #[must_use]
    pub fn header_skip_keyword(mut self, keyword: &str) -> Self {
        push_phrase(&mut self.header_skip_keywords, keyword);
        self
    }

    #[must_use]
    pub fn document_id_pattern(mut self, name: &str, pattern: &str) -> Self {
        upsert_pattern(&mut self.document_id_patterns, name, pattern);
        self
    }

    #[must_use]
    pub fn revision_pattern(mut self, name: &str, pattern: &str) -> Self {
        upsert_pattern(&mut self.revision_patterns, name, pattern);
        self
    }

    #[must_use]
    pub fn special_pattern(mut self, name: &str, pattern: &str) -> Self {
        upsert_pattern(&mut self.special_patterns, name, pattern);
        self
    }

    #[must_use]
    pub fn typo_rule(mut self, name: &str, pattern: &str, replacement: &str) -> Self {
        let source = TypoSource {
            name: name.to_string(),
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        };
        match self.typo_rules.iter_mut().find(|t| t.name == name) {
            Some(existing) => *existing = source,
            None => self.typo_rules.push(source),
        }
        self
    }

    /// Compile every pattern and freeze the tables.
    ///
    /// # Errors
    ///
    /// [`RulesError::InvalidPattern`] when a pattern does not compile after
    /// placeholder expansion, [`RulesError::EmptyEntry`] for blank keywords
    /// or pattern sources.
    pub fn build(self) -> Result<RuleTables, RulesError> {
        check_phrases("reference keyword", self.reference_keywords.iter().map(|k| k.code.as_str()))?;
        check_phrases("linking word", self.linking_words.iter().map(String::as_str))?;

        let placeholders = Placeholders::new(&self.reference_keywords, &self.linking_words);

        let skip_patterns = compile_list("skip", &self.skip_patterns, &placeholders)?;
        let document_id_patterns = compile_list("document id", &self.document_id_patterns, &placeholders)?;
        let revision_patterns = compile_list("revision", &self.revision_patterns, &placeholders)?;
        let special_patterns = compile_list("special", &self.special_patterns, &placeholders)?;
        let typo_rules = self
            .typo_rules
            .iter()
            .map(|source| {
                let regex = compile("typo", &source.name, &source.pattern, &placeholders)?;
                Ok(TypoRule {
                    name: source.name.clone(),
                    regex,
                    replacement: source.replacement.clone(),
                })
            })
            .collect::<Result<Vec<_>, RulesError>>()?;

        let standalone: Vec<&str> = self
            .reference_keywords
            .iter()
            .filter(|k| !k.requires_linking_word)
            .map(|k| k.code.as_str())
            .collect();
        let linked: Vec<&str> = self
            .reference_keywords
            .iter()
            .filter(|k| k.requires_linking_word)
            .map(|k| k.code.as_str())
            .collect();

        let reference_pattern = if standalone.is_empty() {
            None
        } else {
            let source = format!(r"\b(?:{})\b", alternation(&standalone));
            Some(compile("reference", "standalone_keyword", &source, &placeholders)?)
        };
        let linked_reference_pattern = if linked.is_empty() || self.linking_words.is_empty() {
            None
        } else {
            let source = format!(
                r"\b(?:{{linking}})\.?\s+(?:{})\b",
                alternation(&linked)
            );
            Some(compile("reference", "linked_keyword", &source, &placeholders)?)
        };

        debug!(
            reference_keywords = self.reference_keywords.len(),
            linking_words = self.linking_words.len(),
            skip_phrases = self.skip_phrases.len(),
            skip_patterns = skip_patterns.len(),
            header_skip_keywords = self.header_skip_keywords.len(),
            document_id_patterns = document_id_patterns.len(),
            revision_patterns = revision_patterns.len(),
            special_patterns = special_patterns.len(),
            typo_rules = typo_rules.len(),
            "rule tables built"
        );

        Ok(RuleTables {
            reference_keywords: self.reference_keywords,
            linking_words: self.linking_words,
            skip_phrases: self.skip_phrases,
            skip_patterns,
            header_skip_keywords: self.header_skip_keywords,
            document_id_patterns,
            revision_patterns,
            special_patterns,
            typo_rules,
            reference_pattern,
            linked_reference_pattern,
        })
    }
}

/// Expanded placeholder alternations.
struct Placeholders {
    keywords: String,
    glue_keywords: String,
    linking: String,
}

impl Placeholders {
    fn new(keywords: &[ReferenceKeyword], linking_words: &[String]) -> Self {
        let all: Vec<&str> = keywords.iter().map(|k| k.code.as_str()).collect();
        let glue: Vec<&str> = keywords
            .iter()
            .filter(|k| k.is_single_token())
            .map(|k| k.code.as_str())
            .collect();
        let linking: Vec<&str> = linking_words.iter().map(String::as_str).collect();
        Self {
            keywords: alternation(&all),
            glue_keywords: alternation(&glue),
            linking: alternation(&linking),
        }
    }

    fn expand(&self, source: &str) -> String {
        source
            .replace("{keywords}", &self.keywords)
            .replace("{glue_keywords}", &self.glue_keywords)
            .replace("{linking}", &self.linking)
    }
}

/// Escaped alternation, longest entry first so that `AMMS` wins over `AMM`.
fn alternation(items: &[&str]) -> String {
    if items.is_empty() {
        return NEVER.to_string();
    }
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted.dedup();
    sorted
        .iter()
        .map(|item| regex::escape(item).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(
    list: &'static str,
    name: &str,
    source: &str,
    placeholders: &Placeholders,
) -> Result<Regex, RulesError> {
    if source.trim().is_empty() {
        return Err(RulesError::EmptyEntry {
            list,
            name: name.to_string(),
        });
    }
    RegexBuilder::new(&placeholders.expand(source))
        .case_insensitive(true)
        .build()
        .map_err(|source| RulesError::InvalidPattern {
            list,
            name: name.to_string(),
            source: Box::new(source),
        })
}

fn compile_list(
    list: &'static str,
    sources: &[PatternSource],
    placeholders: &Placeholders,
) -> Result<Vec<NamedPattern>, RulesError> {
    sources
        .iter()
        .map(|source| {
            Ok(NamedPattern {
                name: source.name.clone(),
                regex: compile(list, &source.name, &source.pattern, placeholders)?,
            })
        })
        .collect()
}

fn check_phrases<'a>(
    list: &'static str,
    phrases: impl Iterator<Item = &'a str>,
) -> Result<(), RulesError> {
    for (index, phrase) in phrases.enumerate() {
        if phrase.is_empty() {
            return Err(RulesError::EmptyEntry {
                list,
                name: format!("#{index}"),
            });
        }
    }
    Ok(())
}

fn push_phrase(list: &mut Vec<String>, raw: &str) {
    let phrase = canonical_phrase(raw);
    if !list.contains(&phrase) {
        list.push(phrase);
    }
}

fn upsert_pattern(list: &mut Vec<PatternSource>, name: &str, pattern: &str) {
    let source = PatternSource {
        name: name.to_string(),
        pattern: pattern.to_string(),
    };
    match list.iter_mut().find(|p| p.name == name) {
        Some(existing) => *existing = source,
        None => list.push(source),
    }
}
