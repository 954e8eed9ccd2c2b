//! Rule tables for maintenance text classification.
//!
//! [`RuleTables`] holds the keyword sets, compiled patterns and typo rules
//! the classifier consumes. Tables are built once, either from the built-in
//! defaults ([`RuleTables::build`]), programmatically through
//! [`RuleTablesBuilder`], or from a TOML rules file ([`RuleConfig`]), and
//! are immutable afterwards.

pub mod builder;
pub mod config;
pub mod defaults;
pub mod error;
pub mod tables;

pub use builder::RuleTablesBuilder;
pub use config::RuleConfig;
pub use error::RulesError;
pub use tables::{NamedPattern, ReferenceKeyword, RuleTables, TypoRule, canonical_phrase};
