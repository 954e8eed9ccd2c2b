use amos_rules::RuleTables;
use tracing::debug;

/// Upper bound on passes over the typo rule chain.
const MAX_PASSES: usize = 16;

/// Uppercase `text` and apply the typo rules in order until nothing changes.
///
/// A single left-to-right pass can leave glue behind when two glued tokens
/// abut (`AREV1REV2`), so the chain is repeated to a fixed point. The result
/// is therefore stable: `normalize(normalize(t)) == normalize(t)`.
pub fn normalize(text: &str, tables: &RuleTables) -> String {
    let mut current = text.to_uppercase();
    for _ in 0..MAX_PASSES {
        let next = apply_once(&current, tables);
        if next == current {
            return current;
        }
        current = next;
    }
    debug!(passes = MAX_PASSES, "typo normalization did not settle");
    current
}

fn apply_once(text: &str, tables: &RuleTables) -> String {
    tables
        .typo_rules()
        .iter()
        .fold(text.to_string(), |acc, rule| {
            rule.regex
                .replace_all(&acc, rule.replacement.as_str())
                .into_owned()
        })
}

/// Uppercase with whitespace runs collapsed to single spaces.
pub(crate) fn collapse(text: &str) -> String {
    amos_rules::canonical_phrase(text)
}
