use std::sync::LazyLock;

use amos_model::ValidationStatus;
use amos_validate::Classifier;
use proptest::prelude::*;

static CLASSIFIER: LazyLock<Classifier> =
    LazyLock::new(|| Classifier::with_defaults().expect("rules"));

fn token() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "REF", "IAW", "PER", "AMM", "SRM", "AD", "52-11-01", "REV", "rev", "156", "12", ":", ".",
        " ", "  ", "B787", "DMC-", "ISSUE", "A", "X",
    ])
    .prop_map(str::to_string)
}

fn glued_text() -> impl Strategy<Value = String> {
    prop::collection::vec(token(), 0..12).prop_map(|tokens| tokens.concat())
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "[A-Za-z0-9 :.\\-]{0,60}") {
        let classifier = &*CLASSIFIER;
        let once = classifier.normalize(&text);
        prop_assert_eq!(classifier.normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_glued_tokens(text in glued_text()) {
        let classifier = &*CLASSIFIER;
        let once = classifier.normalize(&text);
        prop_assert_eq!(classifier.normalize(&once), once);
    }

    #[test]
    fn auto_valid_sequences_ignore_text(
        prefix in prop::sample::select(vec!["1.", "2.", "3.", "10."]),
        suffix in "[0-9]{0,3}",
        text in proptest::option::of(".{0,40}"),
    ) {
        let classifier = &*CLASSIFIER;
        let seq = format!("{prefix}{suffix}");
        prop_assert_eq!(
            classifier.classify(text.as_deref(), Some(&seq)),
            ValidationStatus::Valid
        );
    }

    #[test]
    fn classify_is_total(text in "\\PC{0,80}", seq in proptest::option::of("[0-9.]{0,5}")) {
        let classifier = &*CLASSIFIER;
        let _ = classifier.classify(Some(&text), seq.as_deref());
    }
}
