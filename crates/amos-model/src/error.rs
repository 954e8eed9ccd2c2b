use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateRangeError {
    #[error("invalid date {value:?} (expected YYYY-MM-DD): {source}")]
    InvalidBound {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
