#[derive(Debug, thiserror::Error)]
pub enum DateExprError {
    #[error("empty date expression")]
    Empty,

    #[error("invalid date expression {expr:?}: expected YYYY-MM-DD or [+-]N[dmy]")]
    Invalid { expr: String },

    #[error("invalid date {expr:?}: {source}")]
    InvalidDate {
        expr: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("date expression {expr:?} is out of range from {base}")]
    OutOfRange { expr: String, base: chrono::NaiveDate },
}
