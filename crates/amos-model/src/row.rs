use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One maintenance step of a work package.
///
/// The classifier reads `text`, `sequence_code` and `header`; the date filter
/// reads `action_date`. `fields` keeps the source record so that output
/// writers can reproduce the input columns unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRow {
    pub text: Option<String>,
    pub sequence_code: Option<String>,
    pub header: Option<String>,
    pub action_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl ActionRow {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sequence_code(mut self, code: impl Into<String>) -> Self {
        self.sequence_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn with_action_date(mut self, date: NaiveDate) -> Self {
        self.action_date = Some(date);
        self
    }
}

/// Anything the date filter can place on a calendar.
pub trait Dated {
    fn action_date(&self) -> Option<NaiveDate>;
}

impl Dated for ActionRow {
    fn action_date(&self) -> Option<NaiveDate> {
        self.action_date
    }
}

impl Dated for NaiveDate {
    fn action_date(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl Dated for Option<NaiveDate> {
    fn action_date(&self) -> Option<NaiveDate> {
        *self
    }
}

impl<T: Dated> Dated for &T {
    fn action_date(&self) -> Option<NaiveDate> {
        (*self).action_date()
    }
}
