//! Locating the work-package columns in a CSV header row.

/// Column holding the free-text action description.
pub const TEXT_COLUMN: &str = "wo_text_action.text";
pub const SEQUENCE_COLUMN: &str = "SEQ";
pub const HEADER_COLUMN: &str = "wo_text_action.header";
pub const ACTION_DATE_COLUMN: &str = "action_date";
pub const START_DATE_COLUMN: &str = "start_date";
pub const END_DATE_COLUMN: &str = "end_date";

/// Positions of the known columns within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkPackageColumns {
    pub text: usize,
    pub sequence_code: Option<usize>,
    pub header: Option<usize>,
    pub action_date: Option<usize>,
    pub start_date: Option<usize>,
    pub end_date: Option<usize>,
}

impl WorkPackageColumns {
    /// Match header names case-insensitively. The text and header columns
    /// also accept any name containing the expected one, since exports
    /// sometimes prefix it with a table alias. Returns `None` without a
    /// text column.
    pub fn discover(headers: &[String]) -> Option<Self> {
        let text = find_exact(headers, TEXT_COLUMN).or_else(|| find_containing(headers, TEXT_COLUMN))?;
        Some(Self {
            text,
            sequence_code: find_exact(headers, SEQUENCE_COLUMN),
            header: find_exact(headers, HEADER_COLUMN)
                .or_else(|| find_containing(headers, HEADER_COLUMN)),
            action_date: find_exact(headers, ACTION_DATE_COLUMN),
            start_date: find_exact(headers, START_DATE_COLUMN),
            end_date: find_exact(headers, END_DATE_COLUMN),
        })
    }
}

fn find_exact(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

fn find_containing(headers: &[String], name: &str) -> Option<usize> {
    let needle = name.to_ascii_lowercase();
    headers
        .iter()
        .position(|header| header.to_ascii_lowercase().contains(&needle))
}

/// Normalizes a header value: trims whitespace and a leading byte order mark.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_start_matches('\u{feff}').trim().to_string()
}
