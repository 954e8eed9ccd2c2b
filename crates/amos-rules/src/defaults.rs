//! Built-in rule tables.
//!
//! These are the document types, phrases and patterns used by the line
//! maintenance work packages the validator was written for. Pattern sources
//! may use the placeholders expanded by the builder:
//!
//! - `{keywords}`: every reference keyword, longest first
//! - `{glue_keywords}`: single-token reference keywords, longest first
//! - `{linking}`: every linking word, longest first

/// Primary document-type tokens. Each entry is `(code, requires_linking_word)`.
///
/// Short tokens that collide with ordinary words (`AD`) only count when a
/// linking word directly precedes them.
pub const REFERENCE_KEYWORDS: &[(&str, bool)] = &[
    ("AMM", false),
    ("SRM", false),
    ("CMM", false),
    ("EMM", false),
    ("SOPM", false),
    ("SWPM", false),
    ("IPD", false),
    ("FIM", false),
    ("TSM", false),
    ("IPC", false),
    ("SB", false),
    ("AD", true),
    ("SOP", false),
    ("NDT02", false),
    ("NTO", false),
    ("MEL", false),
    ("NEF", false),
    ("MME", false),
    ("LMM", false),
    ("NTM", false),
    ("DWG", false),
    ("AIPC", false),
    ("AMMS", false),
    ("DDG", false),
    ("VSB", false),
    ("BSI", false),
    ("FTD", false),
    ("TIPF", false),
    ("MNT", false),
    ("EEL VNA", false),
    ("EOD", false),
    ("NDT MANUAL", false),
    ("NDT REPORT", false),
    ("NDTREPORT", false),
    ("ATR-A", false),
];

/// Connectives that introduce a reference.
pub const LINKING_WORDS: &[&str] = &["IAW", "REF", "PER", "I.A.W"];

/// Purely procedural phrases that never carry a reference.
pub const SKIP_PHRASES: &[&str] = &[
    "GET ACCESS",
    "GAIN ACCESS",
    "GAINED ACCESS",
    "ACCESS GAINED",
    "SPARE ORDERED",
    "ORDERED SPARE",
    "OBEY ALL",
    "FOLLOW ALL",
    "COMPLY WITH",
    "MEASURE AND RECORD",
    "SET TO INACTIVE",
    "SEE FIGURE",
    "REFER TO FIGURE",
];

/// Cross-references to another work step or work order.
pub const SKIP_PATTERNS: &[(&str, &str)] = &[
    ("work_step_cross_reference", r"\bREFER\s+(?:RESULT\s+)?WT\b"),
    ("work_order_cross_reference", r"\bWO\s*[:\-]\s*[0-9][0-9`' ]*"),
];

/// Section headers of set-up and close-up steps.
pub const HEADER_SKIP_KEYWORDS: &[&str] = &[
    "CLOSE UP",
    "CLOSEUP",
    "CLOSE-UP",
    "JOB SET UP",
    "JOB SETUP",
    "JOBSETUP",
    "JOB SET-UP",
    "JOP SET-UP",
    "JOB CLOSE-UP",
    "OPEN ACCESS",
    "OPENACCESS",
    "CLOSE ACCESS",
    "CLOSEACCESS",
    "GENERAL",
];

/// Structured identifiers that name a document without its type.
pub const DOCUMENT_ID_PATTERNS: &[(&str, &str)] = &[
    ("data_module_code", r"\bDMC-?[A-Z0-9\-]+\b"),
    ("b787_document", r"\bB787-[A-Z0-9\-]+\b"),
    ("data_module_task", r"\bDATA\s+MODULE\s+TASK\b"),
];

/// Revision, issue and expiry markers.
pub const REVISION_PATTERNS: &[(&str, &str)] = &[
    ("revision", r"\bREV\s*[:.]?\s*\d+\b"),
    ("issue", r"\bISSUE\s*[:.]?\s*\d+\b"),
    ("issued_sd", r"\bISSUED\s+SD\.?\s*\d+\b"),
    ("tar", r"\bTAR\s*\d+\b"),
    (
        "expiry_month_name",
        r"\b(?:EXP|DEADLINE|DUE\s+DATE|REV\s+DATE)\s*[:.]?\s*\d{1,2}[-/]?[A-Z]{3}[-/]?\d{2,4}\b",
    ),
    (
        "expiry_numeric",
        r"\b(?:EXP|DEADLINE|DUE\s+DATE|REV\s+DATE)\s*[:.]?\s*\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}\b",
    ),
];

/// Forms that identify both the document and its edition in one group.
pub const SPECIAL_PATTERNS: &[(&str, &str)] = &[
    ("referenced_document", r"\bREFERENCED\s+(?:{keywords})\b"),
    (
        "ndt_report",
        r"\bNDT\s+REPORT\s+[A-Z0-9\-]*\d[A-Z0-9\-]*\b",
    ),
    ("service_bulletin_number", r"\bSB\s+[A-Z0-9]{1,5}-[A-Z0-9\-]+\b"),
    ("data_module_task_number", r"\bDATA\s+MODULE\s+TASK\s+\d+\b"),
    ("linked_maintenance_program", r"\b(?:{linking})\s+MP\b"),
    ("ndt02_report", r"\bNDT02-\d{4,}\b"),
];

/// Typo corrections as `(name, pattern, replacement)`, applied in order.
pub const TYPO_RULES: &[(&str, &str, &str)] = &[
    (
        "glued_revision",
        r"([A-Z0-9)\]])REV\s*[:.]?\s*(\d+)",
        "${1} REV ${2}",
    ),
    ("revision_separator", r"\bREV\s*[:.]?\s*(\d+)\b", "REV ${1}"),
    (
        "linking_word_glued_to_keyword",
        r"\b({linking})({glue_keywords})(\d|\b)",
        "${1} ${2}${3}",
    ),
    ("keyword_glued_to_digit", r"\b({glue_keywords})(\d)", "${1} ${2}"),
    ("collapse_whitespace", r"\s+", " "),
    ("trim", r"^ | $", ""),
];
