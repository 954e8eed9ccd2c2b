use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("invalid {list} pattern {name:?}: {source}")]
    InvalidPattern {
        list: &'static str,
        name: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("empty {list} entry {name:?}")]
    EmptyEntry { list: &'static str, name: String },

    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
}

impl RulesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
