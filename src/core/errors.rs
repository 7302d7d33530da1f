//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tarifario operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A non-blank rule section where no line could be parsed
    #[error("No valid `key = number` lines in {section} rules")]
    InvalidRuleText { section: RuleSection },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The editable sections of a rule set, as named in import/export text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSection {
    Group,
    Type,
    Pack,
    Months,
    Services,
}

impl RuleSection {
    pub const ALL: [RuleSection; 5] = [
        RuleSection::Group,
        RuleSection::Type,
        RuleSection::Pack,
        RuleSection::Months,
        RuleSection::Services,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Type => "type",
            Self::Pack => "pack",
            Self::Months => "months",
            Self::Services => "services",
        }
    }
}

impl std::fmt::Display for RuleSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Create a file system error that keeps the underlying I/O error
    pub fn file_system_with_source(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
