//! Error types for the advisor.
//!
//! Only the edges can fail (loading content tables and config, parsing
//! payloads). The analytics themselves never error: thin data yields
//! `has_data = false` or no guidance instead.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias.
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("[TKT-1001] invalid content table: {details}")]
    InvalidContent { details: String },

    #[error("[TKT-1002] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[TKT-1003] parse failure in {context}: {details}")]
    Parse {
        context: &'static str,
        details: String,
    },

    #[error("[TKT-2001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AdvisorError {
    /// Stable machine-parseable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidContent { .. } => "TKT-1001",
            Self::InvalidConfig { .. } => "TKT-1002",
            Self::Parse { .. } => "TKT-1003",
            Self::Io { .. } => "TKT-2001",
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(context: &'static str, details: impl ToString) -> Self {
        Self::Parse {
            context,
            details: details.to_string(),
        }
    }
}

impl From<toml::de::Error> for AdvisorError {
    fn from(value: toml::de::Error) -> Self {
        Self::parse("toml", value)
    }
}
