//! Errors raised while building or loading permission tables.

use thiserror::Error;

use crate::registry::TableIssue;

/// Table construction / loading error.
///
/// Predicates never produce these: they are total. Only table construction
/// (startup) and catalog lookups can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("unknown permission domain '{0}'")]
    UnknownDomain(String),

    #[error("unknown action '{action}' in permission domain '{domain}'")]
    UnknownAction { domain: String, action: String },

    #[error("unknown permission group '{0}'")]
    UnknownGroup(String),

    #[error("permission code '{code}' is registered by both '{first}' and '{second}'")]
    DuplicateCode {
        code: String,
        first: String,
        second: String,
    },

    #[error("permission tables are inconsistent: {} issue(s)", .0.len())]
    Inconsistent(Vec<TableIssue>),

    #[error("malformed permission table document: {0}")]
    Malformed(String),

    #[error("failed to read permission tables: {0}")]
    Io(String),
}

impl From<serde_json::Error> for TableError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}

impl From<std::io::Error> for TableError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}
