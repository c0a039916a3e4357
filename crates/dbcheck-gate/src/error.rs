//! Error types for the startup gate

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::checks::{EncodingError, EngineVariant, VersionFormatError, VersionTuple};

/// Why the gate refused the database.
///
/// Every variant is terminal for the gate. The `Display` output is the
/// operator-facing issue text shown on the error page.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("{context}: {detail}")]
    Connection {
        context: &'static str,
        detail: String,
    },

    #[error("Database version check failed: {0}")]
    VersionFormat(#[from] VersionFormatError),

    #[error(
        "{variant} version element {component} of '{version}' not high enough, need at least version {minimum}"
    )]
    VersionTooLow {
        variant: EngineVariant,
        version: String,
        component: usize,
        minimum: VersionTuple,
    },

    #[error("{variant} {source}")]
    Encoding {
        variant: EngineVariant,
        source: EncodingError,
    },

    #[error(
        "Unable to determine database variant from version comment '{comment}' or database type '{hint}'"
    )]
    UnknownVariant { comment: String, hint: String },

    #[error("Can't get number of tables: {0}")]
    SchemaCount(String),

    #[error("Database is not empty, but does not contain table: {table}")]
    MissingTable { table: String, detail: String },
}

impl GateError {
    /// The issue text surfaced to the operator
    pub fn issue(&self) -> String {
        self.to_string()
    }

    /// Machine-readable classification of the failure
    pub fn kind(&self) -> IssueKind {
        match self {
            GateError::Connection { .. } => IssueKind::Connection,
            GateError::VersionFormat(_) => IssueKind::VersionFormat,
            GateError::VersionTooLow { .. } => IssueKind::VersionTooLow,
            GateError::Encoding { .. } => IssueKind::Encoding,
            GateError::UnknownVariant { .. } => IssueKind::UnknownVariant,
            GateError::SchemaCount(_) => IssueKind::SchemaCount,
            GateError::MissingTable { .. } => IssueKind::MissingTable,
        }
    }
}

/// Classification of a gate failure, serialized alongside the issue text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Connection,
    VersionFormat,
    VersionTooLow,
    Encoding,
    UnknownVariant,
    SchemaCount,
    MissingTable,
}

/// Errors loading a gate configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid gate configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
