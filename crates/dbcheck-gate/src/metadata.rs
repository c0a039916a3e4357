//! Server metadata snapshot

use dbcheck_core::{Connection, Row};
use serde::Serialize;

use crate::GateError;

/// Single query returning everything the pure checks need
pub const METADATA_QUERY: &str = "SELECT VERSION() AS version, @@version_comment AS comment, \
     @@character_set_database AS charset, @@collation_database AS collation";

/// Version, comment and encoding of the connected server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub comment: String,
    pub charset: String,
    pub collation: String,
}

fn column_text(row: &Row, idx: usize, name: &str) -> Result<Option<String>, String> {
    row.get(idx)
        .map(|value| value.to_text())
        .ok_or_else(|| format!("missing column '{}'", name))
}

fn required_text(row: &Row, idx: usize, name: &str) -> Result<String, String> {
    column_text(row, idx, name)?.ok_or_else(|| format!("column '{}' is NULL", name))
}

impl ServerMetadata {
    fn from_row(row: &Row) -> Result<Self, String> {
        Ok(Self {
            version: required_text(row, 0, "version")?,
            comment: column_text(row, 1, "comment")?.unwrap_or_default(),
            charset: required_text(row, 2, "charset")?,
            collation: required_text(row, 3, "collation")?,
        })
    }
}

/// Fetch the server metadata snapshot.
///
/// A failed query, an empty result or an unreadable column are all
/// connection failures for the gate.
pub async fn fetch_metadata(conn: &dyn Connection) -> Result<ServerMetadata, GateError> {
    let result = conn
        .query(METADATA_QUERY)
        .await
        .map_err(|e| GateError::Connection {
            context: "Can't get MySQL configuration",
            detail: e.to_string(),
        })?;

    let row = result.first_row().ok_or_else(|| GateError::Connection {
        context: "no MySQL configuration returned",
        detail: "query returned no rows".to_string(),
    })?;

    ServerMetadata::from_row(row).map_err(|detail| GateError::Connection {
        context: "no MySQL configuration returned",
        detail,
    })
}
