//! Schema emptiness and required-table checks

use dbcheck_core::Connection;
use serde::{Deserialize, Serialize};

use super::CheckOutcome;
use crate::GateError;

/// Tables that must exist in a populated application schema
pub const DEFAULT_REQUIRED_TABLES: [&str; 9] = [
    "account",
    "attachment",
    "document",
    "label",
    "organization",
    "page",
    "revision",
    "search",
    "user",
];

/// Ordered list of tables probed by [`verify_required_tables`].
///
/// Order is preserved so the reported missing table is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredTableSet(Vec<String>);

impl RequiredTableSet {
    pub fn new<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tables.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RequiredTableSet {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_TABLES)
    }
}

/// Quote an identifier with backticks, doubling any embedded backtick
fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

pub(crate) fn base_table_count_query(schema: Option<&str>) -> String {
    let schema_predicate = match schema {
        Some(name) => format!("'{}'", name.replace('\\', "\\\\").replace('\'', "''")),
        None => "DATABASE()".to_string(),
    };
    format!(
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = {} AND table_type = 'BASE TABLE'",
        schema_predicate
    )
}

pub(crate) fn probe_query(table: &str) -> String {
    format!("SELECT 1 FROM {} LIMIT 1", quote_identifier(table))
}

/// Count base tables (not views) in a schema.
///
/// With no schema name the connection's current database is used.
#[tracing::instrument(skip(conn))]
pub async fn count_base_tables(
    conn: &dyn Connection,
    schema: Option<&str>,
) -> Result<i64, GateError> {
    let result = conn
        .query(&base_table_count_query(schema))
        .await
        .map_err(|e| GateError::SchemaCount(e.to_string()))?;

    let count = result
        .first_row()
        .and_then(|row| row.get(0))
        .and_then(|value| value.as_i64())
        .ok_or_else(|| GateError::SchemaCount("table count query returned no count".into()))?;

    tracing::debug!(count, "counted base tables");
    Ok(count)
}

/// Route an empty schema to setup.
///
/// A failed count is a configuration failure; zero tables is not.
pub async fn check_schema_populated(conn: &dyn Connection, schema: Option<&str>) -> CheckOutcome {
    match count_base_tables(conn, schema).await {
        Ok(0) => CheckOutcome::Setup,
        Ok(_) => CheckOutcome::Pass,
        Err(e) => CheckOutcome::Fail(e),
    }
}

/// Probe each required table in order, stopping at the first one that is missing
pub async fn verify_required_tables(
    conn: &dyn Connection,
    tables: &RequiredTableSet,
) -> Result<(), GateError> {
    for table in tables.iter() {
        let sql = probe_query(table);
        if let Err(e) = conn.query(&sql).await {
            tracing::error!(table = %table, query = %sql, error = %e, "required table probe failed");
            return Err(GateError::MissingTable {
                table: table.to_string(),
                detail: e.to_string(),
            });
        }
        tracing::trace!(table = %table, "required table present");
    }
    Ok(())
}
