//! Scripted in-memory connection used by the gate tests

use async_trait::async_trait;
use dbcheck_core::{Connection, DbCheckError, QueryResult, Result, Value};
use parking_lot::Mutex;
use std::collections::BTreeSet;

use crate::METADATA_QUERY;
use crate::checks::DEFAULT_REQUIRED_TABLES;

const COUNT_PREFIX: &str = "SELECT COUNT(*) FROM information_schema.tables";
const PROBE_PREFIX: &str = "SELECT 1 FROM `";

enum MetadataResponse {
    Row(Vec<Value>),
    NoRows,
    Error(String),
}

/// Answers the metadata, table-count and probe queries the gate issues and
/// records every statement it receives.
pub(crate) struct MockConnection {
    metadata: MetadataResponse,
    table_count: std::result::Result<i64, String>,
    tables: BTreeSet<String>,
    queries: Mutex<Vec<String>>,
}

impl MockConnection {
    /// A healthy MySQL 8 server with every default table present
    pub fn healthy() -> Self {
        Self {
            metadata: MetadataResponse::Row(vec![
                Value::String("8.0.36".into()),
                Value::String("MySQL Community Server - GPL".into()),
                Value::String("utf8mb4".into()),
                Value::String("utf8mb4_0900_ai_ci".into()),
            ]),
            table_count: Ok(24),
            tables: DEFAULT_REQUIRED_TABLES.iter().map(|t| t.to_string()).collect(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_metadata(mut self, version: &str, comment: &str, charset: &str, collation: &str) -> Self {
        self.metadata = MetadataResponse::Row(vec![
            Value::String(version.into()),
            Value::String(comment.into()),
            Value::String(charset.into()),
            Value::String(collation.into()),
        ]);
        self
    }

    pub fn with_metadata_values(mut self, values: Vec<Value>) -> Self {
        self.metadata = MetadataResponse::Row(values);
        self
    }

    pub fn with_version(self, version: &str) -> Self {
        self.with_metadata(version, "MySQL Community Server - GPL", "utf8mb4", "utf8mb4_0900_ai_ci")
    }

    pub fn with_metadata_error(mut self, message: &str) -> Self {
        self.metadata = MetadataResponse::Error(message.into());
        self
    }

    pub fn with_no_metadata_rows(mut self) -> Self {
        self.metadata = MetadataResponse::NoRows;
        self
    }

    pub fn with_table_count(mut self, count: i64) -> Self {
        self.table_count = Ok(count);
        self
    }

    pub fn with_table_count_error(mut self, message: &str) -> Self {
        self.table_count = Err(message.into());
        self
    }

    pub fn with_tables(mut self, tables: &[&str]) -> Self {
        self.tables = tables.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn without_table(mut self, table: &str) -> Self {
        self.tables.remove(table);
        self
    }

    /// Every SQL statement received, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }

    /// Tables probed for existence, in order
    pub fn probed_tables(&self) -> Vec<String> {
        self.queries()
            .iter()
            .filter_map(|sql| sql.strip_prefix(PROBE_PREFIX))
            .filter_map(|rest| rest.split('`').next())
            .map(|t| t.to_string())
            .collect()
    }

    pub fn count_queries(&self) -> usize {
        self.queries()
            .iter()
            .filter(|sql| sql.starts_with(COUNT_PREFIX))
            .count()
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn driver_name(&self) -> &str {
        "mock"
    }

    async fn query(&self, sql: &str) -> Result<QueryResult> {
        self.queries.lock().push(sql.to_string());

        if sql == METADATA_QUERY {
            return match &self.metadata {
                MetadataResponse::Row(values) => Ok(QueryResult::from_rows(
                    &["version", "comment", "charset", "collation"],
                    vec![values.clone()],
                )),
                MetadataResponse::NoRows => Ok(QueryResult::empty()),
                MetadataResponse::Error(message) => Err(DbCheckError::Query(message.clone())),
            };
        }

        if sql.starts_with(COUNT_PREFIX) {
            return match &self.table_count {
                Ok(count) => Ok(QueryResult::from_rows(
                    &["COUNT(*)"],
                    vec![vec![Value::Int64(*count)]],
                )),
                Err(message) => Err(DbCheckError::Query(message.clone())),
            };
        }

        if let Some(rest) = sql.strip_prefix(PROBE_PREFIX) {
            let table = rest.split('`').next().unwrap_or_default();
            return if self.tables.contains(table) {
                Ok(QueryResult::from_rows(&["1"], vec![vec![Value::Int64(1)]]))
            } else {
                Err(DbCheckError::Query(format!(
                    "Table 'site.{}' doesn't exist",
                    table
                )))
            };
        }

        Err(DbCheckError::Query(format!("unexpected query: {}", sql)))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn is_closed(&self) -> bool {
        false
    }
}
