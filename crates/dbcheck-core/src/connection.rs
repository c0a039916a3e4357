//! Connection trait

use crate::{QueryResult, Result};
use async_trait::async_trait;

/// A live database connection.
///
/// Results are fully materialised before `query` returns, so a caller never
/// holds a server-side cursor across an `.await` or an early return.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "mysql")
    fn driver_name(&self) -> &str;

    /// Execute a query that returns rows
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Close the connection
    async fn close(&self) -> Result<()>;

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;
}
