//! MySQL/MariaDB/Percona connection implementation

mod connection;

pub use connection::{MySqlConnection, redact_url};
