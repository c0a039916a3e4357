//! Character set and collation gate

use thiserror::Error;

/// Character sets accepted for the application schema.
///
/// MySQL 8.0.30+ reports the legacy `utf8` alias as `utf8mb3`.
pub const ALLOWED_CHARSETS: &[&str] = &["utf8", "utf8mb3", "utf8mb4"];

/// Every Unicode collation (`utf8_general_ci`, `utf8mb4_unicode_ci`, ...) starts with this
pub const UNICODE_COLLATION_PREFIX: &str = "utf8";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("character set not utf8/utf8mb3/utf8mb4: {0}")]
    Charset(String),

    #[error("collation sequence not utf8...: {0}")]
    Collation(String),
}

/// Require a Unicode character set and collation. The charset is checked first.
pub fn gate_encoding(charset: &str, collation: &str) -> Result<(), EncodingError> {
    let normalized = charset.trim().to_ascii_lowercase();
    if !ALLOWED_CHARSETS.contains(&normalized.as_str()) {
        return Err(EncodingError::Charset(charset.to_string()));
    }

    if !collation
        .trim()
        .to_ascii_lowercase()
        .starts_with(UNICODE_COLLATION_PREFIX)
    {
        return Err(EncodingError::Collation(collation.to_string()));
    }

    Ok(())
}
