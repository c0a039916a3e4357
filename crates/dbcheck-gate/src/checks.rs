//! Individual gate checks
//!
//! Pure checks (variant, version, encoding) take plain values. Schema checks
//! take a `Connection` and issue one catalog query or probe per call.

mod encoding;
mod schema;
mod variant;
mod version;


pub use encoding::{ALLOWED_CHARSETS, EncodingError, UNICODE_COLLATION_PREFIX, gate_encoding};
pub use schema::{
    DEFAULT_REQUIRED_TABLES, RequiredTableSet, check_schema_populated, count_base_tables,
    verify_required_tables,
};
pub use variant::{EngineVariant, VariantResolution, VariantSource, resolve_variant};
pub use version::{
    MinimumVersionPolicy, VersionFormatError, VersionShortfall, VersionTuple, gate_version,
    parse_version,
};

use crate::GateError;

/// Result of a single check in the gate pipeline
#[derive(Debug)]
pub enum CheckOutcome {
    /// Continue with the next check
    Pass,
    /// Stop: the database is empty and the host should run first-time setup
    Setup,
    /// Stop: the database cannot be used
    Fail(GateError),
}

impl<E: Into<GateError>> From<Result<(), E>> for CheckOutcome {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => CheckOutcome::Pass,
            Err(e) => CheckOutcome::Fail(e.into()),
        }
    }
}
