//! Verdict orchestration
//!
//! Runs the checks in a fixed order and stops at the first one that does not
//! pass:
//!
//! | # | check                  | on failure          |
//! |---|------------------------|---------------------|
//! | 1 | metadata fetch         | BadConfiguration    |
//! | 2 | version parse          | BadConfiguration, or log and use 0.0.0 when lenient |
//! | 3 | minimum version        | BadConfiguration    |
//! | 4 | character set          | BadConfiguration    |
//! | 5 | collation              | BadConfiguration    |
//! | 6 | base-table count is 0  | Setup               |
//! | 7 | base-table count query | BadConfiguration    |
//! | 8 | required tables        | BadConfiguration    |
//!
//! Anything else is `Normal`.

use dbcheck_core::Connection;

use crate::checks::{
    CheckOutcome, VersionTuple, check_schema_populated, gate_encoding, gate_version,
    parse_version, resolve_variant, verify_required_tables,
};
use crate::metadata::fetch_metadata;
use crate::verdict::ServerFacts;
use crate::{GateConfig, GateError, GateVerdict};


/// Return from the enclosing check pipeline unless the outcome is `Pass`
macro_rules! proceed {
    ($outcome:expr) => {
        match CheckOutcome::from($outcome) {
            CheckOutcome::Pass => {}
            stop => return stop,
        }
    };
}

/// Startup validation gate.
///
/// Meant to run exactly once, before the host serves any request.
pub struct DatabaseGate {
    config: GateConfig,
    checked: bool,
}

impl DatabaseGate {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            checked: false,
        }
    }

    /// True once a run has reached `Normal`.
    ///
    /// Records the run-once contract; `check` does not refuse a second call.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Run every check against `conn` and decide the operating mode.
    ///
    /// Never panics and never returns an error: failures become a
    /// `BadConfiguration` verdict carrying the issue text.
    #[tracing::instrument(skip_all, fields(schema = tracing::field::Empty))]
    pub async fn check(&mut self, conn: &dyn Connection) -> GateVerdict {
        tracing::info!(driver = conn.driver_name(), "database checks: started");

        let schema_name = self.config.schema_name();
        if let Some(name) = &schema_name {
            tracing::Span::current().record("schema", name.as_str());
        }

        let mut facts = ServerFacts::default();
        let verdict = match self.run_checks(conn, schema_name.as_deref(), &mut facts).await {
            CheckOutcome::Pass => {
                self.checked = true;
                tracing::info!("database checks: passed");
                GateVerdict::normal(facts)
            }
            CheckOutcome::Setup => {
                tracing::info!(
                    schema = ?schema_name,
                    "entering database set-up mode because the database is empty"
                );
                GateVerdict::setup(schema_name, facts)
            }
            CheckOutcome::Fail(err) => {
                tracing::error!(kind = ?err.kind(), error = %err, "entering bad database mode");
                GateVerdict::bad_configuration(&err, facts)
            }
        };

        tracing::info!(mode = %verdict.mode, "database checks: finished");
        verdict
    }

    async fn run_checks(
        &self,
        conn: &dyn Connection,
        schema_name: Option<&str>,
        facts: &mut ServerFacts,
    ) -> CheckOutcome {
        let metadata = match fetch_metadata(conn).await {
            Ok(metadata) => metadata,
            Err(err) => return CheckOutcome::Fail(err),
        };
        facts.server_version = Some(metadata.version.clone());

        let resolution = resolve_variant(self.config.db_type.as_deref(), &metadata.comment);
        facts.variant = Some(resolution.variant);
        facts.variant_source = Some(resolution.source);
        if resolution.is_fallback() {
            tracing::warn!(
                comment = %metadata.comment,
                db_type = ?self.config.db_type,
                "could not identify database variant, assuming MySQL"
            );
            if self.config.require_known_variant {
                return CheckOutcome::Fail(GateError::UnknownVariant {
                    comment: metadata.comment.clone(),
                    hint: self.config.db_type.clone().unwrap_or_default(),
                });
            }
        }
        let variant = resolution.variant;
        tracing::info!(variant = %variant, source = ?resolution.source, "database checks: SQL variant");
        tracing::info!(version = %metadata.version, "database checks: SQL version");

        let version = match parse_version(&metadata.version) {
            Ok(version) => {
                facts.version = Some(version);
                version
            }
            Err(err) if self.config.lenient_version_parse => {
                tracing::warn!(error = %err, "database version check failed, continuing with 0.0.0");
                VersionTuple::ZERO
            }
            Err(err) => return CheckOutcome::Fail(err.into()),
        };

        let minimum = self.config.minimum_versions.for_variant(variant);
        proceed!(gate_version(version, minimum).map_err(|shortfall| {
            GateError::VersionTooLow {
                variant,
                version: metadata.version.clone(),
                component: shortfall.component,
                minimum: shortfall.minimum,
            }
        }));

        proceed!(
            gate_encoding(&metadata.charset, &metadata.collation)
                .map_err(|source| GateError::Encoding { variant, source })
        );

        proceed!(check_schema_populated(conn, schema_name).await);

        proceed!(verify_required_tables(conn, &self.config.required_tables).await);

        CheckOutcome::Pass
    }
}
