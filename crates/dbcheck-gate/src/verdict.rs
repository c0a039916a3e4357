//! Operating mode and the verdict returned by the gate

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::checks::{EngineVariant, VariantSource, VersionTuple};
use crate::{GateError, IssueKind};

/// What the host process should do after the gate has run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// Schema is valid; serve requests
    Normal,
    /// Database is empty; show the setup wizard
    Setup,
    /// Database cannot be used; show the error page
    BadConfiguration,
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingMode::Normal => f.write_str("normal"),
            OperatingMode::Setup => f.write_str("setup"),
            OperatingMode::BadConfiguration => f.write_str("bad configuration"),
        }
    }
}

/// Immutable outcome of one gate run.
///
/// `issue` is set exactly when the mode is `BadConfiguration`. The schema
/// name is only exposed in `Setup` mode, where the setup page needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateVerdict {
    pub mode: OperatingMode,
    pub issue: Option<String>,
    pub issue_kind: Option<IssueKind>,
    pub schema_name: Option<String>,
    pub variant: Option<EngineVariant>,
    pub variant_source: Option<VariantSource>,
    pub server_version: Option<String>,
    pub version: Option<VersionTuple>,
}

/// Facts gathered before the pipeline stopped
#[derive(Debug, Clone, Default)]
pub(crate) struct ServerFacts {
    pub variant: Option<EngineVariant>,
    pub variant_source: Option<VariantSource>,
    pub server_version: Option<String>,
    pub version: Option<VersionTuple>,
}

impl GateVerdict {
    fn with_facts(mode: OperatingMode, facts: ServerFacts) -> Self {
        Self {
            mode,
            issue: None,
            issue_kind: None,
            schema_name: None,
            variant: facts.variant,
            variant_source: facts.variant_source,
            server_version: facts.server_version,
            version: facts.version,
        }
    }

    pub(crate) fn normal(facts: ServerFacts) -> Self {
        Self::with_facts(OperatingMode::Normal, facts)
    }

    pub(crate) fn setup(schema_name: Option<String>, facts: ServerFacts) -> Self {
        Self {
            schema_name,
            ..Self::with_facts(OperatingMode::Setup, facts)
        }
    }

    pub(crate) fn bad_configuration(error: &GateError, facts: ServerFacts) -> Self {
        Self {
            issue: Some(error.issue()),
            issue_kind: Some(error.kind()),
            ..Self::with_facts(OperatingMode::BadConfiguration, facts)
        }
    }

    /// `BadConfiguration` verdict for a failure outside the check pipeline,
    /// such as the host being unable to open a connection at all.
    pub fn from_error(error: &GateError) -> Self {
        Self::bad_configuration(error, ServerFacts::default())
    }
}
