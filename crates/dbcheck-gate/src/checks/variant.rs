//! Engine variant detection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Family of MySQL-compatible server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineVariant {
    MySql,
    Percona,
    MariaDb,
}

impl EngineVariant {
    /// Detection priority. MariaDB and Percona builds often mention MySQL in
    /// their comment too, so they are tried first.
    pub const DETECTION_ORDER: [EngineVariant; 3] = [
        EngineVariant::MariaDb,
        EngineVariant::Percona,
        EngineVariant::MySql,
    ];

    /// Lowercase keyword matched against comments and hints
    pub fn keyword(&self) -> &'static str {
        match self {
            EngineVariant::MySql => "mysql",
            EngineVariant::Percona => "percona",
            EngineVariant::MariaDb => "mariadb",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EngineVariant::MySql => "MySQL",
            EngineVariant::Percona => "Percona",
            EngineVariant::MariaDb => "MariaDB",
        }
    }

    fn detect(text: &str) -> Option<EngineVariant> {
        let text = text.to_lowercase();
        Self::DETECTION_ORDER
            .into_iter()
            .find(|variant| text.contains(variant.keyword()))
    }
}

impl fmt::Display for EngineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which evidence decided the variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantSource {
    /// The server's `@@version_comment`
    Comment,
    /// The operator-supplied database type
    Hint,
    /// Nothing matched; MySQL was assumed
    Fallback,
}

/// A resolved variant and the evidence behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantResolution {
    pub variant: EngineVariant,
    pub source: VariantSource,
}

impl VariantResolution {
    /// True when neither the server nor the operator identified the engine
    pub fn is_fallback(&self) -> bool {
        self.source == VariantSource::Fallback
    }
}

/// Classify the server from its version comment, then from the operator hint.
///
/// Matching is a case-insensitive substring search in [`EngineVariant::DETECTION_ORDER`].
/// The comment always wins over the hint. When neither matches, MySQL is
/// returned with [`VariantSource::Fallback`]; callers decide whether that is
/// acceptable.
pub fn resolve_variant(hint: Option<&str>, comment: &str) -> VariantResolution {
    if let Some(variant) = EngineVariant::detect(comment) {
        return VariantResolution {
            variant,
            source: VariantSource::Comment,
        };
    }

    if let Some(variant) = hint.and_then(EngineVariant::detect) {
        return VariantResolution {
            variant,
            source: VariantSource::Hint,
        };
    }

    VariantResolution {
        variant: EngineVariant::MySql,
        source: VariantSource::Fallback,
    }
}
