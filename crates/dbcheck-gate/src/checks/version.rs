//! Server version parsing and minimum-version gating

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::EngineVariant;

/// A `major.minor.patch` server version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VersionTuple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionTuple {
    /// All-zero version, used when a lenient gate could not parse the server version
    pub const ZERO: VersionTuple = VersionTuple::new(0, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Components in comparison order
    pub fn components(&self) -> [u32; 3] {
        [self.major, self.minor, self.patch]
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionTuple {
    type Err = VersionFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s)
    }
}

/// Why a version string could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionFormatError {
    #[error("version '{0}' not of the form a.b.c")]
    TooFewComponents(String),

    #[error("version '{version}' has non-numeric component '{component}'")]
    NonNumeric { version: String, component: String },

    #[error("version '{version}' has out-of-range component '{component}'")]
    OutOfRange { version: String, component: String },
}

/// Parse a server version string such as `8.0.36` or `10.6.16-MariaDB-1:10.6.16+maria~ubu2204`.
///
/// Everything after the first hyphen is build metadata and is dropped. The
/// remainder must have at least three dot-separated components and the first
/// three must be non-negative integers; any further components are ignored.
pub fn parse_version(version: &str) -> Result<VersionTuple, VersionFormatError> {
    let trimmed = version.trim();
    let numeric = trimmed.split('-').next().unwrap_or_default();

    let parts: Vec<&str> = numeric.split('.').collect();
    if parts.len() < 3 {
        return Err(VersionFormatError::TooFewComponents(trimmed.to_string()));
    }

    let mut components = [0u32; 3];
    for (slot, part) in components.iter_mut().zip(&parts) {
        // `u32::from_str` would also accept a leading `+`
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VersionFormatError::NonNumeric {
                version: trimmed.to_string(),
                component: part.to_string(),
            });
        }
        *slot = part
            .parse::<u32>()
            .map_err(|_| VersionFormatError::OutOfRange {
                version: trimmed.to_string(),
                component: part.to_string(),
            })?;
    }

    Ok(VersionTuple::new(components[0], components[1], components[2]))
}

/// A failed minimum-version check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionShortfall {
    /// 1-indexed component that was too low (1 = major, 2 = minor, 3 = patch)
    pub component: usize,
    /// The minimum that was required
    pub minimum: VersionTuple,
}

/// Compare a server version against a minimum.
///
/// A higher major version passes without looking at minor or patch
/// (8.0.0 satisfies 5.7.10). Otherwise every component must individually be
/// at least the minimum's, checked in order, so 5.8.0 fails 5.7.10 on the
/// patch component.
pub fn gate_version(actual: VersionTuple, minimum: VersionTuple) -> Result<(), VersionShortfall> {
    if actual.major > minimum.major {
        return Ok(());
    }

    let deficient = actual
        .components()
        .iter()
        .zip(minimum.components())
        .position(|(have, need)| *have < need);

    match deficient {
        Some(idx) => Err(VersionShortfall {
            component: idx + 1,
            minimum,
        }),
        None => Ok(()),
    }
}

/// Minimum supported server version per engine variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimumVersionPolicy {
    pub mysql: VersionTuple,
    pub percona: VersionTuple,
    pub mariadb: VersionTuple,
}

impl MinimumVersionPolicy {
    /// MySQL 5.7.10 is the first release with a usable JSON column type;
    /// MariaDB numbers its releases separately.
    pub const DEFAULT: MinimumVersionPolicy = MinimumVersionPolicy {
        mysql: VersionTuple::new(5, 7, 10),
        percona: VersionTuple::new(5, 7, 10),
        mariadb: VersionTuple::new(10, 3, 0),
    };

    /// Minimum version for a variant
    pub fn for_variant(&self, variant: EngineVariant) -> VersionTuple {
        match variant {
            EngineVariant::MySql => self.mysql,
            EngineVariant::Percona => self.percona,
            EngineVariant::MariaDb => self.mariadb,
        }
    }

    /// Override the minimum for one variant
    pub fn with_minimum(mut self, variant: EngineVariant, minimum: VersionTuple) -> Self {
        match variant {
            EngineVariant::MySql => self.mysql = minimum,
            EngineVariant::Percona => self.percona = minimum,
            EngineVariant::MariaDb => self.mariadb = minimum,
        }
        self
    }
}

impl Default for MinimumVersionPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
