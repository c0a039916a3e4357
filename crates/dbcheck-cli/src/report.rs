//! Human-readable rendering of a gate verdict

use dbcheck_gate::{GateVerdict, OperatingMode, VariantSource};
use std::fmt::Write;

pub fn render_text(verdict: &GateVerdict) -> String {
    let mut out = String::new();

    let headline = match verdict.mode {
        OperatingMode::Normal => "Database OK: ready to serve requests",
        OperatingMode::Setup => "Database is empty: setup required",
        OperatingMode::BadConfiguration => "Database is misconfigured",
    };
    out.push_str(headline);

    if let Some(variant) = verdict.variant {
        let _ = write!(out, "\n  variant:  {}", variant.display_name());
        if verdict.variant_source == Some(VariantSource::Fallback) {
            out.push_str(" (assumed)");
        }
    }
    if let Some(server_version) = &verdict.server_version {
        let _ = write!(out, "\n  version:  {server_version}");
    }
    if let Some(schema) = &verdict.schema_name {
        let _ = write!(out, "\n  schema:   {schema}");
    }
    if let Some(issue) = &verdict.issue {
        let _ = write!(out, "\n  issue:    {issue}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbcheck_gate::{EngineVariant, IssueKind, VersionTuple};
    use pretty_assertions::assert_eq;

    fn verdict(mode: OperatingMode) -> GateVerdict {
        GateVerdict {
            mode,
            issue: None,
            issue_kind: None,
            schema_name: None,
            variant: Some(EngineVariant::MySql),
            variant_source: Some(VariantSource::Comment),
            server_version: Some("8.0.36".to_string()),
            version: Some(VersionTuple::new(8, 0, 36)),
        }
    }

    #[test]
    fn test_render_normal() {
        assert_eq!(
            render_text(&verdict(OperatingMode::Normal)),
            "Database OK: ready to serve requests\n  variant:  MySQL\n  version:  8.0.36"
        );
    }

    #[test]
    fn test_render_setup_shows_schema() {
        let verdict = GateVerdict {
            schema_name: Some("site".to_string()),
            ..verdict(OperatingMode::Setup)
        };
        let text = render_text(&verdict);
        assert!(text.starts_with("Database is empty"));
        assert!(text.ends_with("schema:   site"));
    }

    #[test]
    fn test_render_bad_configuration_with_fallback_variant() {
        let verdict = GateVerdict {
            issue: Some("Database is not empty, but does not contain table: page".to_string()),
            issue_kind: Some(IssueKind::MissingTable),
            variant_source: Some(VariantSource::Fallback),
            ..verdict(OperatingMode::BadConfiguration)
        };
        let text = render_text(&verdict);
        assert!(text.contains("MySQL (assumed)"));
        assert!(text.ends_with("issue:    Database is not empty, but does not contain table: page"));
    }
}
