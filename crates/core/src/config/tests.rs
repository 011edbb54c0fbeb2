//! Tests for configuration module

use super::*;
use crate::diagnostics::Category;
use crate::error::{Error, Result};
use std::io::Write;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::config(format!("Failed to create temp file: {e}")))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {e}")))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {e}")))?;
    Ok(file)
}

fn with_env_var<F, T>(key: &str, value: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    std::env::set_var(key, value);
    let result = f();
    std::env::remove_var(key);
    result
}

fn descriptor(id: &'static str, enabled_by_default: bool) -> DiagnosticDescriptor {
    DiagnosticDescriptor {
        id,
        title: "title",
        message_format: "message",
        description: "description",
        category: Category::Assertion,
        default_severity: Severity::Info,
        enabled_by_default,
    }
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        [rules.NUnit2005]
        severity = "warning"

        [rules.NUnit2006]
        enabled = false

        [fixes]
        offer_condensed_fixes = false
    "#;

    let config = AnalyzerConfig::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert_eq!(
        config.rule("NUnit2005").and_then(|r| r.severity),
        Some(SeverityOverride::Warning)
    );
    assert!(!config.rule("NUnit2006").map_or(true, |r| r.enabled));
    assert!(!config.fixes.offer_condensed_fixes);
}

#[test]
fn test_from_toml_str_minimal() {
    let config = AnalyzerConfig::from_toml_str("").expect("Failed to parse empty TOML");
    assert!(config.rules.is_empty());
    assert!(config.fixes.offer_condensed_fixes);
}

#[test]
fn test_from_toml_str_invalid_syntax() {
    let toml = r#"
        [rules
        severity = "warning"
    "#;

    let result = AnalyzerConfig::from_toml_str(toml);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML"));
}

#[test]
fn test_from_toml_str_rejects_unknown_severity() {
    let toml = r#"
        [rules.NUnit2005]
        severity = "fatal"
    "#;
    assert!(AnalyzerConfig::from_toml_str(toml).is_err());
}

#[test]
fn test_rule_lookup_is_case_insensitive() {
    let toml = r#"
        [rules.nunit2005]
        severity = "error"
    "#;
    let config = AnalyzerConfig::from_toml_str(toml).expect("Failed to parse TOML");
    assert_eq!(
        config.effective_severity(&descriptor("NUnit2005", true)),
        Some(Severity::Error)
    );
}

#[test]
fn test_effective_severity_rules() {
    let toml = r#"
        [rules.NUnit2001]
        severity = "none"

        [rules.NUnit2002]
        enabled = false
        severity = "error"

        [rules.NUnit2003]
        severity = "hidden"
    "#;
    let config = AnalyzerConfig::from_toml_str(toml).expect("Failed to parse TOML");
    assert_eq!(config.effective_severity(&descriptor("NUnit2001", true)), None);
    assert_eq!(config.effective_severity(&descriptor("NUnit2002", true)), None);
    assert_eq!(
        config.effective_severity(&descriptor("NUnit2003", true)),
        Some(Severity::Hidden)
    );
    assert_eq!(
        config.effective_severity(&descriptor("NUnit2004", true)),
        Some(Severity::Info)
    );
    assert_eq!(config.effective_severity(&descriptor("NUnit2004", false)), None);
}

#[test]
fn test_validate_reports_unknown_ids() {
    let toml = r#"
        [rules.NUnit2005]
        severity = "warning"

        [rules.NUnit9999]
        enabled = false
    "#;
    let config = AnalyzerConfig::from_toml_str(toml).expect("Failed to parse TOML");
    assert!(config.validate(&["NUnit2005", "NUnit9999"]).is_ok());
    let err = config.validate(&["NUnit2005"]).unwrap_err();
    assert!(err.to_string().contains("NUnit9999"));
}

#[test]
fn test_from_file_reads_sections() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [rules.NUnit2010]
        severity = "warning"

        [fixes]
        offer_condensed_fixes = false
    "#,
    )?;

    let config = AnalyzerConfig::from_file(file.path())?;
    assert!(!config.fixes.offer_condensed_fixes);
    assert_eq!(
        config.effective_severity(&descriptor("NUnit2010", true)),
        Some(Severity::Warning)
    );
    Ok(())
}

#[test]
fn test_from_file_missing_file_uses_defaults() -> Result<()> {
    let dir = tempfile::tempdir().map_err(|e| Error::config(format!("temp dir: {e}")))?;
    let config = AnalyzerConfig::from_file(&dir.path().join(DEFAULT_CONFIG_FILE_NAME))?;
    assert!(config.fixes.offer_condensed_fixes);
    Ok(())
}

#[test]
fn test_env_overrides_rule_severity() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [rules.NUnit2099]
        severity = "info"
    "#,
    )?;

    let config = with_env_var("NUNIT_ANALYZERS__RULES__NUNIT2099__SEVERITY", "error", || {
        AnalyzerConfig::from_file(file.path())
    })?;
    assert_eq!(
        config.effective_severity(&descriptor("NUnit2099", true)),
        Some(Severity::Error)
    );
    Ok(())
}

#[test]
fn test_toml_round_trip_preserves_rules() -> Result<()> {
    let mut config = AnalyzerConfig::default();
    config.rules.insert(
        "NUnit2005".to_string(),
        RuleConfig {
            severity: Some(SeverityOverride::Warning),
            enabled: true,
        },
    );
    let reparsed = AnalyzerConfig::from_toml_str(&config.to_toml_string()?)?;
    assert_eq!(reparsed, config);
    Ok(())
}

#[test]
fn test_default_config_path_file_name() {
    assert!(default_config_path().ends_with(DEFAULT_CONFIG_FILE_NAME));
}
