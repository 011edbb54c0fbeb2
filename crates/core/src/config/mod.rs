//! Analyzer configuration
//!
//! Configuration is read from a TOML file (by default `./nunit-analyzers.toml`)
//! and/or environment variables prefixed with `NUNIT_ANALYZERS`. It controls
//! per-rule severities and which code fixes are offered.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::diagnostics::{DiagnosticDescriptor, Severity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};

pub use defaults::{default_config_path, DEFAULT_CONFIG_FILE_NAME};

use defaults::*;

/// A severity as written in configuration; `none` turns the rule off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeverityOverride {
    None,
    Hidden,
    Info,
    Warning,
    Error,
}

impl SeverityOverride {
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::None => None,
            Self::Hidden => Some(Severity::Hidden),
            Self::Info => Some(Severity::Info),
            Self::Warning => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

/// Settings for a single diagnostic id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Replaces the descriptor's default severity
    #[serde(default)]
    pub severity: Option<SeverityOverride>,

    #[serde(default = "default_rule_enabled")]
    pub enabled: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            severity: None,
            enabled: default_rule_enabled(),
        }
    }
}

/// Which code fixes are registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixesConfig {
    /// Offer `Assert.That(condition)` alongside the full fix for IsTrue/True
    #[serde(default = "default_offer_condensed_fixes")]
    pub offer_condensed_fixes: bool,
}

impl Default for FixesConfig {
    fn default() -> Self {
        Self {
            offer_condensed_fixes: default_offer_condensed_fixes(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Per-rule settings keyed by diagnostic id (case-insensitive)
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,

    #[serde(default)]
    pub fixes: FixesConfig,
}

impl AnalyzerConfig {
    pub fn rule(&self, id: &str) -> Option<&RuleConfig> {
        self.rules
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(id))
            .map(|(_, rule)| rule)
    }

    /// The severity a rule reports with, or `None` when it is turned off
    pub fn effective_severity(&self, descriptor: &DiagnosticDescriptor) -> Option<Severity> {
        match self.rule(descriptor.id) {
            Some(rule) if !rule.enabled => None,
            Some(RuleConfig {
                severity: Some(severity),
                ..
            }) => severity.severity(),
            _ if descriptor.enabled_by_default => Some(descriptor.default_severity),
            _ => None,
        }
    }

    /// Rejects rule keys that do not name a known diagnostic
    pub fn validate(&self, known_ids: &[&str]) -> crate::error::Result<()> {
        let unknown: Vec<&str> = self
            .rules
            .keys()
            .map(String::as_str)
            .filter(|key| !known_ids.iter().any(|id| id.eq_ignore_ascii_case(key)))
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(crate::error::Error::config(format!(
                "Unknown rule ids: {}",
                unknown.join(", ")
            )))
        }
    }
}
