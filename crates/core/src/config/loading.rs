//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;
use tracing::debug;

use super::defaults::*;
use super::AnalyzerConfig;

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl AnalyzerConfig {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `NUNIT_ANALYZERS` and use double
    /// underscores for nested values. For example:
    /// - `NUNIT_ANALYZERS__FIXES__OFFER_CONDENSED_FIXES=false`
    /// - `NUNIT_ANALYZERS__RULES__NUNIT2005__SEVERITY=warning`
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut builder = set_config_default(
            ConfigLib::builder(),
            "fixes.offer_condensed_fixes",
            default_offer_condensed_fixes(),
        )?;

        if path.exists() {
            debug!(path = %path.display(), "Loading analyzer configuration");
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Serializes the config back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(format!("Failed to serialize TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (`./nunit-analyzers.toml` or a custom path)
    /// 3. Environment variables (`NUNIT_ANALYZERS__*`)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };
        Self::from_file(&path)
    }
}
