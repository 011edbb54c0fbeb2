//! Default values and functions for configuration

use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "nunit-analyzers.toml";
pub(crate) const ENV_PREFIX: &str = "NUNIT_ANALYZERS";

/// `./nunit-analyzers.toml`
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".").join(DEFAULT_CONFIG_FILE_NAME)
}

pub(crate) fn default_rule_enabled() -> bool {
    true
}

pub(crate) fn default_offer_condensed_fixes() -> bool {
    true
}
