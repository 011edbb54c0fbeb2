//! Diagnostic descriptor metadata

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum Category {
    Assertion,
}

/// Static metadata for one diagnostic rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagnosticDescriptor {
    /// Stable id such as `NUnit2005`
    pub id: &'static str,
    pub title: &'static str,
    /// Message with positional `{0}`, `{1}` placeholders
    pub message_format: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub default_severity: Severity,
    pub enabled_by_default: bool,
}

const HELP_LINK_BASE: &str = "https://github.com/nunit/nunit.analyzers/tree/master/documentation";

impl DiagnosticDescriptor {
    /// Substitutes `{i}` placeholders; placeholders without an argument stay as written
    pub fn format_message(&self, arguments: &[&str]) -> String {
        let mut message = self.message_format.to_string();
        for (index, argument) in arguments.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), argument);
        }
        message
    }

    pub fn help_link(&self) -> String {
        format!("{HELP_LINK_BASE}/{}.md", self.id)
    }
}
