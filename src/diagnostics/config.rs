//! Per-rule configuration.
//!
//! Accepted JSON shapes:
//!
//! ```json
//! { "rules": { "WPF0041": false, "WPF0023": "warning" } }
//! { "WPF0041": false }
//! ```
//!
//! A value is either a bool or one of the severity names `error`,
//! `warning`, `info`, `hidden` and `none`; `none` disables the rule.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use smol_str::SmolStr;
use thiserror::Error;

use super::descriptor::{DiagnosticDescriptor, Severity};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting '{value}' for rule {rule}")]
    InvalidSetting { rule: String, value: String },
}

/// What the configuration says about one rule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleSetting {
    Disabled,
    /// Enabled with the rule's default severity
    Enabled,
    Severity(Severity),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Enabled(bool),
    Severity(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfig {
    Nested { rules: FxHashMap<String, RawSetting> },
    Flat(FxHashMap<String, RawSetting>),
}

/// Immutable-once-built rule table. Rules not mentioned fall back to their
/// descriptor's `enabled_by_default`.
#[derive(Clone, Debug, Default)]
pub struct AnalyzerConfig {
    rules: FxHashMap<SmolStr, RuleSetting>,
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        let entries = match raw {
            RawConfig::Nested { rules } => rules,
            RawConfig::Flat(rules) => rules,
        };
        let mut config = Self::default();
        for (rule, setting) in entries {
            let setting = match setting {
                RawSetting::Enabled(true) => RuleSetting::Enabled,
                RawSetting::Enabled(false) => RuleSetting::Disabled,
                RawSetting::Severity(value) => match value.to_ascii_lowercase().as_str() {
                    "none" => RuleSetting::Disabled,
                    "hidden" | "silent" => RuleSetting::Severity(Severity::Hidden),
                    "info" | "suggestion" => RuleSetting::Severity(Severity::Info),
                    "warning" => RuleSetting::Severity(Severity::Warning),
                    "error" => RuleSetting::Severity(Severity::Error),
                    _ => return Err(ConfigError::InvalidSetting { rule, value }),
                },
            };
            config.rules.insert(SmolStr::new(rule), setting);
        }
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_rule(mut self, id: &str, enabled: bool) -> Self {
        let setting = if enabled {
            RuleSetting::Enabled
        } else {
            RuleSetting::Disabled
        };
        self.rules.insert(SmolStr::new(id), setting);
        self
    }

    pub fn with_severity(mut self, id: &str, severity: Severity) -> Self {
        self.rules
            .insert(SmolStr::new(id), RuleSetting::Severity(severity));
        self
    }

    pub fn setting(&self, id: &str) -> Option<RuleSetting> {
        self.rules.get(id).copied()
    }

    pub fn is_enabled(&self, descriptor: &DiagnosticDescriptor) -> bool {
        self.effective_severity(descriptor).is_some()
    }

    /// Severity to report with, `None` when the rule is off
    pub fn effective_severity(&self, descriptor: &DiagnosticDescriptor) -> Option<Severity> {
        match self.setting(descriptor.id) {
            Some(RuleSetting::Disabled) => None,
            Some(RuleSetting::Enabled) => Some(descriptor.default_severity),
            Some(RuleSetting::Severity(severity)) => Some(severity),
            None => descriptor
                .enabled_by_default
                .then_some(descriptor.default_severity),
        }
    }

    /// Configured ids, for validation against a registry
    pub fn rule_ids(&self) -> impl Iterator<Item = &SmolStr> {
        self.rules.keys()
    }
}
