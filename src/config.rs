// Configuration for audit runs
//
// Loaded from TOML. Every field has a default, so an empty file is a valid
// configuration.

use crate::artifacts::DEFAULT_PASS;
use crate::audit::AuditContext;
use crate::error::ConfigError;
use crate::i18n::UiStrings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the layout-shift-elements audit
///
/// # Example
/// ```
/// use shiftaudit::config::AuditConfig;
///
/// let config = AuditConfig::default();
/// assert_eq!(config.default_pass, "defaultPass");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Pass whose trace is used for the aggregate CLS value
    pub default_pass: String,

    /// User-visible strings (title, column labels, summary template)
    pub strings: UiStrings,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            default_pass: DEFAULT_PASS.to_string(),
            strings: UiStrings::default(),
        }
    }
}

impl AuditConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AuditConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), pass = %config.default_pass, "loaded audit config");
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_pass.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_pass must not be empty".to_string(),
            ));
        }

        self.strings.validate().map_err(ConfigError::Invalid)
    }

    pub fn context(&self) -> AuditContext {
        AuditContext::with_pass(self.default_pass.clone())
    }
}
