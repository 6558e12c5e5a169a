//! Configuration types for studium-ai.

use crate::bridge::PluginMode;
use crate::error::{StudiumError, StudiumErrorKind};
use serde::{Deserialize, Serialize};

/// Top-level studium-ai configuration.
///
/// Every table is optional; an absent file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudiumConfig {
    /// Plugin bridge settings.
    #[serde(default)]
    pub plugin: PluginConfig,

    /// Context store settings.
    #[serde(default)]
    pub context: ContextConfig,
}

/// Settings for the plugin bridge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Presentation mode sent to plugins in `INIT_DATA` when the session
    /// does not override it.
    #[serde(default)]
    pub default_mode: PluginMode,
}

/// Settings for context reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Number of messages returned when a tool call omits `limit`.
    #[serde(default = "ContextConfig::default_default_limit")]
    pub default_limit: u64,

    /// Largest `limit` a tool call may request.
    #[serde(default = "ContextConfig::default_max_limit")]
    pub max_limit: u64,
}

impl ContextConfig {
    fn default_default_limit() -> u64 {
        10
    }

    fn default_max_limit() -> u64 {
        50
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            default_limit: Self::default_default_limit(),
            max_limit: Self::default_max_limit(),
        }
    }
}

impl StudiumConfig {
    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `context.default_limit` is zero
    /// or exceeds `context.max_limit`.
    pub fn validate(&self) -> Result<(), StudiumError> {
        if self.context.default_limit == 0 {
            return Err(StudiumError::new(StudiumErrorKind::Configuration {
                field: "context.default_limit".to_string(),
                reason: "must be at least 1".to_string(),
            }));
        }
        if self.context.default_limit > self.context.max_limit {
            return Err(StudiumError::new(StudiumErrorKind::Configuration {
                field: "context.default_limit".to_string(),
                reason: format!(
                    "must not exceed context.max_limit ({})",
                    self.context.max_limit
                ),
            }));
        }
        Ok(())
    }
}
