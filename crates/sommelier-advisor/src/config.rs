//! Configuration for candidate selection

use serde::{Deserialize, Serialize};

/// How many stock rows may reach one prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Cap when rows matched the requested price bucket (or the bucket is "all")
    #[serde(default = "default_full_limit")]
    pub full_limit: usize,

    /// Cap when nothing matched and the whole inventory is used instead
    #[serde(default = "default_fallback_limit")]
    pub fallback_limit: usize,
}

fn default_full_limit() -> usize {
    100
}

fn default_fallback_limit() -> usize {
    50
}

impl SelectionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.full_limit == 0 {
            return Err("full_limit must be greater than 0".to_string());
        }
        if self.fallback_limit == 0 {
            return Err("fallback_limit must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            full_limit: default_full_limit(),
            fallback_limit: default_fallback_limit(),
        }
    }
}
