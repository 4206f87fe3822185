use crate::error::{ConfigError, Result};
use partscope_api::ActivationFeature;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Attached unchanged to every discovered part.
    pub activation_features: Vec<ActivationFeature>,
    /// Upper bound on base types and interface levels per walk. Deeper
    /// hierarchies fail inspection instead of being searched partially.
    pub max_hierarchy_depth: usize,
    pub logging: LoggingConfig,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            activation_features: Vec::new(),
            max_hierarchy_depth: 32,
            logging: LoggingConfig::default(),
        }
    }
}

impl InspectorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_hierarchy_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_hierarchy_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Daily-rolling log files are written here when set.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
    pub stderr: bool,
    /// Used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: "partscope".to_string(),
            stderr: false,
            default_filter: "info".to_string(),
        }
    }
}
