//! Ingestion configuration
//!
//! Controls which program locations reach the site classifier and whether
//! classification runs on the rayon pool.
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_generics::config::IngestionConfig;
//!
//! let config = IngestionConfig::default()
//!     .exclude_path("generated/Bindings.g.cs")
//!     .with_parallel(true);
//!
//! // Or from a versioned YAML file
//! let config = IngestionConfig::from_yaml("generics.yaml")?;
//! ```

pub mod error;

pub use error::{ConfigError, ConfigResult};

use serde::{Deserialize, Serialize};

use crate::shared::models::normalize_path;

/// Current YAML schema version
pub const CONFIG_VERSION: u32 = 1;

/// Site ingestion settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestionConfig {
    /// File paths whose sites are never classified
    pub exclude_paths: Vec<String>,

    /// Classify sites in parallel (requires a `Sync` semantic model)
    pub parallel: bool,
}

/// YAML schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct IngestionConfigV1 {
    version: Option<u32>,

    #[serde(default)]
    exclude_paths: Vec<String>,

    #[serde(default)]
    parallel: bool,
}

impl IngestionConfig {
    /// Add a path to the exclusion list, with `/` separators
    pub fn exclude_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.exclude_paths.push(normalize_path(&path).into_owned());
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Exact file path match, like the host's per-tree path filter
    ///
    /// Separators are compared normalized on both sides, the same way
    /// `Location` stores them.
    pub fn is_excluded(&self, file_path: &str) -> bool {
        let file_path = normalize_path(file_path);
        self.exclude_paths
            .iter()
            .any(|p| normalize_path(p) == file_path)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        match self.exclude_paths.iter().position(|p| p.trim().is_empty()) {
            Some(index) => Err(ConfigError::EmptyExcludePath { index }),
            None => Ok(()),
        }
    }

    /// Parse and validate a versioned YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: IngestionConfigV1 = serde_yaml::from_str(content)?;

        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(CONFIG_VERSION) => {}
            Some(found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: vec![CONFIG_VERSION],
                })
            }
        }

        let config = IngestionConfig {
            exclude_paths: export
                .exclude_paths
                .iter()
                .map(|p| normalize_path(p).into_owned())
                .collect(),
            parallel: export.parallel,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = IngestionConfigV1 {
            version: Some(CONFIG_VERSION),
            exclude_paths: self.exclude_paths.clone(),
            parallel: self.parallel,
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}
