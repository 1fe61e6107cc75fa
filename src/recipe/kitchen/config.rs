// src/recipe/kitchen/config.rs

//! Configuration types for the Kitchen build system

use crate::error::{Error, Result};
use crate::recipe::layout::LayoutPlan;
use crate::recipe::package_info::PackageInfo;
use crate::recipe::resolve::Configuration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration for the Kitchen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KitchenConfig {
    /// Root for export, build and package folders
    pub work_dir: PathBuf,
    /// Explicit cmake binary; looked up on PATH when unset
    pub cmake: Option<PathBuf>,
    /// CMake generator, e.g. "Ninja"; cmake's default when unset
    pub generator: Option<String>,
    /// Number of parallel jobs
    pub jobs: u32,
    /// Install prefixes of requirements, by requirement name
    pub dependency_roots: HashMap<String, PathBuf>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            work_dir: PathBuf::from(".clwe-build"),
            cmake: None,
            generator: None,
            jobs,
            dependency_roots: HashMap::new(),
        }
    }
}

impl KitchenConfig {
    /// Load a configuration from a TOML file; missing keys take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IoError(format!("Failed to read kitchen config {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::ParseError(format!("Invalid kitchen config: {}", e)))?;
        if config.jobs == 0 {
            return Err(Error::ParseError(
                "Invalid kitchen config: jobs must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Use a different work directory
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }
}

/// Result of cooking a configuration
#[derive(Debug)]
pub struct CookResult {
    /// The configuration that was built
    pub configuration: Configuration,
    /// Folders used for the build
    pub layout: LayoutPlan,
    /// Metadata published for consumers
    pub package_info: PackageInfo,
    /// Where the metadata file was written
    pub package_info_path: PathBuf,
    /// Build log
    pub log: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitchen_config_default() {
        let config = KitchenConfig::default();
        assert!(config.jobs > 0);
        assert_eq!(config.work_dir, PathBuf::from(".clwe-build"));
        assert!(config.cmake.is_none());
        assert!(config.generator.is_none());
        assert!(config.dependency_roots.is_empty());
    }

    #[test]
    fn test_kitchen_config_from_toml() {
        let config = KitchenConfig::from_toml(
            r#"
work_dir = "/tmp/clwe"
generator = "Ninja"
jobs = 2

[dependency_roots]
openssl = "/opt/openssl-3.1.0"
"#,
        )
        .unwrap();

        assert_eq!(config.work_dir, PathBuf::from("/tmp/clwe"));
        assert_eq!(config.generator.as_deref(), Some("Ninja"));
        assert_eq!(config.jobs, 2);
        assert_eq!(
            config.dependency_roots.get("openssl"),
            Some(&PathBuf::from("/opt/openssl-3.1.0"))
        );
        assert!(config.cmake.is_none());
    }

    #[test]
    fn test_kitchen_config_rejects_unknown_keys() {
        assert!(matches!(
            KitchenConfig::from_toml("use_isolation = true\n"),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_kitchen_config_rejects_zero_jobs() {
        let err = KitchenConfig::from_toml("jobs = 0\n").unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
        assert!(err.to_string().contains("jobs"));
    }

    #[test]
    fn test_with_work_dir() {
        let config = KitchenConfig::default().with_work_dir("/build");
        assert_eq!(config.work_dir, PathBuf::from("/build"));
    }
}
