//! Migration configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default location of the build config file
pub const DEFAULT_PACKAGE_JSON_PATH: &str = "/package.json";

/// Default prefix for the `utopia.html` / `utopia.js` entry points
pub const DEFAULT_PUBLIC_DIR_PREFIX: &str = "public/";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Path of the build config file rewritten when leaving version 3
    pub package_json_path: String,
    /// Prefix applied to the build config entry points
    pub public_dir_prefix: String,
    /// Keep a failing file unchanged instead of aborting the whole migration
    pub isolate_file_failures: bool,
}

impl MigrationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With build config path
    #[inline]
    #[must_use]
    pub fn with_package_json_path(mut self, path: impl Into<String>) -> Self {
        self.package_json_path = path.into();
        self
    }

    /// With entry point prefix
    #[inline]
    #[must_use]
    pub fn with_public_dir_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.public_dir_prefix = prefix.into();
        self
    }

    /// With per-file failure isolation
    #[inline]
    #[must_use]
    pub fn with_file_isolation(mut self, isolate: bool) -> Self {
        self.isolate_file_failures = isolate;
        self
    }

    /// Parse from TOML, unset keys keep their defaults
    ///
    /// # Errors
    /// Returns error if the TOML is invalid or the build config path is empty
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        if config.package_json_path.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "package_json_path must not be empty".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            package_json_path: DEFAULT_PACKAGE_JSON_PATH.to_string(),
            public_dir_prefix: DEFAULT_PUBLIC_DIR_PREFIX.to_string(),
            isolate_file_failures: true,
        }
    }
}
