//! Bundle loading configuration.

use crate::error::Result;
use camino::Utf8Path;
use hcp_manifest::Platform;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MANIFEST_FILE_NAME: &str = "program.json";
pub const DEFAULT_INDEX_FILE_NAME: &str = "index.html";

/// Controls how a bundle reads its files from disk.
///
/// # TOML format
///
/// ```toml
/// platform = "ios"
/// manifest_file_name = "program.json"
/// index_file_name = "index.html"
/// ```
///
/// Every field is optional and falls back to [`BundleConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Selects the entry of `cordovaCompatibilityVersions` to use.
    pub platform: Platform,
    pub manifest_file_name: String,
    /// File name of the entry document served at `/`.
    pub index_file_name: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            manifest_file_name: DEFAULT_MANIFEST_FILE_NAME.to_string(),
            index_file_name: DEFAULT_INDEX_FILE_NAME.to_string(),
        }
    }
}

impl BundleConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a config file, returning the defaults if it does not exist.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        if !path.as_std_path().exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path.as_std_path())?;
        Self::from_toml_str(&contents)
    }
}
