//! CLI configuration management utilities.

use camino::{Utf8Path, Utf8PathBuf};
use hcp_bundle::BundleConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;

pub const CONFIG_FILE_NAME: &str = "hcp.toml";

/// CLI-wide configuration stored in hcp.toml.
///
/// ```toml
/// [bundle]
/// platform = "ios"
/// index_file_name = "index.html"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub bundle: BundleConfig,
}

/// Returns the directory where the current executable resides.
pub fn install_dir() -> Option<Utf8PathBuf> {
    let exe = env::current_exe().ok()?;
    let parent = exe.parent()?;
    Utf8PathBuf::from_path_buf(parent.to_path_buf()).ok()
}

/// Returns the default configuration file path (hcp.toml next to the executable).
pub fn default_config_path() -> Option<Utf8PathBuf> {
    install_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from `path`.
/// Returns the default configuration if the file doesn't exist or cannot be parsed.
pub fn load_config_from(path: &Utf8Path) -> AppConfig {
    match fs::read_to_string(path.as_std_path()) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid config {}: {}", path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

/// Loads the CLI configuration from hcp.toml.
pub fn load_config() -> AppConfig {
    default_config_path()
        .map(|path| load_config_from(&path))
        .unwrap_or_default()
}

pub fn save_config_to(path: &Utf8Path, cfg: &AppConfig) -> io::Result<()> {
    let content = toml::to_string_pretty(cfg).map_err(io::Error::other)?;
    fs::write(path.as_std_path(), content)
}

/// Saves the CLI configuration to hcp.toml.
pub fn save_config(cfg: &AppConfig) -> io::Result<()> {
    match default_config_path() {
        Some(path) => save_config_to(&path, cfg),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine config path",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcp_bundle::Platform;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join(CONFIG_FILE_NAME)).unwrap();

        let mut cfg = AppConfig::default();
        cfg.bundle.platform = Platform::Ios;
        save_config_to(&path, &cfg).unwrap();

        assert_eq!(load_config_from(&path), cfg);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(load_config_from(&path), AppConfig::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        fs::write(path.as_std_path(), "bundle = 12").unwrap();

        assert_eq!(load_config_from(&path), AppConfig::default());
    }

    #[test]
    fn test_empty_bundle_section() {
        let cfg: AppConfig = toml::from_str("[bundle]\n").unwrap();
        assert_eq!(cfg.bundle, BundleConfig::default());
    }
}
