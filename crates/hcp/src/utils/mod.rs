use crate::errors::CliError;
use camino::Utf8PathBuf;
use hcp_bundle::{AssetBundle, BundleConfig, UrlPath};
use miette::Result;
use std::sync::Arc;

pub mod config;

#[macro_export]
macro_rules! println_pad {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        for __line in __s.lines() {
            println!("    {}", __line);
        }
    }};
}

/// Load a single bundle, deduplicating against `parent`.
pub fn load_bundle(
    dir: &str,
    parent: Option<Arc<AssetBundle>>,
    config: &BundleConfig,
) -> Result<AssetBundle> {
    let path = Utf8PathBuf::from(dir);
    if !path.as_std_path().is_dir() {
        return Err(CliError::bundle_directory_not_found(path).into());
    }

    AssetBundle::builder(path.clone())
        .with_parent(parent)
        .with_config(config.clone())
        .build()
        .map_err(|source| CliError::bundle_load(path, source).into())
}

/// Load `dir` on top of `parents`, which are listed oldest first.
pub fn load_bundle_chain(
    dir: &str,
    parents: &[String],
    config: &BundleConfig,
) -> Result<AssetBundle> {
    let mut parent = None;
    for parent_dir in parents {
        parent = Some(Arc::new(load_bundle(parent_dir, parent, config)?));
    }

    load_bundle(dir, parent, config)
}

pub fn parse_url_path(url_path: &str) -> Result<UrlPath> {
    UrlPath::parse(url_path).map_err(|_| CliError::invalid_url_path(url_path.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_bundle(version: &str, hash: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let program = format!(
            r#"{{
                "version": "{version}",
                "cordovaCompatibilityVersions": {{ "android": "1" }},
                "manifest": [
                    {{ "path": "app.js", "where": "client", "type": "js",
                       "url": "/app.js", "hash": "{hash}" }}
                ]
            }}"#
        );
        std::fs::write(temp.path().join("program.json"), program).unwrap();
        temp
    }

    fn dir_str(temp: &TempDir) -> String {
        temp.path().to_str().unwrap().to_string()
    }

    #[test]
    fn test_load_bundle_chain() {
        let v1 = write_bundle("v1", "a");
        let v2 = write_bundle("v2", "a");
        let v3 = write_bundle("v3", "b");

        let bundle = load_bundle_chain(
            &dir_str(&v3),
            &[dir_str(&v1), dir_str(&v2)],
            &BundleConfig::default(),
        )
        .unwrap();

        let versions: Vec<_> = bundle.chain().map(|b| b.version().to_string()).collect();
        assert_eq!(versions, ["v3", "v2", "v1"]);
        assert!(bundle.own_asset("/app.js").is_some());
        assert!(bundle.parent().unwrap().own_asset("/app.js").is_none());
    }

    #[test]
    fn test_load_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let result = load_bundle(missing.to_str().unwrap(), None, &BundleConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_url_path() {
        assert!(parse_url_path("/app.js").is_ok());
        assert!(parse_url_path("app.js").is_err());
    }
}
