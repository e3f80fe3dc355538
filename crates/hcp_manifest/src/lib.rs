//! Types and parser for the `program.json` manifest shipped with every web
//! program bundle.
//!
//! Only the parts of the manifest that a hot code push client cares about are
//! modelled: the bundle version, the cordova compatibility version of one
//! platform, and the list of client-side entries. Server entries are dropped
//! while parsing.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

mod error;

pub use error::{Error, Result};

/// The only manifest format this crate accepts.
pub const SUPPORTED_FORMAT: &str = "web-program-pre1";

fn serde_fmt<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let json = serde_json::to_string(value).map_err(|_| fmt::Error)?;
    let s: String = serde_json::from_str(&json).map_err(|_| fmt::Error)?;
    f.write_str(&s)
}

/// Platforms with their own entry in `cordovaCompatibilityVersions`.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File types the web program build tool emits.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "lowercase")]
pub enum WellKnownFileType {
    Html,
    Js,
    Css,
    Json,
    Asset,
}

/// A manifest entry type, either a well-known type or a custom string.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(untagged)]
pub enum FileType {
    Known(WellKnownFileType),
    Other(String),
}

impl FileType {
    pub fn html() -> Self {
        FileType::Known(WellKnownFileType::Html)
    }

    pub fn json() -> Self {
        FileType::Known(WellKnownFileType::Json)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Known(kind) => serde_fmt(kind, f),
            FileType::Other(s) => f.write_str(s),
        }
    }
}

impl From<String> for FileType {
    fn from(s: String) -> Self {
        serde_json::from_value(serde_json::Value::String(s.clone())).unwrap_or(FileType::Other(s))
    }
}

/// One client-side file listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path of the file relative to the bundle directory.
    pub file_path: Utf8PathBuf,
    /// URL path the file is served under, with any query string removed.
    pub url_path: String,
    pub file_type: FileType,
    /// Cacheable files may be reused without comparing hashes.
    pub cacheable: bool,
    pub hash: Option<String>,
    pub size: Option<u64>,
    pub source_map_file_path: Option<Utf8PathBuf>,
    pub source_map_url_path: Option<String>,
}

/// A parsed `program.json`, resolved for a single platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    pub version: String,
    pub cordova_compatibility_version: String,
    pub entries: Vec<ManifestEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProgram {
    #[serde(default)]
    format: Option<String>,
    version: String,
    #[serde(default)]
    cordova_compatibility_versions: HashMap<String, String>,
    #[serde(default)]
    manifest: Vec<RawEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    path: Utf8PathBuf,
    #[serde(rename = "where")]
    location: String,
    #[serde(rename = "type")]
    file_type: FileType,
    #[serde(default)]
    cacheable: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    hash: Option<String>,
    #[serde(default)]
    source_map: Option<Utf8PathBuf>,
    #[serde(default)]
    source_map_url: Option<String>,
}

impl RawEntry {
    fn into_entry(self) -> Result<ManifestEntry> {
        let url = self.url.ok_or_else(|| Error::MissingUrl(self.path.clone()))?;

        Ok(ManifestEntry {
            file_path: self.path,
            url_path: strip_query(&url).to_string(),
            file_type: self.file_type,
            cacheable: self.cacheable,
            hash: self.hash,
            size: self.size,
            source_map_file_path: self.source_map,
            source_map_url_path: self.source_map_url.map(|url| strip_query(&url).to_string()),
        })
    }
}

/// Drops the query string from a manifest URL (`/app.js?hash=1` -> `/app.js`).
fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

impl AssetManifest {
    /// Parse manifest bytes, keeping only `client` entries.
    ///
    /// Fails if the `format` field is present and not [`SUPPORTED_FORMAT`], or if
    /// the manifest carries no compatibility version for `platform`.
    pub fn from_slice(bytes: &[u8], platform: Platform) -> Result<Self> {
        let raw: RawProgram = serde_json::from_slice(bytes)?;

        if let Some(format) = raw.format {
            if format != SUPPORTED_FORMAT {
                return Err(Error::IncompatibleFormat(format));
            }
        }

        let mut compatibility_versions = raw.cordova_compatibility_versions;
        let cordova_compatibility_version = compatibility_versions
            .remove(platform.as_str())
            .ok_or(Error::MissingCompatibilityVersion(platform))?;

        let entries = raw
            .manifest
            .into_iter()
            .filter(|entry| entry.location == "client")
            .map(RawEntry::into_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            version: raw.version,
            cordova_compatibility_version,
            entries,
        })
    }

    pub fn from_json_str(json: &str, platform: Platform) -> Result<Self> {
        Self::from_slice(json.as_bytes(), platform)
    }

    /// Read and parse a manifest file from disk.
    pub fn load(path: &Utf8Path, platform: Platform) -> Result<Self> {
        let bytes = std::fs::read(path.as_std_path())?;
        Self::from_slice(&bytes, platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXAMPLE_PROGRAM: &str = r#"{
        "format": "web-program-pre1",
        "version": "version1",
        "cordovaCompatibilityVersions": { "android": "android-compat", "ios": "ios-compat" },
        "manifest": [
            {
                "path": "app/template.mobileapp.js",
                "where": "client",
                "type": "js",
                "cacheable": true,
                "url": "/app/template.mobileapp.js?979b20f66caf126704c250fbd29ce253c6cb490e",
                "sourceMap": "app/template.mobileapp.js.map",
                "sourceMapUrl": "/app/979b20f66caf126704c250fbd29ce253c6cb490e.map",
                "size": 502,
                "hash": "979b20f66caf126704c250fbd29ce253c6cb490e"
            },
            {
                "path": "merged-stylesheets.css",
                "where": "client",
                "type": "css",
                "cacheable": true,
                "url": "/merged-stylesheets.css?hash=ae980ae94a4e4ac5b1c4f9f1e9b63e8e4e5c3c7a",
                "size": 30,
                "hash": "ae980ae94a4e4ac5b1c4f9f1e9b63e8e4e5c3c7a"
            },
            {
                "path": "head.html",
                "where": "internal",
                "type": "head",
                "hash": "d41d8cd98f00b204e9800998ecf8427e"
            },
            {
                "path": "some-file",
                "where": "client",
                "type": "asset",
                "cacheable": false,
                "url": "/some-file",
                "size": 12,
                "hash": "be0ba4fbfa7e3b0e8c8e5eb0d5b1e5c1b0e3a4c5"
            }
        ]
    }"#;

    #[test]
    fn test_parse_example_program() {
        let manifest = AssetManifest::from_json_str(EXAMPLE_PROGRAM, Platform::Android).unwrap();

        assert_eq!(manifest.version, "version1");
        assert_eq!(manifest.cordova_compatibility_version, "android-compat");
        assert_eq!(manifest.entries.len(), 3);

        let js = &manifest.entries[0];
        assert_eq!(js.file_path, "app/template.mobileapp.js");
        assert_eq!(js.url_path, "/app/template.mobileapp.js");
        assert_eq!(js.file_type, FileType::Known(WellKnownFileType::Js));
        assert!(js.cacheable);
        assert_eq!(js.size, Some(502));
        assert_eq!(
            js.source_map_url_path.as_deref(),
            Some("/app/979b20f66caf126704c250fbd29ce253c6cb490e.map")
        );
        assert_eq!(
            js.source_map_file_path.as_deref(),
            Some(Utf8Path::new("app/template.mobileapp.js.map"))
        );
    }

    #[test]
    fn test_platform_selects_compatibility_version() {
        let manifest = AssetManifest::from_json_str(EXAMPLE_PROGRAM, Platform::Ios).unwrap();
        assert_eq!(manifest.cordova_compatibility_version, "ios-compat");
    }

    #[test]
    fn test_skips_non_client_entries() {
        let manifest = AssetManifest::from_json_str(EXAMPLE_PROGRAM, Platform::Android).unwrap();
        assert!(manifest
            .entries
            .iter()
            .all(|entry| entry.file_path != "head.html"));
    }

    #[test]
    fn test_cacheable_defaults_to_false() {
        let json = r#"{
            "version": "v",
            "cordovaCompatibilityVersions": { "android": "1" },
            "manifest": [
                { "path": "a.txt", "where": "client", "type": "asset", "url": "/a.txt" }
            ]
        }"#;
        let manifest = AssetManifest::from_json_str(json, Platform::Android).unwrap();

        let entry = &manifest.entries[0];
        assert!(!entry.cacheable);
        assert!(entry.hash.is_none());
        assert!(entry.size.is_none());
    }

    #[test]
    fn test_missing_format_is_accepted() {
        let json = r#"{ "version": "v", "cordovaCompatibilityVersions": { "android": "1" } }"#;
        let manifest = AssetManifest::from_json_str(json, Platform::Android).unwrap();
        assert!(manifest.entries.is_empty());
    }

    #[test]
    fn test_rejects_unknown_format() {
        let json = r#"{ "format": "web-program-pre2", "version": "v",
            "cordovaCompatibilityVersions": { "android": "1" } }"#;
        let result = AssetManifest::from_json_str(json, Platform::Android);
        assert!(matches!(result, Err(Error::IncompatibleFormat(f)) if f == "web-program-pre2"));
    }

    #[test]
    fn test_missing_compatibility_version() {
        let json = r#"{ "version": "v", "cordovaCompatibilityVersions": { "android": "1" } }"#;
        let result = AssetManifest::from_json_str(json, Platform::Ios);
        assert!(matches!(
            result,
            Err(Error::MissingCompatibilityVersion(Platform::Ios))
        ));
    }

    #[test]
    fn test_client_entry_requires_url() {
        let json = r#"{
            "version": "v",
            "cordovaCompatibilityVersions": { "android": "1" },
            "manifest": [ { "path": "a.txt", "where": "client", "type": "asset" } ]
        }"#;
        let result = AssetManifest::from_json_str(json, Platform::Android);
        assert!(matches!(result, Err(Error::MissingUrl(path)) if path == "a.txt"));
    }

    #[test]
    fn test_unknown_platform_keys_are_ignored() {
        let json = r#"{ "version": "v",
            "cordovaCompatibilityVersions": { "android": "1", "web.browser": "2" } }"#;
        let manifest = AssetManifest::from_json_str(json, Platform::Android).unwrap();
        assert_eq!(manifest.cordova_compatibility_version, "1");
    }

    #[test]
    fn test_custom_file_type() {
        assert_eq!(
            FileType::from("dynamic js".to_string()),
            FileType::Other("dynamic js".to_string())
        );
        assert_eq!(FileType::from("html".to_string()), FileType::html());
        assert_eq!(FileType::json().to_string(), "json");
    }

    #[test]
    fn test_load_from_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(EXAMPLE_PROGRAM.as_bytes()).unwrap();
        temp.flush().unwrap();

        let path = Utf8Path::from_path(temp.path()).unwrap();
        let manifest = AssetManifest::load(path, Platform::Android).unwrap();
        assert_eq!(manifest.version, "version1");
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"{ invalid json }").unwrap();
        temp.flush().unwrap();

        let path = Utf8Path::from_path(temp.path()).unwrap();
        let result = AssetManifest::load(path, Platform::Android);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
