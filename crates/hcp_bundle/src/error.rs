//! Error types for bundle construction.
//!
//! Only constructing a bundle can fail. Problems found while extracting the
//! runtime configuration are logged and absorbed by the bundle instead, see
//! [`ExtractError`](crate::runtime_config::ExtractError).

use camino::Utf8PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing an [`AssetBundle`](crate::AssetBundle).
#[derive(Error, Debug)]
pub enum Error {
    /// The bundle's own `program.json` could not be read or parsed.
    #[error("Failed to load asset manifest {path}: {source}")]
    ManifestLoad {
        path: Utf8PathBuf,
        #[source]
        source: hcp_manifest::Error,
    },

    /// A manifest entry carries a URL path that is not absolute or still has a
    /// query string or fragment.
    #[error("Invalid URL path: {0:?}")]
    InvalidUrlPath(String),

    /// The bundle configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bundle configuration file is not valid TOML.
    #[error("Invalid bundle config: {0}")]
    Config(#[from] toml::de::Error),
}
