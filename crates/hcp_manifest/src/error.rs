use camino::Utf8PathBuf;
use thiserror::Error;

use crate::Platform;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a web program manifest.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The `format` field names a manifest format this crate does not understand.
    #[error("The asset manifest format is incompatible: {0}")]
    IncompatibleFormat(String),

    /// `cordovaCompatibilityVersions` has no entry for the requested platform.
    #[error("Missing cordova compatibility version for platform '{0}'")]
    MissingCompatibilityVersion(Platform),

    #[error("Client entry '{0}' has no url")]
    MissingUrl(Utf8PathBuf),
}
