use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Failed to load bundle at {path}")]
    #[diagnostic(
        code(bundle::load_failed),
        help("The directory must contain a valid program.json (or the manifest file named in hcp.toml)")
    )]
    BundleLoad {
        path: Utf8PathBuf,
        #[source]
        source: hcp_bundle::Error,
    },

    #[error("Bundle directory not found: {path}")]
    #[diagnostic(
        code(bundle::not_found),
        help("Make sure the directory exists and the path is correct")
    )]
    BundleDirectoryNotFound { path: Utf8PathBuf },

    #[error("Invalid URL path: {url_path}")]
    #[diagnostic(
        code(url_path::invalid),
        help("URL paths are absolute and carry no query string, e.g. /app/app.js")
    )]
    InvalidUrlPath { url_path: String },

    #[error("No bundle in the chain serves {url_path}")]
    #[diagnostic(code(url_path::not_found))]
    AssetNotFound { url_path: String },

    #[error("Failed to save config")]
    #[diagnostic(
        code(config::save_failed),
        help("Check file permissions next to the hcp executable")
    )]
    ConfigSave {
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn bundle_load(path: Utf8PathBuf, source: hcp_bundle::Error) -> Self {
        Self::BundleLoad { path, source }
    }

    pub fn bundle_directory_not_found(path: Utf8PathBuf) -> Self {
        Self::BundleDirectoryNotFound { path }
    }

    pub fn invalid_url_path(url_path: String) -> Self {
        Self::InvalidUrlPath { url_path }
    }

    pub fn asset_not_found(url_path: String) -> Self {
        Self::AssetNotFound { url_path }
    }

    pub fn config_save(source: std::io::Error) -> Self {
        Self::ConfigSave { source }
    }
}
