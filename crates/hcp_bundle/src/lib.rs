//! Asset bundle model for hot code push clients.
//!
//! A hot code push client keeps the installed version of a web application on
//! disk and periodically downloads newer versions. This crate models one such
//! version:
//!
//! - **Deduplication**: a new bundle only owns the assets that changed or were
//!   added relative to its parent bundle; unchanged files are served from the
//!   parent chain.
//! - **Cache validity**: [`AssetBundle::cached_asset_for_url_path`] is the single
//!   policy gate deciding whether an installed asset can be reused.
//! - **Runtime config**: the JSON configuration embedded in the bundle's
//!   `index.html` is extracted lazily and cached.
//!
//! # Example
//!
//! ```no_run
//! use hcp_bundle::AssetBundle;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let installed = Arc::new(AssetBundle::open("/data/bundles/v1", None)?);
//!
//! if let Some(asset) = installed.asset_for_url_path("/app/app.js") {
//!     println!("serving {}", asset.file());
//! }
//!
//! println!("ROOT_URL: {:?}", installed.root_url_string());
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod bundle;
pub mod config;
pub mod error;
pub mod runtime_config;
pub mod url_path;


// Re-export main types
pub use asset::{Asset, BundleDirectory};
pub use bundle::{AssetBundle, AssetBundleBuilder};
pub use config::BundleConfig;
pub use error::{Error, Result};
pub use hcp_manifest::{AssetManifest, FileType, ManifestEntry, Platform};
pub use runtime_config::{extract_runtime_config, ExtractError, RuntimeConfig};
pub use url_path::UrlPath;
