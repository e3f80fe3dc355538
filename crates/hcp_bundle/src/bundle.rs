//! Asset bundle construction and lookup.
//!
//! An [`AssetBundle`] represents one downloaded version of the web application.
//! It only owns the assets that are new in that version: while a bundle is
//! constructed every manifest entry is checked against the parent bundle (the
//! previously installed version), and entries the parent can already serve are
//! left out. Lookups walk the parent chain at read time instead.
//!
//! # Construction
//!
//! 1. Load `program.json` from the bundle directory, unless a parsed manifest
//!    was supplied. A manifest that cannot be loaded aborts construction.
//! 2. For each manifest entry, add an owned [`Asset`] unless the parent returns
//!    a hit from [`cached_asset_for_url_path`](AssetBundle::cached_asset_for_url_path)
//!    for the entry's URL path and hash.
//! 3. Apply the same test to the entry's source map, by URL path only.
//! 4. Insert the entry document at `/`, overwriting whatever step 2 put there.
//!    The index page is never delegated to a parent.

use crate::asset::{Asset, BundleDirectory};
use crate::config::BundleConfig;
use crate::error::{Error, Result};
use crate::runtime_config::{extract_runtime_config, RuntimeConfig};
use crate::url_path::UrlPath;
use camino::{Utf8Path, Utf8PathBuf};
use hcp_manifest::{AssetManifest, FileType, ManifestEntry};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// One version of the application's static assets.
///
/// Parents are shared through [`Arc`]; a bundle reads through its parent but
/// never modifies it. The runtime configuration and the values derived from it
/// are computed on first successful access and cached for the bundle's lifetime.
#[derive(Debug)]
pub struct AssetBundle {
    directory: BundleDirectory,
    manifest: AssetManifest,
    parent: Option<Arc<AssetBundle>>,
    own_assets: HashMap<UrlPath, Asset>,
    index_file: Asset,
    runtime_config: OnceLock<RuntimeConfig>,
    app_id: OnceLock<String>,
    root_url_string: OnceLock<String>,
}

/// Configures and constructs an [`AssetBundle`].
///
/// ```no_run
/// use hcp_bundle::AssetBundle;
/// use std::sync::Arc;
///
/// # fn main() -> hcp_bundle::Result<()> {
/// let installed = Arc::new(AssetBundle::open("/data/bundles/v1", None)?);
/// let downloaded = AssetBundle::builder("/data/bundles/v2")
///     .with_parent(installed)
///     .build()?;
///
/// for asset in downloaded.own_assets() {
///     println!("new in this version: {}", asset.url_path());
/// }
/// # Ok(())
/// # }
/// ```
pub struct AssetBundleBuilder {
    directory: Utf8PathBuf,
    manifest: Option<AssetManifest>,
    parent: Option<Arc<AssetBundle>>,
    config: BundleConfig,
}

impl AssetBundleBuilder {
    pub fn new(directory: impl Into<Utf8PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            manifest: None,
            parent: None,
            config: BundleConfig::default(),
        }
    }

    /// Use an already parsed manifest instead of reading `program.json`.
    pub fn with_manifest(mut self, manifest: AssetManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Deduplicate against `parent`, the previously installed bundle.
    pub fn with_parent(mut self, parent: impl Into<Option<Arc<AssetBundle>>>) -> Self {
        self.parent = parent.into();
        self
    }

    pub fn with_config(mut self, config: BundleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<AssetBundle> {
        let manifest = match self.manifest {
            Some(manifest) => manifest,
            None => load_manifest(&self.directory, &self.config)?,
        };

        AssetBundle::from_manifest(self.directory, manifest, self.parent, &self.config)
    }
}

fn load_manifest(directory: &Utf8Path, config: &BundleConfig) -> Result<AssetManifest> {
    let path = directory.join(&config.manifest_file_name);
    AssetManifest::load(&path, config.platform).map_err(|source| {
        tracing::error!("Error loading asset manifest {}: {}", path, source);
        Error::ManifestLoad { path, source }
    })
}

/// Whether a bundle with the given parent must materialize its own asset.
fn is_new_in_bundle(parent: Option<&AssetBundle>, url_path: &UrlPath, hash: Option<&str>) -> bool {
    parent.map_or(true, |parent| {
        parent
            .cached_asset_for_url_path(url_path.as_str(), hash)
            .is_none()
    })
}

impl AssetBundle {
    pub fn builder(directory: impl Into<Utf8PathBuf>) -> AssetBundleBuilder {
        AssetBundleBuilder::new(directory)
    }

    /// Construct a bundle from the `program.json` in `directory`.
    pub fn open(
        directory: impl Into<Utf8PathBuf>,
        parent: impl Into<Option<Arc<AssetBundle>>>,
    ) -> Result<Self> {
        Self::builder(directory).with_parent(parent).build()
    }

    /// Construct a bundle from a manifest that has already been parsed,
    /// typically one that was just downloaded.
    pub fn with_manifest(
        directory: impl Into<Utf8PathBuf>,
        manifest: AssetManifest,
        parent: impl Into<Option<Arc<AssetBundle>>>,
    ) -> Result<Self> {
        Self::builder(directory)
            .with_manifest(manifest)
            .with_parent(parent)
            .build()
    }

    fn from_manifest(
        directory: Utf8PathBuf,
        manifest: AssetManifest,
        parent: Option<Arc<AssetBundle>>,
        config: &BundleConfig,
    ) -> Result<Self> {
        tracing::debug!(
            "Creating asset bundle {} in {}",
            manifest.version,
            directory
        );

        let directory = BundleDirectory::new(directory);
        let parent_bundle = parent.as_deref();
        let mut own_assets = HashMap::new();

        for entry in &manifest.entries {
            let url_path = UrlPath::parse(&entry.url_path)?;
            if is_new_in_bundle(parent_bundle, &url_path, entry.hash.as_deref()) {
                let asset = asset_from_entry(entry, url_path, &directory)?;
                own_assets.insert(asset.url_path.clone(), asset);
            }

            if let (Some(file_path), Some(url_path)) =
                (&entry.source_map_file_path, &entry.source_map_url_path)
            {
                let url_path = UrlPath::parse(url_path)?;
                if is_new_in_bundle(parent_bundle, &url_path, None) {
                    let asset = Asset {
                        file_path: file_path.clone(),
                        url_path: url_path.clone(),
                        file_type: FileType::json(),
                        cacheable: true,
                        hash: None,
                        entry_size: None,
                        source_map_url_path: None,
                        bundle_directory: directory.clone(),
                    };
                    own_assets.insert(url_path, asset);
                }
            }
        }

        let index_file = Asset {
            file_path: Utf8PathBuf::from(&config.index_file_name),
            url_path: UrlPath::root(),
            file_type: FileType::html(),
            cacheable: false,
            hash: None,
            entry_size: None,
            source_map_url_path: None,
            bundle_directory: directory.clone(),
        };
        own_assets.insert(UrlPath::root(), index_file.clone());

        tracing::debug!(
            "Asset bundle {} owns {} of {} manifest entries",
            manifest.version,
            own_assets.len(),
            manifest.entries.len()
        );

        Ok(Self {
            directory,
            manifest,
            parent,
            own_assets,
            index_file,
            runtime_config: OnceLock::new(),
            app_id: OnceLock::new(),
            root_url_string: OnceLock::new(),
        })
    }

    pub fn version(&self) -> &str {
        &self.manifest.version
    }

    pub fn cordova_compatibility_version(&self) -> &str {
        &self.manifest.cordova_compatibility_version
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    pub fn parent(&self) -> Option<&Arc<AssetBundle>> {
        self.parent.as_ref()
    }

    /// This bundle followed by its ancestors, newest first.
    pub fn chain(&self) -> impl Iterator<Item = &AssetBundle> {
        std::iter::successors(Some(self), |bundle| bundle.parent.as_deref())
    }

    /// Directory the bundle's files currently live in.
    pub fn directory(&self) -> Utf8PathBuf {
        self.directory.get()
    }

    pub(crate) fn directory_handle(&self) -> &BundleDirectory {
        &self.directory
    }

    /// Record that the bundle's files were moved to `directory`.
    ///
    /// Every owned asset resolves against the new location afterwards.
    pub fn did_move_to_directory(&self, directory: impl Into<Utf8PathBuf>) {
        let directory = directory.into();
        tracing::debug!(
            "Asset bundle {} moved to {}",
            self.manifest.version,
            directory
        );
        self.directory.set(directory);
    }

    /// Assets that are new in this version, in no particular order.
    pub fn own_assets(&self) -> impl Iterator<Item = &Asset> {
        self.own_assets.values()
    }

    pub fn own_asset_count(&self) -> usize {
        self.own_assets.len()
    }

    pub fn own_asset(&self, url_path: &str) -> Option<&Asset> {
        self.own_assets.get(url_path)
    }

    /// The entry document served at `/`.
    pub fn index_file(&self) -> &Asset {
        &self.index_file
    }

    /// Return the owned asset at `url_path` if it can be reused for `hash`.
    ///
    /// An asset is reusable when it is cacheable and the caller passes no hash,
    /// or when it has a hash equal to `hash`. Ancestors are not consulted.
    pub fn cached_asset_for_url_path(&self, url_path: &str, hash: Option<&str>) -> Option<&Asset> {
        let asset = self.own_assets.get(url_path)?;

        let reusable = (asset.cacheable && hash.is_none())
            || (asset.hash.is_some() && asset.hash.as_deref() == hash);

        reusable.then_some(asset)
    }

    /// Find the asset served at `url_path`, searching this bundle and then its
    /// ancestors from newest to oldest.
    pub fn asset_for_url_path(&self, url_path: &str) -> Option<&Asset> {
        self.chain()
            .find_map(|bundle| bundle.own_assets.get(url_path))
    }

    /// The runtime configuration embedded in the index page.
    ///
    /// Returns `None` if it cannot be extracted; the failure is logged and the
    /// extraction is attempted again on the next call.
    pub fn runtime_config(&self) -> Option<&RuntimeConfig> {
        if let Some(config) = self.runtime_config.get() {
            return Some(config);
        }

        let config = self.load_runtime_config()?;
        Some(self.runtime_config.get_or_init(|| config))
    }

    /// The `appId` from the runtime configuration.
    pub fn app_id(&self) -> Option<&str> {
        if let Some(app_id) = self.app_id.get() {
            return Some(app_id);
        }

        let runtime_config = self.runtime_config()?;
        match runtime_config.app_id() {
            Some(app_id) => Some(self.app_id.get_or_init(|| app_id.to_string())),
            None => {
                tracing::error!("Error reading appId from runtime config");
                None
            }
        }
    }

    /// The `ROOT_URL` from the runtime configuration.
    pub fn root_url_string(&self) -> Option<&str> {
        if let Some(root_url) = self.root_url_string.get() {
            return Some(root_url);
        }

        let runtime_config = self.runtime_config()?;
        match runtime_config.root_url() {
            Some(root_url) => Some(self.root_url_string.get_or_init(|| root_url.to_string())),
            None => {
                tracing::error!("Error reading ROOT_URL from runtime config");
                None
            }
        }
    }

    fn load_runtime_config(&self) -> Option<RuntimeConfig> {
        let index_path = self.index_file.file();
        let document = match std::fs::read_to_string(index_path.as_std_path()) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Error loading index file {}: {}", index_path, e);
                return None;
            }
        };

        match extract_runtime_config(&document) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::error!("Error extracting runtime config from {}: {}", index_path, e);
                None
            }
        }
    }
}

fn asset_from_entry(
    entry: &ManifestEntry,
    url_path: UrlPath,
    directory: &BundleDirectory,
) -> Result<Asset> {
    let source_map_url_path = entry
        .source_map_url_path
        .as_deref()
        .map(UrlPath::parse)
        .transpose()?;

    Ok(Asset {
        file_path: entry.file_path.clone(),
        url_path,
        file_type: entry.file_type.clone(),
        cacheable: entry.cacheable,
        hash: entry.hash.clone(),
        entry_size: entry.size,
        source_map_url_path,
        bundle_directory: directory.clone(),
    })
}
