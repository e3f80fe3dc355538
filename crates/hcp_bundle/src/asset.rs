//! Assets and the shared bundle directory handle they resolve against.

use crate::bundle::AssetBundle;
use crate::url_path::UrlPath;
use camino::{Utf8Path, Utf8PathBuf};
use hcp_manifest::FileType;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to the directory a bundle currently lives in.
///
/// The bundle and every asset it owns hold clones of the same handle, so
/// relocating the bundle is visible through all of its assets at once. The
/// handle also serves as the asset's back-reference to its owning bundle.
#[derive(Debug, Clone)]
pub struct BundleDirectory(Arc<RwLock<Utf8PathBuf>>);

impl BundleDirectory {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self(Arc::new(RwLock::new(path)))
    }

    pub fn get(&self) -> Utf8PathBuf {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, path: Utf8PathBuf) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = path;
    }

    pub fn join(&self, path: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .join(path)
    }

    /// Whether both handles belong to the same bundle.
    pub fn same_bundle(&self, other: &BundleDirectory) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// One file inside a bundle.
///
/// Assets are created while a bundle is constructed and never change afterwards.
#[derive(Debug, Clone)]
pub struct Asset {
    pub(crate) file_path: Utf8PathBuf,
    pub(crate) url_path: UrlPath,
    pub(crate) file_type: FileType,
    pub(crate) cacheable: bool,
    pub(crate) hash: Option<String>,
    pub(crate) entry_size: Option<u64>,
    pub(crate) source_map_url_path: Option<UrlPath>,
    pub(crate) bundle_directory: BundleDirectory,
}

impl Asset {
    /// Path relative to the owning bundle's directory.
    pub fn file_path(&self) -> &Utf8Path {
        &self.file_path
    }

    pub fn url_path(&self) -> &UrlPath {
        &self.url_path
    }

    pub fn file_type(&self) -> &FileType {
        &self.file_type
    }

    pub fn is_cacheable(&self) -> bool {
        self.cacheable
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn entry_size(&self) -> Option<u64> {
        self.entry_size
    }

    pub fn source_map_url_path(&self) -> Option<&UrlPath> {
        self.source_map_url_path.as_ref()
    }

    /// Absolute location of the file: the owning bundle's current directory
    /// joined with [`file_path`](Self::file_path). The file is not checked for
    /// existence.
    pub fn file(&self) -> Utf8PathBuf {
        self.bundle_directory.join(&self.file_path)
    }

    /// Whether `bundle` is the bundle that owns this asset.
    pub fn belongs_to(&self, bundle: &AssetBundle) -> bool {
        self.bundle_directory.same_bundle(bundle.directory_handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_in(directory: &BundleDirectory) -> Asset {
        Asset {
            file_path: Utf8PathBuf::from("app/app.js"),
            url_path: UrlPath::parse("/app/app.js").unwrap(),
            file_type: FileType::from("js".to_string()),
            cacheable: true,
            hash: Some("abc".to_string()),
            entry_size: Some(42),
            source_map_url_path: None,
            bundle_directory: directory.clone(),
        }
    }

    #[test]
    fn test_file_joins_bundle_directory() {
        let directory = BundleDirectory::new(Utf8PathBuf::from("/bundles/v1"));
        let asset = asset_in(&directory);

        assert_eq!(asset.file(), Utf8PathBuf::from("/bundles/v1/app/app.js"));
    }

    #[test]
    fn test_file_follows_relocation() {
        let directory = BundleDirectory::new(Utf8PathBuf::from("/bundles/downloading"));
        let asset = asset_in(&directory);

        directory.set(Utf8PathBuf::from("/bundles/v2"));
        assert_eq!(asset.file(), Utf8PathBuf::from("/bundles/v2/app/app.js"));
    }

    #[test]
    fn test_same_bundle() {
        let first = BundleDirectory::new(Utf8PathBuf::from("/bundles/v1"));
        let second = BundleDirectory::new(Utf8PathBuf::from("/bundles/v1"));

        assert!(first.same_bundle(&first.clone()));
        assert!(!first.same_bundle(&second));
    }
}
