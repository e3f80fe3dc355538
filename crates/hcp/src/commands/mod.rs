mod check;
mod config;
mod diff;
mod info;

pub use check::{check_asset, resolve_asset, CheckAssetArgs, ResolveAssetArgs};
pub use config::{reset_config, set_platform, show_config, PlatformArg};
pub use diff::{diff_bundle, DiffBundleArgs};
pub use info::{info_bundle, InfoBundleArgs};
