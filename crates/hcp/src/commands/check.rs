use crate::errors::CliError;
use crate::println_pad;
use crate::utils::{config, load_bundle, load_bundle_chain, parse_url_path};
use colored::Colorize;

pub struct CheckAssetArgs {
    pub dir: String,
    pub url_path: String,
    pub hash: Option<String>,
}

/// Ask an installed bundle whether it can supply `url_path` for `hash`.
pub fn check_asset(args: CheckAssetArgs) -> miette::Result<()> {
    let cfg = config::load_config();
    let url_path = parse_url_path(&args.url_path)?;
    let bundle = load_bundle(&args.dir, None, &cfg.bundle)?;

    match bundle.cached_asset_for_url_path(url_path.as_str(), args.hash.as_deref()) {
        Some(asset) => {
            println!("{}", "✓ Cached asset can be reused".bright_green().bold());
            println!();
            println_pad!("{} {}", "File:".bright_white().bold(), asset.file());
            println_pad!(
                "{} {}",
                "Hash:".bright_white().bold(),
                asset.hash().unwrap_or("(none)")
            );
        }
        None => {
            println!("{}", "✗ Asset must be downloaded".bright_yellow().bold());
            println!();
            match bundle.own_asset(url_path.as_str()) {
                Some(asset) if asset.is_cacheable() => println_pad!(
                    "  {} Installed hash {} does not match",
                    "•".bright_cyan(),
                    asset.hash().unwrap_or("(none)")
                ),
                Some(asset) => println_pad!(
                    "  {} Asset is not cacheable and installed hash {} does not match",
                    "•".bright_cyan(),
                    asset.hash().unwrap_or("(none)")
                ),
                None => println_pad!(
                    "  {} Bundle {} has no asset at {}",
                    "•".bright_cyan(),
                    bundle.version(),
                    url_path
                ),
            }
        }
    }

    Ok(())
}

pub struct ResolveAssetArgs {
    pub dir: String,
    pub parents: Vec<String>,
    pub url_path: String,
}

/// Find the file that serves `url_path`, walking the bundle chain.
pub fn resolve_asset(args: ResolveAssetArgs) -> miette::Result<()> {
    let cfg = config::load_config();
    let url_path = parse_url_path(&args.url_path)?;
    let bundle = load_bundle_chain(&args.dir, &args.parents, &cfg.bundle)?;

    let asset = bundle
        .asset_for_url_path(url_path.as_str())
        .ok_or_else(|| CliError::asset_not_found(url_path.to_string()))?;

    let owner = bundle
        .chain()
        .find(|candidate| asset.belongs_to(candidate))
        .map(|owner| owner.version())
        .unwrap_or("unknown");

    println!("{}", asset.file());
    println_pad!(
        "{} {} {}",
        "Served by:".bright_white().bold(),
        owner.bright_green(),
        format!("({})", asset.file_type()).dimmed()
    );

    Ok(())
}
