use crate::println_pad;
use crate::utils::{config, load_bundle_chain};
use colored::Colorize;
use hcp_bundle::{Asset, AssetBundle};

pub struct DiffBundleArgs {
    pub dir: String,
    pub parents: Vec<String>,
}

/// What a bundle needs compared to the bundles it was deduplicated against.
#[derive(Debug)]
pub struct BundleDiff<'a> {
    /// Assets the bundle owns, sorted by URL path. These must be fetched or copied.
    pub owned: Vec<&'a Asset>,
    /// Manifest URL paths served by an ancestor, with that ancestor's version.
    pub reused: Vec<(&'a str, &'a str)>,
}

pub fn diff_against_parents(bundle: &AssetBundle) -> BundleDiff<'_> {
    let mut owned: Vec<_> = bundle.own_assets().collect();
    owned.sort_by(|a, b| a.url_path().cmp(b.url_path()));

    let url_paths = bundle.manifest().entries.iter().flat_map(|entry| {
        std::iter::once(entry.url_path.as_str()).chain(entry.source_map_url_path.as_deref())
    });

    let mut reused = Vec::new();
    for url_path in url_paths {
        if bundle.own_asset(url_path).is_some() {
            continue;
        }

        let owner = bundle
            .chain()
            .skip(1)
            .find(|ancestor| ancestor.own_asset(url_path).is_some());
        if let Some(owner) = owner {
            reused.push((url_path, owner.version()));
        }
    }
    reused.sort();
    reused.dedup();

    BundleDiff { owned, reused }
}

pub fn diff_bundle(args: DiffBundleArgs) -> miette::Result<()> {
    let cfg = config::load_config();
    let bundle = load_bundle_chain(&args.dir, &args.parents, &cfg.bundle)?;
    let diff = diff_against_parents(&bundle);

    println_pad!(
        "{} {} ({} ancestors)",
        "📦 Bundle:".bright_blue().bold(),
        bundle.version().bright_cyan().bold(),
        bundle.chain().count() - 1
    );

    println_pad!(
        "\n{} {}",
        "⬇️  New in this version:".bright_magenta().bold(),
        diff.owned.len().to_string().bright_white()
    );
    for asset in &diff.owned {
        println_pad!(
            "   {} {} {}",
            "+".bright_green(),
            asset.url_path().as_str().bright_white(),
            format!("({})", asset.hash().unwrap_or("no hash")).dimmed()
        );
    }

    println_pad!(
        "\n{} {}",
        "♻️  Served by installed bundles:".bright_magenta().bold(),
        diff.reused.len().to_string().bright_white()
    );
    for (url_path, version) in &diff.reused {
        println_pad!(
            "   {} {} {}",
            "=".bright_cyan(),
            url_path.bright_white(),
            format!("(from {})", version).dimmed()
        );
    }

    Ok(())
}
