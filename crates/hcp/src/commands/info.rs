use crate::println_pad;
use crate::utils::{config, load_bundle_chain};
use colored::Colorize;
use miette::IntoDiagnostic;
use serde_json::to_string_pretty;

pub struct InfoBundleArgs {
    pub dir: String,
    pub parents: Vec<String>,
}

pub fn info_bundle(args: InfoBundleArgs) -> miette::Result<()> {
    let cfg = config::load_config();
    let bundle = load_bundle_chain(&args.dir, &args.parents, &cfg.bundle)?;

    println_pad!(
        "{} {}",
        "📦 Bundle:".bright_blue().bold(),
        bundle.directory().as_str().bright_cyan().bold()
    );
    println_pad!(
        "{} {}",
        "🏷️ Version:".bright_green(),
        bundle.version().bright_white().bold()
    );
    println_pad!(
        "{} {} {}",
        "🧩 Compatibility:".bright_yellow(),
        bundle.cordova_compatibility_version().bright_white(),
        format!("({})", cfg.bundle.platform).dimmed()
    );
    println_pad!(
        "{} {} {}",
        "🗂️ Assets:".bright_magenta(),
        bundle.own_asset_count().to_string().bright_white().bold(),
        format!("owned of {} manifest entries", bundle.manifest().entries.len()).dimmed()
    );

    println_pad!("\n{}", "⚙️  Runtime config:".bright_magenta().bold());
    print_value("appId", bundle.app_id());
    print_value("ROOT_URL", bundle.root_url_string());

    if let Some(runtime_config) = bundle.runtime_config() {
        let pretty = to_string_pretty(runtime_config.as_object()).into_diagnostic()?;
        println_pad!("\n{}", "🧾 Full runtime config (JSON):".bright_magenta().bold());
        println_pad!("{}", pretty);
    }

    Ok(())
}

fn print_value(name: &str, value: Option<&str>) {
    match value {
        Some(value) => println_pad!(
            "   {} {} {}",
            "•".bright_cyan(),
            format!("{}:", name).bright_white(),
            value.bright_green()
        ),
        None => println_pad!(
            "   {} {} {}",
            "•".bright_cyan(),
            format!("{}:", name).bright_white(),
            "(not available)".bright_yellow()
        ),
    }
}
