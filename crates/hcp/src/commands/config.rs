use crate::errors::CliError;
use crate::utils::config::{self, AppConfig};
use colored::Colorize;
use hcp_bundle::Platform;
use miette::Result;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PlatformArg {
    Android,
    Ios,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Android => Platform::Android,
            PlatformArg::Ios => Platform::Ios,
        }
    }
}

fn config_path_display() -> String {
    config::default_config_path()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn show_config() -> Result<()> {
    let cfg = config::load_config();

    println!();
    println!("  {} {}", "config_file:".bright_white(), config_path_display());
    println!(
        "  {} {}",
        "platform:".bright_white(),
        cfg.bundle.platform.to_string().bright_green()
    );
    println!(
        "  {} {}",
        "manifest_file_name:".bright_white(),
        cfg.bundle.manifest_file_name
    );
    println!(
        "  {} {}",
        "index_file_name:".bright_white(),
        cfg.bundle.index_file_name
    );
    println!();
    Ok(())
}

pub fn set_platform(platform: PlatformArg) -> Result<()> {
    let mut cfg = config::load_config();
    cfg.bundle.platform = platform.into();
    config::save_config(&cfg).map_err(CliError::config_save)?;

    println!("{}", "✓ Platform set successfully!".bright_green().bold());
    println!();
    println!(
        "  {} {}",
        "Platform:".bright_white().bold(),
        cfg.bundle.platform.to_string().bright_green()
    );

    Ok(())
}

pub fn reset_config() -> Result<()> {
    config::save_config(&AppConfig::default()).map_err(CliError::config_save)?;

    println!(
        "{}",
        "✓ Configuration reset to defaults".bright_green().bold()
    );
    println!();
    println!(
        "  {} {}",
        "Config file:".bright_white().bold(),
        config_path_display()
    );

    Ok(())
}
