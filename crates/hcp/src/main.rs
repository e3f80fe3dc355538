use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{
    check_asset, diff_bundle, info_bundle, reset_config, resolve_asset, set_platform,
    show_config, CheckAssetArgs, DiffBundleArgs, InfoBundleArgs, PlatformArg, ResolveAssetArgs,
};
use miette::Result;

mod commands;
mod errors;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print debug logs from bundle loading
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version, owned assets and runtime config of a bundle
    Info {
        /// The bundle directory
        #[arg(short, long)]
        dir: String,

        /// Installed bundles to deduplicate against, oldest first
        #[arg(short, long = "parent")]
        parents: Vec<String>,
    },
    /// List which assets a bundle owns and which are served by installed bundles
    Diff {
        /// The bundle directory
        #[arg(short, long)]
        dir: String,

        /// Installed bundles to deduplicate against, oldest first
        #[arg(short, long = "parent", required = true)]
        parents: Vec<String>,
    },
    /// Check whether an installed bundle can supply an asset without downloading it
    Check {
        /// The installed bundle directory
        #[arg(short, long)]
        dir: String,

        /// The URL path of the asset, e.g. /app/app.js
        #[arg(short, long)]
        url_path: String,

        /// The hash the new manifest lists for the asset
        #[arg(long)]
        hash: Option<String>,
    },
    /// Print the file that serves a URL path, walking the bundle chain
    Resolve {
        /// The bundle directory
        #[arg(short, long)]
        dir: String,

        /// Installed bundles the bundle was deduplicated against, oldest first
        #[arg(short, long = "parent")]
        parents: Vec<String>,

        /// The URL path to resolve
        #[arg(short, long)]
        url_path: String,
    },
    /// Manage hcp configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set the platform whose compatibility version is read from manifests
    SetPlatform {
        #[arg(value_enum)]
        platform: PlatformArg,
    },
    /// Reset the configuration to defaults
    Reset,
}

fn parse_args() -> Args {
    // Configure colored/styled help output
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "hcp=debug,hcp_bundle=debug"
    } else {
        "hcp=warn,hcp_bundle=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = parse_args();
    init_logging(args.verbose);

    match args.command {
        Commands::Info { dir, parents } => info_bundle(InfoBundleArgs { dir, parents }),
        Commands::Diff { dir, parents } => diff_bundle(DiffBundleArgs { dir, parents }),
        Commands::Check {
            dir,
            url_path,
            hash,
        } => check_asset(CheckAssetArgs {
            dir,
            url_path,
            hash,
        }),
        Commands::Resolve {
            dir,
            parents,
            url_path,
        } => resolve_asset(ResolveAssetArgs {
            dir,
            parents,
            url_path,
        }),
        Commands::Config { command } => match command {
            ConfigCommands::Show => show_config(),
            ConfigCommands::SetPlatform { platform } => set_platform(platform),
            ConfigCommands::Reset => reset_config(),
        },
    }
}
