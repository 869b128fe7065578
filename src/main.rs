use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use seedkit::core::config::Config;
use seedkit::{commands, utils};

#[derive(Parser)]
#[clap(name = "seedkit")]
#[clap(about = "Fetch the Gradle wrapper and unpack an archived Android project")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file (default: ./seedkit.toml, then the user config directory)
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    /// Show debug logging on stderr
    #[clap(short, long, global = true)]
    verbose: bool,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the wrapper jar to its destination, replacing any existing file
    Fetch {
        /// Source URL
        #[clap(long)]
        url: Option<String>,
        /// Destination file
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract the project archive and copy the project into the working tree
    Unpack {
        /// Archive to extract (.rar, .zip, .tar.gz)
        #[clap(long)]
        archive: Option<PathBuf>,
        /// Scratch directory for the extracted contents (recreated on every run)
        #[clap(long)]
        extract_dir: Option<PathBuf>,
        /// Where the project's top-level entries are copied
        #[clap(long)]
        target_dir: Option<PathBuf>,
        /// External extractor used when in-process extraction fails
        #[clap(long)]
        fallback_tool: Option<String>,
    },
    /// Check the archive and the fallback extractor
    Doctor,
}

fn run(cli: Cli) -> Result<()> {
    let (mut config, source) =
        Config::load(cli.config.as_deref()).map_err(|e| anyhow::anyhow!(e))?;
    tracing::debug!("configuration source: {source}");

    match cli.command {
        Commands::Fetch { url, output } => {
            apply_fetch_overrides(&mut config, url, output)?;
            commands::fetch::fetch_artifact(&config.fetch).map_err(|e| anyhow::anyhow!(e))?;
        }
        Commands::Unpack {
            archive,
            extract_dir,
            target_dir,
            fallback_tool,
        } => {
            let unpack = &mut config.unpack;
            if let Some(archive) = archive {
                unpack.archive = archive;
            }
            if let Some(extract_dir) = extract_dir {
                unpack.extract_dir = extract_dir;
            }
            if let Some(target_dir) = target_dir {
                unpack.target_dir = target_dir;
            }
            if let Some(tool) = fallback_tool {
                unpack.fallback_tool = tool;
            }
            config.validate().map_err(|e| anyhow::anyhow!(e))?;
            commands::unpack::unpack_project(&config.unpack).map_err(|e| anyhow::anyhow!(e))?;
        }
        Commands::Doctor => {
            commands::doctor::check_environment(&config, &source)
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }

    Ok(())
}

fn apply_fetch_overrides(
    config: &mut Config,
    url: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    if let Some(url) = url {
        config.fetch.url = url;
    }
    if let Some(output) = output {
        config.fetch.destination = output;
    }
    config.validate().map_err(|e| anyhow::anyhow!(e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::logging::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        tracing::debug!("command failed: {e:?}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
