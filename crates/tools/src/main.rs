use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use periphery_deploy_config::{DeployConfig, Format, Network};
use periphery_tools::Settings;
use tracing::info;

#[derive(Parser)]
#[command(name = "periphery")]
#[command(about = "Inspect and validate periphery deploy configs")]
struct Cli {
    /// Directory holding deploy.toml and config/deploy
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved deploy config
    Show {
        /// Network to resolve (optimism/optimism-goerli/devnet)
        #[arg(short, long)]
        network: Option<Network>,
        /// Output format (toml/json)
        #[arg(short, long, default_value = "toml")]
        format: Format,
        /// Print the settings summary instead of the bare record
        #[arg(short, long)]
        summary: bool,
    },
    /// Validate a deploy config
    Validate {
        /// Network to resolve (optimism/optimism-goerli/devnet)
        #[arg(short, long)]
        network: Option<Network>,
        /// Validate this record file instead of resolving a network
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Write the resolved deploy config to a file
    Export {
        /// Network to resolve (optimism/optimism-goerli/devnet)
        #[arg(short, long)]
        network: Option<Network>,
        /// Destination file
        #[arg(short, long)]
        out: PathBuf,
        /// Output format, defaults to the destination's extension
        #[arg(short, long)]
        format: Option<Format>,
    },
    /// List known networks
    Networks,
}

fn resolve(root: &Path, network: Option<Network>) -> Result<Settings> {
    Settings::load(root, network).context("failed to resolve deploy settings")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            network,
            format,
            summary,
        } => {
            let settings = resolve(&cli.root, network)?;
            if summary {
                settings.print_summary();
            } else {
                print!("{}", settings.deploy_config.render(format)?);
            }
            Ok(())
        }
        Commands::Validate { network, file } => {
            match file {
                Some(path) => {
                    let content = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    DeployConfig::parse(&content, Format::from_path(&path))
                        .with_context(|| format!("{} is invalid", path.display()))?;
                    println!("{}: valid", path.display());
                }
                None => {
                    let settings = resolve(&cli.root, network)?;
                    println!("{} ({}): valid", settings.network, settings.source);
                }
            }
            Ok(())
        }
        Commands::Export {
            network,
            out,
            format,
        } => {
            let settings = resolve(&cli.root, network)?;
            let format = format.unwrap_or_else(|| Format::from_path(&out));
            let rendered = settings.deploy_config.render(format)?;
            tokio::fs::write(&out, rendered)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(network = %settings.network, path = %out.display(), %format, "exported deploy config");
            Ok(())
        }
        Commands::Networks => {
            for network in Network::ALL {
                let builtin = if network.builtin_config().is_some() {
                    "built-in"
                } else {
                    "file only"
                };
                println!(
                    "{:<16} chain {:<6} {:<30} {}",
                    network.as_str(),
                    network.chain_id(),
                    network.default_rpc_url(),
                    builtin
                );
            }
            Ok(())
        }
    }
}
