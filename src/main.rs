use anyhow::Context;
use clap::{Parser, Subcommand};
use floorsketch::replay::{self, ReplayScript};
use floorsketch::{init_logging, Config, BUILD_DATE, VERSION};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "floorsketch", version, about = "Floorplan sketch engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drive a sketch session from a JSON event script
    Replay {
        script: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the exported PNG here
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write the exported data URI here
        #[arg(long)]
        data_uri: Option<PathBuf>,
        /// Print the committed elements as JSON
        #[arg(long)]
        dump_elements: bool,
    },
    /// Print the effective configuration
    Config {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Config::load_or_default(path).context("Failed to load configuration")
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    info!("floorsketch {} (built {})", VERSION, BUILD_DATE);

    match cli.command {
        Command::Replay {
            script,
            config,
            out,
            data_uri,
            dump_elements,
        } => {
            let config = load_config(config.as_deref())?;
            let script = ReplayScript::load(&script)?;
            let outcome = replay::run(&script, config.session_options())?;

            match &outcome.artifact {
                Some(artifact) => {
                    if let Some(path) = &out {
                        std::fs::write(path, &artifact.png)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        info!("Wrote {}x{} PNG to {}", artifact.width, artifact.height, path.display());
                    }
                    if let Some(path) = &data_uri {
                        std::fs::write(path, &artifact.data_uri)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        info!("Wrote data URI to {}", path.display());
                    }
                }
                None if out.is_some() || data_uri.is_some() => {
                    warn!("Script did not commit the sketch, nothing was exported");
                }
                None => {}
            }

            if dump_elements {
                println!("{}", serde_json::to_string_pretty(&outcome.elements)?);
            }
            info!("Session ended as {:?}", outcome.status);
        }
        Command::Config { config } => {
            let config = load_config(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
