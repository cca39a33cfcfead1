use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use facestore_core::{frame_hash, FrameSource, ImageFrameSource, SelectorConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "facestore", about = "Face cache and reference selection diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the static cache key of each image
    Hash {
        /// Image files to digest
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Show the effective face selector configuration
    Config {
        /// TOML file to load instead of $FACESTORE_CONFIG
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hash { paths } => {
            let mut source = ImageFrameSource;
            for path in paths {
                let frame = source
                    .read_frame(&path, None)
                    .with_context(|| format!("reading {}", path.display()))?;
                match frame_hash(&frame) {
                    Some(hash) => println!("{hash}  {}", path.display()),
                    None => println!("blank  {}", path.display()),
                }
            }
        }
        Commands::Config { file } => {
            let config = match file {
                Some(path) => SelectorConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?
                    .with_env_overrides(),
                None => SelectorConfig::from_env(),
            };
            tracing::debug!(?config, "resolved selector config");
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
