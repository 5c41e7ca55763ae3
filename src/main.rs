use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use habitica_rust::utils::logging::init_logging;
use habitica_rust::{load_settings, AvatarSink, Habitica, UserStyles};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "habitica-rust", version, about = "Habitica API client")]
struct Cli {
    /// Settings file (TOML); defaults to the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an avatar to an image file
    Avatar {
        /// Output file; the format follows the extension
        #[arg(long, short)]
        out: PathBuf,

        /// Style snapshot (JSON). Fetched from the API when omitted.
        #[arg(long)]
        styles: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref()).context("loading settings")?;
    let habitica = Habitica::new(settings).context("creating client")?;

    match cli.command {
        Command::Avatar { out, styles } => {
            let styles = match styles {
                Some(path) => {
                    let json = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("reading {}", path.display()))?;
                    Some(UserStyles::from_json(&json).with_context(|| format!("parsing {}", path.display()))?)
                }
                None => None,
            };

            habitica
                .generate_avatar(AvatarSink::Path(out.clone()), styles)
                .await
                .context("generating avatar")?;
            info!("Avatar written to {}", out.display());
        }
    }

    Ok(())
}
