//! Point d'entrée CLI pour aoi-cli

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod geocode;

use cli::Commands;

/// Inspecter, convertir et géocoder des zones d'intérêt GeoJSON
#[derive(Parser)]
#[command(name = "aoi-cli")]
#[command(author, version)]
#[command(about = "Inspecter, convertir et géocoder des zones d'intérêt (AOI)")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Charger .env avant tout (endpoint du géocodeur, user-agent)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Inspect { path } => {
            info!(path = %path.display(), "Inspect shape");
            cli::cmd_inspect(&path)?;
        }
        Commands::Export { path, output } => {
            info!(path = %path.display(), "Normalize shape");
            cli::cmd_export(&path, output.as_deref())?;
        }
        Commands::Search { query } => {
            info!(query = %query, "Geocode query");
            cli::cmd_search(&query).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
