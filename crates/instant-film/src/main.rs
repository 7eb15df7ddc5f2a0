//! Instant Film CLI - turns photographs into instant film renditions.
//!
//! Every selected photo is resampled, graded, tinted, vignetted, grained,
//! scratched and light-leaked, then written out as a PNG. The results can
//! also be bundled into one ZIP archive.
//!
//! # Usage
//!
//! ```bash
//! # Style a single photo
//! instant-film process beach.jpg
//!
//! # Style a directory in black and white and bundle the results
//! instant-film process ./photos/ --monochrome --archive
//!
//! # View configuration
//! instant-film config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Instant Film - turns photographs into instant film renditions.
#[derive(Parser, Debug)]
#[command(name = "instant-film")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Style photos and write the results
    Process(cli::process::ProcessArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match instant_film_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `instant-film config path`."
            );
            instant_film_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Instant Film v{}", instant_film_core::VERSION);

    match cli.command {
        Commands::Process(args) => cli::process::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config).await,
    }
}
