//! The `instant-film config` command.

use std::path::Path;

use clap::{Args, Subcommand};
use instant_film_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration and where output goes
    Show,

    /// Show config file path
    Path,

    /// Write a commented config file with the defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command against the configuration loaded at startup.
pub async fn execute(args: ConfigArgs, config: Config) -> anyhow::Result<()> {
    let path = Config::default_path();
    match args.command {
        ConfigCommand::Show => {
            println!("{}", config.to_toml()?);
            println!("{}", describe(&config, &path));
        }

        ConfigCommand::Path => {
            if path.exists() {
                println!("{}", path.display());
            } else {
                println!("{} (not created yet)", path.display());
            }
        }

        ConfigCommand::Init { force } => {
            write_template(&path, force)?;
            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Resolved locations, as comment lines that can follow the TOML dump.
fn describe(config: &Config, path: &Path) -> String {
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (missing, using defaults)", path.display())
    };
    let output_dir = config.output_dir();
    let mode = if config.processing.monochrome {
        "monochrome"
    } else {
        "color film"
    };

    format!(
        "# config file: {}\n# output dir:  {}\n# archive:     {}\n# default mode: {}",
        source,
        output_dir.display(),
        output_dir.join(&config.output.archive_name).display(),
        mode
    )
}

/// Write the default template to `path`, refusing to clobber without `force`.
fn write_template(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, Config::default().template())?;
    Ok(())
}
