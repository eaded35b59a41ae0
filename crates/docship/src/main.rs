//! docship CLI - publishes static assets into a documentation site after it is built.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "docship")]
#[command(about = "Publishes build output and demos into a documentation site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docship.toml config file
    #[arg(short, long, default_value = "docship.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default docship.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Copy configured directories into the site directory
    Publish {
        /// Site directory (defaults to config or "site")
        #[arg(short, long)]
        site_dir: Option<PathBuf>,
    },

    /// Run as a post-build hook, reading the build config as JSON from stdin
    Hook {
        /// Site directory, replacing the one from the build config
        #[arg(short, long)]
        site_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Publish { site_dir } => {
            commands::publish::run(&cli.config, site_dir)?;
        }
        Commands::Hook { site_dir } => {
            commands::hook::run(&cli.config, site_dir)?;
        }
    }

    Ok(())
}
