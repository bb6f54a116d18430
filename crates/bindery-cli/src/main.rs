//! Bindery CLI - inspect and replay custom input bindings

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, inspect, keys, replay};

#[derive(Parser)]
#[command(name = "bindery")]
#[command(about = "Custom key and mouse bindings for tile-based RPG maps", long_about = None)]
#[command(version)]
struct Cli {
    /// Log every assignment and dispatch
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the key table with its factory mappings
    Keys,

    /// Apply a binding config to a fresh game and show the result
    Check {
        /// Path to binding config (TOML)
        config: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the bindings stored in a save file
    Inspect {
        /// Path to save file (TOML)
        save: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Run a scripted input session against a headless grid map
    Replay {
        /// Path to binding config (TOML)
        config: String,

        /// Path to session file (TOML)
        session: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match cli.command {
        Commands::Keys => keys::run(),
        Commands::Check { config, format } => check::run(&config, &format),
        Commands::Inspect { save, format } => inspect::run(&save, &format),
        Commands::Replay { config, session } => replay::run(&config, &session),
    }
}
