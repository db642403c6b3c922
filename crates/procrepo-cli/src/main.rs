//! procrepo CLI
//!
//! Command-line interface over a process repository engine

use clap::{Parser, Subcommand};
use procrepo_engine::{Engine, EngineConfig};
use std::path::PathBuf;

mod commands;
mod output;

#[derive(Debug, Parser)]
#[command(name = "procrepo")]
#[command(about = "procrepo - Process repository catalog", long_about = None)]
struct Cli {
    /// SQLite file holding the catalog; overrides the config file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// TOML engine config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Deployment operations
    Deployment(commands::deployment::DeploymentArgs),
    /// Process definition operations
    Definition(commands::definition::DefinitionArgs),
    /// Model draft operations
    Model(commands::model::ModelArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(db) = cli.db {
        config = config.with_database(db);
    }

    let mut engine = Engine::new(config)?;

    match cli.command {
        Commands::Deployment(args) => commands::deployment::execute(args, &engine)?,
        Commands::Definition(args) => commands::definition::execute(args, &engine)?,
        Commands::Model(args) => commands::model::execute(args, &engine)?,
    }

    engine.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
