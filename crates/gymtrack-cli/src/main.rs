//! gymtrack CLI
//!
//! Command-line front end for the gym membership store

use clap::{Parser, Subcommand};
use gymtrack_core::logging_facility;
use gymtrack_engine::GymEngine;
use std::path::PathBuf;

mod commands;
mod config;

use config::GymtrackConfig;

#[derive(Debug, Parser)]
#[command(name = "gymtrack")]
#[command(about = "Gym membership tracker - members and workout sessions", long_about = None)]
struct Cli {
    /// Database file (overrides GYMTRACK_DATABASE and the config file)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Config file (defaults to ./gymtrack.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Member operations
    Member(commands::member::MemberArgs),
    /// Workout session operations
    Session(commands::session::SessionArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = GymtrackConfig::load(cli.config.as_deref())?;
    logging_facility::init(config.log_profile);

    let db_path = config.resolve_database(
        cli.database.as_deref(),
        std::env::var_os(config::DATABASE_ENV),
    );
    let mut engine = GymEngine::open(&db_path)?;

    match cli.command {
        Commands::Member(args) => commands::member::execute(args, &mut engine),
        Commands::Session(args) => commands::session::execute(args, &mut engine),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
