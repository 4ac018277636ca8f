//! Command-line front end for the adventure engine.

mod commands;

use std::path::PathBuf;
use std::process;

use adv_save::SaveConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "adventure",
    about = "Adventure engine: play and check text adventure world files",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory for save slots (default: $ADVENTURE_SAVE_DIR or ~/.adventure-saves)
    #[arg(long, global = true)]
    save_dir: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a world file interactively
    Play {
        /// Path to the world file
        world: PathBuf,

        /// Resume from a save slot
        #[arg(short, long)]
        load: Option<String>,
    },

    /// Validate a world file and report problems
    Check {
        /// Path to the world file
        world: PathBuf,
    },

    /// Print the rooms and items of a world file
    Show {
        /// Path to the world file
        world: PathBuf,

        /// Print the loaded world as JSON
        #[arg(long)]
        json: bool,
    },

    /// List save slots
    Saves,

    /// Delete a save slot
    DeleteSave {
        /// Slot name
        slot: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let saves = SaveConfig::from_env();
    let saves = match cli.save_dir {
        Some(dir) => saves.with_dir(dir),
        None => saves,
    };

    let result = match cli.command {
        Commands::Play { world, load } => commands::play::run(&world, &saves, load.as_deref()),
        Commands::Check { world } => commands::check::run(&world),
        Commands::Show { world, json } => commands::show::run(&world, json),
        Commands::Saves => commands::saves::run(&saves),
        Commands::DeleteSave { slot } => commands::delete_save::run(&saves, &slot),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
