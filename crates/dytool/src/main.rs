//! dytool: import, verify and analyze Dystopia legacy data.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::Layout;

#[derive(Parser)]
#[command(name = "dytool", version, about = "Import, verify and analyze Dystopia legacy data")]
struct Cli {
    /// Root of the gamedata tree.
    #[arg(long, global = true, default_value = "gamedata")]
    gamedata: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project every area listed in area.lst into per-area databases.
    ImportAreas {
        /// Directory holding the .are files and area.lst.
        #[arg(long)]
        area_dir: Option<PathBuf>,
        /// Output directory for the per-area .db files.
        #[arg(long)]
        db_dir: Option<PathBuf>,
        /// Parse and report counts without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Import helps, board notes, bugs, bans and game registers into game.db.
    ImportGame {
        /// Path of the shared game database.
        #[arg(long)]
        db_path: Option<PathBuf>,
        /// Parse and report counts without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Project every player save into a per-player database.
    ImportPlayers {
        /// Directory holding the player save files.
        #[arg(long)]
        player_dir: Option<PathBuf>,
        /// Output directory for the per-player .db files.
        #[arg(long)]
        db_dir: Option<PathBuf>,
        /// Parse and report counts without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Mark the areas named in hidden.lst in their databases.
    HideAreas {
        #[arg(long)]
        area_dir: Option<PathBuf>,
        #[arg(long)]
        db_dir: Option<PathBuf>,
    },
    /// Reparse every area and compare it field by field with its database.
    Verify {
        #[arg(long)]
        area_dir: Option<PathBuf>,
        #[arg(long)]
        db_dir: Option<PathBuf>,
    },
    /// Emit balance reports for every area as JSON.
    Analyze {
        #[arg(long)]
        area_dir: Option<PathBuf>,
        /// Write the report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let layout = Layout::new(cli.gamedata);

    let result = match cli.command {
        Command::ImportAreas { area_dir, db_dir, dry_run } => {
            commands::import_areas::run(&layout, area_dir, db_dir, dry_run)
        }
        Command::ImportGame { db_path, dry_run } => {
            commands::import_game::run(&layout, db_path, dry_run)
        }
        Command::ImportPlayers { player_dir, db_dir, dry_run } => {
            commands::import_players::run(&layout, player_dir, db_dir, dry_run)
        }
        Command::HideAreas { area_dir, db_dir } => {
            commands::hide_areas::run(&layout, area_dir, db_dir)
        }
        Command::Verify { area_dir, db_dir } => commands::verify::run(&layout, area_dir, db_dir),
        Command::Analyze { area_dir, output } => commands::analyze::run(&layout, area_dir, output),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
