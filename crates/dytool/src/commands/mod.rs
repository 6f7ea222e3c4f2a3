pub mod analyze;
pub mod hide_areas;
pub mod import_areas;
pub mod import_game;
pub mod import_players;
pub mod verify;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;

use dy_core::lex::read_latin1;

/// Conventional locations under the gamedata tree.
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: PathBuf) -> Self {
        Layout { root }
    }

    pub fn area_dir(&self) -> PathBuf {
        self.root.join("area")
    }

    pub fn area_db_dir(&self) -> PathBuf {
        self.root.join("db").join("areas")
    }

    pub fn game_db_path(&self) -> PathBuf {
        self.root.join("db").join("game").join("game.db")
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join("notes")
    }

    pub fn txt_dir(&self) -> PathBuf {
        self.root.join("txt")
    }

    pub fn disabled_path(&self) -> PathBuf {
        self.root.join("disabled.txt")
    }

    pub fn player_dir(&self) -> PathBuf {
        self.root.join("player")
    }

    pub fn player_db_dir(&self) -> PathBuf {
        self.root.join("db").join("players")
    }
}

/// Read a Latin-1 text file that is allowed to be absent.
pub fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    match read_latin1(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
    }
}

/// Read a required Latin-1 text file.
pub fn read_required(path: &Path) -> anyhow::Result<String> {
    read_latin1(path).with_context(|| format!("reading {}", path.display()))
}
