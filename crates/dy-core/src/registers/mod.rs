//! Parsers for the loose text registers that live next to the area
//! files: bulletin-board notes, bug reports, bans, disabled commands,
//! game-wide config and score tables, the area/hidden index lists and
//! per-player save files.
//!
//! These are parse-only; projection into the shared game database lives
//! in the relational crate.

mod bans;
mod bugs;
mod gamedata;
mod lists;
mod notes;
mod player;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::lex::TokenError;

pub use bans::{Ban, DisabledCommand, parse_bans, parse_disabled};
pub use bugs::{Bug, parse_bugs};
pub use gamedata::{
    Kingdom, LEADER_CATEGORIES, LeaderboardEntry, TopboardEntry, parse_gameconfig,
    parse_kingdoms, parse_leaderboard, parse_topboard,
};
pub use lists::{parse_area_list, parse_hidden_list};
pub use notes::{BOARD_NAMES, Note, parse_notes};
pub use player::{PlayerAffect, PlayerObject, PlayerSave, parse_player_save};

#[derive(Error, Debug)]
pub enum RegisterError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{file_kind}: {source}")]
    Token {
        file_kind: &'static str,
        #[source]
        source: TokenError,
    },

    #[error("{file_kind}: {reason}")]
    Malformed {
        file_kind: &'static str,
        reason: String,
    },
}

impl RegisterError {
    pub(crate) fn malformed(file_kind: &'static str, reason: impl Into<String>) -> Self {
        RegisterError::Malformed {
            file_kind,
            reason: reason.into(),
        }
    }
}
