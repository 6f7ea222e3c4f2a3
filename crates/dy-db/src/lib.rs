//! dy-db: relational projection of parsed Dystopia data
//!
//! Writes areas, game registers and player saves into SQLite files with a
//! fixed schema. The importer owns its target file exclusively during a
//! run; everything else opens the files read-only.

mod area_db;
mod error;
mod game_db;
mod hidden;
mod player_db;
pub mod schema;

pub use area_db::{ProjectionCounts, write_area_db};
pub use error::ProjectError;
pub use game_db::{
    import_bans, import_bugs, import_disabled, import_gameconfig, import_helps, import_kingdoms,
    import_leaderboard, import_notes, import_topboard, open_game_db,
};
pub use hidden::{HiddenCounts, mark_hidden};
pub use player_db::{PlayerCounts, write_player_db};
