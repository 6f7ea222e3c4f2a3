//! dy-core: parsing and semantic model for Dystopia legacy data
//!
//! This crate turns the game's tilde-terminated text formats (area files,
//! boards, bans, player saves, game-wide registers) into typed values, and
//! derives balance reports from them. It performs no database I/O; the
//! relational projection lives in `dy-db`.

pub mod analyze;
pub mod area;
pub mod flags;
pub mod lex;
pub mod parse;
pub mod registers;

pub use area::Area;
pub use parse::{ParseError, parse_area_file, parse_area_text};
