use std::collections::BTreeMap;

use serde::Serialize;
use strum::{Display, EnumIter, FromRepr};

use super::ExtraDescription;

/// The six exit directions, numbered as in the source files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumIter, FromRepr,
)]
#[strum(serialize_all = "lowercase")]
#[repr(i64)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
    Up = 4,
    Down = 5,
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// One directed exit. `to_vnum <= 0` is a blocked exit (a door leading
/// nowhere); it is kept and projected verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exit {
    pub direction: Direction,
    pub description: String,
    pub keyword: String,
    pub exit_info: i64,
    pub key_vnum: i64,
    pub to_vnum: i64,
}

/// A scripted room trigger: input pattern, outputs, and three integers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomText {
    pub input: String,
    pub output: String,
    pub choutput: String,
    pub name: String,
    pub kind: i64,
    pub power: i64,
    pub mob: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub vnum: i64,
    pub name: String,
    pub description: String,
    pub room_flags: i64,
    pub sector_type: i64,
    /// Exits keyed by direction; a room has at most one exit per direction.
    pub exits: BTreeMap<Direction, Exit>,
    pub extra_descs: Vec<ExtraDescription>,
    pub room_texts: Vec<RoomText>,
}

impl Room {
    pub fn new(vnum: i64, name: String, description: String, room_flags: i64, sector_type: i64) -> Self {
        Room {
            vnum,
            name,
            description,
            room_flags,
            sector_type,
            exits: BTreeMap::new(),
            extra_descs: Vec::new(),
            room_texts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn direction_numbering_matches_source_files() {
        assert_eq!(Direction::from_repr(0), Some(Direction::North));
        assert_eq!(Direction::from_repr(3), Some(Direction::West));
        assert_eq!(Direction::from_repr(5), Some(Direction::Down));
        assert_eq!(Direction::from_repr(6), None);
    }

    #[test]
    fn reverse_is_an_involution() {
        for dir in Direction::iter() {
            assert_eq!(dir.reverse().reverse(), dir);
        }
        assert_eq!(Direction::North.reverse(), Direction::South);
        assert_eq!(Direction::Up.reverse(), Direction::Down);
    }
}
