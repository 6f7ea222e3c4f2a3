//! The semantic model: everything one `.are` file declares, held in a
//! single `Area` aggregate owned by the parse that produced it. There is
//! no process-wide registry; cross-area questions go through a
//! `WorldIndex` built from whatever set of areas the caller loaded.

mod mobile;
mod object;
mod reset;
mod room;
mod shop;

use std::collections::BTreeMap;

use serde::Serialize;

pub use mobile::{Dice, DiceError, Mobile};
pub use object::{Object, ObjectAffect, PowerBlock};
pub use reset::Reset;
pub use room::{Direction, Exit, Room, RoomText};
pub use shop::Shop;

/// A keyword/description pair attached to an object or a room. Order
/// among the extras of one owner is significant and preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraDescription {
    pub keyword: String,
    pub description: String,
}

/// One `#HELPS` entry: minimum level, keyword list, body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    pub level: i64,
    pub keyword: String,
    pub text: String,
}

/// Everything parsed out of one area file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Area {
    /// Source file stem; names the per-area database.
    pub file_name: String,
    pub name: String,
    pub builders: String,
    pub lvnum: i64,
    pub uvnum: i64,
    pub security: i64,
    pub recall: i64,
    pub area_flags: i64,
    pub mobiles: BTreeMap<i64, Mobile>,
    pub objects: BTreeMap<i64, Object>,
    pub rooms: BTreeMap<i64, Room>,
    pub resets: Vec<Reset>,
    pub shops: Vec<Shop>,
    /// `mob_vnum -> spec_fun` routine name.
    pub specials: BTreeMap<i64, String>,
    pub helps: Vec<HelpEntry>,
}

impl Area {
    /// True when `vnum` falls inside the declared `[lvnum, uvnum]` range.
    pub fn contains_vnum(&self, vnum: i64) -> bool {
        (self.lvnum..=self.uvnum).contains(&vnum)
    }
}

/// Cross-area room index for exit resolution. Stores, per known room,
/// the destination of each of its exits; enough to answer the one-way
/// question without holding every `Area` alive.
#[derive(Debug, Clone, Default)]
pub struct WorldIndex {
    exits: BTreeMap<i64, BTreeMap<Direction, i64>>,
}

impl WorldIndex {
    pub fn build<'a>(areas: impl IntoIterator<Item = &'a Area>) -> Self {
        let mut exits = BTreeMap::new();
        for area in areas {
            for room in area.rooms.values() {
                let map: BTreeMap<Direction, i64> = room
                    .exits
                    .values()
                    .map(|e| (e.direction, e.to_vnum))
                    .collect();
                exits.insert(room.vnum, map);
            }
        }
        WorldIndex { exits }
    }

    pub fn contains_room(&self, vnum: i64) -> bool {
        self.exits.contains_key(&vnum)
    }

    /// One-way predicate for an exit leaving `room_vnum`: true iff the
    /// destination is not a known room, or the known destination has no
    /// exit in the reverse direction pointing back here. Derived on
    /// demand, never persisted.
    pub fn is_one_way(&self, room_vnum: i64, exit: &Exit) -> bool {
        match self.exits.get(&exit.to_vnum) {
            None => true,
            Some(dest_exits) => {
                dest_exits.get(&exit.direction.reverse()) != Some(&room_vnum)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_with_exit(vnum: i64, dir: Direction, to_vnum: i64) -> Room {
        let mut room = Room::new(vnum, String::new(), String::new(), 0, 0);
        room.exits.insert(
            dir,
            Exit {
                direction: dir,
                description: String::new(),
                keyword: String::new(),
                exit_info: 0,
                key_vnum: 0,
                to_vnum,
            },
        );
        room
    }

    fn area_of(rooms: Vec<Room>) -> Area {
        let mut area = Area::default();
        for room in rooms {
            area.rooms.insert(room.vnum, room);
        }
        area
    }

    #[test]
    fn paired_exits_are_not_one_way() {
        let area = area_of(vec![
            room_with_exit(100, Direction::North, 101),
            room_with_exit(101, Direction::South, 100),
        ]);
        let index = WorldIndex::build([&area]);
        let north = &area.rooms[&100].exits[&Direction::North];
        let south = &area.rooms[&101].exits[&Direction::South];
        assert!(!index.is_one_way(100, north));
        assert!(!index.is_one_way(101, south));
    }

    #[test]
    fn missing_reverse_exit_is_one_way() {
        let mut second = Room::new(101, String::new(), String::new(), 0, 0);
        second.exits.clear();
        let area = area_of(vec![room_with_exit(100, Direction::North, 101), second]);
        let index = WorldIndex::build([&area]);
        let north = &area.rooms[&100].exits[&Direction::North];
        assert!(index.is_one_way(100, north));
    }

    #[test]
    fn exit_to_unknown_room_is_one_way() {
        let area = area_of(vec![room_with_exit(100, Direction::Up, 9999)]);
        let index = WorldIndex::build([&area]);
        let up = &area.rooms[&100].exits[&Direction::Up];
        assert!(index.is_one_way(100, up));
    }

    #[test]
    fn reverse_exit_to_a_different_room_is_still_one_way() {
        // 101 has a south exit, but it points at 102, not back at 100.
        let area = area_of(vec![
            room_with_exit(100, Direction::North, 101),
            room_with_exit(101, Direction::South, 102),
        ]);
        let index = WorldIndex::build([&area]);
        let north = &area.rooms[&100].exits[&Direction::North];
        assert!(index.is_one_way(100, north));
    }

    #[test]
    fn vnum_range() {
        let area = Area {
            lvnum: 100,
            uvnum: 199,
            ..Area::default()
        };
        assert!(area.contains_vnum(100));
        assert!(area.contains_vnum(199));
        assert!(!area.contains_vnum(200));
    }
}
