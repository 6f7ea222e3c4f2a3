//! The reset program: the ordered sequence of spawn/place/equip
//! instructions executed at world reset.
//!
//! `G`, `E` and `P` bind to an earlier instruction in the program. The
//! binding is resolved once at parse time and stored as an index into
//! the reset list (`mob_slot` / `container_slot`), so consumers never
//! have to rediscover the implicit cursor.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reset {
    /// `M mob limit room` — spawn `mob` in `room` unless the global
    /// population of that mob already reached `limit`.
    Mob { mob_vnum: i64, limit: i64, room_vnum: i64 },
    /// `O obj limit room` — place an object on the room floor.
    Object { obj_vnum: i64, limit: i64, room_vnum: i64 },
    /// `G obj limit 0` — give to the most recently spawned mob.
    Give { obj_vnum: i64, limit: i64, arg3: i64, mob_slot: usize },
    /// `E obj limit wear` — equip on the most recently spawned mob.
    Equip { obj_vnum: i64, limit: i64, wear_loc: i64, mob_slot: usize },
    /// `P obj limit container` — put inside the latest instance of the
    /// container object. `limit` carries no known semantics and is
    /// preserved verbatim.
    Put { obj_vnum: i64, limit: i64, container_vnum: i64, container_slot: usize },
    /// `D room direction state` — set a door state.
    Door { room_vnum: i64, direction: i64, state: i64 },
    /// `R room n` — shuffle the first `n` exits of the room.
    Randomize { room_vnum: i64, exit_count: i64 },
}

impl Reset {
    /// The single-letter command as written in the source file.
    pub fn letter(&self) -> char {
        match self {
            Reset::Mob { .. } => 'M',
            Reset::Object { .. } => 'O',
            Reset::Give { .. } => 'G',
            Reset::Equip { .. } => 'E',
            Reset::Put { .. } => 'P',
            Reset::Door { .. } => 'D',
            Reset::Randomize { .. } => 'R',
        }
    }

    /// The three argument columns exactly as projected (`R` pads its
    /// missing third argument with 0).
    pub fn args(&self) -> (i64, i64, i64) {
        match *self {
            Reset::Mob { mob_vnum, limit, room_vnum } => (mob_vnum, limit, room_vnum),
            Reset::Object { obj_vnum, limit, room_vnum } => (obj_vnum, limit, room_vnum),
            Reset::Give { obj_vnum, limit, arg3, .. } => (obj_vnum, limit, arg3),
            Reset::Equip { obj_vnum, limit, wear_loc, .. } => (obj_vnum, limit, wear_loc),
            Reset::Put { obj_vnum, limit, container_vnum, .. } => {
                (obj_vnum, limit, container_vnum)
            }
            Reset::Door { room_vnum, direction, state } => (room_vnum, direction, state),
            Reset::Randomize { room_vnum, exit_count } => (room_vnum, exit_count, 0),
        }
    }

    /// Index of the reset this one binds to, if it binds at all.
    pub fn binding(&self) -> Option<usize> {
        match *self {
            Reset::Give { mob_slot, .. } | Reset::Equip { mob_slot, .. } => Some(mob_slot),
            Reset::Put { container_slot, .. } => Some(container_slot),
            _ => None,
        }
    }
}
