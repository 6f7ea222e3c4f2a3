use serde::Serialize;

use super::ExtraDescription;

/// One `A` entry on an object: apply location id plus modifier, kept in
/// file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObjectAffect {
    pub location: i64,
    pub modifier: i64,
}

/// One `Q` block: six activation/deactivation/use messages and a
/// (spectype, specpower) pair. At most one per object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PowerBlock {
    pub chpoweron: String,
    pub chpoweroff: String,
    pub chpoweruse: String,
    pub victpoweron: String,
    pub victpoweroff: String,
    pub victpoweruse: String,
    pub spectype: i64,
    pub specpower: i64,
}

/// An item template. `value` slot meaning depends on `item_type`; slots
/// missing from the source default to 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Object {
    pub vnum: i64,
    /// Keyword list.
    pub name: String,
    pub short_descr: String,
    pub description: String,
    /// Action message; usually empty, not projected by the fixed schema.
    pub action_descr: String,
    pub item_type: i64,
    pub extra_flags: i64,
    pub wear_flags: i64,
    pub value: [i64; 4],
    pub weight: i64,
    pub cost: i64,
    /// Optional third integer of the `weight cost level` line.
    pub level: i64,
    pub affects: Vec<ObjectAffect>,
    pub extra_descs: Vec<ExtraDescription>,
    pub power: Option<PowerBlock>,
}
