//! Centralized flag and code tables.
//!
//! Raw integers from the source files are the source of truth and are
//! never rewritten; everything here is pure decode for display and
//! analysis. Bits with no entry in these tables are simply not named —
//! `decode_names` truncates to the known bits while the caller keeps the
//! full raw value.

use bitflags::bitflags;
use strum::{Display, FromRepr};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RoomFlags: i64 {
        const DARK = 1;
        const NO_OTRANS = 2;
        const NO_MOB = 4;
        const INDOORS = 8;
        const SEX = 16;
        const PRIVATE = 512;
        const SAFE = 1024;
        const SOLITARY = 2048;
        const PET_SHOP = 4096;
        const NO_RECALL = 8192;
        const NO_TELEPORT = 16384;
        const TOTAL_DARKNESS = 32768;
        const BLADE_BARRIER = 65536;
        const ARENA = 131072;
        const FLAMING = 262144;
        const SILENCE = 524288;
        const ASTRAL = 1048576;
        const PROTOTYPE = 2097152;
        const ORDER = 4194304;
        const NO_CHANT = 8388608;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExitFlags: i64 {
        const ISDOOR = 1;
        const CLOSED = 2;
        const LOCKED = 4;
        const PICKPROOF = 32;
        const NOPASS = 64;
        const EASY = 128;
        const HARD = 256;
        const INFURIATING = 512;
        const NOCLOSE = 1024;
        const NOLOCK = 2048;
        const ICE_WALL = 4096;
        const FIRE_WALL = 8192;
        const SWORD_WALL = 16384;
        const PRISMATIC_WALL = 32768;
        const IRON_WALL = 65536;
        const MUSHROOM_WALL = 131072;
        const CALTROP_WALL = 262144;
        const ASH_WALL = 524288;
        const WARDING = 1048576;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ActFlags: i64 {
        const IS_NPC = 1;
        const SENTINEL = 2;
        const SCAVENGER = 4;
        const AGGRESSIVE = 8;
        const STAY_AREA = 16;
        const WIMPY = 32;
        const PET = 64;
        const TRAIN = 128;
        const PRACTICE = 256;
        const MOUNT = 512;
        const NOPARTS = 1024;
        const NOEXP = 2048;
        const PROTOTYPE = 4096;
        const NOAUTOKILL = 8192;
        const NOEXP2 = 16384;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AffectFlags: i64 {
        const BLIND = 1;
        const INVISIBLE = 2;
        const DETECT_EVIL = 4;
        const DETECT_INVIS = 8;
        const DETECT_MAGIC = 16;
        const DETECT_HIDDEN = 32;
        const SHADOWPLANE = 64;
        const SANCTUARY = 128;
        const FAERIE_FIRE = 256;
        const INFRARED = 512;
        const CURSE = 1024;
        const FLAMING = 2048;
        const POISON = 4096;
        const PROTECT = 8192;
        const ETHEREAL = 16384;
        const SNEAK = 32768;
        const HIDE = 65536;
        const SLEEP = 131072;
        const CHARM = 262144;
        const FLYING = 524288;
        const PASS_DOOR = 1048576;
        const POLYMORPH = 2097152;
        const SHADOWSIGHT = 4194304;
        const WEBBED = 8388608;
        const PROTECT_GOOD = 16777216;
        const DROWFIRE = 33554432;
        const ZULOFORM = 67108864;
        const SHIFT = 134217728;
        const PEACE = 268435456;
        const INFIRMITY = 536870912;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ItemExtraFlags: i64 {
        const GLOW = 1;
        const HUM = 2;
        const THROWN = 4;
        const KEEP = 8;
        const VANISH = 16;
        const INVIS = 32;
        const MAGIC = 64;
        const NODROP = 128;
        const BLESS = 256;
        const ANTI_GOOD = 512;
        const ANTI_EVIL = 1024;
        const ANTI_NEUTRAL = 2048;
        const NOREMOVE = 4096;
        const INVENTORY = 8192;
    }
}

/// Lowercase names of the known bits set in `raw`. Unknown bits are
/// silently ignored; the raw value stays authoritative.
pub fn decode_names<F>(raw: i64) -> Vec<String>
where
    F: bitflags::Flags<Bits = i64>,
{
    F::from_bits_truncate(raw)
        .iter_names()
        .map(|(name, _)| name.to_lowercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[strum(serialize_all = "snake_case")]
#[repr(i64)]
pub enum Sector {
    Inside = 0,
    City = 1,
    Field = 2,
    Forest = 3,
    Hills = 4,
    Mountain = 5,
    WaterSwim = 6,
    WaterNoswim = 7,
    Unused = 8,
    Air = 9,
    Desert = 10,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[strum(serialize_all = "snake_case")]
#[repr(i64)]
pub enum Sex {
    Neutral = 0,
    Male = 1,
    Female = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[strum(serialize_all = "snake_case")]
#[repr(i64)]
pub enum ItemType {
    Light = 1,
    Scroll = 2,
    Wand = 3,
    Staff = 4,
    Weapon = 5,
    Treasure = 8,
    Armor = 9,
    Potion = 10,
    Furniture = 12,
    Trash = 13,
    Container = 15,
    DrinkCon = 17,
    Key = 18,
    Food = 19,
    Money = 20,
    Boat = 22,
    CorpseNpc = 23,
    CorpsePc = 24,
    Fountain = 25,
    Pill = 26,
    Portal = 27,
    Egg = 28,
    Voodoo = 29,
    Stake = 30,
    Missile = 31,
    Ammo = 32,
    Quest = 33,
    Questcard = 34,
    Questmachine = 35,
    Symbol = 36,
    Book = 37,
    Page = 38,
    Tool = 39,
    Wall = 40,
    Copper = 41,
    Iron = 42,
    Steel = 43,
    Adamantite = 44,
    Gemstone = 45,
    Hilt = 46,
    Dtoken = 47,
    Head = 48,
    Cookingpot = 50,
    Dragongem = 51,
    Wgate = 52,
    Instrument = 53,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[strum(serialize_all = "snake_case")]
#[repr(i64)]
pub enum ApplyType {
    None = 0,
    Str = 1,
    Dex = 2,
    Int = 3,
    Wis = 4,
    Con = 5,
    Sex = 6,
    Class = 7,
    Level = 8,
    Age = 9,
    Height = 10,
    Weight = 11,
    Mana = 12,
    Hit = 13,
    Move = 14,
    Gold = 15,
    Exp = 16,
    Ac = 17,
    Hitroll = 18,
    Damroll = 19,
    SavingPara = 20,
    SavingRod = 21,
    SavingPetri = 22,
    SavingBreath = 23,
    SavingSpell = 24,
    Poly = 25,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[strum(serialize_all = "snake_case")]
#[repr(i64)]
pub enum WearLocation {
    Light = 0,
    FingerL = 1,
    FingerR = 2,
    Neck1 = 3,
    Neck2 = 4,
    Body = 5,
    Head = 6,
    Legs = 7,
    Feet = 8,
    Hands = 9,
    Arms = 10,
    Shield = 11,
    About = 12,
    Waist = 13,
    WristL = 14,
    WristR = 15,
    Wield = 16,
    Hold = 17,
    Third = 18,
    Fourth = 19,
    Face = 20,
    ScabbardL = 21,
    ScabbardR = 22,
    Special = 23,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undocumented_bits_survive_decode() {
        // Bit 1 (dark) plus undocumented bit 14.
        let raw: i64 = 16385;
        let names = decode_names::<RoomFlags>(raw);
        assert_eq!(names, vec!["dark".to_string()]);
        // The raw value itself is untouched by decoding.
        assert_eq!(raw, 16385);
    }

    #[test]
    fn act_flag_names() {
        let names = decode_names::<ActFlags>(8 | 512 | 2048);
        assert_eq!(names, vec!["aggressive", "mount", "noexp"]);
    }

    #[test]
    fn sanctuary_bit() {
        assert!(AffectFlags::from_bits_truncate(128).contains(AffectFlags::SANCTUARY));
    }

    #[test]
    fn sector_codes() {
        assert_eq!(Sector::from_repr(0), Some(Sector::Inside));
        assert_eq!(Sector::from_repr(10), Some(Sector::Desert));
        assert_eq!(Sector::from_repr(11), None);
        assert_eq!(Sector::WaterNoswim.to_string(), "water_noswim");
    }

    #[test]
    fn item_type_codes() {
        assert_eq!(ItemType::from_repr(5), Some(ItemType::Weapon));
        assert_eq!(ItemType::from_repr(9), Some(ItemType::Armor));
        assert_eq!(ItemType::from_repr(49), None);
    }

    #[test]
    fn apply_type_codes() {
        assert_eq!(ApplyType::from_repr(18), Some(ApplyType::Hitroll));
        assert_eq!(ApplyType::from_repr(19), Some(ApplyType::Damroll));
        assert_eq!(ApplyType::from_repr(17), Some(ApplyType::Ac));
    }
}
