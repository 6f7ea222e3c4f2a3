//! Player save files: `#PLAYERS ... End`, any number of
//! `#OBJECT ... End` blocks, then `#END`.
//!
//! Values are key-tagged rather than positional, so the parser carries
//! the fixed key tables of the save format: which keys take a
//! tilde-terminated string, which take one integer, and which take a
//! fixed-length integer array. Everything is kept under its file key so
//! the projection round-trips byte for bit, legacy keys included.

use serde::Serialize;

use crate::lex::Tokenizer;

use super::RegisterError;

const KIND: &str = "player save";

/// Keys whose value is one tilde-terminated string.
const STRING_KEYS: &[&str] = &[
    "Name", "Switchname", "ShortDescr", "LongDescr", "ObjDesc", "Description", "Lord", "Clan",
    "Morph", "Createtime", "Lasttime", "Lasthost", "Poweraction", "Powertype", "Prompt",
    "Cprompt", "Password", "Bamfin", "Bamfout", "Title", "Decapmessage", "Loginmessage",
    "Logoutmessage", "Avatarmessage", "Tiemessage", "Conception", "Parents", "Cparents",
    "Marriage", "Lastdecap1", "Lastdecap2",
    // Legacy keys still present in old saves.
    "Email", "Smite", "Breath1", "Breath2", "Breath3", "Breath4", "Breath5",
];

/// Keys whose value is a single integer.
const INT_KEYS: &[&str] = &[
    "Sex", "Class", "Level", "Trust", "Played", "Gold", "Exp", "Expgained", "Act", "Extra",
    "Newbits", "Special", "AffectedBy", "Immune", "Polyaff", "Itemaffect", "Form", "Beast",
    "Home", "Spectype", "Specpower", "Position", "Practice", "SavingThrow", "Alignment",
    "XHitroll", "XDamroll", "Hitroll", "Damroll", "Armor", "Wimpy", "Deaf", "Kingdom", "Quest",
    "Rank", "Bounty", "Security", "Jflags", "Souls", "Rage", "Generation", "Flag2", "Flag3",
    "Flag4", "Monkstuff", "Monkcrap", "Garou1", "Garou2", "Room", "Awin", "Alos", "Exhaustion",
    "Upgradelevel", "Meanparadox", "Relrank", "Runecount", "Revision", "Gnosis", "DiscRese",
    "DiscPoin", "CurrentForm", "SilTol", "Questsrun", "Queststotal", "Objvnum", "Warps",
    "WarpCount",
    // Legacy keys.
    "Vnum", "Race", "Demonic", "Dragonaff", "Dragonage", "Drowaff", "Drowpwr", "Drowmag",
    "Hatch", "MageFlags", "Levelexp", "Vampaff", "Vampgen", "Power_Point", "Wolf", "Explevel",
];

/// Keys whose value is a fixed-length run of integers.
const ARRAY_KEYS: &[(&str, usize)] = &[
    ("CPower", 44),
    ("Weapons", 13),
    ("Spells", 5),
    ("Combat", 8),
    ("Locationhp", 7),
    ("HpManaMove", 6),
    ("PkPdMkMd", 4),
    ("Chi", 2),
    ("Focus", 2),
    ("Monkab", 4),
    ("Gifts", 21),
    ("Paradox", 3),
    ("AttrPerm", 5),
    ("AttrMod", 5),
    ("Language", 2),
    ("Stage", 3),
    ("Score", 6),
    ("Genes", 10),
    ("Power", 20),
    ("Stats", 12),
    ("FakeCon", 8),
    ("Condition", 3),
    ("StatAbility", 4),
    ("StatAmount", 4),
    ("StatDuration", 4),
    ("Stance", 12),
    ("Stance2", 12),
    // Legacy keys.
    ("Disc", 11),
    ("Wolfform", 2),
    ("Runes", 4),
];

const OBJ_STRING_KEYS: &[&str] = &[
    "Name", "ShortDescr", "Description", "Poweronch", "Poweroffch", "Powerusech", "Poweronvict",
    "Poweroffvict", "Powerusevict", "Questmaker", "Questowner",
];

const OBJ_INT_KEYS: &[&str] = &[
    "Nest", "Vnum", "ExtraFlags", "ExtraFlags2", "WeapFlags", "WearFlags", "WearLoc", "ItemType",
    "Weight", "Spectype", "Specpower", "Condition", "Toughness", "Resistance", "Quest", "Points",
    "Level", "Timer", "Cost",
];

/// A timed character affect carried in the save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerAffect {
    pub skill: String,
    pub duration: i64,
    pub modifier: i64,
    pub location: i64,
    pub bitvector: i64,
}

/// One carried object, keyed exactly as the save file keys it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlayerObject {
    pub strings: Vec<(String, String)>,
    pub ints: Vec<(String, i64)>,
    pub values: [i64; 4],
    /// `(duration, modifier, location)` triples.
    pub affects: Vec<(i64, i64, i64)>,
    pub extra_descs: Vec<(String, String)>,
    /// `(value, spell name)` pairs.
    pub spells: Vec<(i64, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlayerSave {
    pub strings: Vec<(String, String)>,
    pub ints: Vec<(String, i64)>,
    pub arrays: Vec<(String, Vec<i64>)>,
    pub skills: Vec<(String, i64)>,
    pub aliases: Vec<(String, String)>,
    pub affects: Vec<PlayerAffect>,
    /// `(board name, last read note stamp)` pairs.
    pub boards: Vec<(String, i64)>,
    pub objects: Vec<PlayerObject>,
}

impl PlayerSave {
    /// The character's name, when the save carries one.
    pub fn name(&self) -> Option<&str> {
        self.strings
            .iter()
            .find(|(k, _)| k == "Name")
            .map(|(_, v)| v.as_str())
    }
}

pub fn parse_player_save(text: &str) -> Result<PlayerSave, RegisterError> {
    let mut tok = Tokenizer::new(text);
    let mut save = PlayerSave::default();

    loop {
        tok.skip_whitespace();
        if tok.at_end() {
            return Ok(save);
        }
        let section = read_word(&mut tok)?;
        match section.as_str() {
            "#PLAYERS" => parse_player_section(&mut tok, &mut save)?,
            "#OBJECT" => {
                let obj = parse_object_section(&mut tok)?;
                save.objects.push(obj);
            }
            "#END" => return Ok(save),
            other => {
                return Err(RegisterError::malformed(
                    KIND,
                    format!("unknown section {other:?}"),
                ));
            }
        }
    }
}

fn parse_player_section(tok: &mut Tokenizer, save: &mut PlayerSave) -> Result<(), RegisterError> {
    loop {
        let key = read_word(tok)?;
        if key == "End" {
            return Ok(());
        }
        if STRING_KEYS.contains(&key.as_str()) {
            let value = read_string(tok)?;
            save.strings.push((key, value));
        } else if INT_KEYS.contains(&key.as_str()) {
            let value = read_int(tok)?;
            save.ints.push((key, value));
        } else if let Some(&(_, count)) = ARRAY_KEYS.iter().find(|(k, _)| *k == key) {
            let values = read_ints(tok, count)?;
            save.arrays.push((key, values));
        } else {
            match key.as_str() {
                "Skill" => {
                    let value = read_int(tok)?;
                    let name = read_word(tok)?;
                    save.skills.push((name, value));
                }
                "Alias" => {
                    let short_n = read_string(tok)?;
                    let long_n = read_string(tok)?;
                    save.aliases.push((short_n, long_n));
                }
                "AffectData" => {
                    let skill = read_word(tok)?;
                    let numbers = read_ints(tok, 4)?;
                    save.affects.push(PlayerAffect {
                        skill,
                        duration: numbers[0],
                        modifier: numbers[1],
                        location: numbers[2],
                        bitvector: numbers[3],
                    });
                }
                "Boards" => {
                    let count = read_int(tok)?;
                    for _ in 0..count {
                        let board = read_word(tok)?;
                        let last_note = read_int(tok)?;
                        save.boards.push((board, last_note));
                    }
                }
                other => {
                    return Err(RegisterError::malformed(
                        KIND,
                        format!("unknown player key {other:?}"),
                    ));
                }
            }
        }
    }
}

fn parse_object_section(tok: &mut Tokenizer) -> Result<PlayerObject, RegisterError> {
    let mut obj = PlayerObject::default();
    loop {
        let key = read_word(tok)?;
        if key == "End" {
            return Ok(obj);
        }
        if OBJ_STRING_KEYS.contains(&key.as_str()) {
            let value = read_string(tok)?;
            obj.strings.push((key, value));
        } else if OBJ_INT_KEYS.contains(&key.as_str()) {
            let value = read_int(tok)?;
            obj.ints.push((key, value));
        } else {
            match key.as_str() {
                "Values" => {
                    let values = read_ints(tok, 4)?;
                    obj.values.copy_from_slice(&values);
                }
                "AffectData" => {
                    let numbers = read_ints(tok, 3)?;
                    obj.affects.push((numbers[0], numbers[1], numbers[2]));
                }
                "ExtraDescr" => {
                    let keyword = read_string(tok)?;
                    let description = read_string(tok)?;
                    obj.extra_descs.push((keyword, description));
                }
                "Spell" => {
                    let value = read_int(tok)?;
                    let name = read_word(tok)?;
                    obj.spells.push((value, name));
                }
                other => {
                    return Err(RegisterError::malformed(
                        KIND,
                        format!("unknown object key {other:?}"),
                    ));
                }
            }
        }
    }
}

fn read_word(tok: &mut Tokenizer) -> Result<String, RegisterError> {
    tok.read_word()
        .map_err(|source| RegisterError::Token { file_kind: KIND, source })
}

/// The save writer pads strings with leading whitespace after the key;
/// the reader skips it and trims the tail, like the C `fread_string`.
fn read_string(tok: &mut Tokenizer) -> Result<String, RegisterError> {
    tok.skip_whitespace();
    let raw = tok
        .read_tilde_string()
        .map_err(|source| RegisterError::Token { file_kind: KIND, source })?;
    let cleaned = raw.trim_end();
    // The engine writes literal "(null)" for unset strings.
    Ok(if cleaned == "(null)" { String::new() } else { cleaned.to_string() })
}

fn read_int(tok: &mut Tokenizer) -> Result<i64, RegisterError> {
    tok.read_int()
        .map_err(|source| RegisterError::Token { file_kind: KIND, source })
}

fn read_ints(tok: &mut Tokenizer, count: usize) -> Result<Vec<i64>, RegisterError> {
    tok.read_ints(count)
        .map_err(|source| RegisterError::Token { file_kind: KIND, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAVE: &str = "\
#PLAYERS
Name Taz~
Password abcXYZ123~
Title  the Undying~
Level 12
Room 3001
HpManaMove 500 500 400 400 300 300
PkPdMkMd 10 2 5000 40
Skill 75 'cure light'
Alias gc~
get all corpse~
AffectData 'sanctuary' 10 0 0 128
Boards 2 General 1041681600 Ideas 0
End

#OBJECT
Nest 0
Vnum 2000
Name sword doom~
WearLoc 16
Values 10 4 8 0
AffectData 0 15 18
ExtraDescr rune~
A faint rune glows.~
Spell 5 'fireball'
End

#END
";

    #[test]
    fn full_save_round_trip_structure() {
        let save = parse_player_save(SAVE).unwrap();
        assert_eq!(save.name(), Some("Taz"));
        assert_eq!(save.strings.len(), 3);
        assert_eq!(save.ints, vec![
            ("Level".to_string(), 12),
            ("Room".to_string(), 3001),
        ]);
        assert_eq!(save.arrays.len(), 2);
        assert_eq!(save.arrays[0].0, "HpManaMove");
        assert_eq!(save.arrays[0].1, vec![500, 500, 400, 400, 300, 300]);
        assert_eq!(save.skills, vec![("cure light".to_string(), 75)]);
        assert_eq!(save.aliases, vec![("gc".to_string(), "get all corpse".to_string())]);
        assert_eq!(save.affects[0].skill, "sanctuary");
        assert_eq!(save.affects[0].bitvector, 128);
        assert_eq!(save.boards.len(), 2);
        assert_eq!(save.boards[0], ("General".to_string(), 1041681600));

        assert_eq!(save.objects.len(), 1);
        let obj = &save.objects[0];
        assert_eq!(obj.ints.iter().find(|(k, _)| k == "Vnum"), Some(&("Vnum".to_string(), 2000)));
        assert_eq!(obj.values, [10, 4, 8, 0]);
        assert_eq!(obj.affects, vec![(0, 15, 18)]);
        assert_eq!(obj.extra_descs[0].0, "rune");
        assert_eq!(obj.spells, vec![(5, "fireball".to_string())]);
    }

    #[test]
    fn null_placeholder_becomes_empty() {
        let src = "#PLAYERS\nName Taz~\nClan (null)~\nEnd\n#END\n";
        let save = parse_player_save(src).unwrap();
        assert_eq!(save.strings[1], ("Clan".to_string(), String::new()));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let src = "#PLAYERS\nBogus 12\nEnd\n#END\n";
        assert!(parse_player_save(src).is_err());
    }

    #[test]
    fn missing_end_marker_is_an_error() {
        let src = "#PLAYERS\nName Taz~\n";
        assert!(parse_player_save(src).is_err());
    }
}
