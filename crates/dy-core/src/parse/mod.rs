//! Strict parser for `.are` files.
//!
//! One pass over the whole file. Sections may appear in any order;
//! unknown sections are fatal. Any structural mismatch (wrong field
//! count, missing tilde, unknown reset command, malformed dice) aborts
//! the parse with a `ParseError` naming the section and the last
//! successfully consumed record vnum. Nothing is ever guessed.

mod records;
mod resets;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::area::Area;
use crate::lex::{Tokenizer, TokenError, read_latin1};

pub use resets::resolve_reset_bindings;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{section}, after record #{record_vnum}: {source}")]
    Token {
        section: &'static str,
        record_vnum: i64,
        #[source]
        source: TokenError,
    },

    #[error("{section}, record #{record_vnum}: {reason}")]
    Record {
        section: &'static str,
        record_vnum: i64,
        reason: String,
    },

    #[error("unknown section #{0}")]
    UnknownSection(String),

    #[error("reset {index}: `{letter}` has no preceding {needed} to bind to")]
    InvariantViolation {
        index: usize,
        letter: char,
        needed: &'static str,
    },
}

/// Parse context: which section we are in and the last record header we
/// consumed. Every lower-level error is stamped with it.
#[derive(Clone, Copy)]
pub(crate) struct Ctx {
    pub section: &'static str,
    pub record_vnum: i64,
}

impl Ctx {
    pub(crate) fn new(section: &'static str) -> Self {
        Ctx { section, record_vnum: 0 }
    }

    pub(crate) fn token(&self, source: TokenError) -> ParseError {
        ParseError::Token {
            section: self.section,
            record_vnum: self.record_vnum,
            source,
        }
    }

    pub(crate) fn record(&self, reason: impl Into<String>) -> ParseError {
        ParseError::Record {
            section: self.section,
            record_vnum: self.record_vnum,
            reason: reason.into(),
        }
    }
}

/// Parse one `.are` file into an `Area` aggregate.
pub fn parse_area_file(path: &Path) -> Result<Area, ParseError> {
    let text = read_latin1(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut area = parse_area_text(&text)?;
    area.file_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(area)
}

/// Parse area source text. Section dispatch lives here; the per-section
/// record loops live in `records` and `resets`.
pub fn parse_area_text(text: &str) -> Result<Area, ParseError> {
    let mut tok = Tokenizer::new(text);
    let mut area = Area::default();

    loop {
        tok.skip_whitespace();
        if tok.at_end() {
            break;
        }
        let Some(section) = tok.peek_section() else {
            // `#$` is the conventional end-of-file marker.
            let ctx = Ctx::new("file");
            let line = tok.read_line().map_err(|e| ctx.token(e))?;
            if line == "#$" {
                continue;
            }
            return Err(ctx.record(format!("stray text {line:?} between sections")));
        };
        let ctx = Ctx::new("file");
        tok.read_section().map_err(|e| ctx.token(e))?;
        match section.as_str() {
            "AREADATA" => records::parse_areadata(&mut tok, &mut area)?,
            "MOBILES" => records::parse_mobiles(&mut tok, &mut area)?,
            "OBJECTS" => records::parse_objects(&mut tok, &mut area)?,
            "ROOMS" | "ROOMDATA" => records::parse_rooms(&mut tok, &mut area)?,
            "RESETS" => resets::parse_resets(&mut tok, &mut area)?,
            "SHOPS" => records::parse_shops(&mut tok, &mut area)?,
            "SPECIALS" => records::parse_specials(&mut tok, &mut area)?,
            "HELPS" => records::parse_helps(&mut tok, &mut area)?,
            other => return Err(ParseError::UnknownSection(other.to_string())),
        }
    }

    Ok(area)
}

/// Split a line into signed integers; any non-numeric token is an error.
pub(crate) fn split_ints(line: &str, ctx: &Ctx) -> Result<Vec<i64>, ParseError> {
    line.split_whitespace()
        .map(|t| {
            t.parse()
                .map_err(|_| ctx.record(format!("expected integer, found {t:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{Direction, Reset};

    const MINIMAL: &str = "\
#AREADATA
Name Tiny~
VNUMs 100 199
Builders None~
Security 1
End

#ROOMS
#100
The Void~
An empty place.~
0 0 0
S
#0
";

    #[test]
    fn minimal_area() {
        let area = parse_area_text(MINIMAL).unwrap();
        assert_eq!(area.name, "Tiny");
        assert_eq!((area.lvnum, area.uvnum), (100, 199));
        assert_eq!(area.builders, "None");
        assert_eq!(area.security, 1);
        let room = &area.rooms[&100];
        assert_eq!(room.name, "The Void");
        assert_eq!(room.description, "An empty place.");
        assert_eq!(room.room_flags, 0);
        assert_eq!(room.sector_type, 0);
        assert!(room.exits.is_empty());
        assert!(area.mobiles.is_empty());
        assert!(area.objects.is_empty());
        assert!(area.resets.is_empty());
    }

    #[test]
    fn roomdata_alias_accepted() {
        let aliased = MINIMAL.replace("#ROOMS", "#ROOMDATA");
        let area = parse_area_text(&aliased).unwrap();
        assert!(area.rooms.contains_key(&100));
    }

    #[test]
    fn unknown_section_is_fatal() {
        let err = parse_area_text("#WIBBLE\n").unwrap_err();
        assert!(matches!(err, ParseError::UnknownSection(ref s) if s == "WIBBLE"));
    }

    #[test]
    fn trailing_end_marker_accepted() {
        let with_marker = format!("{MINIMAL}#$\n");
        assert!(parse_area_text(&with_marker).is_ok());
    }

    #[test]
    fn stray_text_is_fatal() {
        let err = parse_area_text("hello there\n").unwrap_err();
        assert!(matches!(err, ParseError::Record { .. }));
    }

    #[test]
    fn full_mobile_record() {
        let src = "\
#MOBILES
#1000
troll guard~
a troll guard~
A troll guard stands here.
~
The troll is big.
~
8 128 -350 S
500 50 -400 10d10+5000 4d6+20
120000 0 0
1
#0
";
        let area = parse_area_text(src).unwrap();
        let mob = &area.mobiles[&1000];
        assert_eq!(mob.name, "troll guard");
        assert_eq!(mob.short_descr, "a troll guard");
        assert_eq!(mob.long_descr, "A troll guard stands here.\n");
        assert_eq!(mob.description, "The troll is big.\n");
        assert_eq!(mob.act, 8);
        assert_eq!(mob.affected_by, 128);
        assert_eq!(mob.alignment, -350);
        assert_eq!(mob.level, 500);
        assert_eq!(mob.hitroll, 50);
        assert_eq!(mob.ac, -400);
        assert_eq!(mob.hit_dice, crate::area::Dice::new(10, 10, 5000));
        assert_eq!(mob.dam_dice, crate::area::Dice::new(4, 6, 20));
        assert_eq!(mob.gold, 120000);
        assert_eq!(mob.sex, 1);
    }

    #[test]
    fn mobile_missing_stat_line_is_fatal() {
        let src = "\
#MOBILES
#1000
troll~
a troll~
~
~
8 128 -350 S
#0
";
        let err = parse_area_text(src).unwrap_err();
        match err {
            ParseError::Record { section, record_vnum, .. }
            | ParseError::Token { section, record_vnum, .. } => {
                assert_eq!(section, "MOBILES");
                assert_eq!(record_vnum, 1000);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn object_with_affects_and_power_block() {
        let src = "\
#OBJECTS
#2000
sword doom~
the sword of doom~
A sword lies here.~
~
5 64 8193
10 4 8 0
12 150000 50
A
18 15
A
19 12
Q
You feel strong.~
The strength fades.~
~
#RThe blade glows.#n~
~
~
3 45
#0
";
        let area = parse_area_text(src).unwrap();
        let obj = &area.objects[&2000];
        assert_eq!(obj.item_type, 5);
        assert_eq!(obj.extra_flags, 64);
        assert_eq!(obj.wear_flags, 8193);
        assert_eq!(obj.value, [10, 4, 8, 0]);
        assert_eq!((obj.weight, obj.cost, obj.level), (12, 150000, 50));
        assert_eq!(obj.affects.len(), 2);
        assert_eq!((obj.affects[0].location, obj.affects[0].modifier), (18, 15));
        assert_eq!((obj.affects[1].location, obj.affects[1].modifier), (19, 12));
        let power = obj.power.as_ref().unwrap();
        assert_eq!(power.chpoweron, "You feel strong.");
        assert_eq!(power.victpoweron, "#RThe blade glows.#n");
        assert_eq!((power.spectype, power.specpower), (3, 45));
    }

    #[test]
    fn object_short_values_line_pads_with_zero() {
        let src = "\
#OBJECTS
#2000
rock~
a rock~
A rock.~
~
13 0 0
1 1
0 0
#0
";
        let area = parse_area_text(src).unwrap();
        assert_eq!(area.objects[&2000].value, [1, 1, 0, 0]);
        assert_eq!(area.objects[&2000].level, 0);
    }

    #[test]
    fn object_excess_values_are_fatal() {
        let src = "\
#OBJECTS
#2000
rock~
a rock~
A rock.~
~
13 0 0
1 1 1 1 1
0 0
#0
";
        assert!(parse_area_text(src).is_err());
    }

    #[test]
    fn second_power_block_is_fatal() {
        let src = "\
#OBJECTS
#2000
ring~
a ring~
A ring.~
~
9 0 2
0 0 0 0
1 100 0
Q
~
~
~
~
~
~
0 0
Q
~
~
~
~
~
~
0 0
#0
";
        assert!(parse_area_text(src).is_err());
    }

    #[test]
    fn room_with_exits_extras_and_texts() {
        let src = "\
#ROOMDATA
#100
#GThe Gate#n~
A tall gate.
~
0 16385 1
D0
You see the courtyard.
~
gate~
1 2050 101
E
sign~
It says: keep out.
~
T
say open~
The gate swings wide.~
$n speaks to the gate.~
gatekeeper~
1 0 1000
S
#101
Courtyard~
Open ground.
~
0 0 2
D2
~
~
0 -1 100
S
#0
";
        let area = parse_area_text(src).unwrap();
        let gate = &area.rooms[&100];
        assert_eq!(gate.name, "#GThe Gate#n");
        assert_eq!(gate.room_flags, 16385);
        assert_eq!(gate.sector_type, 1);
        let north = &gate.exits[&Direction::North];
        assert_eq!(north.to_vnum, 101);
        assert_eq!(north.exit_info, 1);
        assert_eq!(north.key_vnum, 2050);
        assert_eq!(north.keyword, "gate");
        assert_eq!(north.description, "You see the courtyard.\n");
        assert_eq!(gate.extra_descs.len(), 1);
        assert_eq!(gate.extra_descs[0].keyword, "sign");
        assert_eq!(gate.room_texts.len(), 1);
        let text = &gate.room_texts[0];
        assert_eq!(text.input, "say open");
        assert_eq!((text.kind, text.power, text.mob), (1, 0, 1000));
        let south = &area.rooms[&101].exits[&Direction::South];
        assert_eq!(south.to_vnum, 100);
        assert_eq!(south.key_vnum, -1);
    }

    #[test]
    fn duplicate_room_vnum_is_fatal() {
        let src = "\
#ROOMS
#100
A~
~
0 0 0
S
#100
B~
~
0 0 0
S
#0
";
        assert!(parse_area_text(src).is_err());
    }

    #[test]
    fn shops_and_specials() {
        let src = "\
#SHOPS
1000 5 9 0 0 0 120 90 0 23
0

#SPECIALS
* comment line
M 1000 spec_cast_adept
S
";
        let area = parse_area_text(src).unwrap();
        assert_eq!(area.shops.len(), 1);
        let shop = &area.shops[0];
        assert_eq!(shop.keeper_vnum, 1000);
        assert_eq!(shop.buy_types, [5, 9, 0, 0, 0]);
        assert_eq!((shop.profit_buy, shop.profit_sell), (120, 90));
        assert_eq!((shop.open_hour, shop.close_hour), (0, 23));
        assert_eq!(area.specials[&1000], "spec_cast_adept");
    }

    #[test]
    fn helps_section() {
        let src = "\
#HELPS
0 MURDER KILL~
Attack another character.
~
52 WIZHELP~
Immortal commands.
~
0 $~
";
        let area = parse_area_text(src).unwrap();
        assert_eq!(area.helps.len(), 2);
        assert_eq!(area.helps[0].level, 0);
        assert_eq!(area.helps[0].keyword, "MURDER KILL");
        assert_eq!(area.helps[0].text, "Attack another character.\n");
        assert_eq!(area.helps[1].level, 52);
    }

    #[test]
    fn reset_program_and_bindings() {
        let src = "\
#RESETS
* load the guards
M 1000 1 3000
G 2000 0 0
E 2001 0 5
M 1001 1 3001
G 2002 0 0
O 2100 0 3000
P 2101 0 2100
D 3000 0 1
R 3000 4
S
";
        let area = parse_area_text(src).unwrap();
        assert_eq!(area.resets.len(), 9);
        assert_eq!(area.resets[1].binding(), Some(0));
        assert_eq!(area.resets[2].binding(), Some(0));
        assert_eq!(area.resets[4].binding(), Some(3));
        assert_eq!(area.resets[6].binding(), Some(5));
        assert!(matches!(
            area.resets[7],
            Reset::Door { room_vnum: 3000, direction: 0, state: 1 }
        ));
        assert!(matches!(
            area.resets[8],
            Reset::Randomize { room_vnum: 3000, exit_count: 4 }
        ));
        let letters: String = area.resets.iter().map(|r| r.letter()).collect();
        assert_eq!(letters, "MGEMGOPDR");
    }

    #[test]
    fn give_without_mob_is_invariant_violation() {
        let src = "\
#RESETS
G 2000 0 0
S
";
        let err = parse_area_text(src).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvariantViolation { index: 0, letter: 'G', .. }
        ));
    }

    #[test]
    fn put_without_container_is_invariant_violation() {
        let src = "\
#RESETS
M 1000 1 3000
P 2101 0 2100
S
";
        let err = parse_area_text(src).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvariantViolation { index: 1, letter: 'P', .. }
        ));
    }

    #[test]
    fn unknown_reset_command_is_fatal() {
        let src = "\
#RESETS
X 1 2 3
S
";
        assert!(parse_area_text(src).is_err());
    }

    #[test]
    fn crlf_source_parses_identically() {
        let crlf = MINIMAL.replace('\n', "\r\n");
        assert_eq!(parse_area_text(&crlf).unwrap(), parse_area_text(MINIMAL).unwrap());
    }
}
