//! Per-section record loops: `#AREADATA`, `#MOBILES`, `#OBJECTS`,
//! `#ROOMS`/`#ROOMDATA`, `#SHOPS`, `#SPECIALS`, `#HELPS`.
//!
//! Object and room bodies are sequences of tagged variants (`A`/`E`/`Q`
//! and `D<n>`/`E`/`T`/`S`); each loop consumes variants until its
//! terminator.

use crate::area::{
    Area, Dice, Direction, Exit, ExtraDescription, HelpEntry, Mobile, Object, ObjectAffect,
    PowerBlock, Room, RoomText, Shop,
};
use crate::lex::Tokenizer;

use super::{Ctx, ParseError, split_ints};

pub(crate) fn parse_areadata(tok: &mut Tokenizer, area: &mut Area) -> Result<(), ParseError> {
    let ctx = Ctx::new("AREADATA");
    loop {
        tok.skip_whitespace();
        let line = tok.read_line().map_err(|e| ctx.token(e))?;
        if line == "End" {
            return Ok(());
        }
        if line.is_empty() {
            continue;
        }
        let (key, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line.as_str(), ""));
        let rest = rest.trim();
        match key {
            "Name" => area.name = tilde_value(rest),
            "Builders" => area.builders = tilde_value(rest),
            "VNUMs" => {
                let ints = split_ints(rest, &ctx)?;
                let [l, u] = ints[..] else {
                    return Err(ctx.record("VNUMs wants exactly two integers"));
                };
                area.lvnum = l;
                area.uvnum = u;
            }
            "Security" => area.security = single_int(rest, &ctx, "Security")?,
            "Recall" => area.recall = single_int(rest, &ctx, "Recall")?,
            "Flags" => area.area_flags = single_int(rest, &ctx, "Flags")?,
            other => return Err(ctx.record(format!("unknown area header key {other:?}"))),
        }
    }
}

/// Header values end in a tilde on the same line; a bare value without
/// one is tolerated, as the legacy reader was.
fn tilde_value(rest: &str) -> String {
    rest.strip_suffix('~').unwrap_or(rest).trim().to_string()
}

fn single_int(rest: &str, ctx: &Ctx, key: &str) -> Result<i64, ParseError> {
    let ints = split_ints(rest, ctx)?;
    let [v] = ints[..] else {
        return Err(ctx.record(format!("{key} wants exactly one integer")));
    };
    Ok(v)
}

pub(crate) fn parse_mobiles(tok: &mut Tokenizer, area: &mut Area) -> Result<(), ParseError> {
    let mut ctx = Ctx::new("MOBILES");
    loop {
        tok.skip_whitespace();
        if tok.peek_section().is_some() {
            return Ok(());
        }
        let Some(vnum) = tok.read_vnum_header().map_err(|e| ctx.token(e))? else {
            return Ok(());
        };
        ctx.record_vnum = vnum;
        let mob = parse_one_mobile(tok, vnum, &ctx)?;
        if area.mobiles.insert(vnum, mob).is_some() {
            return Err(ctx.record("duplicate mobile vnum"));
        }
    }
}

fn parse_one_mobile(tok: &mut Tokenizer, vnum: i64, ctx: &Ctx) -> Result<Mobile, ParseError> {
    let name = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
    let short_descr = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
    let long_descr = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
    let description = tok.read_tilde_string().map_err(|e| ctx.token(e))?;

    // act affected_by alignment S
    let line = tok.read_line().map_err(|e| ctx.token(e))?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [act, affected_by, alignment, marker] = tokens[..] else {
        return Err(ctx.record(format!("malformed act line {line:?}")));
    };
    if marker != "S" {
        return Err(ctx.record(format!("expected simple-mobile marker 'S', found {marker:?}")));
    }
    let stats = split_ints(&format!("{act} {affected_by} {alignment}"), ctx)?;

    // level hitroll ac hit_dice dam_dice
    let line = tok.read_line().map_err(|e| ctx.token(e))?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [level, hitroll, ac, hit, dam] = tokens[..] else {
        return Err(ctx.record(format!("malformed level line {line:?}")));
    };
    let combat = split_ints(&format!("{level} {hitroll} {ac}"), ctx)?;
    let hit_dice: Dice = hit.parse().map_err(|e| ctx.record(format!("{e}")))?;
    let dam_dice: Dice = dam.parse().map_err(|e| ctx.record(format!("{e}")))?;

    // gold xp position; only gold is modeled.
    let line = tok.read_line().map_err(|e| ctx.token(e))?;
    let money = split_ints(&line, ctx)?;
    let [gold, _xp, _position] = money[..] else {
        return Err(ctx.record(format!("malformed gold line {line:?}")));
    };

    let line = tok.read_line().map_err(|e| ctx.token(e))?;
    let sex = single_int(&line, ctx, "sex line")?;

    Ok(Mobile {
        vnum,
        name,
        short_descr,
        long_descr,
        description,
        act: stats[0],
        affected_by: stats[1],
        alignment: stats[2],
        level: combat[0],
        hitroll: combat[1],
        ac: combat[2],
        hit_dice,
        dam_dice,
        gold,
        sex,
    })
}

pub(crate) fn parse_objects(tok: &mut Tokenizer, area: &mut Area) -> Result<(), ParseError> {
    let mut ctx = Ctx::new("OBJECTS");
    loop {
        tok.skip_whitespace();
        if tok.peek_section().is_some() {
            return Ok(());
        }
        let Some(vnum) = tok.read_vnum_header().map_err(|e| ctx.token(e))? else {
            return Ok(());
        };
        ctx.record_vnum = vnum;
        let obj = parse_one_object(tok, vnum, &ctx)?;
        if area.objects.insert(vnum, obj).is_some() {
            return Err(ctx.record("duplicate object vnum"));
        }
    }
}

fn parse_one_object(tok: &mut Tokenizer, vnum: i64, ctx: &Ctx) -> Result<Object, ParseError> {
    let name = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
    let short_descr = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
    let description = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
    let action_descr = tok.read_tilde_string().map_err(|e| ctx.token(e))?;

    let line = tok.read_line().map_err(|e| ctx.token(e))?;
    let kinds = split_ints(&line, ctx)?;
    let [item_type, extra_flags, wear_flags] = kinds[..] else {
        return Err(ctx.record(format!("malformed type line {line:?}")));
    };

    // v0..v3; missing slots default to 0, excess is an error.
    let line = tok.read_line().map_err(|e| ctx.token(e))?;
    let slots = split_ints(&line, ctx)?;
    if slots.len() > 4 {
        return Err(ctx.record(format!("too many value slots in {line:?}")));
    }
    let mut value = [0i64; 4];
    value[..slots.len()].copy_from_slice(&slots);

    // weight cost [level]
    let line = tok.read_line().map_err(|e| ctx.token(e))?;
    let wc = split_ints(&line, ctx)?;
    let (weight, cost, level) = match wc[..] {
        [w, c] => (w, c, 0),
        [w, c, l] => (w, c, l),
        _ => return Err(ctx.record(format!("malformed weight/cost line {line:?}"))),
    };

    let mut obj = Object {
        vnum,
        name,
        short_descr,
        description,
        action_descr,
        item_type,
        extra_flags,
        wear_flags,
        value,
        weight,
        cost,
        level,
        affects: Vec::new(),
        extra_descs: Vec::new(),
        power: None,
    };

    loop {
        tok.skip_whitespace();
        if tok.at_end() || tok.peek_char() == Some('#') {
            return Ok(obj);
        }
        let tag = tok.read_line().map_err(|e| ctx.token(e))?;
        match tag.as_str() {
            "A" => {
                let line = tok.read_line().map_err(|e| ctx.token(e))?;
                let ints = split_ints(&line, ctx)?;
                let [location, modifier] = ints[..] else {
                    return Err(ctx.record(format!("malformed affect line {line:?}")));
                };
                obj.affects.push(ObjectAffect { location, modifier });
            }
            "E" => {
                let keyword = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                let description = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                obj.extra_descs.push(ExtraDescription { keyword, description });
            }
            "Q" => {
                if obj.power.is_some() {
                    return Err(ctx.record("more than one power block"));
                }
                let mut power = PowerBlock::default();
                for slot in [
                    &mut power.chpoweron,
                    &mut power.chpoweroff,
                    &mut power.chpoweruse,
                    &mut power.victpoweron,
                    &mut power.victpoweroff,
                    &mut power.victpoweruse,
                ] {
                    *slot = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                }
                let line = tok.read_line().map_err(|e| ctx.token(e))?;
                let ints = split_ints(&line, ctx)?;
                let [spectype, specpower] = ints[..] else {
                    return Err(ctx.record(format!("malformed spec line {line:?}")));
                };
                power.spectype = spectype;
                power.specpower = specpower;
                obj.power = Some(power);
            }
            other => return Err(ctx.record(format!("unknown object tag {other:?}"))),
        }
    }
}

pub(crate) fn parse_rooms(tok: &mut Tokenizer, area: &mut Area) -> Result<(), ParseError> {
    let mut ctx = Ctx::new("ROOMS");
    loop {
        tok.skip_whitespace();
        if tok.peek_section().is_some() {
            return Ok(());
        }
        let Some(vnum) = tok.read_vnum_header().map_err(|e| ctx.token(e))? else {
            return Ok(());
        };
        ctx.record_vnum = vnum;
        let room = parse_one_room(tok, vnum, &ctx)?;
        if area.rooms.insert(vnum, room).is_some() {
            return Err(ctx.record("duplicate room vnum"));
        }
    }
}

fn parse_one_room(tok: &mut Tokenizer, vnum: i64, ctx: &Ctx) -> Result<Room, ParseError> {
    let name = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
    let description = tok.read_tilde_string().map_err(|e| ctx.token(e))?;

    // <area-index> <room_flags> <sector>; the area index is positional
    // noise and is discarded.
    let line = tok.read_line().map_err(|e| ctx.token(e))?;
    let header = split_ints(&line, ctx)?;
    let [_area_idx, room_flags, sector_type] = header[..] else {
        return Err(ctx.record(format!("malformed room header line {line:?}")));
    };

    let mut room = Room::new(vnum, name, description, room_flags, sector_type);

    loop {
        tok.skip_whitespace();
        let tag = tok.read_line().map_err(|e| ctx.token(e))?;
        match tag.as_str() {
            "S" => return Ok(room),
            "E" => {
                let keyword = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                let description = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                room.extra_descs.push(ExtraDescription { keyword, description });
            }
            "T" => {
                let input = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                let output = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                let choutput = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                let name = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                let line = tok.read_line().map_err(|e| ctx.token(e))?;
                let ints = split_ints(&line, ctx)?;
                let [kind, power, mob] = ints[..] else {
                    return Err(ctx.record(format!("malformed room text line {line:?}")));
                };
                room.room_texts.push(RoomText { input, output, choutput, name, kind, power, mob });
            }
            door if door.starts_with('D') => {
                let direction = door[1..]
                    .parse::<i64>()
                    .ok()
                    .and_then(Direction::from_repr)
                    .ok_or_else(|| ctx.record(format!("bad exit direction {door:?}")))?;
                let description = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                let keyword = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
                let line = tok.read_line().map_err(|e| ctx.token(e))?;
                let ints = split_ints(&line, ctx)?;
                let [exit_info, key_vnum, to_vnum] = ints[..] else {
                    return Err(ctx.record(format!("malformed exit line {line:?}")));
                };
                let exit = Exit { direction, description, keyword, exit_info, key_vnum, to_vnum };
                if room.exits.insert(direction, exit).is_some() {
                    return Err(ctx.record(format!("duplicate {direction} exit")));
                }
            }
            other => return Err(ctx.record(format!("unknown room tag {other:?}"))),
        }
    }
}

pub(crate) fn parse_shops(tok: &mut Tokenizer, area: &mut Area) -> Result<(), ParseError> {
    let ctx = Ctx::new("SHOPS");
    loop {
        tok.skip_whitespace();
        let line = tok.read_line().map_err(|e| ctx.token(e))?;
        if line == "0" {
            return Ok(());
        }
        if line.is_empty() || line.starts_with('*') {
            continue;
        }
        let ints = split_ints(&line, &ctx)?;
        let [keeper, b0, b1, b2, b3, b4, profit_buy, profit_sell, open_hour, close_hour] = ints[..]
        else {
            return Err(ctx.record(format!("shop line wants ten integers, got {line:?}")));
        };
        area.shops.push(Shop {
            keeper_vnum: keeper,
            buy_types: [b0, b1, b2, b3, b4],
            profit_buy,
            profit_sell,
            open_hour,
            close_hour,
        });
    }
}

pub(crate) fn parse_specials(tok: &mut Tokenizer, area: &mut Area) -> Result<(), ParseError> {
    let ctx = Ctx::new("SPECIALS");
    loop {
        tok.skip_whitespace();
        let line = tok.read_line().map_err(|e| ctx.token(e))?;
        if line == "S" {
            return Ok(());
        }
        if line.is_empty() || line.starts_with('*') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let ["M", vnum, routine] = tokens[..] else {
            return Err(ctx.record(format!("malformed special line {line:?}")));
        };
        let vnum: i64 = vnum
            .parse()
            .map_err(|_| ctx.record(format!("bad mob vnum {vnum:?}")))?;
        area.specials.insert(vnum, routine.to_string());
    }
}

pub(crate) fn parse_helps(tok: &mut Tokenizer, area: &mut Area) -> Result<(), ParseError> {
    let ctx = Ctx::new("HELPS");
    loop {
        tok.skip_whitespace();
        let line = tok.read_line().map_err(|e| ctx.token(e))?;
        if line.is_empty() {
            continue;
        }
        let (level, keyword) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| ctx.record(format!("malformed help header {line:?}")))?;
        let level: i64 = level
            .parse()
            .map_err(|_| ctx.record(format!("bad help level {level:?}")))?;
        let keyword = keyword
            .trim()
            .strip_suffix('~')
            .ok_or_else(|| ctx.record(format!("help keyword missing tilde in {line:?}")))?
            .to_string();
        if level == 0 && keyword == "$" {
            return Ok(());
        }
        let text = tok.read_tilde_string().map_err(|e| ctx.token(e))?;
        area.helps.push(HelpEntry { level, keyword, text });
    }
}
