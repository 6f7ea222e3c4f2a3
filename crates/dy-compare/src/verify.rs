use std::fmt;
use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, params};
use thiserror::Error;

use dy_core::area::{Area, WorldIndex};
use dy_core::parse::{ParseError, parse_area_file};

use crate::mismatch::{Mismatch, VerifyReport};

/// Raised only when an input cannot be opened at all. Data disagreement
/// is never an error; it is collected into the report.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A database cell, reduced to the two storage classes the fixed schema
/// uses.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Int(i64),
    Text(String),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Int(v) => write!(f, "{v}"),
            Field::Text(v) => write!(f, "{v}"),
        }
    }
}

fn int(v: i64) -> Field {
    Field::Int(v)
}

fn text(v: &str) -> Field {
    Field::Text(v.to_string())
}

/// Fetch every row of a query as (column name, cell) pairs.
fn fetch_rows<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Vec<(String, Field)>>, VerifyError> {
    let mut stmt = conn.prepare(sql)?;
    let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    let mut rows = stmt.query(params)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut fields = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            let value = match row.get_ref(i)? {
                ValueRef::Null => Field::Text(String::new()),
                ValueRef::Integer(v) => Field::Int(v),
                ValueRef::Real(v) => Field::Text(v.to_string()),
                ValueRef::Text(t) => Field::Text(String::from_utf8_lossy(t).into_owned()),
                ValueRef::Blob(_) => Field::Text("<blob>".to_string()),
            };
            fields.push((name.clone(), value));
        }
        out.push(fields);
    }
    Ok(out)
}

fn compare_row(
    out: &mut Vec<Mismatch>,
    entity: &'static str,
    key: &str,
    expected: &[(&'static str, Field)],
    actual: &[(String, Field)],
) {
    for (field, want) in expected {
        match actual.iter().find(|(name, _)| name == field) {
            Some((_, got)) if got == want => {}
            Some((_, got)) => out.push(Mismatch::new(
                entity,
                key,
                *field,
                want.to_string(),
                got.to_string(),
            )),
            None => out.push(Mismatch::new(
                entity,
                key,
                *field,
                want.to_string(),
                "<missing column>",
            )),
        }
    }
}

/// Report rows present in the db but absent from the source, or the
/// other way round.
fn presence(
    out: &mut Vec<Mismatch>,
    entity: &'static str,
    key: &str,
    expected_present: bool,
) {
    let (expected, actual) = if expected_present {
        ("present", "missing")
    } else {
        ("missing", "present")
    };
    out.push(Mismatch::new(entity, key, "row", expected, actual));
}

fn db_vnums(conn: &Connection, sql: &str) -> Result<Vec<i64>, VerifyError> {
    let mut stmt = conn.prepare(sql)?;
    let vnums = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;
    Ok(vnums)
}

/// Compare a parsed area against its projected database, field by field.
/// `world` supplies cross-area rooms for the reverse-exit check; pass
/// `None` to derive it from this area alone.
pub fn verify_area(
    area: &Area,
    db_path: &Path,
    world: Option<&WorldIndex>,
) -> Result<VerifyReport, VerifyError> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    let mut out = Vec::new();

    check_area_row(area, &conn, &mut out)?;
    check_mobiles(area, &conn, &mut out)?;
    check_objects(area, &conn, &mut out)?;
    check_rooms(area, &conn, &mut out)?;
    check_resets(area, &conn, &mut out)?;
    check_shops(area, &conn, &mut out)?;
    check_specials(area, &conn, &mut out)?;

    let local_index;
    let index = match world {
        Some(index) => index,
        None => {
            local_index = WorldIndex::build([area]);
            &local_index
        }
    };
    check_reverse_exits(area, &conn, index, &mut out)?;

    Ok(VerifyReport {
        file_name: area.file_name.clone(),
        mismatches: out,
    })
}

/// Parse the source file, then verify it against its database.
pub fn verify_file(
    are_path: &Path,
    db_path: &Path,
    world: Option<&WorldIndex>,
) -> Result<VerifyReport, VerifyError> {
    let area = parse_area_file(are_path)?;
    verify_area(&area, db_path, world)
}

fn check_area_row(
    area: &Area,
    conn: &Connection,
    out: &mut Vec<Mismatch>,
) -> Result<(), VerifyError> {
    let rows = fetch_rows(conn, "SELECT * FROM area", [])?;
    if rows.len() != 1 {
        out.push(Mismatch::new(
            "area",
            area.file_name.clone(),
            "row_count",
            "1",
            rows.len().to_string(),
        ));
        return Ok(());
    }
    let expected = [
        ("name", text(&area.name)),
        ("builders", text(&area.builders)),
        ("lvnum", int(area.lvnum)),
        ("uvnum", int(area.uvnum)),
        ("security", int(area.security)),
        ("recall", int(area.recall)),
        ("area_flags", int(area.area_flags)),
    ];
    compare_row(out, "area", &area.file_name, &expected, &rows[0]);
    Ok(())
}

fn check_mobiles(
    area: &Area,
    conn: &Connection,
    out: &mut Vec<Mismatch>,
) -> Result<(), VerifyError> {
    for (vnum, mob) in &area.mobiles {
        let rows = fetch_rows(conn, "SELECT * FROM mobiles WHERE vnum = ?1", params![vnum])?;
        let key = vnum.to_string();
        let Some(row) = rows.first() else {
            presence(out, "mobile", &key, true);
            continue;
        };
        let expected = [
            ("player_name", text(&mob.name)),
            ("short_descr", text(&mob.short_descr)),
            ("long_descr", text(&mob.long_descr)),
            ("description", text(&mob.description)),
            ("act", int(mob.act)),
            ("affected_by", int(mob.affected_by)),
            ("alignment", int(mob.alignment)),
            ("level", int(mob.level)),
            ("hitroll", int(mob.hitroll)),
            ("ac", int(mob.ac)),
            ("hitnodice", int(mob.hit_dice.number)),
            ("hitsizedice", int(mob.hit_dice.size)),
            ("hitplus", int(mob.hit_dice.plus)),
            ("damnodice", int(mob.dam_dice.number)),
            ("damsizedice", int(mob.dam_dice.size)),
            ("damplus", int(mob.dam_dice.plus)),
            ("gold", int(mob.gold)),
            ("sex", int(mob.sex)),
        ];
        compare_row(out, "mobile", &key, &expected, row);
    }
    for vnum in db_vnums(conn, "SELECT vnum FROM mobiles ORDER BY vnum")? {
        if !area.mobiles.contains_key(&vnum) {
            presence(out, "mobile", &vnum.to_string(), false);
        }
    }
    Ok(())
}

fn check_objects(
    area: &Area,
    conn: &Connection,
    out: &mut Vec<Mismatch>,
) -> Result<(), VerifyError> {
    for (vnum, obj) in &area.objects {
        let rows = fetch_rows(conn, "SELECT * FROM objects WHERE vnum = ?1", params![vnum])?;
        let key = vnum.to_string();
        let Some(row) = rows.first() else {
            presence(out, "object", &key, true);
            continue;
        };
        let power = obj.power.clone().unwrap_or_default();
        let expected = [
            ("name", text(&obj.name)),
            ("short_descr", text(&obj.short_descr)),
            ("description", text(&obj.description)),
            ("item_type", int(obj.item_type)),
            ("extra_flags", int(obj.extra_flags)),
            ("wear_flags", int(obj.wear_flags)),
            ("value0", int(obj.value[0])),
            ("value1", int(obj.value[1])),
            ("value2", int(obj.value[2])),
            ("value3", int(obj.value[3])),
            ("weight", int(obj.weight)),
            ("cost", int(obj.cost)),
            ("chpoweron", text(&power.chpoweron)),
            ("chpoweroff", text(&power.chpoweroff)),
            ("chpoweruse", text(&power.chpoweruse)),
            ("victpoweron", text(&power.victpoweron)),
            ("victpoweroff", text(&power.victpoweroff)),
            ("victpoweruse", text(&power.victpoweruse)),
            ("spectype", int(power.spectype)),
            ("specpower", int(power.specpower)),
        ];
        compare_row(out, "object", &key, &expected, row);

        let affect_rows = fetch_rows(
            conn,
            "SELECT location, modifier FROM object_affects WHERE obj_vnum = ?1 ORDER BY sort_order",
            params![vnum],
        )?;
        if affect_rows.len() != obj.affects.len() {
            out.push(Mismatch::new(
                "object_affect",
                key.clone(),
                "count",
                obj.affects.len().to_string(),
                affect_rows.len().to_string(),
            ));
        } else {
            for (idx, (affect, row)) in obj.affects.iter().zip(&affect_rows).enumerate() {
                let expected = [
                    ("location", int(affect.location)),
                    ("modifier", int(affect.modifier)),
                ];
                compare_row(out, "object_affect", &format!("{key}/{idx}"), &expected, row);
            }
        }

        check_extra_descs(conn, out, "object", *vnum, &obj.extra_descs)?;
    }
    for vnum in db_vnums(conn, "SELECT vnum FROM objects ORDER BY vnum")? {
        if !area.objects.contains_key(&vnum) {
            presence(out, "object", &vnum.to_string(), false);
        }
    }
    Ok(())
}

fn check_extra_descs(
    conn: &Connection,
    out: &mut Vec<Mismatch>,
    owner_type: &'static str,
    owner_vnum: i64,
    expected: &[dy_core::area::ExtraDescription],
) -> Result<(), VerifyError> {
    let rows = fetch_rows(
        conn,
        "SELECT keyword, description FROM extra_descriptions \
         WHERE owner_type = ?1 AND owner_vnum = ?2 ORDER BY sort_order",
        params![owner_type, owner_vnum],
    )?;
    let key = owner_vnum.to_string();
    if rows.len() != expected.len() {
        out.push(Mismatch::new(
            "extra_description",
            format!("{owner_type}/{key}"),
            "count",
            expected.len().to_string(),
            rows.len().to_string(),
        ));
        return Ok(());
    }
    for (idx, (extra, row)) in expected.iter().zip(&rows).enumerate() {
        let want = [
            ("keyword", text(&extra.keyword)),
            ("description", text(&extra.description)),
        ];
        compare_row(
            out,
            "extra_description",
            &format!("{owner_type}/{key}/{idx}"),
            &want,
            row,
        );
    }
    Ok(())
}

fn check_rooms(
    area: &Area,
    conn: &Connection,
    out: &mut Vec<Mismatch>,
) -> Result<(), VerifyError> {
    for (vnum, room) in &area.rooms {
        let rows = fetch_rows(conn, "SELECT * FROM rooms WHERE vnum = ?1", params![vnum])?;
        let key = vnum.to_string();
        let Some(row) = rows.first() else {
            presence(out, "room", &key, true);
            continue;
        };
        let expected = [
            ("name", text(&room.name)),
            ("description", text(&room.description)),
            ("room_flags", int(room.room_flags)),
            ("sector_type", int(room.sector_type)),
        ];
        compare_row(out, "room", &key, &expected, row);

        let exit_rows = fetch_rows(
            conn,
            "SELECT direction, description, keyword, exit_info, key_vnum, to_vnum \
             FROM exits WHERE room_vnum = ?1 ORDER BY direction",
            params![vnum],
        )?;
        if exit_rows.len() != room.exits.len() {
            out.push(Mismatch::new(
                "exit",
                key.clone(),
                "count",
                room.exits.len().to_string(),
                exit_rows.len().to_string(),
            ));
        } else {
            for (exit, row) in room.exits.values().zip(&exit_rows) {
                let exit_key = format!("{key}/{}", exit.direction);
                let expected = [
                    ("direction", int(exit.direction as i64)),
                    ("description", text(&exit.description)),
                    ("keyword", text(&exit.keyword)),
                    ("exit_info", int(exit.exit_info)),
                    ("key_vnum", int(exit.key_vnum)),
                    ("to_vnum", int(exit.to_vnum)),
                ];
                compare_row(out, "exit", &exit_key, &expected, row);
            }
        }

        check_extra_descs(conn, out, "room", *vnum, &room.extra_descs)?;

        let text_rows = fetch_rows(
            conn,
            "SELECT input, output, choutput, name, type, power, mob \
             FROM room_texts WHERE room_vnum = ?1 ORDER BY sort_order",
            params![vnum],
        )?;
        if text_rows.len() != room.room_texts.len() {
            out.push(Mismatch::new(
                "room_text",
                key.clone(),
                "count",
                room.room_texts.len().to_string(),
                text_rows.len().to_string(),
            ));
        } else {
            for (idx, (rt, row)) in room.room_texts.iter().zip(&text_rows).enumerate() {
                let expected = [
                    ("input", text(&rt.input)),
                    ("output", text(&rt.output)),
                    ("choutput", text(&rt.choutput)),
                    ("name", text(&rt.name)),
                    ("type", int(rt.kind)),
                    ("power", int(rt.power)),
                    ("mob", int(rt.mob)),
                ];
                compare_row(out, "room_text", &format!("{key}/{idx}"), &expected, row);
            }
        }
    }
    for vnum in db_vnums(conn, "SELECT vnum FROM rooms ORDER BY vnum")? {
        if !area.rooms.contains_key(&vnum) {
            presence(out, "room", &vnum.to_string(), false);
        }
    }
    Ok(())
}

/// Resets are compared positionally: the database order by `sort_order`
/// must equal the in-memory program order.
fn check_resets(
    area: &Area,
    conn: &Connection,
    out: &mut Vec<Mismatch>,
) -> Result<(), VerifyError> {
    let rows = fetch_rows(
        conn,
        "SELECT command, arg1, arg2, arg3 FROM resets ORDER BY sort_order",
        [],
    )?;
    if rows.len() != area.resets.len() {
        out.push(Mismatch::new(
            "reset",
            area.file_name.clone(),
            "count",
            area.resets.len().to_string(),
            rows.len().to_string(),
        ));
        return Ok(());
    }
    for (idx, (reset, row)) in area.resets.iter().zip(&rows).enumerate() {
        let (arg1, arg2, arg3) = reset.args();
        let expected = [
            ("command", text(&reset.letter().to_string())),
            ("arg1", int(arg1)),
            ("arg2", int(arg2)),
            ("arg3", int(arg3)),
        ];
        compare_row(out, "reset", &idx.to_string(), &expected, row);
    }
    Ok(())
}

fn check_shops(
    area: &Area,
    conn: &Connection,
    out: &mut Vec<Mismatch>,
) -> Result<(), VerifyError> {
    for shop in &area.shops {
        let key = shop.keeper_vnum.to_string();
        let rows = fetch_rows(
            conn,
            "SELECT * FROM shops WHERE keeper_vnum = ?1",
            params![shop.keeper_vnum],
        )?;
        let Some(row) = rows.first() else {
            presence(out, "shop", &key, true);
            continue;
        };
        let expected = [
            ("buy_type0", int(shop.buy_types[0])),
            ("buy_type1", int(shop.buy_types[1])),
            ("buy_type2", int(shop.buy_types[2])),
            ("buy_type3", int(shop.buy_types[3])),
            ("buy_type4", int(shop.buy_types[4])),
            ("profit_buy", int(shop.profit_buy)),
            ("profit_sell", int(shop.profit_sell)),
            ("open_hour", int(shop.open_hour)),
            ("close_hour", int(shop.close_hour)),
        ];
        compare_row(out, "shop", &key, &expected, row);
    }
    let db_count: usize = db_vnums(conn, "SELECT keeper_vnum FROM shops ORDER BY keeper_vnum")?.len();
    if db_count != area.shops.len() {
        out.push(Mismatch::new(
            "shop",
            area.file_name.clone(),
            "count",
            area.shops.len().to_string(),
            db_count.to_string(),
        ));
    }
    Ok(())
}

fn check_specials(
    area: &Area,
    conn: &Connection,
    out: &mut Vec<Mismatch>,
) -> Result<(), VerifyError> {
    for (vnum, spec_fun) in &area.specials {
        let key = vnum.to_string();
        let rows = fetch_rows(
            conn,
            "SELECT spec_fun_name FROM specials WHERE mob_vnum = ?1",
            params![vnum],
        )?;
        let Some(row) = rows.first() else {
            presence(out, "special", &key, true);
            continue;
        };
        compare_row(out, "special", &key, &[("spec_fun_name", text(spec_fun))], row);
    }
    for vnum in db_vnums(conn, "SELECT mob_vnum FROM specials ORDER BY mob_vnum")? {
        if !area.specials.contains_key(&vnum) {
            presence(out, "special", &vnum.to_string(), false);
        }
    }
    Ok(())
}

/// Cross-row check: for every exit whose destination is a known room,
/// the database must agree with the in-memory one-way derivation. This
/// catches accidental normalization of exits during projection.
fn check_reverse_exits(
    area: &Area,
    conn: &Connection,
    index: &WorldIndex,
    out: &mut Vec<Mismatch>,
) -> Result<(), VerifyError> {
    let mut stmt = conn.prepare(
        "SELECT COUNT(*) FROM exits WHERE room_vnum = ?1 AND direction = ?2 AND to_vnum = ?3",
    )?;
    for (vnum, room) in &area.rooms {
        for exit in room.exits.values() {
            // Only decidable from this database when the destination
            // room is projected here.
            if !area.rooms.contains_key(&exit.to_vnum) {
                continue;
            }
            let reverse: i64 = stmt.query_row(
                params![exit.to_vnum, exit.direction.reverse() as i64, vnum],
                |row| row.get(0),
            )?;
            let db_one_way = reverse == 0;
            let mem_one_way = index.is_one_way(*vnum, exit);
            if db_one_way != mem_one_way {
                out.push(Mismatch::new(
                    "exit",
                    format!("{vnum}/{}", exit.direction),
                    "reverse_exit",
                    if mem_one_way { "one-way" } else { "paired" },
                    if db_one_way { "one-way" } else { "paired" },
                ));
            }
        }
    }
    Ok(())
}
