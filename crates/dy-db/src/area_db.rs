use std::fmt;
use std::path::Path;

use rusqlite::{Connection, params};

use dy_core::Area;

use crate::error::ProjectError;
use crate::schema::AREA_SCHEMA;

/// Row counts written by one projection, for the CLI summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionCounts {
    pub mobiles: usize,
    pub objects: usize,
    pub rooms: usize,
    pub exits: usize,
    pub resets: usize,
    pub shops: usize,
    pub specials: usize,
    pub extra_descs: usize,
    pub object_affects: usize,
    pub room_texts: usize,
}

impl fmt::Display for ProjectionCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mobs, {} objs, {} rooms, {} exits, {} resets, {} shops, {} specials",
            self.mobiles, self.objects, self.rooms, self.exits, self.resets, self.shops,
            self.specials
        )
    }
}

/// Project one parsed area into a fresh database file. Any existing file
/// at `db_path` is deleted first; the whole projection is one
/// transaction, so a failure leaves either no file or an empty schema.
pub fn write_area_db(area: &Area, db_path: &Path) -> Result<ProjectionCounts, ProjectError> {
    if db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| ProjectError::io(db_path, e))?;
    }

    let mut conn = Connection::open(db_path)?;
    conn.execute_batch(AREA_SCHEMA)?;

    let tx = conn.transaction()?;
    let mut counts = ProjectionCounts::default();

    tx.execute(
        "INSERT INTO area (name, builders, lvnum, uvnum, security, recall, area_flags) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            area.name,
            area.builders,
            area.lvnum,
            area.uvnum,
            area.security,
            area.recall,
            area.area_flags
        ],
    )?;

    for (vnum, mob) in &area.mobiles {
        tx.execute(
            "INSERT INTO mobiles (vnum, player_name, short_descr, long_descr, description, \
             act, affected_by, alignment, level, hitroll, ac, \
             hitnodice, hitsizedice, hitplus, damnodice, damsizedice, damplus, gold, sex) \
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19)",
            params![
                vnum,
                mob.name,
                mob.short_descr,
                mob.long_descr,
                mob.description,
                mob.act,
                mob.affected_by,
                mob.alignment,
                mob.level,
                mob.hitroll,
                mob.ac,
                mob.hit_dice.number,
                mob.hit_dice.size,
                mob.hit_dice.plus,
                mob.dam_dice.number,
                mob.dam_dice.size,
                mob.dam_dice.plus,
                mob.gold,
                mob.sex
            ],
        )?;
        counts.mobiles += 1;
    }

    for (vnum, obj) in &area.objects {
        let power = obj.power.clone().unwrap_or_default();
        tx.execute(
            "INSERT INTO objects (vnum, name, short_descr, description, \
             item_type, extra_flags, wear_flags, value0, value1, value2, value3, \
             weight, cost, chpoweron, chpoweroff, chpoweruse, \
             victpoweron, victpoweroff, victpoweruse, spectype, specpower) \
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,?21)",
            params![
                vnum,
                obj.name,
                obj.short_descr,
                obj.description,
                obj.item_type,
                obj.extra_flags,
                obj.wear_flags,
                obj.value[0],
                obj.value[1],
                obj.value[2],
                obj.value[3],
                obj.weight,
                obj.cost,
                power.chpoweron,
                power.chpoweroff,
                power.chpoweruse,
                power.victpoweron,
                power.victpoweroff,
                power.victpoweruse,
                power.spectype,
                power.specpower
            ],
        )?;
        counts.objects += 1;

        for (sort_order, affect) in obj.affects.iter().enumerate() {
            tx.execute(
                "INSERT INTO object_affects (obj_vnum, location, modifier, sort_order) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![vnum, affect.location, affect.modifier, sort_order],
            )?;
            counts.object_affects += 1;
        }
        for (sort_order, extra) in obj.extra_descs.iter().enumerate() {
            tx.execute(
                "INSERT INTO extra_descriptions (owner_type, owner_vnum, keyword, description, sort_order) \
                 VALUES ('object', ?1, ?2, ?3, ?4)",
                params![vnum, extra.keyword, extra.description, sort_order],
            )?;
            counts.extra_descs += 1;
        }
    }

    for (vnum, room) in &area.rooms {
        tx.execute(
            "INSERT INTO rooms (vnum, name, description, room_flags, sector_type) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![vnum, room.name, room.description, room.room_flags, room.sector_type],
        )?;
        counts.rooms += 1;

        for exit in room.exits.values() {
            tx.execute(
                "INSERT INTO exits (room_vnum, direction, description, keyword, \
                 exit_info, key_vnum, to_vnum) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    vnum,
                    exit.direction as i64,
                    exit.description,
                    exit.keyword,
                    exit.exit_info,
                    exit.key_vnum,
                    exit.to_vnum
                ],
            )?;
            counts.exits += 1;
        }
        for (sort_order, extra) in room.extra_descs.iter().enumerate() {
            tx.execute(
                "INSERT INTO extra_descriptions (owner_type, owner_vnum, keyword, description, sort_order) \
                 VALUES ('room', ?1, ?2, ?3, ?4)",
                params![vnum, extra.keyword, extra.description, sort_order],
            )?;
            counts.extra_descs += 1;
        }
        for (sort_order, text) in room.room_texts.iter().enumerate() {
            tx.execute(
                "INSERT INTO room_texts (room_vnum, input, output, choutput, name, \
                 type, power, mob, sort_order) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
                params![
                    vnum,
                    text.input,
                    text.output,
                    text.choutput,
                    text.name,
                    text.kind,
                    text.power,
                    text.mob,
                    sort_order
                ],
            )?;
            counts.room_texts += 1;
        }
    }

    for (sort_order, reset) in area.resets.iter().enumerate() {
        let (arg1, arg2, arg3) = reset.args();
        tx.execute(
            "INSERT INTO resets (command, arg1, arg2, arg3, sort_order) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![reset.letter().to_string(), arg1, arg2, arg3, sort_order],
        )?;
        counts.resets += 1;
    }

    for shop in &area.shops {
        tx.execute(
            "INSERT INTO shops (keeper_vnum, buy_type0, buy_type1, buy_type2, buy_type3, \
             buy_type4, profit_buy, profit_sell, open_hour, close_hour) \
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
            params![
                shop.keeper_vnum,
                shop.buy_types[0],
                shop.buy_types[1],
                shop.buy_types[2],
                shop.buy_types[3],
                shop.buy_types[4],
                shop.profit_buy,
                shop.profit_sell,
                shop.open_hour,
                shop.close_hour
            ],
        )?;
        counts.shops += 1;
    }

    for (mob_vnum, spec_fun) in &area.specials {
        tx.execute(
            "INSERT INTO specials (mob_vnum, spec_fun_name) VALUES (?1, ?2)",
            params![mob_vnum, spec_fun],
        )?;
        counts.specials += 1;
    }

    tx.commit()?;
    log::debug!("projected {} -> {}", area.file_name, counts);
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dy_core::parse_area_text;

    const SMALL_AREA: &str = "\
#AREADATA
Name Testville~
VNUMs 100 199
Builders nobody~
Security 5
Recall 100
Flags 0
End
#ROOMDATA
#100
The Square~
Wide open.~
0 8 1
D0
~
~
0 -1 101
S
#101
An Alley~
Narrow.~
0 0 2
D2
~
~
0 -1 100
S
#0
#RESETS
S
#$
";

    #[test]
    fn projects_rooms_and_exits() {
        let area = parse_area_text(SMALL_AREA).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let counts = write_area_db(&area, &db_path).unwrap();
        assert_eq!(counts.rooms, 2);
        assert_eq!(counts.exits, 2);

        let conn = Connection::open(&db_path).unwrap();
        let name: String = conn
            .query_row("SELECT name FROM area", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "Testville");
        let to_vnum: i64 = conn
            .query_row(
                "SELECT to_vnum FROM exits WHERE room_vnum = 100 AND direction = 0",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(to_vnum, 101);
    }

    #[test]
    fn reprojection_replaces_the_file() {
        let area = parse_area_text(SMALL_AREA).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        write_area_db(&area, &db_path).unwrap();
        write_area_db(&area, &db_path).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM area", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
