//! Per-player database writer. Fields are stored under their save-file
//! keys in generic key/value tables, so every integer and every string
//! in the save round-trips regardless of which keys this build knows
//! about.

use std::path::Path;

use rusqlite::{Connection, params};

use dy_core::registers::PlayerSave;

use crate::error::ProjectError;
use crate::schema::PLAYER_SCHEMA;

/// Row counts for the CLI summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerCounts {
    pub strings: usize,
    pub ints: usize,
    pub arrays: usize,
    pub skills: usize,
    pub affects: usize,
    pub objects: usize,
}

/// Write one parsed save into a fresh per-player database file.
pub fn write_player_db(save: &PlayerSave, db_path: &Path) -> Result<PlayerCounts, ProjectError> {
    if db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| ProjectError::io(db_path, e))?;
    }

    let mut conn = Connection::open(db_path)?;
    conn.execute_batch(PLAYER_SCHEMA)?;

    let tx = conn.transaction()?;
    let mut counts = PlayerCounts::default();

    for (key, value) in &save.strings {
        tx.execute(
            "INSERT INTO player_strings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        counts.strings += 1;
    }
    for (key, value) in &save.ints {
        tx.execute(
            "INSERT INTO player_ints (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        counts.ints += 1;
    }
    for (name, values) in &save.arrays {
        let data = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        tx.execute(
            "INSERT INTO player_arrays (name, data) VALUES (?1, ?2)",
            params![name, data],
        )?;
        counts.arrays += 1;
    }
    for (skill, value) in &save.skills {
        tx.execute(
            "INSERT INTO skills (skill_name, value) VALUES (?1, ?2)",
            params![skill, value],
        )?;
        counts.skills += 1;
    }
    for (short_n, long_n) in &save.aliases {
        tx.execute(
            "INSERT INTO aliases (short_n, long_n) VALUES (?1, ?2)",
            params![short_n, long_n],
        )?;
    }
    for affect in &save.affects {
        tx.execute(
            "INSERT INTO affects (skill_name, duration, modifier, location, bitvector) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                affect.skill,
                affect.duration,
                affect.modifier,
                affect.location,
                affect.bitvector
            ],
        )?;
        counts.affects += 1;
    }
    for (board_name, last_note) in &save.boards {
        tx.execute(
            "INSERT INTO boards (board_name, last_note) VALUES (?1, ?2)",
            params![board_name, last_note],
        )?;
    }

    for (sort_order, obj) in save.objects.iter().enumerate() {
        tx.execute(
            "INSERT INTO player_objects (sort_order, value0, value1, value2, value3) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![sort_order, obj.values[0], obj.values[1], obj.values[2], obj.values[3]],
        )?;
        let obj_id = tx.last_insert_rowid();
        counts.objects += 1;

        for (idx, (key, value)) in obj.strings.iter().enumerate() {
            tx.execute(
                "INSERT INTO player_object_strings (obj_id, key, value, sort_order) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![obj_id, key, value, idx],
            )?;
        }
        for (idx, (key, value)) in obj.ints.iter().enumerate() {
            tx.execute(
                "INSERT INTO player_object_ints (obj_id, key, value, sort_order) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![obj_id, key, value, idx],
            )?;
        }
        for (idx, &(duration, modifier, location)) in obj.affects.iter().enumerate() {
            tx.execute(
                "INSERT INTO player_object_affects (obj_id, duration, modifier, location, sort_order) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![obj_id, duration, modifier, location, idx],
            )?;
        }
        for (idx, (keyword, description)) in obj.extra_descs.iter().enumerate() {
            tx.execute(
                "INSERT INTO player_object_extra_descr (obj_id, keyword, description, sort_order) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![obj_id, keyword, description, idx],
            )?;
        }
        for (idx, (slot, name)) in obj.spells.iter().enumerate() {
            tx.execute(
                "INSERT INTO player_object_spells (obj_id, slot, name, sort_order) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![obj_id, slot, name, idx],
            )?;
        }
    }

    tx.commit()?;
    log::debug!(
        "projected player {:?}: {} strings, {} ints, {} objects",
        save.name().unwrap_or("?"),
        counts.strings,
        counts.ints,
        counts.objects
    );
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dy_core::registers::{PlayerAffect, PlayerObject};

    #[test]
    fn save_round_trips_through_generic_tables() {
        let mut save = PlayerSave::default();
        save.strings.push(("Name".into(), "Siva".into()));
        save.strings.push(("Clan".into(), String::new()));
        save.ints.push(("Level".into(), 3));
        save.arrays.push(("HpManaMove".into(), vec![100, 50, 200, 100, 50, 200]));
        save.skills.push(("fireball".into(), 95));
        save.affects.push(PlayerAffect {
            skill: "sanctuary".into(),
            duration: 10,
            modifier: 0,
            location: 0,
            bitvector: 128,
        });
        let mut obj = PlayerObject::default();
        obj.strings.push(("Name".into(), "a sword".into()));
        obj.ints.push(("Vnum".into(), 2000));
        obj.values = [0, 4, 11, 3];
        save.objects.push(obj);

        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("siva.db");
        let counts = write_player_db(&save, &db_path).unwrap();
        assert_eq!(counts.strings, 2);
        assert_eq!(counts.objects, 1);

        let conn = Connection::open(&db_path).unwrap();
        let name: String = conn
            .query_row(
                "SELECT value FROM player_strings WHERE key = 'Name'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(name, "Siva");
        let data: String = conn
            .query_row(
                "SELECT data FROM player_arrays WHERE name = 'HpManaMove'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(data, "100 50 200 100 50 200");
        let vnum: i64 = conn
            .query_row(
                "SELECT value FROM player_object_ints WHERE key = 'Vnum'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(vnum, 2000);
    }
}
