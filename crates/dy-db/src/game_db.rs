//! Importers for the shared game database. Each importer replaces the
//! rows it owns inside one transaction, so re-running an import is
//! idempotent and a failure leaves the previous rows intact.

use std::path::Path;

use rusqlite::{Connection, params};

use dy_core::area::HelpEntry;
use dy_core::registers::{
    Ban, Bug, DisabledCommand, Kingdom, LeaderboardEntry, Note, TopboardEntry,
};

use crate::error::ProjectError;
use crate::schema::GAME_SCHEMA;

/// Open (or create) the shared game database and ensure its schema.
pub fn open_game_db(path: &Path) -> Result<Connection, ProjectError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(GAME_SCHEMA)?;
    Ok(conn)
}

pub fn import_helps(conn: &mut Connection, helps: &[HelpEntry]) -> Result<usize, ProjectError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM helps", [])?;
    for help in helps {
        tx.execute(
            "INSERT INTO helps (level, keyword, text) VALUES (?1, ?2, ?3)",
            params![help.level, help.keyword, help.text],
        )?;
    }
    tx.commit()?;
    Ok(helps.len())
}

/// Replace the notes of one board; other boards are untouched.
pub fn import_notes(
    conn: &mut Connection,
    board_idx: i64,
    notes: &[Note],
) -> Result<usize, ProjectError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM notes WHERE board_idx = ?1", [board_idx])?;
    for note in notes {
        tx.execute(
            "INSERT INTO notes (board_idx, sender, date, date_stamp, expire, to_list, subject, text) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                board_idx,
                note.sender,
                note.date,
                note.date_stamp,
                note.expire,
                note.to_list,
                note.subject,
                note.text
            ],
        )?;
    }
    tx.commit()?;
    Ok(notes.len())
}

pub fn import_bugs(conn: &mut Connection, bugs: &[Bug]) -> Result<usize, ProjectError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM bugs", [])?;
    for bug in bugs {
        tx.execute(
            "INSERT INTO bugs (room_vnum, player, message, timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![bug.room_vnum, bug.player, bug.message, bug.timestamp],
        )?;
    }
    tx.commit()?;
    Ok(bugs.len())
}

pub fn import_bans(conn: &mut Connection, bans: &[Ban]) -> Result<usize, ProjectError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM bans", [])?;
    for ban in bans {
        tx.execute(
            "INSERT INTO bans (name, reason) VALUES (?1, ?2)",
            params![ban.name, ban.reason],
        )?;
    }
    tx.commit()?;
    Ok(bans.len())
}

pub fn import_disabled(
    conn: &mut Connection,
    commands: &[DisabledCommand],
) -> Result<usize, ProjectError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM disabled_commands", [])?;
    for cmd in commands {
        tx.execute(
            "INSERT INTO disabled_commands (command_name, level, disabled_by) VALUES (?1, ?2, ?3)",
            params![cmd.command_name, cmd.level, cmd.disabled_by],
        )?;
    }
    tx.commit()?;
    Ok(commands.len())
}

pub fn import_gameconfig(
    conn: &mut Connection,
    config: &[(String, String)],
) -> Result<usize, ProjectError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM gameconfig", [])?;
    for (key, value) in config {
        tx.execute(
            "INSERT INTO gameconfig (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
    }
    tx.commit()?;
    Ok(config.len())
}

pub fn import_topboard(
    conn: &mut Connection,
    entries: &[TopboardEntry],
) -> Result<usize, ProjectError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM topboard", [])?;
    for entry in entries {
        tx.execute(
            "INSERT INTO topboard (rank, name, pkscore) VALUES (?1, ?2, ?3)",
            params![entry.rank, entry.name, entry.pkscore],
        )?;
    }
    tx.commit()?;
    Ok(entries.len())
}

pub fn import_leaderboard(
    conn: &mut Connection,
    entries: &[LeaderboardEntry],
) -> Result<usize, ProjectError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM leaderboard", [])?;
    for entry in entries {
        tx.execute(
            "INSERT INTO leaderboard (category, name, value) VALUES (?1, ?2, ?3)",
            params![entry.category, entry.name, entry.value],
        )?;
    }
    tx.commit()?;
    Ok(entries.len())
}

pub fn import_kingdoms(
    conn: &mut Connection,
    kingdoms: &[Kingdom],
) -> Result<usize, ProjectError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM kingdoms", [])?;
    for kingdom in kingdoms {
        tx.execute(
            "INSERT INTO kingdoms (id, name, whoname, leader, general, kills, deaths, qps, \
             req_hit, req_move, req_mana, req_qps) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                kingdom.id,
                kingdom.name,
                kingdom.whoname,
                kingdom.leader,
                kingdom.general,
                kingdom.kills,
                kingdom.deaths,
                kingdom.qps,
                kingdom.req_hit,
                kingdom.req_move,
                kingdom.req_mana,
                kingdom.req_qps
            ],
        )?;
    }
    tx.commit()?;
    Ok(kingdoms.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_replace_only_their_board() {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = open_game_db(&dir.path().join("game.db")).unwrap();

        let note = |subject: &str| Note {
            sender: "Siva".into(),
            date: "Mon Jan  1".into(),
            date_stamp: 100,
            expire: 200,
            to_list: "all".into(),
            subject: subject.into(),
            text: "body\n".into(),
        };
        import_notes(&mut conn, 0, &[note("general one")]).unwrap();
        import_notes(&mut conn, 2, &[note("immortal one")]).unwrap();
        import_notes(&mut conn, 0, &[note("general two")]).unwrap();

        let subjects: Vec<String> = conn
            .prepare("SELECT subject FROM notes ORDER BY board_idx, id")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(subjects, vec!["general two", "immortal one"]);
    }

    #[test]
    fn reimport_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = open_game_db(&dir.path().join("game.db")).unwrap();

        let bans = vec![Ban { name: "badhost".into(), reason: "spam".into() }];
        import_bans(&mut conn, &bans).unwrap();
        import_bans(&mut conn, &bans).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM bans", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
