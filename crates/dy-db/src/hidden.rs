//! Marks hidden areas in their per-area databases. Older database files
//! may predate the `is_hidden` column, so it is added on demand before
//! the update.

use std::path::Path;

use rusqlite::Connection;

use crate::error::ProjectError;

/// Outcome of one marking run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HiddenCounts {
    pub marked: usize,
    pub skipped: usize,
}

fn ensure_hidden_column(conn: &Connection) -> Result<(), ProjectError> {
    let mut stmt = conn.prepare("PRAGMA table_info(area)")?;
    let has_column = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .filter_map(Result::ok)
        .any(|name| name == "is_hidden");
    if !has_column {
        conn.execute(
            "ALTER TABLE area ADD COLUMN is_hidden INTEGER NOT NULL DEFAULT 0",
            [],
        )?;
    }
    Ok(())
}

/// Set `is_hidden = 1` in the database of every area named in the hidden
/// list. Names are area file names (`kavir.are`); the database is the
/// stem plus `.db` under `db_dir`. Missing databases are skipped.
pub fn mark_hidden(db_dir: &Path, hidden: &[String]) -> Result<HiddenCounts, ProjectError> {
    let entries = std::fs::read_dir(db_dir).map_err(|e| ProjectError::io(db_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ProjectError::io(db_dir, e))?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "db") {
            let conn = Connection::open(&path)?;
            ensure_hidden_column(&conn)?;
        }
    }

    let mut counts = HiddenCounts::default();
    for name in hidden {
        let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());
        let db_path = db_dir.join(format!("{stem}.db"));
        if !db_path.exists() {
            log::warn!("no database for hidden area {name}");
            counts.skipped += 1;
            continue;
        }
        let conn = Connection::open(&db_path)?;
        conn.execute("UPDATE area SET is_hidden = 1", [])?;
        counts.marked += 1;
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_db_without_hidden_column(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE area (name TEXT NOT NULL, lvnum INTEGER, uvnum INTEGER);
             INSERT INTO area (name, lvnum, uvnum) VALUES ('Old', 1, 99);",
        )
        .unwrap();
    }

    #[test]
    fn adds_column_and_marks_listed_areas() {
        let dir = tempfile::tempdir().unwrap();
        area_db_without_hidden_column(&dir.path().join("kavir.db"));
        area_db_without_hidden_column(&dir.path().join("midgaard.db"));

        let counts = mark_hidden(
            dir.path(),
            &["kavir.are".to_string(), "nosuch.are".to_string()],
        )
        .unwrap();
        assert_eq!(counts.marked, 1);
        assert_eq!(counts.skipped, 1);

        let hidden: i64 = Connection::open(dir.path().join("kavir.db"))
            .unwrap()
            .query_row("SELECT is_hidden FROM area", [], |row| row.get(0))
            .unwrap();
        assert_eq!(hidden, 1);
        let visible: i64 = Connection::open(dir.path().join("midgaard.db"))
            .unwrap()
            .query_row("SELECT is_hidden FROM area", [], |row| row.get(0))
            .unwrap();
        assert_eq!(visible, 0);
    }
}
