use std::path::PathBuf;

use anyhow::Context;
use rusqlite::Connection;

use dy_core::parse::parse_area_file;
use dy_core::registers::{
    BOARD_NAMES, parse_bans, parse_bugs, parse_disabled, parse_gameconfig, parse_kingdoms,
    parse_leaderboard, parse_notes, parse_topboard,
};
use dy_db::{
    import_bans, import_bugs, import_disabled, import_gameconfig, import_helps, import_kingdoms,
    import_leaderboard, import_notes, import_topboard, open_game_db,
};

use super::{Layout, read_optional};

pub fn run(layout: &Layout, db_path: Option<PathBuf>, dry_run: bool) -> anyhow::Result<bool> {
    let db_path = db_path.unwrap_or_else(|| layout.game_db_path());
    let mut conn = if dry_run {
        None
    } else {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        Some(open_game_db(&db_path)?)
    };
    let mut all_ok = true;

    // Helps live in the #HELPS section of help.are.
    let help_path = layout.area_dir().join("help.are");
    if help_path.exists() {
        match parse_area_file(&help_path) {
            Ok(area) => {
                if let Some(conn) = conn.as_mut() {
                    import_helps(conn, &area.helps)?;
                }
                println!("OK    help.are: {} helps", area.helps.len());
            }
            Err(err) => {
                all_ok = false;
                println!("FAIL  help.are: {err}");
            }
        }
    } else {
        println!("SKIP  help.are (not found)");
    }

    let notes_dir = layout.notes_dir();
    for (idx, board) in BOARD_NAMES.iter().enumerate() {
        let path = notes_dir.join(board);
        let Some(text) = read_optional(&path)? else {
            println!("SKIP  notes/{board} (not found)");
            continue;
        };
        match parse_notes(&text) {
            Ok(notes) => {
                if let Some(conn) = conn.as_mut() {
                    import_notes(conn, idx as i64, &notes)?;
                }
                println!("OK    notes/{board}: {} notes", notes.len());
            }
            Err(err) => {
                all_ok = false;
                println!("FAIL  notes/{board}: {err}");
            }
        }
    }

    let txt_dir = layout.txt_dir();

    if let Some(text) = read_optional(&txt_dir.join("bugs.txt"))? {
        let bugs = parse_bugs(&text);
        if let Some(conn) = conn.as_mut() {
            import_bugs(conn, &bugs)?;
        }
        println!("OK    bugs.txt: {} bugs", bugs.len());
    } else {
        println!("SKIP  bugs.txt (not found)");
    }

    if let Some(text) = read_optional(&txt_dir.join("ban.txt"))? {
        match parse_bans(&text) {
            Ok(bans) => {
                if let Some(conn) = conn.as_mut() {
                    import_bans(conn, &bans)?;
                }
                println!("OK    ban.txt: {} bans", bans.len());
            }
            Err(err) => {
                all_ok = false;
                println!("FAIL  ban.txt: {err}");
            }
        }
    } else {
        println!("SKIP  ban.txt (not found)");
    }

    if let Some(text) = read_optional(&layout.disabled_path())? {
        match parse_disabled(&text) {
            Ok(commands) => {
                if let Some(conn) = conn.as_mut() {
                    import_disabled(conn, &commands)?;
                }
                println!("OK    disabled.txt: {} commands", commands.len());
            }
            Err(err) => {
                all_ok = false;
                println!("FAIL  disabled.txt: {err}");
            }
        }
    } else {
        println!("SKIP  disabled.txt (not found)");
    }

    if let Some(text) = read_optional(&txt_dir.join("gameconfig.txt"))? {
        let config = parse_gameconfig(&text);
        if let Some(conn) = conn.as_mut() {
            import_gameconfig(conn, &config)?;
        }
        println!("OK    gameconfig.txt: {} keys", config.len());
    } else {
        println!("SKIP  gameconfig.txt (not found)");
    }

    all_ok &= import_register(
        conn.as_mut(),
        &txt_dir.join("topboard.txt"),
        "topboard.txt",
        parse_topboard,
        import_topboard,
    )?;
    all_ok &= import_register(
        conn.as_mut(),
        &txt_dir.join("leader.txt"),
        "leader.txt",
        parse_leaderboard,
        import_leaderboard,
    )?;
    all_ok &= import_register(
        conn.as_mut(),
        &txt_dir.join("kingdoms.txt"),
        "kingdoms.txt",
        parse_kingdoms,
        import_kingdoms,
    )?;

    Ok(all_ok)
}

/// Shared skeleton for the registers whose parser can fail and whose
/// importer replaces a whole table.
fn import_register<T>(
    conn: Option<&mut Connection>,
    path: &std::path::Path,
    label: &str,
    parse: impl Fn(&str) -> Result<Vec<T>, dy_core::registers::RegisterError>,
    import: impl Fn(&mut Connection, &[T]) -> Result<usize, dy_db::ProjectError>,
) -> anyhow::Result<bool> {
    let Some(text) = read_optional(path)? else {
        println!("SKIP  {label} (not found)");
        return Ok(true);
    };
    match parse(&text) {
        Ok(entries) => {
            if let Some(conn) = conn {
                import(conn, &entries)?;
            }
            println!("OK    {label}: {} rows", entries.len());
            Ok(true)
        }
        Err(err) => {
            println!("FAIL  {label}: {err}");
            Ok(false)
        }
    }
}
