use std::path::PathBuf;

use anyhow::Context;

use dy_core::registers::parse_player_save;
use dy_db::write_player_db;

use super::{Layout, read_required};

pub fn run(
    layout: &Layout,
    player_dir: Option<PathBuf>,
    db_dir: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<bool> {
    let player_dir = player_dir.unwrap_or_else(|| layout.player_dir());
    let db_dir = db_dir.unwrap_or_else(|| layout.player_db_dir());

    let mut files: Vec<PathBuf> = std::fs::read_dir(&player_dir)
        .with_context(|| format!("reading {}", player_dir.display()))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_player_file(path))
        .collect();
    files.sort();

    if files.is_empty() {
        log::info!("no player files in {}", player_dir.display());
        return Ok(true);
    }
    if !dry_run {
        std::fs::create_dir_all(&db_dir)
            .with_context(|| format!("creating {}", db_dir.display()))?;
    }

    let mut all_ok = true;
    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let save = match read_required(path).and_then(|text| Ok(parse_player_save(&text)?)) {
            Ok(save) => save,
            Err(err) => {
                all_ok = false;
                println!("FAIL  {file_name}: {err:#}");
                continue;
            }
        };
        let display_name = save.name().unwrap_or(&file_name).to_string();
        if dry_run {
            println!(
                "OK    {file_name} ({display_name}): {} objects (dry run)",
                save.objects.len()
            );
            continue;
        }
        let db_path = db_dir.join(format!("{file_name}.db"));
        match write_player_db(&save, &db_path) {
            Ok(counts) => println!(
                "OK    {file_name} ({display_name}): {} strings, {} ints, {} objects",
                counts.strings, counts.ints, counts.objects
            ),
            Err(err) => {
                all_ok = false;
                println!("FAIL  {file_name}: {err}");
            }
        }
    }
    Ok(all_ok)
}

/// Player saves are bare files named after the character; anything with
/// an extension is a backup or an already-migrated database.
fn is_player_file(path: &std::path::Path) -> bool {
    path.is_file()
        && path.extension().is_none()
        && path
            .file_name()
            .is_some_and(|name| !name.to_string_lossy().starts_with('.'))
}
