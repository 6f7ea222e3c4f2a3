use std::path::PathBuf;

use anyhow::Context;

use dy_core::parse::parse_area_file;
use dy_core::registers::parse_area_list;
use dy_db::write_area_db;

use super::{Layout, read_required};

pub fn run(
    layout: &Layout,
    area_dir: Option<PathBuf>,
    db_dir: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<bool> {
    let area_dir = area_dir.unwrap_or_else(|| layout.area_dir());
    let db_dir = db_dir.unwrap_or_else(|| layout.area_db_dir());

    let list_path = area_dir.join("area.lst");
    let names = parse_area_list(&read_required(&list_path)?);
    if names.is_empty() {
        log::warn!("{} lists no areas", list_path.display());
        return Ok(true);
    }
    if !dry_run {
        std::fs::create_dir_all(&db_dir)
            .with_context(|| format!("creating {}", db_dir.display()))?;
    }

    let mut all_ok = true;
    for name in &names {
        let path = area_dir.join(name);
        let area = match parse_area_file(&path) {
            Ok(area) => area,
            Err(err) => {
                all_ok = false;
                println!("FAIL  {name}: {err}");
                continue;
            }
        };
        if dry_run {
            println!(
                "OK    {name}: {} mobs, {} objs, {} rooms, {} resets (dry run)",
                area.mobiles.len(),
                area.objects.len(),
                area.rooms.len(),
                area.resets.len()
            );
            continue;
        }
        let db_path = db_dir.join(format!("{}.db", area.file_name));
        match write_area_db(&area, &db_path) {
            Ok(counts) => println!("OK    {name}: {counts}"),
            Err(err) => {
                all_ok = false;
                println!("FAIL  {name}: {err}");
            }
        }
    }
    Ok(all_ok)
}
