use std::path::PathBuf;

use dy_core::registers::parse_hidden_list;
use dy_db::mark_hidden;

use super::{Layout, read_optional};

pub fn run(
    layout: &Layout,
    area_dir: Option<PathBuf>,
    db_dir: Option<PathBuf>,
) -> anyhow::Result<bool> {
    let area_dir = area_dir.unwrap_or_else(|| layout.area_dir());
    let db_dir = db_dir.unwrap_or_else(|| layout.area_db_dir());

    let list_path = area_dir.join("hidden.lst");
    let Some(text) = read_optional(&list_path)? else {
        println!("SKIP  hidden.lst (not found)");
        return Ok(true);
    };
    let hidden = parse_hidden_list(&text);
    if hidden.is_empty() {
        println!("OK    hidden.lst: nothing to mark");
        return Ok(true);
    }

    let counts = mark_hidden(&db_dir, &hidden)?;
    println!(
        "OK    hidden.lst: {} marked, {} skipped",
        counts.marked, counts.skipped
    );
    Ok(true)
}
