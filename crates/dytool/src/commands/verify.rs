use std::path::PathBuf;

use dy_compare::verify_area;
use dy_core::area::WorldIndex;
use dy_core::parse::parse_area_file;
use dy_core::registers::parse_area_list;

use super::{Layout, read_required};

pub fn run(
    layout: &Layout,
    area_dir: Option<PathBuf>,
    db_dir: Option<PathBuf>,
) -> anyhow::Result<bool> {
    let area_dir = area_dir.unwrap_or_else(|| layout.area_dir());
    let db_dir = db_dir.unwrap_or_else(|| layout.area_db_dir());

    let list_path = area_dir.join("area.lst");
    let names = parse_area_list(&read_required(&list_path)?);

    // Parse everything first so cross-area exits resolve. The help
    // pseudo-area has no rooms to verify; the game importer owns it.
    let mut areas = Vec::new();
    let mut all_ok = true;
    for name in &names {
        if is_help_file(name) {
            continue;
        }
        match parse_area_file(&area_dir.join(name)) {
            Ok(area) => areas.push((name.clone(), area)),
            Err(err) => {
                all_ok = false;
                println!("FAIL  {name}: {err}");
            }
        }
    }
    let index = WorldIndex::build(areas.iter().map(|(_, area)| area));

    for (name, area) in &areas {
        let db_path = db_dir.join(format!("{}.db", area.file_name));
        if !db_path.exists() {
            all_ok = false;
            println!("FAIL  {name}: no database at {}", db_path.display());
            continue;
        }
        match verify_area(area, &db_path, Some(&index)) {
            Ok(report) => {
                println!("{report}");
                all_ok &= report.passed();
            }
            Err(err) => {
                all_ok = false;
                println!("FAIL  {name}: {err}");
            }
        }
    }
    Ok(all_ok)
}

fn is_help_file(name: &str) -> bool {
    name.eq_ignore_ascii_case("help.are")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_pseudo_area_is_skipped() {
        assert!(is_help_file("help.are"));
        assert!(is_help_file("Help.ARE"));
        assert!(!is_help_file("midgaard.are"));
        assert!(!is_help_file("helpers.are"));
    }
}
