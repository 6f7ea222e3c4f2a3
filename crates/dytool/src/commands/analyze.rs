use std::path::PathBuf;

use anyhow::Context;

use dy_core::analyze::analyze_area;
use dy_core::parse::parse_area_file;
use dy_core::registers::parse_area_list;

use super::{Layout, read_required};

pub fn run(
    layout: &Layout,
    area_dir: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<bool> {
    let area_dir = area_dir.unwrap_or_else(|| layout.area_dir());

    let list_path = area_dir.join("area.lst");
    let names = parse_area_list(&read_required(&list_path)?);

    let mut reports = Vec::new();
    let mut all_ok = true;
    for name in &names {
        match parse_area_file(&area_dir.join(name)) {
            Ok(area) => {
                let report = analyze_area(&area);
                log::info!(
                    "{name}: {} mobs, {} objects, avg level {:.1}",
                    report.mob_count,
                    report.object_count,
                    report.avg_mob_level
                );
                reports.push(report);
            }
            Err(err) => {
                all_ok = false;
                println!("FAIL  {name}: {err}");
            }
        }
    }

    let json = serde_json::to_string_pretty(&reports).context("serializing reports")?;
    match output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            println!("OK    wrote {} area reports to {}", reports.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(all_ok)
}
