//! Balance heuristics over a parsed area. Everything here is read-only
//! over the semantic model; nothing writes back to the source files or
//! the databases.

mod mob;
mod object;
pub mod tables;

pub use mob::{DifficultyTier, MobAnalysis, analyze_mob};
pub use object::{ArmorInfo, ObjectAnalysis, PowerTier, WeaponInfo, analyze_object};

use std::collections::BTreeMap;

use serde::Serialize;

use crate::area::{Area, Reset};
use crate::flags::Sector;

/// Per-area roll-up: every mob and object report plus the distribution
/// summaries a balance pass skims first.
#[derive(Debug, Clone, Serialize)]
pub struct AreaAnalysis {
    pub file_name: String,
    pub area_name: String,
    pub lvnum: i64,
    pub uvnum: i64,
    pub room_count: usize,
    pub mob_count: usize,
    pub object_count: usize,
    pub reset_count: usize,
    pub avg_mob_level: f64,
    pub max_mob_level: i64,
    /// Gold carried by every mob instance spawned in one reset cycle.
    pub gold_per_reset: i64,
    pub difficulty_distribution: BTreeMap<String, usize>,
    pub power_distribution: BTreeMap<String, usize>,
    pub sector_distribution: BTreeMap<String, usize>,
    pub mobs: Vec<MobAnalysis>,
    pub objects: Vec<ObjectAnalysis>,
}

pub fn analyze_area(area: &Area) -> AreaAnalysis {
    let mobs: Vec<MobAnalysis> = area
        .mobiles
        .values()
        .map(|mob| analyze_mob(mob, &area.resets))
        .collect();
    let objects: Vec<ObjectAnalysis> = area.objects.values().map(analyze_object).collect();

    let mut difficulty_distribution = BTreeMap::new();
    for analysis in &mobs {
        *difficulty_distribution
            .entry(analysis.tier.to_string())
            .or_insert(0) += 1;
    }
    let mut power_distribution = BTreeMap::new();
    for analysis in &objects {
        *power_distribution
            .entry(analysis.tier.to_string())
            .or_insert(0) += 1;
    }

    let mut sector_distribution = BTreeMap::new();
    for room in area.rooms.values() {
        let name = Sector::from_repr(room.sector_type)
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("sector_{}", room.sector_type));
        *sector_distribution.entry(name).or_insert(0) += 1;
    }

    let avg_mob_level = if mobs.is_empty() {
        0.0
    } else {
        mobs.iter().map(|m| m.level as f64).sum::<f64>() / mobs.len() as f64
    };
    let max_mob_level = mobs.iter().map(|m| m.level).max().unwrap_or(0);

    let gold_per_reset: i64 = area
        .resets
        .iter()
        .filter_map(|reset| match *reset {
            Reset::Mob { mob_vnum, .. } => area.mobiles.get(&mob_vnum).map(|m| m.gold),
            _ => None,
        })
        .sum();

    AreaAnalysis {
        file_name: area.file_name.clone(),
        area_name: area.name.clone(),
        lvnum: area.lvnum,
        uvnum: area.uvnum,
        room_count: area.rooms.len(),
        mob_count: area.mobiles.len(),
        object_count: area.objects.len(),
        reset_count: area.resets.len(),
        avg_mob_level,
        max_mob_level,
        gold_per_reset,
        difficulty_distribution,
        power_distribution,
        sector_distribution,
        mobs,
        objects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{Dice, Mobile, Room};

    fn small_area() -> Area {
        let mut area = Area::default();
        area.file_name = "test.are".into();
        area.name = "Test Zone".into();
        area.lvnum = 1000;
        area.uvnum = 1099;

        for (vnum, level, gold) in [(1000, 10, 50), (1001, 200, 1000)] {
            area.mobiles.insert(
                vnum,
                Mobile {
                    vnum,
                    name: "mob".into(),
                    short_descr: "a mob".into(),
                    long_descr: String::new(),
                    description: String::new(),
                    act: 0,
                    affected_by: 0,
                    alignment: 0,
                    level,
                    hitroll: 0,
                    ac: 0,
                    hit_dice: Dice::new(1, 1, 100),
                    dam_dice: Dice::new(1, 1, 0),
                    gold,
                    sex: 0,
                },
            );
        }
        let room = Room::new(1000, "A Room".into(), String::new(), 0, 2);
        area.rooms.insert(1000, room);
        area.resets = vec![
            Reset::Mob { mob_vnum: 1000, limit: 1, room_vnum: 1000 },
            Reset::Mob { mob_vnum: 1000, limit: 2, room_vnum: 1000 },
            Reset::Mob { mob_vnum: 1001, limit: 1, room_vnum: 1000 },
        ];
        area
    }

    #[test]
    fn aggregate_counts_and_gold() {
        let analysis = analyze_area(&small_area());
        assert_eq!(analysis.mob_count, 2);
        assert_eq!(analysis.room_count, 1);
        assert_eq!(analysis.reset_count, 3);
        assert_eq!(analysis.avg_mob_level, 105.0);
        assert_eq!(analysis.max_mob_level, 200);
        // Mob 1000 spawns twice at 50 gold, mob 1001 once at 1000.
        assert_eq!(analysis.gold_per_reset, 1100);
        assert_eq!(analysis.sector_distribution.get("field"), Some(&1));
    }

    #[test]
    fn distributions_use_tier_names() {
        let analysis = analyze_area(&small_area());
        let total: usize = analysis.difficulty_distribution.values().sum();
        assert_eq!(total, 2);
        assert!(serde_json::to_string(&analysis).unwrap().contains("\"area_name\":\"Test Zone\""));
    }
}
