use serde::Serialize;
use strum::Display;

use crate::area::{Mobile, Reset};
use crate::flags::{ActFlags, AffectFlags, decode_names};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Trivial,
    Easy,
    Normal,
    Hard,
    Deadly,
}

impl DifficultyTier {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 30.0 => DifficultyTier::Trivial,
            s if s < 100.0 => DifficultyTier::Easy,
            s if s < 300.0 => DifficultyTier::Normal,
            s if s < 600.0 => DifficultyTier::Hard,
            _ => DifficultyTier::Deadly,
        }
    }
}

/// Balance heuristics for one mob template, plus its spawn footprint in
/// the reset program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MobAnalysis {
    pub vnum: i64,
    pub short_descr: String,
    pub level: i64,
    pub avg_hp: f64,
    pub attacks_per_round: i64,
    pub avg_damage_per_round: f64,
    pub difficulty: f64,
    pub tier: DifficultyTier,
    pub act_names: Vec<String>,
    pub affect_names: Vec<String>,
    pub gold: i64,
    pub spawn_count: usize,
    pub spawn_rooms: Vec<i64>,
}

fn attack_bonus(level: i64) -> i64 {
    let mut bonus = 0;
    for threshold in [50, 100, 500, 1000, 1500] {
        if level >= threshold {
            bonus += 1;
        }
    }
    if level >= 2000 {
        bonus += 2;
    }
    bonus
}

pub fn analyze_mob(mob: &Mobile, resets: &[Reset]) -> MobAnalysis {
    let level = mob.level.max(1);
    let avg_hp = mob.hit_dice.average();
    let attacks = 1 + attack_bonus(level) + mob.hit_dice.number.min(20);
    // NPC per-hit damage is level-based, not dam_dice.
    let avg_damage = (level * attacks) as f64;

    let act = ActFlags::from_bits_truncate(mob.act);
    let aff = AffectFlags::from_bits_truncate(mob.affected_by);

    let hp_score = (avg_hp / 20.0).min(500.0);
    let damage_score = avg_damage / 5.0;
    let ac_score = if mob.ac < 0 {
        (-mob.ac as f64 / 10.0).min(100.0)
    } else {
        -mob.ac as f64 / 20.0
    };
    let hitroll_score = (mob.hitroll as f64).min(100.0);
    let disarm_score = (level as f64 * 0.1).min(50.0);

    let mut difficulty = hp_score + damage_score + ac_score + hitroll_score + disarm_score;
    if aff.contains(AffectFlags::SANCTUARY) {
        difficulty *= 1.5;
    }
    if act.contains(ActFlags::AGGRESSIVE) {
        difficulty *= 1.1;
    }
    if act.contains(ActFlags::MOUNT) {
        difficulty *= 0.3;
    }
    if act.contains(ActFlags::NOEXP) || act.contains(ActFlags::NOEXP2) {
        difficulty *= 0.5;
    }

    let spawn_rooms: Vec<i64> = resets
        .iter()
        .filter_map(|reset| match *reset {
            Reset::Mob { mob_vnum, room_vnum, .. } if mob_vnum == mob.vnum => Some(room_vnum),
            _ => None,
        })
        .collect();

    MobAnalysis {
        vnum: mob.vnum,
        short_descr: mob.short_descr.clone(),
        level: mob.level,
        avg_hp,
        attacks_per_round: attacks,
        avg_damage_per_round: avg_damage,
        difficulty,
        tier: DifficultyTier::from_score(difficulty),
        act_names: decode_names::<ActFlags>(mob.act),
        affect_names: decode_names::<AffectFlags>(mob.affected_by),
        gold: mob.gold,
        spawn_count: spawn_rooms.len(),
        spawn_rooms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::Dice;

    fn mob(level: i64, hit: Dice) -> Mobile {
        Mobile {
            vnum: 1000,
            name: "troll".into(),
            short_descr: "a troll".into(),
            long_descr: String::new(),
            description: String::new(),
            act: 0,
            affected_by: 0,
            alignment: 0,
            level,
            hitroll: 0,
            ac: 0,
            hit_dice: hit,
            dam_dice: Dice::new(1, 1, 0),
            gold: 0,
            sex: 0,
        }
    }

    #[test]
    fn average_hp_formula() {
        let analysis = analyze_mob(&mob(10, Dice::new(10, 10, 5000)), &[]);
        // 10 * 11 / 2 + 5000
        assert_eq!(analysis.avg_hp, 5055.0);
    }

    #[test]
    fn attack_count_thresholds() {
        // Level bonus is cumulative; dice count adds up to 20.
        assert_eq!(analyze_mob(&mob(49, Dice::new(1, 1, 0)), &[]).attacks_per_round, 2);
        assert_eq!(analyze_mob(&mob(50, Dice::new(1, 1, 0)), &[]).attacks_per_round, 3);
        assert_eq!(analyze_mob(&mob(100, Dice::new(1, 1, 0)), &[]).attacks_per_round, 4);
        assert_eq!(analyze_mob(&mob(2000, Dice::new(1, 1, 0)), &[]).attacks_per_round, 9);
        assert_eq!(analyze_mob(&mob(2000, Dice::new(30, 1, 0)), &[]).attacks_per_round, 28);
    }

    #[test]
    fn difficulty_multipliers() {
        let base = analyze_mob(&mob(100, Dice::new(1, 1, 1000)), &[]).difficulty;

        let mut sanct = mob(100, Dice::new(1, 1, 1000));
        sanct.affected_by = 128;
        assert_eq!(analyze_mob(&sanct, &[]).difficulty, base * 1.5);

        let mut aggro = mob(100, Dice::new(1, 1, 1000));
        aggro.act = 8;
        assert!((analyze_mob(&aggro, &[]).difficulty - base * 1.1).abs() < 1e-9);

        let mut mount = mob(100, Dice::new(1, 1, 1000));
        mount.act = 512;
        assert!((analyze_mob(&mount, &[]).difficulty - base * 0.3).abs() < 1e-9);

        let mut noexp = mob(100, Dice::new(1, 1, 1000));
        noexp.act = 16384;
        assert_eq!(analyze_mob(&noexp, &[]).difficulty, base * 0.5);
    }

    #[test]
    fn negative_ac_capped() {
        let mut tank = mob(1, Dice::new(1, 1, 0));
        tank.ac = -5000;
        let loose = analyze_mob(&tank, &[]).difficulty;
        tank.ac = -1000;
        assert_eq!(analyze_mob(&tank, &[]).difficulty, loose);
    }

    #[test]
    fn tier_buckets() {
        assert_eq!(DifficultyTier::from_score(29.9), DifficultyTier::Trivial);
        assert_eq!(DifficultyTier::from_score(30.0), DifficultyTier::Easy);
        assert_eq!(DifficultyTier::from_score(100.0), DifficultyTier::Normal);
        assert_eq!(DifficultyTier::from_score(300.0), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::from_score(600.0), DifficultyTier::Deadly);
    }

    #[test]
    fn spawn_footprint_from_resets() {
        let resets = vec![
            Reset::Mob { mob_vnum: 1000, limit: 1, room_vnum: 3000 },
            Reset::Mob { mob_vnum: 1001, limit: 1, room_vnum: 3001 },
            Reset::Mob { mob_vnum: 1000, limit: 2, room_vnum: 3002 },
        ];
        let analysis = analyze_mob(&mob(1, Dice::new(1, 1, 0)), &resets);
        assert_eq!(analysis.spawn_count, 2);
        assert_eq!(analysis.spawn_rooms, vec![3000, 3002]);
    }
}
