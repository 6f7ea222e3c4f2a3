use std::collections::BTreeMap;

use serde::Serialize;
use strum::Display;

use crate::area::Object;
use crate::flags::ApplyType;

use super::tables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PowerTier {
    Junk,
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl PowerTier {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 10.0 => PowerTier::Junk,
            s if s < 50.0 => PowerTier::Common,
            s if s < 200.0 => PowerTier::Uncommon,
            s if s < 500.0 => PowerTier::Rare,
            s if s < 1000.0 => PowerTier::Epic,
            _ => PowerTier::Legendary,
        }
    }
}

/// Decoded weapon values: damage range plus on-hit spell and passive
/// wielder affect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponInfo {
    pub min_damage: i64,
    pub max_damage: i64,
    pub avg_damage: f64,
    pub damage_verb: String,
    pub spell: Option<&'static str>,
    pub affect: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmorInfo {
    pub base_ac: i64,
    pub special: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectAnalysis {
    pub vnum: i64,
    pub short_descr: String,
    pub item_type: i64,
    pub power: f64,
    pub tier: PowerTier,
    pub hitroll: i64,
    pub damroll: i64,
    pub ac_mod: i64,
    pub weapon: Option<WeaponInfo>,
    pub armor: Option<ArmorInfo>,
}

const ITEM_WEAPON: i64 = 5;
const ITEM_ARMOR: i64 = 9;

/// Weight applied to the summed modifier of one apply location.
fn apply_weight(apply: i64, modifier: i64) -> f64 {
    let apply_type = ApplyType::from_repr(apply);
    let abs = modifier.abs() as f64;
    match apply_type {
        Some(ApplyType::Hitroll) | Some(ApplyType::Damroll) => modifier.max(0) as f64 * 3.0,
        Some(ApplyType::Ac) => {
            if modifier < 0 {
                abs
            } else {
                -0.5 * modifier as f64
            }
        }
        Some(ApplyType::Str)
        | Some(ApplyType::Dex)
        | Some(ApplyType::Int)
        | Some(ApplyType::Wis)
        | Some(ApplyType::Con) => abs * 2.0,
        Some(ApplyType::Hit) => abs * 0.05,
        Some(ApplyType::Mana) => abs * 0.03,
        Some(ApplyType::SavingPara)
        | Some(ApplyType::SavingRod)
        | Some(ApplyType::SavingPetri)
        | Some(ApplyType::SavingBreath)
        | Some(ApplyType::SavingSpell) => abs * 0.5,
        _ => abs * 0.3,
    }
}

pub fn analyze_object(obj: &Object) -> ObjectAnalysis {
    // Sum modifiers per apply location first; repeated applies stack.
    let mut summed: BTreeMap<i64, i64> = BTreeMap::new();
    for affect in &obj.affects {
        *summed.entry(affect.location).or_default() += affect.modifier;
    }

    let mut power: f64 = summed
        .iter()
        .map(|(&apply, &modifier)| apply_weight(apply, modifier))
        .sum();

    let hitroll = summed.get(&(ApplyType::Hitroll as i64)).copied().unwrap_or(0);
    let damroll = summed.get(&(ApplyType::Damroll as i64)).copied().unwrap_or(0);
    let ac_mod = summed.get(&(ApplyType::Ac as i64)).copied().unwrap_or(0);

    let weapon = (obj.item_type == ITEM_WEAPON).then(|| {
        let [v0, v1, v2, v3] = obj.value;
        let spell_id = v0 % 1000;
        let affect_id = v0 / 1000;
        let avg_damage = if v2 > 0 { (v1 + v2) as f64 / 2.0 } else { v1 as f64 };
        power += avg_damage * 1.5;
        if spell_id > 0 {
            power += 25.0;
        }
        if affect_id > 0 {
            power += 35.0;
        }
        WeaponInfo {
            min_damage: v1,
            max_damage: v2,
            avg_damage,
            damage_verb: tables::weapon_type_name(v3)
                .map(str::to_string)
                .unwrap_or_else(|| format!("type_{v3}")),
            spell: if spell_id > 0 { tables::weapon_spell_name(spell_id) } else { None },
            affect: if affect_id > 0 { tables::weapon_affect_name(affect_id) } else { None },
        }
    });

    let armor = (obj.item_type == ITEM_ARMOR).then(|| {
        let base_ac = obj.value[0];
        let v3 = obj.value[3];
        power += base_ac as f64 * 2.0;
        if v3 > 0 {
            power += 50.0;
        }
        ArmorInfo {
            base_ac,
            special: if v3 > 0 { tables::armor_special_name(v3) } else { None },
        }
    });

    ObjectAnalysis {
        vnum: obj.vnum,
        short_descr: obj.short_descr.clone(),
        item_type: obj.item_type,
        power,
        tier: PowerTier::from_score(power),
        hitroll,
        damroll,
        ac_mod,
        weapon,
        armor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::ObjectAffect;

    fn object(item_type: i64, value: [i64; 4]) -> Object {
        Object {
            vnum: 2000,
            name: "thing".into(),
            short_descr: "a thing".into(),
            description: String::new(),
            action_descr: String::new(),
            item_type,
            extra_flags: 0,
            wear_flags: 0,
            value,
            weight: 0,
            cost: 0,
            level: 0,
            affects: Vec::new(),
            extra_descs: Vec::new(),
            power: None,
        }
    }

    #[test]
    fn hitroll_and_damroll_weigh_three() {
        let mut obj = object(13, [0; 4]);
        obj.affects.push(ObjectAffect { location: 18, modifier: 10 });
        obj.affects.push(ObjectAffect { location: 19, modifier: 5 });
        let analysis = analyze_object(&obj);
        assert_eq!(analysis.power, 45.0);
        assert_eq!(analysis.hitroll, 10);
        assert_eq!(analysis.damroll, 5);
        assert_eq!(analysis.tier, PowerTier::Common);
    }

    #[test]
    fn negative_hitroll_is_ignored() {
        let mut obj = object(13, [0; 4]);
        obj.affects.push(ObjectAffect { location: 18, modifier: -10 });
        assert_eq!(analyze_object(&obj).power, 0.0);
    }

    #[test]
    fn ac_sign_asymmetry() {
        let mut good = object(13, [0; 4]);
        good.affects.push(ObjectAffect { location: 17, modifier: -30 });
        assert_eq!(analyze_object(&good).power, 30.0);

        let mut bad = object(13, [0; 4]);
        bad.affects.push(ObjectAffect { location: 17, modifier: 30 });
        assert_eq!(analyze_object(&bad).power, -15.0);
    }

    #[test]
    fn repeated_applies_stack_before_weighting() {
        let mut obj = object(13, [0; 4]);
        obj.affects.push(ObjectAffect { location: 18, modifier: 10 });
        obj.affects.push(ObjectAffect { location: 18, modifier: -4 });
        // Net hitroll 6 -> 18 power.
        assert_eq!(analyze_object(&obj).power, 18.0);
    }

    #[test]
    fn weapon_decoding() {
        // value0 8037: affect 8 (sanctuary), spell 37 (fireball).
        let obj = object(5, [8037, 10, 30, 3]);
        let analysis = analyze_object(&obj);
        let weapon = analysis.weapon.as_ref().unwrap();
        assert_eq!(weapon.avg_damage, 20.0);
        assert_eq!(weapon.spell, Some("fireball"));
        assert_eq!(weapon.affect, Some("sanctuary"));
        assert_eq!(weapon.damage_verb, "slash");
        // 20 * 1.5 + 25 + 35
        assert_eq!(analysis.power, 90.0);
    }

    #[test]
    fn weapon_without_max_uses_min() {
        let obj = object(5, [0, 8, 0, 0]);
        let weapon = analyze_object(&obj).weapon.unwrap();
        assert_eq!(weapon.avg_damage, 8.0);
    }

    #[test]
    fn armor_scoring() {
        let obj = object(9, [25, 0, 0, 8]);
        let analysis = analyze_object(&obj);
        // 25 * 2 + 50 special
        assert_eq!(analysis.power, 100.0);
        let armor = analysis.armor.unwrap();
        assert_eq!(armor.base_ac, 25);
        assert_eq!(armor.special, Some("sanctuary"));
    }

    #[test]
    fn tier_buckets() {
        assert_eq!(PowerTier::from_score(9.9), PowerTier::Junk);
        assert_eq!(PowerTier::from_score(10.0), PowerTier::Common);
        assert_eq!(PowerTier::from_score(200.0), PowerTier::Rare);
        assert_eq!(PowerTier::from_score(1000.0), PowerTier::Legendary);
    }
}
