//! Name tables for weapon and armor specials. These are display data
//! for balance reports only; raw integers stay authoritative.

/// Weapon damage verb for `value[3]`.
pub fn weapon_type_name(id: i64) -> Option<&'static str> {
    Some(match id {
        0 => "hit",
        1 => "slice",
        2 => "stab",
        3 => "slash",
        4 => "whip",
        5 => "claw",
        6 => "blast",
        7 => "pound",
        8 => "crush",
        9 => "grep",
        10 => "bite",
        11 => "pierce",
        12 => "suck",
        _ => return None,
    })
}

/// On-hit spell for `value[0] % 1000`; skill-table indices, not slots.
pub fn weapon_spell_name(id: i64) -> Option<&'static str> {
    Some(match id {
        1 => "acid_blast",
        2 => "armor",
        3 => "bless",
        4 => "blindness",
        5 => "burning_hands",
        6 => "call_lightning",
        7 => "cause_critical",
        8 => "cause_light",
        9 => "cause_serious",
        10 => "change_sex",
        11 => "charm_person",
        12 => "chill_touch",
        13 => "colour_spray",
        14 => "continual_light",
        15 => "control_weather",
        16 => "create_food",
        17 => "create_spring",
        18 => "create_water",
        19 => "cure_blindness",
        20 => "cure_critical",
        21 => "cure_light",
        22 => "cure_poison",
        23 => "cure_serious",
        24 => "curse",
        25 => "detect_evil",
        26 => "detect_hidden",
        27 => "detect_invis",
        28 => "detect_magic",
        29 => "detect_poison",
        30 => "dispel_evil",
        31 => "dispel_magic",
        32 => "earthquake",
        33 => "enchant_weapon",
        34 => "energy_drain",
        35 => "faerie_fire",
        36 => "faerie_fog",
        37 => "fireball",
        38 => "flamestrike",
        39 => "fly",
        40 => "gate",
        41 => "giant_strength",
        42 => "harm",
        43 => "heal",
        44 => "identify",
        45 => "infravision",
        46 => "invis",
        47 => "know_alignment",
        48 => "lightning_bolt",
        49 => "locate_object",
        50 => "magic_missile",
        51 => "mass_invis",
        52 => "pass_door",
        53 => "poison",
        54 => "protection",
        55 => "readaura",
        56 => "refresh",
        57 => "remove_curse",
        58 => "sanctuary",
        59 => "shield",
        60 => "shocking_grasp",
        61 => "sleep",
        62 => "stone_skin",
        63 => "summon",
        64 => "teleport",
        65 => "ventriloquate",
        66 => "weaken",
        67 => "word_of_recall",
        68 => "acid_breath",
        69 => "fire_breath",
        70 => "frost_breath",
        71 => "gas_breath",
        72 => "lightning_breath",
        _ => return None,
    })
}

/// Passive wielder affect for `value[0] / 1000`.
pub fn weapon_affect_name(id: i64) -> Option<&'static str> {
    Some(match id {
        1 => "darkness_aura",
        2 => "see_invis",
        3 => "flight",
        4 => "infravision",
        5 => "invisibility",
        6 => "pass_door",
        7 => "protect_evil",
        8 => "sanctuary",
        9 => "sneak",
        10 => "shock_shield",
        11 => "fire_shield",
        12 => "ice_shield",
        13 => "acid_shield",
        14 => "god_power",
        15 => "chaos_shield",
        16 => "regeneration",
        17 => "haste",
        18 => "armor_pierce",
        19 => "player_protect",
        20 => "darkness_shield",
        21 => "superior_protect",
        22 => "truesight",
        23 => "fleet_foot",
        24 => "concealment",
        25 => "beast_power",
        27 => "detect_invis",
        39 => "fly",
        45 => "dark_vision",
        46 => "invis",
        52 => "phase",
        54 => "holy_protect",
        57 => "combat_protect",
        _ => return None,
    })
}

/// Armor special for `value[3]`; a superset of the weapon affects.
pub fn armor_special_name(id: i64) -> Option<&'static str> {
    match id {
        28 => Some("ancient_magic"),
        29 => Some("third_eye"),
        30 => Some("talons"),
        88 => Some("unknown_88"),
        139 => Some("protect_good"),
        other => weapon_affect_name(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spell_and_affect_lookups() {
        assert_eq!(weapon_spell_name(37), Some("fireball"));
        assert_eq!(weapon_spell_name(0), None);
        assert_eq!(weapon_spell_name(73), None);
        assert_eq!(weapon_affect_name(8), Some("sanctuary"));
        assert_eq!(armor_special_name(8), Some("sanctuary"));
        assert_eq!(armor_special_name(139), Some("protect_good"));
        assert_eq!(weapon_type_name(3), Some("slash"));
    }
}
