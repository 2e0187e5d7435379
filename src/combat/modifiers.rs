//! Chance aggregation for every probabilistic check
//!
//! Each chance is a base plus a sum of modifiers, clamped to its own range.
//! Missing stats, stance, weapon or anatomy contribute nothing. Hit and crit
//! are percentages; stagger, parry and intercept are fractions.

use crate::combat::body_zone::Region;
use crate::combat::constants::*;
use crate::combat::weapons::{AttackCategory, Weapon};
use crate::entity::combatant::Combatant;
use crate::entity::stats::Stat;

/// Chance (percent) that an attack connects
///
/// `prone_penalty` comes from the status-effect service and is added as is.
pub fn hit_chance(
    attacker: &Combatant,
    target: &Combatant,
    weapon: Option<&Weapon>,
    prone_penalty: f32,
) -> f32 {
    let mut chance = BASE_HIT_CHANCE;

    chance += attacker.stat_offset(Stat::Strength) as f32 * HIT_PER_ATTACKER_STRENGTH;
    chance += attacker.stat_offset(Stat::Agility) as f32 * HIT_PER_ATTACKER_AGILITY;
    chance -= target.stat_offset(Stat::Agility) as f32 * HIT_PER_TARGET_AGILITY;

    match weapon {
        Some(w) => chance += w.accuracy,
        None => chance -= UNARMED_HIT_PENALTY,
    }

    if let Some(stance) = &attacker.stance {
        chance += stance.hit_mod;
    }

    chance += attacker.penalties().hit_chance_mod;
    chance += target.penalties().dodge_mod;
    chance += prone_penalty;

    chance.clamp(HIT_CHANCE_MIN, HIT_CHANCE_MAX)
}

/// Chance (percent) that a connecting attack is critical
///
/// `part_wounded` says whether the target already has a wound on the rolled
/// part; stances that exploit wounds gain a bonus against it.
pub fn crit_chance(attacker: &Combatant, weapon: Option<&Weapon>, part_wounded: bool) -> f32 {
    let mut chance = BASE_CRIT_CHANCE;

    chance += attacker.stat_offset(Stat::Perception) as f32 * CRIT_PER_PERCEPTION;
    chance += attacker.stat_offset(Stat::Agility) as f32 * CRIT_PER_AGILITY;

    match weapon {
        Some(w) => chance += w.crit_bonus,
        None => chance -= UNARMED_CRIT_PENALTY,
    }

    if let Some(stance) = &attacker.stance {
        chance += stance.crit_mod;
        if part_wounded && stance.exploit_wounded {
            chance += EXPLOIT_WOUND_CRIT_BONUS;
        }
    }

    chance += attacker.penalties().crit_chance_mod;

    chance.clamp(CRIT_CHANCE_MIN, CRIT_CHANCE_MAX)
}

/// Chance (fraction) that a non-critical blunt hit staggers
///
/// Returns `None` for other categories. A critical blunt hit staggers
/// unconditionally and never asks.
pub fn stagger_chance(
    attacker: &Combatant,
    target: &Combatant,
    weapon: Option<&Weapon>,
    damage: i32,
) -> Option<f32> {
    let category = weapon.map(|w| w.category).unwrap_or_default();
    if category != AttackCategory::Blunt {
        return None;
    }

    let mut chance = weapon
        .and_then(|w| w.stagger_chance)
        .unwrap_or(DEFAULT_STAGGER_CHANCE);
    chance += attacker.stat_offset(Stat::Strength) as f32 * STAGGER_PER_STRENGTH;
    chance -= target.stat_offset(Stat::Endurance) as f32 * STAGGER_PER_ENDURANCE;
    if damage > STAGGER_DAMAGE_THRESHOLD {
        chance += (damage - STAGGER_DAMAGE_THRESHOLD) as f32 * STAGGER_PER_EXCESS_DAMAGE;
    }

    Some(chance.clamp(STAGGER_CHANCE_MIN, STAGGER_CHANCE_MAX))
}

/// Chance (fraction) that the target parries with its own weapon
///
/// `None` when the target holds nothing that can parry.
pub fn parry_chance(target: &Combatant) -> Option<f32> {
    let weapon = target.weapon.as_ref().filter(|w| w.can_parry())?;
    let base = weapon.parry_bonus.unwrap_or(0.0);

    let defensive = target.stance.as_ref().is_some_and(|s| s.defensive);
    let mut chance = if defensive { base * 2.0 } else { base * 0.5 };
    chance += target.stat_offset(Stat::Agility) as f32 * PARRY_PER_AGILITY;

    Some(chance.clamp(PARRY_CHANCE_MIN, PARRY_CHANCE_MAX))
}

/// Functional arms, left first
pub fn functional_arms(target: &Combatant) -> Vec<Region> {
    let Some(anatomy) = &target.anatomy else {
        return Vec::new();
    };
    [Region::LeftArm, Region::RightArm]
        .into_iter()
        .filter(|arm| anatomy.is_functional(arm.root()))
        .collect()
}

/// Chance (fraction) that the target blocks a core hit with an arm
///
/// `guard_break` is the status-effect multiplier (1.0 when the guard holds).
pub fn intercept_chance(target: &Combatant, guard_break: f32) -> f32 {
    let base = match functional_arms(target).len() {
        2 => INTERCEPT_BOTH_ARMS,
        1 => INTERCEPT_ONE_ARM,
        _ => 0.0,
    };
    let stance_mod = target.stance.as_ref().map_or(1.0, |s| s.intercept_mod);

    (base * stance_mod * guard_break).clamp(INTERCEPT_CHANCE_MIN, INTERCEPT_CHANCE_MAX)
}
