//! Weapon damage roll
//!
//! Dice, then strength, then injury. The result is always at least 1.

use crate::combat::constants::{MIN_HIT_DAMAGE, UNARMED_DAMAGE_MAX, UNARMED_DAMAGE_MIN};
use crate::combat::weapons::Weapon;
use crate::entity::combatant::Combatant;
use crate::entity::stats::Stat;
use rand::Rng;

/// Raw damage from the weapon's dice, or flat unarmed damage
pub fn roll_base_damage<R: Rng>(weapon: Option<&Weapon>, rng: &mut R) -> i32 {
    match weapon.and_then(|w| w.damage.as_ref()) {
        Some(dice) => dice.roll(rng),
        None => rng.gen_range(UNARMED_DAMAGE_MIN..=UNARMED_DAMAGE_MAX),
    }
}

/// Flat bonus from the attacker's build
///
/// Half the strength offset, truncated toward zero. Creatures without a
/// stat block use their legacy flat bonus instead.
pub fn strength_bonus(attacker: &Combatant) -> i32 {
    if attacker.stats.is_some() {
        attacker.stat_offset(Stat::Strength) / 2
    } else {
        attacker.legacy_damage_bonus
    }
}

/// Roll a weapon's damage for this attacker, before crit, stance and armor
pub fn roll_weapon_damage<R: Rng>(attacker: &Combatant, weapon: Option<&Weapon>, rng: &mut R) -> i32 {
    let base = roll_base_damage(weapon, rng);
    let bonus = strength_bonus(attacker);
    let injury = attacker.penalties().damage_mod;
    let damage = (base.saturating_add(bonus) as f32 * injury).floor() as i32;

    tracing::trace!(base, bonus, injury, damage, "weapon damage rolled");
    damage.max(MIN_HIT_DAMAGE)
}
