//! Wound generation
//!
//! Decides which wounds a confirmed hit leaves, from the attack category
//! and whether the struck part is vital. Deciding is pure; `apply_wounds`
//! writes the result into the target's anatomy.

use crate::combat::body_zone::{BodyPartId, Region};
use crate::combat::constants::*;
use crate::combat::targeting::HitLocation;
use crate::combat::weapons::{AttackCategory, Weapon};
use crate::core::types::Turn;
use crate::entity::anatomy::Anatomy;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use crate::entity::anatomy::{Wound, WoundType};

/// A wound the pipeline decided to inflict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflictedWound {
    pub part: BodyPartId,
    pub wound_type: WoundType,
    pub severity: f32,
}

/// Everything wound generation needs to know about the hit
#[derive(Debug, Clone, Copy)]
pub struct WoundContext<'a> {
    pub weapon: Option<&'a Weapon>,
    /// Attacker stance bleed multiplier, 1.0 without a stance
    pub bleed_mod: f32,
    pub location: &'a HitLocation,
    /// Final damage after armor
    pub damage: i32,
    pub critical: bool,
}

impl WoundContext<'_> {
    fn category(&self) -> AttackCategory {
        self.weapon.map(|w| w.category).unwrap_or_default()
    }
}

/// Roll the wounds for one hit
///
/// Draw order: sharp hits draw for bleeding (skipped on a crit), then for
/// the wound type; blunt and unarmed hits draw once at most.
pub fn roll_wounds<R: Rng>(ctx: &WoundContext<'_>, rng: &mut R) -> Vec<InflictedWound> {
    let part = ctx.location.struck_part();
    let damage = ctx.damage as f32;
    let vital = ctx.location.vital;

    let wound = match ctx.category() {
        AttackCategory::Sharp => sharp_wound(ctx, damage, vital, rng),
        AttackCategory::Blunt => blunt_wound(ctx, damage, vital, rng),
        AttackCategory::Unarmed => unarmed_wound(ctx, damage, rng),
    };

    wound
        .map(|(wound_type, severity)| InflictedWound {
            part,
            wound_type,
            severity,
        })
        .into_iter()
        .collect()
}

fn sharp_wound<R: Rng>(
    ctx: &WoundContext<'_>,
    damage: f32,
    vital: bool,
    rng: &mut R,
) -> Option<(WoundType, f32)> {
    let mut bleed = ctx
        .weapon
        .and_then(|w| w.bleed_chance)
        .unwrap_or(DEFAULT_BLEED_CHANCE)
        * ctx.bleed_mod;
    if vital {
        bleed = bleed.max(VITAL_BLEED_FLOOR);
    }

    let bleeds = ctx.critical || rng.gen::<f32>() < bleed;
    if !bleeds {
        return None;
    }

    let mut severity = damage
        * if ctx.critical {
            SHARP_SEVERITY_CRIT
        } else {
            SHARP_SEVERITY_NORMAL
        };

    let wound_type = if vital {
        severity *= VITAL_SEVERITY_MULTIPLIER;
        if ctx.critical || rng.gen::<f32>() < ARTERIAL_CHANCE {
            WoundType::Arterial
        } else {
            WoundType::Puncture
        }
    } else if rng.gen::<f32>() < CUT_VS_LACERATION {
        WoundType::Cut
    } else {
        WoundType::Laceration
    };

    Some((wound_type, severity))
}

fn blunt_wound<R: Rng>(
    ctx: &WoundContext<'_>,
    damage: f32,
    vital: bool,
    rng: &mut R,
) -> Option<(WoundType, f32)> {
    if vital {
        let internal = ctx.critical || rng.gen::<f32>() < INTERNAL_WOUND_CHANCE;
        let factor = if ctx.critical {
            BLUNT_INTERNAL_SEVERITY_CRIT
        } else {
            BLUNT_INTERNAL_SEVERITY_NORMAL
        };
        return internal.then_some((WoundType::Internal, damage * factor));
    }

    if ctx.location.region == Region::Head && rng.gen::<f32>() < HEAD_LACERATION_CHANCE {
        return Some((WoundType::Laceration, damage * HEAD_LACERATION_SEVERITY));
    }
    None
}

fn unarmed_wound<R: Rng>(ctx: &WoundContext<'_>, damage: f32, rng: &mut R) -> Option<(WoundType, f32)> {
    if !ctx.critical || ctx.location.region != Region::Head {
        return None;
    }
    (rng.gen::<f32>() < UNARMED_LACERATION_CHANCE)
        .then_some((WoundType::Laceration, damage * UNARMED_LACERATION_SEVERITY))
}

/// Record wounds on the anatomy, with pain equal to each wound's severity
pub fn apply_wounds(anatomy: &mut dyn Anatomy, wounds: &[InflictedWound], turn: Turn) {
    for wound in wounds {
        anatomy.add_wound(wound.part, wound.severity, wound.wound_type);
        anatomy.add_pain(wound.severity, turn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::targeting::CombatTables;
    use crate::core::rng::ScriptedRng;
    use crate::entity::body::HumanBody;

    fn location(part: BodyPartId) -> HitLocation {
        CombatTables::default().location_of(part)
    }

    fn ctx<'a>(
        weapon: Option<&'a Weapon>,
        location: &'a HitLocation,
        damage: i32,
        critical: bool,
    ) -> WoundContext<'a> {
        WoundContext {
            weapon,
            bleed_mod: 1.0,
            location,
            damage,
            critical,
        }
    }

    #[test]
    fn test_sharp_vital_forces_bleed() {
        let knife = Weapon::knife().with_bleed_chance(0.0);
        let heart = location(BodyPartId::Heart);
        // 0.7 beats the 0.8 floor, 0.5 misses the 20% arterial roll
        let mut rng = ScriptedRng::new(&[0.7, 0.5]);
        let wounds = roll_wounds(&ctx(Some(&knife), &heart, 10, false), &mut rng);
        assert_eq!(wounds.len(), 1);
        assert_eq!(wounds[0].wound_type, WoundType::Puncture);
        assert!((wounds[0].severity - 7.5).abs() < 1e-6);
    }

    #[test]
    fn test_sharp_vital_arterial_sub_roll() {
        let knife = Weapon::knife();
        let heart = location(BodyPartId::Heart);
        let mut rng = ScriptedRng::new(&[0.1, 0.1]);
        let wounds = roll_wounds(&ctx(Some(&knife), &heart, 10, false), &mut rng);
        assert_eq!(wounds[0].wound_type, WoundType::Arterial);
    }

    #[test]
    fn test_sharp_crit_always_bleeds() {
        let knife = Weapon::knife().with_bleed_chance(0.0);
        let heart = location(BodyPartId::Heart);
        let mut rng = ScriptedRng::new(&[0.99]);
        let wounds = roll_wounds(&ctx(Some(&knife), &heart, 10, true), &mut rng);
        assert_eq!(wounds[0].wound_type, WoundType::Arterial);
        // 10 * 0.8 * 1.5
        assert!((wounds[0].severity - 12.0).abs() < 1e-6);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_sharp_non_vital_cut_or_laceration() {
        let knife = Weapon::knife();
        let thigh = location(BodyPartId::LeftThigh);
        let mut rng = ScriptedRng::new(&[0.1, 0.2]);
        let cut = roll_wounds(&ctx(Some(&knife), &thigh, 4, false), &mut rng);
        assert_eq!(cut[0].wound_type, WoundType::Cut);
        assert_eq!(cut[0].part, BodyPartId::LeftThigh);

        let mut rng = ScriptedRng::new(&[0.1, 0.8]);
        let lac = roll_wounds(&ctx(Some(&knife), &thigh, 4, false), &mut rng);
        assert_eq!(lac[0].wound_type, WoundType::Laceration);
    }

    #[test]
    fn test_sharp_no_bleed() {
        let knife = Weapon::knife();
        let thigh = location(BodyPartId::LeftThigh);
        let mut rng = ScriptedRng::new(&[0.95]);
        assert!(roll_wounds(&ctx(Some(&knife), &thigh, 4, false), &mut rng).is_empty());
    }

    #[test]
    fn test_blunt_internal_on_vital() {
        let bat = Weapon::baseball_bat();
        let liver = location(BodyPartId::Liver);
        let mut rng = ScriptedRng::new(&[0.1]);
        let wounds = roll_wounds(&ctx(Some(&bat), &liver, 10, false), &mut rng);
        assert_eq!(wounds[0].wound_type, WoundType::Internal);
        assert!((wounds[0].severity - 3.0).abs() < 1e-6);

        let mut rng = ScriptedRng::new(&[0.9]);
        assert!(roll_wounds(&ctx(Some(&bat), &liver, 10, false), &mut rng).is_empty());
    }

    #[test]
    fn test_blunt_head_laceration() {
        let bat = Weapon::baseball_bat();
        let jaw = location(BodyPartId::Jaw);
        let mut rng = ScriptedRng::new(&[0.3]);
        let wounds = roll_wounds(&ctx(Some(&bat), &jaw, 10, false), &mut rng);
        assert_eq!(wounds[0].wound_type, WoundType::Laceration);
        assert!((wounds[0].severity - 2.0).abs() < 1e-6);

        let shin = location(BodyPartId::LeftShin);
        let mut rng = ScriptedRng::new(&[0.0]);
        assert!(roll_wounds(&ctx(Some(&bat), &shin, 10, false), &mut rng).is_empty());
    }

    #[test]
    fn test_unarmed_needs_crit_to_head() {
        let jaw = location(BodyPartId::Jaw);
        let mut rng = ScriptedRng::new(&[0.0]);
        assert!(roll_wounds(&ctx(None, &jaw, 3, false), &mut rng).is_empty());
        assert_eq!(rng.consumed(), 0);

        let wounds = roll_wounds(&ctx(None, &jaw, 4, true), &mut rng);
        assert_eq!(wounds[0].wound_type, WoundType::Laceration);
        assert!((wounds[0].severity - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_apply_wounds_records_pain() {
        let mut body = HumanBody::new();
        let wounds = vec![InflictedWound {
            part: BodyPartId::LeftLung,
            wound_type: WoundType::Puncture,
            severity: 6.0,
        }];
        apply_wounds(&mut body, &wounds, 3);
        assert!(body.has_wound_at(BodyPartId::LeftLung));
        assert_eq!(body.pain, 6.0);
        assert_eq!(body.last_pain_turn, Some(3));
    }
}
