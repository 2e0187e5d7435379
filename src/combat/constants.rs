//! Combat system constants - all tunable values in one place
//!
//! Hit and crit chances are percentages (0-100). Stagger, parry, intercept
//! and bleed chances are probabilities (0.0-1.0).

/// Stat value that contributes no modifier
pub const STAT_BASELINE: i32 = 10;

// Hit chance (percent)
pub const BASE_HIT_CHANCE: f32 = 55.0;
pub const HIT_PER_ATTACKER_STRENGTH: f32 = 1.5;
pub const HIT_PER_ATTACKER_AGILITY: f32 = 1.0;
pub const HIT_PER_TARGET_AGILITY: f32 = 2.0;
pub const UNARMED_HIT_PENALTY: f32 = 20.0;
pub const HIT_CHANCE_MIN: f32 = 15.0;
pub const HIT_CHANCE_MAX: f32 = 95.0;

// Crit chance (percent)
pub const BASE_CRIT_CHANCE: f32 = 5.0;
pub const CRIT_PER_PERCEPTION: f32 = 1.0;
pub const CRIT_PER_AGILITY: f32 = 0.5;
pub const UNARMED_CRIT_PENALTY: f32 = 3.0;
pub const EXPLOIT_WOUND_CRIT_BONUS: f32 = 10.0;
pub const CRIT_CHANCE_MIN: f32 = 1.0;
pub const CRIT_CHANCE_MAX: f32 = 30.0;
pub const CRIT_DAMAGE_MULTIPLIER: f32 = 1.5;

// Stagger (blunt only)
pub const DEFAULT_STAGGER_CHANCE: f32 = 0.15;
pub const STAGGER_PER_STRENGTH: f32 = 0.03;
pub const STAGGER_PER_ENDURANCE: f32 = 0.03;
pub const STAGGER_DAMAGE_THRESHOLD: i32 = 5;
pub const STAGGER_PER_EXCESS_DAMAGE: f32 = 0.05;
pub const STAGGER_CHANCE_MIN: f32 = 0.05;
pub const STAGGER_CHANCE_MAX: f32 = 0.50;
pub const STAGGER_STUN_TURNS: u32 = 1;

// Parry (target's weapon)
pub const PARRY_PER_AGILITY: f32 = 0.02;
pub const PARRY_CHANCE_MIN: f32 = 0.0;
pub const PARRY_CHANCE_MAX: f32 = 0.40;

// Arm intercept
pub const INTERCEPT_BOTH_ARMS: f32 = 0.25;
pub const INTERCEPT_ONE_ARM: f32 = 0.12;
pub const INTERCEPT_CHANCE_MIN: f32 = 0.0;
pub const INTERCEPT_CHANCE_MAX: f32 = 0.60;

// Damage
pub const UNARMED_DAMAGE_MIN: i32 = 1;
pub const UNARMED_DAMAGE_MAX: i32 = 2;
pub const MIN_HIT_DAMAGE: i32 = 1;

// Wounds - sharp
pub const DEFAULT_BLEED_CHANCE: f32 = 0.4;
pub const VITAL_BLEED_FLOOR: f32 = 0.8;
pub const SHARP_SEVERITY_CRIT: f32 = 0.8;
pub const SHARP_SEVERITY_NORMAL: f32 = 0.5;
pub const VITAL_SEVERITY_MULTIPLIER: f32 = 1.5;
pub const ARTERIAL_CHANCE: f32 = 0.2;
pub const CUT_VS_LACERATION: f32 = 0.5;

// Wounds - blunt
pub const INTERNAL_WOUND_CHANCE: f32 = 0.25;
pub const BLUNT_INTERNAL_SEVERITY_CRIT: f32 = 0.6;
pub const BLUNT_INTERNAL_SEVERITY_NORMAL: f32 = 0.3;
pub const HEAD_LACERATION_CHANCE: f32 = 0.35;
pub const HEAD_LACERATION_SEVERITY: f32 = 0.2;

// Wounds - unarmed
pub const UNARMED_LACERATION_CHANCE: f32 = 0.15;
pub const UNARMED_LACERATION_SEVERITY: f32 = 0.15;
