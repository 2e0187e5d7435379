//! Combat stance system
//!
//! A stance is a named bundle of modifiers the combatant has active.
//! Additive mods apply to percentage chances, multiplicative mods to damage,
//! bleeding and arm blocks.

use serde::{Deserialize, Serialize};

/// Named modifier bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stance {
    pub name: String,
    /// Added to own hit chance (percent)
    pub hit_mod: f32,
    /// Added to own crit chance (percent)
    pub crit_mod: f32,
    /// Multiplies own outgoing damage
    pub damage_mod: f32,
    /// Multiplies bleed chance of own sharp hits
    pub bleed_mod: f32,
    /// Multiplies own arm-intercept chance when defending
    pub intercept_mod: f32,
    /// Multiplies damage taken after armor
    pub incoming_damage_mod: f32,
    /// Crits come easier against parts that are already wounded
    pub exploit_wounded: bool,
    /// Doubles weapon parry instead of halving it
    pub defensive: bool,
}

impl Default for Stance {
    fn default() -> Self {
        Self::balanced()
    }
}

impl Stance {
    /// Neutral footing, no modifiers
    pub fn balanced() -> Self {
        Self {
            name: "balanced".to_string(),
            hit_mod: 0.0,
            crit_mod: 0.0,
            damage_mod: 1.0,
            bleed_mod: 1.0,
            intercept_mod: 1.0,
            incoming_damage_mod: 1.0,
            exploit_wounded: false,
            defensive: false,
        }
    }

    /// Swing hard, guard low
    pub fn aggressive() -> Self {
        Self {
            name: "aggressive".to_string(),
            hit_mod: 5.0,
            damage_mod: 1.2,
            intercept_mod: 0.5,
            incoming_damage_mod: 1.15,
            ..Self::balanced()
        }
    }

    /// Weapon up, arms in
    pub fn defensive() -> Self {
        Self {
            name: "defensive".to_string(),
            hit_mod: -10.0,
            damage_mod: 0.8,
            intercept_mod: 1.5,
            incoming_damage_mod: 0.85,
            defensive: true,
            ..Self::balanced()
        }
    }

    /// Wait for an opening and go for it
    pub fn precise() -> Self {
        Self {
            name: "precise".to_string(),
            hit_mod: 5.0,
            crit_mod: 5.0,
            damage_mod: 0.9,
            exploit_wounded: true,
            ..Self::balanced()
        }
    }

    /// Tear and rend
    pub fn brutal() -> Self {
        Self {
            name: "brutal".to_string(),
            hit_mod: -5.0,
            damage_mod: 1.1,
            bleed_mod: 1.5,
            exploit_wounded: true,
            ..Self::balanced()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "balanced" => Some(Self::balanced()),
            "aggressive" => Some(Self::aggressive()),
            "defensive" => Some(Self::defensive()),
            "precise" => Some(Self::precise()),
            "brutal" => Some(Self::brutal()),
            _ => None,
        }
    }
}
