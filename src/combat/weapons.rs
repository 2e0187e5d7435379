//! Melee weapon stats
//!
//! A weapon is read-only data: a damage expression, an attack category and
//! a handful of additive bonuses. Missing optional values fall back to the
//! defaults in `combat::constants`.

use crate::combat::dice::DiceExpr;
use serde::{Deserialize, Serialize};

/// How a weapon delivers force; drives targeting weights and wound types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttackCategory {
    Blunt,
    Sharp,
    #[default]
    Unarmed,
}

impl AttackCategory {
    pub fn all() -> [AttackCategory; 3] {
        [
            AttackCategory::Blunt,
            AttackCategory::Sharp,
            AttackCategory::Unarmed,
        ]
    }

    /// Base verb for attack messages, conjugated by the message formatter
    pub fn verb(&self) -> &'static str {
        match self {
            AttackCategory::Blunt => "bash",
            AttackCategory::Sharp => "slash",
            AttackCategory::Unarmed => "punch",
        }
    }
}

/// Complete weapon stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Dice expression; `None` rolls flat unarmed damage
    #[serde(default)]
    pub damage: Option<DiceExpr>,
    #[serde(default)]
    pub category: AttackCategory,
    /// Added to hit chance (percent)
    #[serde(default)]
    pub accuracy: f32,
    /// Added to crit chance (percent)
    #[serde(default)]
    pub crit_bonus: f32,
    #[serde(default)]
    pub bleed_chance: Option<f32>,
    #[serde(default)]
    pub stagger_chance: Option<f32>,
    /// Parry chance before stance scaling; `None` means the weapon cannot parry
    #[serde(default)]
    pub parry_bonus: Option<f32>,
}

impl Weapon {
    /// Bare weapon with only a name, damage and category
    pub fn new(name: impl Into<String>, damage: &str, category: AttackCategory) -> Self {
        Self {
            name: name.into(),
            damage: Some(DiceExpr::parse(damage)),
            category,
            accuracy: 0.0,
            crit_bonus: 0.0,
            bleed_chance: None,
            stagger_chance: None,
            parry_bonus: None,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_crit_bonus(mut self, crit_bonus: f32) -> Self {
        self.crit_bonus = crit_bonus;
        self
    }

    pub fn with_bleed_chance(mut self, chance: f32) -> Self {
        self.bleed_chance = Some(chance);
        self
    }

    pub fn with_stagger_chance(mut self, chance: f32) -> Self {
        self.stagger_chance = Some(chance);
        self
    }

    pub fn with_parry_bonus(mut self, bonus: f32) -> Self {
        self.parry_bonus = Some(bonus);
        self
    }

    /// Can this weapon turn a blow aside?
    pub fn can_parry(&self) -> bool {
        self.parry_bonus.is_some_and(|p| p > 0.0)
    }

    /// Kitchen knife: quick and bloody
    pub fn knife() -> Self {
        Self::new("knife", "1d4+1", AttackCategory::Sharp)
            .with_accuracy(10.0)
            .with_crit_bonus(4.0)
            .with_bleed_chance(0.5)
            .with_parry_bonus(0.05)
    }

    /// Machete: the survivor's favorite
    pub fn machete() -> Self {
        Self::new("machete", "1d8+1", AttackCategory::Sharp)
            .with_accuracy(5.0)
            .with_crit_bonus(2.0)
            .with_bleed_chance(0.45)
            .with_parry_bonus(0.15)
    }

    /// Baseball bat
    pub fn baseball_bat() -> Self {
        Self::new("baseball bat", "1d8+1d6", AttackCategory::Blunt)
            .with_stagger_chance(0.2)
            .with_parry_bonus(0.1)
    }

    /// Crowbar
    pub fn crowbar() -> Self {
        Self::new("crowbar", "1d6+2", AttackCategory::Blunt)
            .with_accuracy(2.0)
            .with_stagger_chance(0.15)
            .with_parry_bonus(0.12)
    }

    /// Length of pipe
    pub fn pipe() -> Self {
        Self::new("lead pipe", "1d6+1", AttackCategory::Blunt).with_stagger_chance(0.18)
    }

    /// Improvised spear
    pub fn spear() -> Self {
        Self::new("spear", "1d10", AttackCategory::Sharp)
            .with_accuracy(-5.0)
            .with_bleed_chance(0.35)
            .with_parry_bonus(0.2)
    }

    /// Brass knuckles: fists, but heavier
    pub fn brass_knuckles() -> Self {
        Self::new("brass knuckles", "1d3+1", AttackCategory::Unarmed).with_crit_bonus(1.0)
    }

    /// Look up a preset by snake_case name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "knife" => Some(Self::knife()),
            "machete" => Some(Self::machete()),
            "baseball_bat" | "bat" => Some(Self::baseball_bat()),
            "crowbar" => Some(Self::crowbar()),
            "pipe" | "lead_pipe" => Some(Self::pipe()),
            "spear" => Some(Self::spear()),
            "brass_knuckles" => Some(Self::brass_knuckles()),
            _ => None,
        }
    }
}
