//! Anatomy contract the combat engine reads and mutates
//!
//! The engine never owns injury simulation. It asks an `Anatomy` for
//! penalties, damages the struck part, records wounds and pain, and asks
//! whether the target died.

use crate::combat::body_zone::BodyPartId;
use crate::combat::weapons::AttackCategory;
use crate::core::types::Turn;
use serde::{Deserialize, Serialize};

/// Hit points and status of one body part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPart {
    pub hp: i32,
    pub max_hp: i32,
    pub functional: bool,
    pub last_damage_type: Option<AttackCategory>,
}

impl BodyPart {
    pub fn new(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            functional: true,
            last_damage_type: None,
        }
    }

    /// Apply damage, clamping hp at zero
    ///
    /// Returns true only on the hit that takes hp from above zero to zero;
    /// that is also the only time `functional` is cleared.
    pub fn take_damage(&mut self, amount: i32, kind: AttackCategory) -> bool {
        let was_intact = self.hp > 0;
        self.hp = self.hp.saturating_sub(amount.max(0)).max(0);
        self.last_damage_type = Some(kind);

        if was_intact && self.hp == 0 {
            self.functional = false;
            return true;
        }
        false
    }
}

/// Kind of wound left behind by a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WoundType {
    Cut,
    Laceration,
    Puncture,
    Arterial,
    Internal,
}

impl WoundType {
    /// Blood lost per turn per point of severity
    pub fn bleed_rate(&self) -> f32 {
        match self {
            WoundType::Arterial => 1.0,
            WoundType::Puncture => 0.4,
            WoundType::Internal => 0.3,
            WoundType::Laceration => 0.25,
            WoundType::Cut => 0.2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WoundType::Cut => "cut",
            WoundType::Laceration => "laceration",
            WoundType::Puncture => "puncture",
            WoundType::Arterial => "arterial bleed",
            WoundType::Internal => "internal bleeding",
        }
    }
}

/// A wound on a specific body part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wound {
    pub part: BodyPartId,
    pub wound_type: WoundType,
    pub severity: f32,
    pub turns_active: u32,
}

/// One contributor to the aggregated injury penalties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltySource {
    pub label: String,
    pub hit_chance_mod: f32,
    pub crit_chance_mod: f32,
    pub damage_mod: f32,
    pub dodge_mod: f32,
}

/// Injury penalties aggregated over every source
///
/// `hit_chance_mod`, `crit_chance_mod` and `dodge_mod` are additive
/// percentages; `damage_mod` is a multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatPenalties {
    pub hit_chance_mod: f32,
    pub crit_chance_mod: f32,
    pub damage_mod: f32,
    pub dodge_mod: f32,
    pub sources: Vec<PenaltySource>,
}

impl Default for CombatPenalties {
    fn default() -> Self {
        Self {
            hit_chance_mod: 0.0,
            crit_chance_mod: 0.0,
            damage_mod: 1.0,
            dodge_mod: 0.0,
            sources: Vec::new(),
        }
    }
}

impl CombatPenalties {
    /// Fold one source into the totals
    pub fn add(&mut self, source: PenaltySource) {
        self.hit_chance_mod += source.hit_chance_mod;
        self.crit_chance_mod += source.crit_chance_mod;
        self.damage_mod *= source.damage_mod;
        self.dodge_mod += source.dodge_mod;
        self.sources.push(source);
    }
}

/// Injury state a combatant exposes to the combat engine
pub trait Anatomy: std::fmt::Debug {
    /// Aggregated penalties from current injuries
    fn combat_penalties(&self) -> CombatPenalties;

    fn part(&self, id: BodyPartId) -> Option<&BodyPart>;

    fn part_mut(&mut self, id: BodyPartId) -> Option<&mut BodyPart>;

    fn add_wound(&mut self, part: BodyPartId, severity: f32, wound_type: WoundType);

    /// Record pain for shock tracking
    fn add_pain(&mut self, amount: f32, turn: Turn);

    fn is_dead(&self) -> bool;

    fn wounds(&self) -> &[Wound];

    /// Advance injury state by one turn; the combat engine never calls this
    fn tick(&mut self) {}

    /// Does the part exist and still work?
    fn is_functional(&self, id: BodyPartId) -> bool {
        self.part(id).is_some_and(|p| p.functional)
    }

    /// Is there at least one wound on this part?
    fn has_wound_at(&self, id: BodyPartId) -> bool {
        self.wounds().iter().any(|w| w.part == id)
    }
}
