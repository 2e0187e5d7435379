//! Combatants as the engine sees them
//!
//! Every capability except identity is optional. A combatant with no stats,
//! no anatomy, no weapon and no stance is still a valid target; it just
//! contributes zero modifiers.

use crate::combat::equipment::{Equipment, EquipmentSlot, Item};
use crate::combat::stance::Stance;
use crate::combat::weapons::Weapon;
use crate::core::types::{EntityId, Position};
use crate::entity::anatomy::{Anatomy, CombatPenalties};
use crate::entity::stats::{Stat, Stats};
use serde::{Deserialize, Serialize};

/// How aware a non-player entity is of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectionState {
    #[default]
    Unaware,
    Suspicious,
    Searching,
    Engaged,
    Fleeing,
}

/// Detection state of a non-player entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NpcAwareness {
    pub detection: DetectionState,
    pub last_known_player_position: Option<Position>,
}

impl NpcAwareness {
    /// Pull the entity into the fight unless it is running away
    pub fn engage(&mut self, player_position: Position) {
        if self.detection != DetectionState::Fleeing {
            self.detection = DetectionState::Engaged;
        }
        self.last_known_player_position = Some(player_position);
    }
}

/// A participant in melee
#[derive(Debug)]
pub struct Combatant {
    pub id: EntityId,
    /// Display name; the player's is the second-person pronoun
    pub name: String,
    pub is_player: bool,
    pub position: Position,
    pub stats: Option<Stats>,
    pub anatomy: Option<Box<dyn Anatomy>>,
    pub weapon: Option<Weapon>,
    pub equipment: Equipment,
    pub stance: Option<Stance>,
    /// Present on non-player entities only
    pub awareness: Option<NpcAwareness>,
    /// Flat damage bonus for stat-less creatures
    pub legacy_damage_bonus: i32,
}

impl Combatant {
    /// The player, displayed as "you"
    pub fn player() -> Self {
        Self {
            id: EntityId::new(),
            name: "you".to_string(),
            is_player: true,
            position: Position::default(),
            stats: None,
            anatomy: None,
            weapon: None,
            equipment: Equipment::new(),
            stance: None,
            awareness: None,
            legacy_damage_bonus: 0,
        }
    }

    /// A non-player creature with no capabilities yet
    pub fn npc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_player: false,
            awareness: Some(NpcAwareness::default()),
            ..Self::player()
        }
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_anatomy(mut self, anatomy: impl Anatomy + 'static) -> Self {
        self.anatomy = Some(Box::new(anatomy));
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.stance = Some(stance);
        self
    }

    pub fn with_item(mut self, slot: EquipmentSlot, item: Item) -> Self {
        self.equipment.equip(slot, item);
        self
    }

    pub fn with_legacy_damage_bonus(mut self, bonus: i32) -> Self {
        self.legacy_damage_bonus = bonus;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Attribute distance from baseline; zero without stats
    pub fn stat_offset(&self, stat: Stat) -> i32 {
        self.stats.as_ref().map_or(0, |s| s.offset(stat))
    }

    /// Injury penalties; neutral without anatomy
    pub fn penalties(&self) -> CombatPenalties {
        self.anatomy
            .as_ref()
            .map(|a| a.combat_penalties())
            .unwrap_or_default()
    }

    pub fn is_dead(&self) -> bool {
        self.anatomy.as_ref().is_some_and(|a| a.is_dead())
    }

    pub fn weapon_name(&self) -> &str {
        self.weapon.as_ref().map_or("fists", |w| w.name.as_str())
    }
}
