//! Status-effect service
//!
//! The engine applies stuns and asks about prone targets and broken guards,
//! but does not own status effects. `StatusBoard` is a simple in-memory
//! implementation for games (and tests) that have nothing better.

use crate::core::types::EntityId;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Status queries and effects the combat engine needs
pub trait StatusEffects {
    /// Stun an entity for a number of turns
    fn apply_stun(&mut self, entity: EntityId, turns: u32);

    /// Hit chance adjustment (percent) for attacking this entity
    fn prone_penalty(&self, entity: EntityId) -> f32;

    /// Multiplier on this entity's arm-intercept chance
    fn guard_break_modifier(&self, entity: EntityId) -> f32;
}

/// Status service that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStatusEffects;

impl StatusEffects for NoStatusEffects {
    fn apply_stun(&mut self, _entity: EntityId, _turns: u32) {}

    fn prone_penalty(&self, _entity: EntityId) -> f32 {
        0.0
    }

    fn guard_break_modifier(&self, _entity: EntityId) -> f32 {
        1.0
    }
}

/// Bonus to hit a prone entity
pub const PRONE_HIT_BONUS: f32 = 15.0;

/// Intercept multiplier while an entity's guard is broken
pub const BROKEN_GUARD_MODIFIER: f32 = 0.0;

/// In-memory stuns, prone flags and guard breaks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusBoard {
    stunned: AHashMap<EntityId, u32>,
    prone: AHashSet<EntityId>,
    guard_broken: AHashMap<EntityId, u32>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining stun turns, zero when not stunned
    pub fn stun_turns(&self, entity: EntityId) -> u32 {
        self.stunned.get(&entity).copied().unwrap_or(0)
    }

    pub fn is_stunned(&self, entity: EntityId) -> bool {
        self.stun_turns(entity) > 0
    }

    pub fn set_prone(&mut self, entity: EntityId, prone: bool) {
        if prone {
            self.prone.insert(entity);
        } else {
            self.prone.remove(&entity);
        }
    }

    pub fn is_prone(&self, entity: EntityId) -> bool {
        self.prone.contains(&entity)
    }

    /// Leave an entity unable to block with its arms for a few turns
    pub fn break_guard(&mut self, entity: EntityId, turns: u32) {
        let remaining = self.guard_broken.entry(entity).or_insert(0);
        *remaining = (*remaining).max(turns);
    }

    /// Count every timed effect down by one turn, dropping the expired ones
    pub fn tick(&mut self) {
        for timers in [&mut self.stunned, &mut self.guard_broken] {
            timers.retain(|_, turns| {
                *turns = turns.saturating_sub(1);
                *turns > 0
            });
        }
    }
}

impl StatusEffects for StatusBoard {
    fn apply_stun(&mut self, entity: EntityId, turns: u32) {
        let remaining = self.stunned.entry(entity).or_insert(0);
        *remaining = (*remaining).max(turns);
        tracing::debug!(%entity, turns, "stunned");
    }

    fn prone_penalty(&self, entity: EntityId) -> f32 {
        if self.is_prone(entity) {
            PRONE_HIT_BONUS
        } else {
            0.0
        }
    }

    fn guard_break_modifier(&self, entity: EntityId) -> f32 {
        if self.guard_broken.contains_key(&entity) {
            BROKEN_GUARD_MODIFIER
        } else {
            1.0
        }
    }
}
