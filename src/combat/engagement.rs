//! Engagement tracking
//!
//! Which non-player entities are currently fighting the player. A record is
//! refreshed on every exchange and expires after a quiet spell or on death.

use crate::core::types::{EntityId, Turn};
use crate::entity::combatant::Combatant;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// One entity fighting the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub entity: EntityId,
    pub name: String,
    pub last_combat_turn: Turn,
    pub dead: bool,
}

impl EngagementRecord {
    /// Quiet for longer than the timeout allows
    pub fn is_stale(&self, turn: Turn, timeout: u64) -> bool {
        turn.saturating_sub(self.last_combat_turn) > timeout
    }
}

/// Enemies currently engaged with the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementTracker {
    records: AHashMap<EntityId, EngagementRecord>,
    timeout: u64,
}

impl EngagementTracker {
    pub fn new(timeout: u64) -> Self {
        Self {
            records: AHashMap::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Record an exchange between `entity` and `opponent`
    ///
    /// Only the non-player side of an exchange with the player is tracked.
    /// The entity's awareness is pulled to engaged and pointed at the player.
    pub fn track(&mut self, entity: &mut Combatant, opponent: &Combatant, turn: Turn) {
        if entity.is_player || !opponent.is_player {
            return;
        }

        let dead = entity.is_dead();
        self.records
            .entry(entity.id)
            .and_modify(|record| {
                record.last_combat_turn = turn;
                record.dead = dead;
            })
            .or_insert_with(|| {
                tracing::debug!(entity = %entity.id, name = %entity.name, turn, "engaged");
                EngagementRecord {
                    entity: entity.id,
                    name: entity.name.clone(),
                    last_combat_turn: turn,
                    dead,
                }
            });

        if let Some(awareness) = entity.awareness.as_mut() {
            awareness.engage(opponent.position);
        }
    }

    /// Flag an entity dead so the next query drops it
    pub fn mark_dead(&mut self, entity: EntityId) {
        if let Some(record) = self.records.get_mut(&entity) {
            record.dead = true;
        }
    }

    /// Pick up deaths that happened outside combat (bleeding out, say)
    pub fn observe(&mut self, combatant: &Combatant) {
        if combatant.is_dead() {
            self.mark_dead(combatant.id);
        }
    }

    /// Engaged enemies, most recent exchange first
    ///
    /// Evicts dead entities and those idle for more than the timeout.
    pub fn engaged_enemies(&mut self, turn: Turn) -> Vec<&EngagementRecord> {
        let timeout = self.timeout;
        self.records.retain(|_, record| {
            let keep = !record.dead && !record.is_stale(turn, timeout);
            if !keep {
                tracing::debug!(entity = %record.entity, dead = record.dead, "disengaged");
            }
            keep
        });

        let mut engaged: Vec<&EngagementRecord> = self.records.values().collect();
        engaged.sort_by(|a, b| {
            b.last_combat_turn
                .cmp(&a.last_combat_turn)
                .then_with(|| a.entity.0.cmp(&b.entity.0))
        });
        engaged
    }

    pub fn is_in_combat(&mut self, turn: Turn) -> bool {
        !self.engaged_enemies(turn).is_empty()
    }

    /// Record without evicting anything
    pub fn get(&self, entity: EntityId) -> Option<&EngagementRecord> {
        self.records.get(&entity)
    }
}

impl Default for EngagementTracker {
    fn default() -> Self {
        Self::new(5)
    }
}
