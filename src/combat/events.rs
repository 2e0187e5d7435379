//! Structured combat history
//!
//! One immutable `CombatEvent` per resolved attack, kept in a bounded ring
//! buffer for the presentation layer.

use crate::combat::body_zone::Region;
use crate::combat::wounds::InflictedWound;
use crate::core::types::{EntityId, Turn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How an attack ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatEventKind {
    Miss,
    Hit,
    Parry,
}

/// Record of one resolved attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub turn: Turn,
    pub kind: CombatEventKind,
    pub attacker: EntityId,
    pub attacker_name: String,
    pub target: EntityId,
    pub target_name: String,
    /// Attacker's weapon; on a parry, the defending weapon
    pub weapon: String,
    pub damage: i32,
    pub body_part: Option<String>,
    pub region: Option<Region>,
    pub blocked: i32,
    pub armor: Option<String>,
    pub critical: bool,
    pub staggered: bool,
    pub part_destroyed: bool,
    pub wounds: Vec<InflictedWound>,
    pub killed: bool,
    /// Percent
    pub hit_chance: f32,
    /// Percent; absent on a miss
    pub crit_chance: Option<f32>,
}

impl CombatEvent {
    pub fn landed(&self) -> bool {
        self.kind == CombatEventKind::Hit
    }

    pub fn involves(&self, entity: EntityId) -> bool {
        self.attacker == entity || self.target == entity
    }
}

/// Fixed-capacity event log, oldest evicted first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatLog {
    events: VecDeque<CombatEvent>,
    capacity: usize,
}

impl CombatLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, event: CombatEvent) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CombatEvent> {
        self.events.iter()
    }

    pub fn latest(&self) -> Option<&CombatEvent> {
        self.events.back()
    }

    /// Events where the entity attacked or was attacked
    pub fn involving(&self, entity: EntityId) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter().filter(move |e| e.involves(entity))
    }
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::new(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn miss(turn: Turn, attacker: EntityId, target: EntityId) -> CombatEvent {
        CombatEvent {
            turn,
            kind: CombatEventKind::Miss,
            attacker,
            attacker_name: "you".into(),
            target,
            target_name: "rat".into(),
            weapon: "fists".into(),
            damage: 0,
            body_part: None,
            region: None,
            blocked: 0,
            armor: None,
            critical: false,
            staggered: false,
            part_destroyed: false,
            wounds: Vec::new(),
            killed: false,
            hit_chance: 35.0,
            crit_chance: None,
        }
    }

    #[test]
    fn test_evicts_oldest() {
        let (a, t) = (EntityId::new(), EntityId::new());
        let mut log = CombatLog::new(3);
        for turn in 0..5 {
            log.push(miss(turn, a, t));
        }
        assert_eq!(log.len(), 3);
        let turns: Vec<Turn> = log.iter().map(|e| e.turn).collect();
        assert_eq!(turns, vec![2, 3, 4]);
        assert_eq!(log.latest().map(|e| e.turn), Some(4));
    }

    #[test]
    fn test_default_capacity_twenty() {
        assert_eq!(CombatLog::default().capacity(), 20);
    }

    #[test]
    fn test_involving_filters() {
        let (a, t, other) = (EntityId::new(), EntityId::new(), EntityId::new());
        let mut log = CombatLog::new(10);
        log.push(miss(1, a, t));
        log.push(miss(2, other, a));
        log.push(miss(3, other, t));
        assert_eq!(log.involving(a).count(), 2);
        assert!(!log.iter().any(|e| e.landed()));
    }

    #[test]
    fn test_event_serializes_kind_snake_case() {
        let event = miss(1, EntityId::new(), EntityId::new());
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"miss\""));
    }
}
