//! Engagement tracking through the engine
//!
//! Exchanges with the player keep NPCs engaged; silence or death ends it.

use survival_melee::combat::{CombatEngine, CombatTables, EngagementTracker};
use survival_melee::core::{CombatConfig, ScriptedRng};
use survival_melee::entity::{Anatomy, Combatant, DetectionState, HumanBody};

fn always_miss(tables: &CombatTables) -> CombatEngine<'_, ScriptedRng> {
    CombatEngine::new(tables, ScriptedRng::new(&[0.99]))
}

#[test]
fn test_engagement_expires_after_timeout() {
    let tables = CombatTables::default();
    let mut engine = always_miss(&tables);
    let mut player = Combatant::player();
    let mut zombie = Combatant::npc("zombie");

    engine.set_turn(10);
    engine.resolve_attack(&mut zombie, &mut player, None);

    engine.set_turn(15);
    assert!(engine.is_in_combat());
    engine.set_turn(16);
    assert!(!engine.is_in_combat());
}

#[test]
fn test_configured_timeout() {
    let tables = CombatTables::default();
    let config = CombatConfig {
        engagement_timeout: 1,
        ..CombatConfig::default()
    };
    let mut engine = always_miss(&tables).with_config(config);
    let mut player = Combatant::player();
    let mut zombie = Combatant::npc("zombie");

    engine.set_turn(1);
    engine.resolve_attack(&mut player, &mut zombie, None);
    engine.set_turn(3);
    assert!(engine.engaged_enemies().is_empty());
}

#[test]
fn test_player_attack_engages_target() {
    let tables = CombatTables::default();
    let mut engine = always_miss(&tables);
    let mut player = Combatant::player();
    let mut zombie = Combatant::npc("zombie");

    engine.resolve_attack(&mut player, &mut zombie, None);
    assert_eq!(
        zombie.awareness.as_ref().map(|a| a.detection),
        Some(DetectionState::Engaged)
    );
    let names: Vec<String> = engine
        .engaged_enemies()
        .into_iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(names, vec!["zombie".to_string()]);
}

#[test]
fn test_npc_brawl_leaves_player_out_of_combat() {
    let tables = CombatTables::default();
    let mut engine = always_miss(&tables);
    let mut dog = Combatant::npc("dog");
    let mut rat = Combatant::npc("rat");

    engine.resolve_attack(&mut dog, &mut rat, None);
    assert!(!engine.is_in_combat());
    assert_eq!(
        dog.awareness.as_ref().map(|a| a.detection),
        Some(DetectionState::default())
    );
}

#[test]
fn test_death_outside_combat_evicts() {
    let tables = CombatTables::default();
    let mut engine = always_miss(&tables);
    let mut player = Combatant::player();
    let mut zombie = Combatant::npc("zombie").with_anatomy(HumanBody::new());

    engine.resolve_attack(&mut zombie, &mut player, None);
    assert!(engine.is_in_combat());

    // Bled out between turns
    if let Some(body) = zombie.anatomy.as_deref_mut() {
        if let Some(heart) = body.part_mut(survival_melee::combat::BodyPartId::Heart) {
            heart.take_damage(100, survival_melee::combat::AttackCategory::Sharp);
        }
    }
    engine.observe(&zombie);
    assert!(!engine.is_in_combat());
}

#[test]
fn test_several_enemies_ordered_by_recency() {
    let mut tracker = EngagementTracker::new(5);
    let player = Combatant::player();
    let mut pack: Vec<Combatant> = ["alpha", "beta", "gamma"]
        .into_iter()
        .map(Combatant::npc)
        .collect();

    for (turn, wolf) in pack.iter_mut().enumerate() {
        tracker.track(wolf, &player, turn as u64 + 1);
    }
    tracker.track(&mut pack[0], &player, 7);

    let names: Vec<&str> = tracker
        .engaged_enemies(7)
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["alpha", "gamma", "beta"]);

    let names: Vec<&str> = tracker
        .engaged_enemies(9)
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["alpha"]);
}
