//! Combat pipeline integration tests
//!
//! Drive the public engine end to end: seeded duels, scripted branches,
//! data files on disk, and the invariants every attack must keep.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use survival_melee::combat::{
    mitigate, roll_weapon_damage, AttackCategory, BodyPartId, CombatEngine, CombatEventKind,
    CombatTables, DiceExpr, EquipmentSlot, Item, MessageKind, MessageTemplates, Region, Stance,
    StatusBoard, Weapon, WoundType,
};
use survival_melee::core::{CombatConfig, ScriptedRng};
use survival_melee::entity::{Anatomy, Combatant, HumanBody, Stats};

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[test]
fn test_data_tables_match_builtin_defaults() {
    let tables = CombatTables::load(&data_file("combat_tables.toml")).unwrap();
    assert_eq!(tables, CombatTables::default());
}

#[test]
fn test_data_messages_match_builtin_defaults() {
    let templates = MessageTemplates::load(&data_file("messages.toml")).unwrap();
    assert_eq!(templates, MessageTemplates::default());
}

#[test]
fn test_missing_table_file_is_io_error() {
    let result = CombatTables::load(&data_file("does_not_exist.toml"));
    assert!(matches!(result, Err(survival_melee::core::CombatError::Io(_))));
}

#[test]
fn test_unarmed_baseline_chances() {
    let tables = CombatTables::default();
    let mut engine = CombatEngine::new(&tables, ScriptedRng::new(&[0.99]));
    let mut attacker = Combatant::npc("drifter");
    let mut target = Combatant::npc("scarecrow");

    let result = engine.resolve_attack(&mut attacker, &mut target, None);
    assert_eq!(result.hit_chance, 35.0);

    // Force a hit to read the crit chance off the event
    let mut engine = CombatEngine::new(&tables, ScriptedRng::new(&[0.0, 0.5, 0.5, 0.99]));
    let result = engine.resolve_attack(&mut attacker, &mut target, None);
    assert!(result.hit);
    assert_eq!(result.crit_chance, Some(2.0));
    assert!((1..=2).contains(&result.damage));
}

#[test]
fn test_sharp_vital_hit_bleeds_puncture() {
    let tables = CombatTables::default();
    // hit, torso, heart, no crit, no intercept, bleed, no arterial
    let rng = ScriptedRng::new(&[0.0, 0.3, 0.0, 0.99, 0.99, 0.5, 0.5]);
    let mut engine = CombatEngine::new(&tables, rng);
    let mut player = Combatant::player();
    let mut bandit = Combatant::npc("bandit").with_anatomy(HumanBody::new());
    let blade = Weapon::new("blade", "6", AttackCategory::Sharp).with_bleed_chance(0.1);

    let result = engine.resolve_attack(&mut player, &mut bandit, Some(&blade));
    assert!(result.hit);
    assert_eq!(result.body_part.as_deref(), Some("heart"));
    assert_eq!(result.wounds.len(), 1);
    assert_eq!(result.wounds[0].wound_type, WoundType::Puncture);

    let anatomy = bandit.anatomy.as_ref().unwrap();
    assert!(anatomy.has_wound_at(BodyPartId::Heart));
    assert_eq!(anatomy.part(BodyPartId::Heart).map(|p| p.hp), Some(6));
    assert_eq!(anatomy.part(BodyPartId::Torso).map(|p| p.hp), Some(34));
}

#[test]
fn test_sharp_vital_hit_arterial_branch() {
    let tables = CombatTables::default();
    let rng = ScriptedRng::new(&[0.0, 0.3, 0.0, 0.99, 0.99, 0.5, 0.1]);
    let mut engine = CombatEngine::new(&tables, rng);
    let mut player = Combatant::player();
    let mut bandit = Combatant::npc("bandit").with_anatomy(HumanBody::new());
    let blade = Weapon::new("blade", "6", AttackCategory::Sharp);

    let result = engine.resolve_attack(&mut player, &mut bandit, Some(&blade));
    assert_eq!(result.wounds[0].wound_type, WoundType::Arterial);
    assert!(engine
        .drain_messages()
        .iter()
        .any(|m| m.kind == MessageKind::Wound));
}

#[test]
fn test_destroyed_part_signals_once() {
    let tables = CombatTables::default();
    // hit, left leg, left foot, no crit, no bleed; legs are never guarded
    let script = [0.0, 0.85, 0.75, 0.99, 0.99];
    let mut engine = CombatEngine::new(&tables, ScriptedRng::new(&script));
    let mut player = Combatant::player();
    let mut bandit = Combatant::npc("bandit").with_anatomy(HumanBody::new());
    let blade = Weapon::new("blade", "12", AttackCategory::Sharp).with_bleed_chance(0.0);

    let first = engine.resolve_attack(&mut player, &mut bandit, Some(&blade));
    assert_eq!(first.region, Some(Region::LeftLeg));
    assert_eq!(first.body_part.as_deref(), Some("left foot"));
    assert!(first.part_destroyed);

    let mut engine = CombatEngine::new(&tables, ScriptedRng::new(&script));
    let second = engine.resolve_attack(&mut player, &mut bandit, Some(&blade));
    assert!(second.hit);
    assert!(!second.part_destroyed);
    let foot = bandit
        .anatomy
        .as_ref()
        .and_then(|a| a.part(BodyPartId::LeftFoot).cloned())
        .unwrap();
    assert_eq!(foot.hp, 0);
    assert!(!foot.functional);
    assert_eq!(
        bandit.anatomy.as_ref().and_then(|a| a.part(BodyPartId::LeftLeg).map(|p| p.hp)),
        Some(1)
    );
}

#[test]
fn test_aggressive_stance_scales_damage() {
    let tables = CombatTables::default();
    let rng = ScriptedRng::new(&[0.0, 0.3, 0.99, 0.99]);
    let mut engine = CombatEngine::new(&tables, rng);
    let mut player = Combatant::player().with_stance(Stance::aggressive());
    let mut dummy = Combatant::npc("dummy");
    let blade = Weapon::new("blade", "10", AttackCategory::Sharp);

    let result = engine.resolve_attack(&mut player, &mut dummy, Some(&blade));
    assert_eq!(result.damage, 12);
}

#[test]
fn test_config_sizes_event_log() {
    let tables = CombatTables::default();
    let config = CombatConfig {
        event_log_capacity: 3,
        ..CombatConfig::default()
    };
    let mut engine = CombatEngine::new(&tables, ScriptedRng::new(&[0.99])).with_config(config);
    let mut player = Combatant::player();
    let mut rat = Combatant::npc("rat");
    for _ in 0..10 {
        engine.resolve_attack(&mut player, &mut rat, None);
    }
    assert_eq!(engine.events().len(), 3);
    assert!(engine.events().iter().all(|e| e.kind == CombatEventKind::Miss));
}

#[test]
fn test_seeded_duel_is_reproducible() {
    fn run(seed: u64) -> Vec<String> {
        let tables = CombatTables::default();
        let mut engine = CombatEngine::new(&tables, ChaCha8Rng::seed_from_u64(seed))
            .with_status(StatusBoard::new());
        let mut player = Combatant::player()
            .with_stats(Stats::uniform(12))
            .with_anatomy(HumanBody::new())
            .with_weapon(Weapon::machete());
        let mut zombie = Combatant::npc("zombie")
            .with_anatomy(HumanBody::new())
            .with_weapon(Weapon::pipe());

        for turn in 1..=40 {
            engine.set_turn(turn);
            engine.resolve_attack(&mut player, &mut zombie, None);
            if zombie.is_dead() {
                break;
            }
            engine.resolve_attack(&mut zombie, &mut player, None);
            if player.is_dead() {
                break;
            }
        }
        engine.drain_messages().into_iter().map(|m| m.text).collect()
    }

    assert_eq!(run(42), run(42));
    assert!(!run(42).is_empty());
}

#[test]
fn test_seeded_duel_ends_in_death() {
    let tables = CombatTables::default();
    let mut engine = CombatEngine::new(&tables, ChaCha8Rng::seed_from_u64(9));
    let mut player = Combatant::player().with_weapon(Weapon::baseball_bat());
    let mut zombie = Combatant::npc("zombie").with_anatomy(HumanBody::new());

    let mut killed = false;
    for turn in 1..=500 {
        engine.set_turn(turn);
        if engine.resolve_attack(&mut player, &mut zombie, None).killed {
            killed = true;
            break;
        }
    }
    assert!(killed);
    assert!(zombie.is_dead());
    assert_eq!(engine.events().latest().map(|e| e.killed), Some(true));
}

#[test]
fn test_armor_example_from_coverage_map() {
    let tables = CombatTables::default();
    let mut equipment = survival_melee::combat::Equipment::new();
    equipment.equip(EquipmentSlot::Torso, Item::new("vest", 2));
    equipment.equip(EquipmentSlot::Back, Item::new("pack frame", 1));
    let mitigation = mitigate(10, Region::Torso, &equipment, &tables.coverage);
    assert_eq!(mitigation.damage, 7);
    assert_eq!(mitigation.blocked, 3);
    assert_eq!(mitigation.armor_name.as_deref(), Some("vest"));
}

proptest! {
    #[test]
    fn test_compound_dice_in_bounds(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let roll = DiceExpr::parse("1d8+1d6").roll(&mut rng);
        prop_assert!((2..=14).contains(&roll));
    }

    #[test]
    fn test_weapon_damage_at_least_one(seed in any::<u64>(), strength in -20i32..40) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let attacker = Combatant::npc("x").with_stats(Stats {
            strength: Some(strength),
            ..Stats::default()
        });
        prop_assert!(roll_weapon_damage(&attacker, Some(&Weapon::knife()), &mut rng) >= 1);
    }

    #[test]
    fn test_confirmed_hit_deals_at_least_one(
        seed in any::<u64>(),
        defense in 0i32..100,
        stance_idx in 0usize..5,
        strength in 1i32..20,
    ) {
        let stances = ["balanced", "aggressive", "defensive", "precise", "brutal"];
        let tables = CombatTables::default();
        let mut engine = CombatEngine::new(&tables, ChaCha8Rng::seed_from_u64(seed));
        let mut attacker = Combatant::npc("weakling")
            .with_stats(Stats { strength: Some(strength), ..Stats::default() })
            .with_weapon(Weapon::knife());
        let mut target = Combatant::player()
            .with_anatomy(HumanBody::new())
            .with_stance(Stance::preset(stances[stance_idx]).unwrap())
            .with_item(EquipmentSlot::Head, Item::new("helmet", defense))
            .with_item(EquipmentSlot::Torso, Item::new("plate", defense))
            .with_item(EquipmentSlot::Legs, Item::new("greaves", defense));

        for _ in 0..10 {
            let result = engine.resolve_attack(&mut attacker, &mut target, None);
            if result.hit {
                prop_assert!(result.damage >= 1);
            } else {
                prop_assert_eq!(result.damage, 0);
            }
            if result.parried {
                prop_assert!(!result.hit);
            }
        }
    }

    #[test]
    fn test_guards_only_for_core_regions(seed in any::<u64>()) {
        let tables = CombatTables::default();
        let mut engine = CombatEngine::new(&tables, ChaCha8Rng::seed_from_u64(seed));
        let mut attacker = Combatant::player().with_weapon(Weapon::crowbar());
        let mut target = Combatant::npc("guard")
            .with_anatomy(HumanBody::new())
            .with_weapon(Weapon::spear())
            .with_stance(Stance::defensive());

        for _ in 0..20 {
            let result = engine.resolve_attack(&mut attacker, &mut target, None);
            if result.intercepted {
                prop_assert!(!result.critical);
                prop_assert!(result.region.is_some_and(|r| r.is_arm()));
            }
            if result.parried {
                prop_assert!(!result.hit);
                prop_assert!(result.region.is_none());
            }
            if target.is_dead() {
                break;
            }
        }
    }
}
