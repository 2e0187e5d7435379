//! Melee attack resolution
//!
//! One call to `CombatEngine::resolve_attack` runs the whole pipeline:
//!
//! 1. hit check (miss ends the attack)
//! 2. location roll
//! 3. crit check
//! 4. parry check, head and torso only, never on a crit (parry ends the attack)
//! 5. arm intercept, same conditions as parry
//! 6. damage roll
//! 7. armor, then the defender's stance
//! 8. part damage and wounds
//! 9. stagger, blunt only
//! 10. death check
//! 11. event, messages and engagement bookkeeping
//!
//! Every probability check draws one `f32` from the engine's RNG; stages
//! that do not apply draw nothing.

use crate::combat::armor::mitigate;
use crate::combat::body_zone::{BodyPartId, Region};
use crate::combat::constants::{CRIT_DAMAGE_MULTIPLIER, MIN_HIT_DAMAGE, STAGGER_STUN_TURNS};
use crate::combat::damage::roll_weapon_damage;
use crate::combat::engagement::{EngagementRecord, EngagementTracker};
use crate::combat::events::{CombatEvent, CombatEventKind, CombatLog};
use crate::combat::messages::{CombatMessage, MessageKind, MessageTemplates, MessageTokens};
use crate::combat::modifiers;
use crate::combat::status::{NoStatusEffects, StatusEffects};
use crate::combat::targeting::{CombatTables, HitLocation};
use crate::combat::weapons::{AttackCategory, Weapon};
use crate::combat::wounds::{apply_wounds, roll_wounds, InflictedWound, WoundContext};
use crate::core::config::CombatConfig;
use crate::core::types::{EntityId, Turn};
use crate::entity::combatant::Combatant;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

/// What one attack did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    pub hit: bool,
    pub parried: bool,
    /// Damage dealt after armor and stance; at least 1 on a hit
    pub damage: i32,
    pub body_part: Option<String>,
    pub region: Option<Region>,
    pub critical: bool,
    pub killed: bool,
    pub blocked: i32,
    pub staggered: bool,
    /// An arm took the blow instead of the rolled location
    pub intercepted: bool,
    pub part_destroyed: bool,
    pub wounds: Vec<InflictedWound>,
    pub hit_chance: f32,
    pub crit_chance: Option<f32>,
}

impl AttackResult {
    fn missed(hit_chance: f32) -> Self {
        Self {
            hit: false,
            parried: false,
            damage: 0,
            body_part: None,
            region: None,
            critical: false,
            killed: false,
            blocked: 0,
            staggered: false,
            intercepted: false,
            part_destroyed: false,
            wounds: Vec::new(),
            hit_chance,
            crit_chance: None,
        }
    }
}

/// Scale damage and floor it
fn scale(damage: i32, factor: f32) -> i32 {
    (damage as f32 * factor).floor() as i32
}

/// The combat engine: tables, RNG, status service and combat history
pub struct CombatEngine<'t, R: Rng, S: StatusEffects = NoStatusEffects> {
    tables: &'t CombatTables,
    templates: MessageTemplates,
    config: CombatConfig,
    rng: R,
    message_rng: ChaCha8Rng,
    status: S,
    turn: Turn,
    events: CombatLog,
    engagement: EngagementTracker,
    messages: VecDeque<CombatMessage>,
}

impl<'t, R: Rng> CombatEngine<'t, R, NoStatusEffects> {
    /// Engine with default config and templates and no status service
    pub fn new(tables: &'t CombatTables, rng: R) -> Self {
        let config = CombatConfig::default();
        Self {
            tables,
            templates: MessageTemplates::default(),
            message_rng: ChaCha8Rng::seed_from_u64(config.message_seed),
            rng,
            status: NoStatusEffects,
            turn: 0,
            events: CombatLog::new(config.event_log_capacity),
            engagement: EngagementTracker::new(config.engagement_timeout),
            messages: VecDeque::new(),
            config,
        }
    }
}

impl<'t, R: Rng, S: StatusEffects> CombatEngine<'t, R, S> {
    /// Replace the config, resetting history sized by it
    pub fn with_config(mut self, config: CombatConfig) -> Self {
        self.message_rng = ChaCha8Rng::seed_from_u64(config.message_seed);
        self.events = CombatLog::new(config.event_log_capacity);
        self.engagement = EngagementTracker::new(config.engagement_timeout);
        self.messages.clear();
        self.config = config;
        self
    }

    pub fn with_templates(mut self, templates: MessageTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Swap in a status-effect service
    pub fn with_status<S2: StatusEffects>(self, status: S2) -> CombatEngine<'t, R, S2> {
        CombatEngine {
            tables: self.tables,
            templates: self.templates,
            config: self.config,
            rng: self.rng,
            message_rng: self.message_rng,
            status,
            turn: self.turn,
            events: self.events,
            engagement: self.engagement,
            messages: self.messages,
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Turn) {
        self.turn = turn;
    }

    pub fn advance_turn(&mut self) -> Turn {
        self.turn += 1;
        self.turn
    }

    pub fn tables(&self) -> &CombatTables {
        self.tables
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut S {
        &mut self.status
    }

    /// Bounded history of resolved attacks, oldest first
    pub fn events(&self) -> &CombatLog {
        &self.events
    }

    /// Take every pending message line
    pub fn drain_messages(&mut self) -> Vec<CombatMessage> {
        self.messages.drain(..).collect()
    }

    /// Enemies still fighting the player as of the current turn
    pub fn engaged_enemies(&mut self) -> Vec<&EngagementRecord> {
        self.engagement.engaged_enemies(self.turn)
    }

    pub fn is_in_combat(&mut self) -> bool {
        self.engagement.is_in_combat(self.turn)
    }

    pub fn mark_dead(&mut self, entity: EntityId) {
        self.engagement.mark_dead(entity);
    }

    /// Notice a combatant that died outside an attack
    pub fn observe(&mut self, combatant: &Combatant) {
        self.engagement.observe(combatant);
    }

    /// Resolve one melee attack
    ///
    /// `weapon` overrides whatever the attacker has equipped; `None` falls
    /// back to the equipped weapon, then to bare hands.
    pub fn resolve_attack(
        &mut self,
        attacker: &mut Combatant,
        target: &mut Combatant,
        weapon: Option<&Weapon>,
    ) -> AttackResult {
        let weapon = weapon.cloned().or_else(|| attacker.weapon.clone());
        let weapon = weapon.as_ref();
        let category = weapon.map(|w| w.category).unwrap_or_default();
        let weapon_name = weapon.map_or("fists", |w| w.name.as_str());

        // Hit
        let prone = self.status.prone_penalty(target.id);
        let hit_chance = modifiers::hit_chance(attacker, target, weapon, prone);
        let hit_roll = self.rng.gen::<f32>() * 100.0;
        debug!(attacker = %attacker.name, defender = %target.name, hit_chance, hit_roll, "hit check");

        if hit_roll >= hit_chance {
            return self.finish_miss(attacker, target, weapon_name, hit_chance);
        }

        // Location
        let mut location = self.tables.roll_hit_location(category, &mut self.rng);
        debug!(region = ?location.region, part = %location.name, "location rolled");

        // Crit
        let part_wounded = target
            .anatomy
            .as_ref()
            .is_some_and(|a| a.has_wound_at(location.struck_part()));
        let crit_chance = modifiers::crit_chance(attacker, weapon, part_wounded);
        let critical = self.rng.gen::<f32>() * 100.0 < crit_chance;
        debug!(crit_chance, critical, "crit check");

        let guardable = location.region.is_core() && !critical;

        // Parry
        if guardable {
            if let Some(parry_chance) = modifiers::parry_chance(target) {
                let parried = self.rng.gen::<f32>() < parry_chance;
                debug!(parry_chance, parried, "parry check");
                if parried {
                    return self.finish_parry(attacker, target, weapon_name, hit_chance, crit_chance);
                }
            }
        }

        // Arm intercept
        let mut intercepted = false;
        if guardable {
            let guard = self.status.guard_break_modifier(target.id);
            let intercept_chance = modifiers::intercept_chance(target, guard);
            if intercept_chance > 0.0 && self.rng.gen::<f32>() < intercept_chance {
                if let Some(arm) = blocking_arm(target) {
                    let original = location.name.clone();
                    if let Some(guard_part) = BodyPartId::guarding_part(arm) {
                        location = self.tables.location_of(guard_part);
                        intercepted = true;
                        debug!(arm = ?arm, original = %original, "arm intercept");
                        self.say(
                            MessageKind::Intercept,
                            &MessageTokens {
                                attacker: &attacker.name,
                                target: &target.name,
                                part: &original,
                                ..Default::default()
                            },
                        );
                    }
                }
            }
        }

        // Damage
        let mut rolled = roll_weapon_damage(attacker, weapon, &mut self.rng);
        if critical {
            rolled = scale(rolled, CRIT_DAMAGE_MULTIPLIER);
        }
        if let Some(stance) = &attacker.stance {
            rolled = scale(rolled, stance.damage_mod);
        }
        let injury = attacker.penalties().damage_mod;
        if injury < 1.0 {
            rolled = scale(rolled, injury);
        }
        let rolled = rolled.max(MIN_HIT_DAMAGE);

        // Armor, then the defender's stance
        let mitigation = mitigate(rolled, location.region, &target.equipment, &self.tables.coverage);
        let mut damage = mitigation.damage;
        if let Some(stance) = &target.stance {
            damage = scale(damage, stance.incoming_damage_mod).max(MIN_HIT_DAMAGE);
        }
        debug!(rolled, damage, blocked = mitigation.blocked, "damage after armor");

        // Part damage and wounds
        let destroyed = damage_parts(target, &location, damage, category);
        let mut wounds = Vec::new();
        if target.anatomy.is_some() {
            let ctx = WoundContext {
                weapon,
                bleed_mod: attacker.stance.as_ref().map_or(1.0, |s| s.bleed_mod),
                location: &location,
                damage,
                critical,
            };
            wounds = roll_wounds(&ctx, &mut self.rng);
            if let Some(anatomy) = target.anatomy.as_deref_mut() {
                apply_wounds(anatomy, &wounds, self.turn);
            }
        }

        // Stagger
        let staggered = category == AttackCategory::Blunt
            && !target.is_dead()
            && self.roll_stagger(attacker, target, weapon, damage, critical);
        if staggered {
            self.status.apply_stun(target.id, STAGGER_STUN_TURNS);
        }

        // Death
        let killed = target.is_dead();

        // Messages
        let tokens = MessageTokens {
            attacker: &attacker.name,
            target: &target.name,
            weapon: weapon_name,
            part: &location.name,
            damage,
            verb: category.verb(),
            wound: "",
        };
        if critical {
            self.say(MessageKind::Critical, &tokens);
        }
        self.say(MessageKind::Attack, &tokens);
        if let Some(armor) = mitigation.armor_name.as_deref() {
            if mitigation.blocked > 0 {
                self.say(
                    MessageKind::Block,
                    &MessageTokens {
                        weapon: armor,
                        damage: mitigation.blocked,
                        ..tokens.clone()
                    },
                );
            }
        }
        for wound in &wounds {
            self.say(
                MessageKind::Wound,
                &MessageTokens {
                    wound: wound.wound_type.display_name(),
                    ..tokens.clone()
                },
            );
        }
        for part in &destroyed {
            info!(defender = %target.name, part = part.display_name(), "part destroyed");
            self.say(
                MessageKind::PartDestroyed,
                &MessageTokens {
                    part: part.display_name(),
                    ..tokens.clone()
                },
            );
        }
        if staggered {
            self.say(MessageKind::Stagger, &tokens);
        }
        if killed {
            info!(attacker = %attacker.name, defender = %target.name, "killed");
            self.say(MessageKind::Kill, &tokens);
        }

        let result = AttackResult {
            hit: true,
            parried: false,
            damage,
            body_part: Some(location.name.clone()),
            region: Some(location.region),
            critical,
            killed,
            blocked: mitigation.blocked,
            staggered,
            intercepted,
            part_destroyed: !destroyed.is_empty(),
            wounds,
            hit_chance,
            crit_chance: Some(crit_chance),
        };

        self.events.push(CombatEvent {
            turn: self.turn,
            kind: CombatEventKind::Hit,
            attacker: attacker.id,
            attacker_name: attacker.name.clone(),
            target: target.id,
            target_name: target.name.clone(),
            weapon: weapon_name.to_string(),
            damage,
            body_part: result.body_part.clone(),
            region: result.region,
            blocked: mitigation.blocked,
            armor: mitigation.armor_name,
            critical,
            staggered,
            part_destroyed: result.part_destroyed,
            wounds: result.wounds.clone(),
            killed,
            hit_chance,
            crit_chance: Some(crit_chance),
        });
        self.track_exchange(attacker, target);
        if killed {
            self.engagement.mark_dead(target.id);
        }

        result
    }

    fn roll_stagger(
        &mut self,
        attacker: &Combatant,
        target: &Combatant,
        weapon: Option<&Weapon>,
        damage: i32,
        critical: bool,
    ) -> bool {
        if critical {
            return true;
        }
        match modifiers::stagger_chance(attacker, target, weapon, damage) {
            Some(chance) => {
                let staggered = self.rng.gen::<f32>() < chance;
                debug!(stagger_chance = chance, staggered, "stagger check");
                staggered
            }
            None => false,
        }
    }

    fn finish_miss(
        &mut self,
        attacker: &mut Combatant,
        target: &mut Combatant,
        weapon_name: &str,
        hit_chance: f32,
    ) -> AttackResult {
        self.say(
            MessageKind::Miss,
            &MessageTokens {
                attacker: &attacker.name,
                target: &target.name,
                weapon: weapon_name,
                verb: "miss",
                ..Default::default()
            },
        );
        self.events.push(CombatEvent {
            turn: self.turn,
            kind: CombatEventKind::Miss,
            attacker: attacker.id,
            attacker_name: attacker.name.clone(),
            target: target.id,
            target_name: target.name.clone(),
            weapon: weapon_name.to_string(),
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
            hit_chance,
            crit_chance: None,
        });
        self.track_exchange(attacker, target);
        AttackResult::missed(hit_chance)
    }

    fn finish_parry(
        &mut self,
        attacker: &mut Combatant,
        target: &mut Combatant,
        weapon_name: &str,
        hit_chance: f32,
        crit_chance: f32,
    ) -> AttackResult {
        let defending = target.weapon_name().to_string();
        self.say(
            MessageKind::Parry,
            &MessageTokens {
                attacker: &attacker.name,
                target: &target.name,
                weapon: &defending,
                verb: "parry",
                ..Default::default()
            },
        );
        debug!(attacker_weapon = weapon_name, defending = %defending, "parried");
        self.events.push(CombatEvent {
            turn: self.turn,
            kind: CombatEventKind::Parry,
            attacker: attacker.id,
            attacker_name: attacker.name.clone(),
            target: target.id,
            target_name: target.name.clone(),
            weapon: defending,
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
            hit_chance,
            crit_chance: Some(crit_chance),
        });
        self.track_exchange(attacker, target);
        AttackResult {
            parried: true,
            crit_chance: Some(crit_chance),
            ..AttackResult::missed(hit_chance)
        }
    }

    fn track_exchange(&mut self, attacker: &mut Combatant, target: &mut Combatant) {
        self.engagement.track(attacker, target, self.turn);
        self.engagement.track(target, attacker, self.turn);
    }

    /// Render a message into the pending queue
    fn say(&mut self, kind: MessageKind, tokens: &MessageTokens<'_>) {
        let Some(text) = self.templates.compose(
            kind,
            tokens,
            &self.config.player_name,
            &mut self.message_rng,
        ) else {
            return;
        };
        info!(target: "combat", "{text}");

        if self.messages.len() >= self.config.message_log_capacity.max(1) {
            self.messages.pop_front();
        }
        self.messages.push_back(CombatMessage {
            kind,
            text,
            turn: self.turn,
        });
    }
}

/// Arm that takes an intercepted blow: the healthier functional arm,
/// left on a tie
fn blocking_arm(target: &Combatant) -> Option<Region> {
    let anatomy = target.anatomy.as_ref()?;
    let hp = |arm: Region| anatomy.part(arm.root()).map_or(0, |p| p.hp);
    modifiers::functional_arms(target)
        .into_iter()
        .reduce(|best, arm| if hp(arm) > hp(best) { arm } else { best })
}

/// Apply final damage to the struck part and its region root
///
/// Returns every part this hit destroyed. A glancing hit has no sub-part,
/// so only the region root is touched.
fn damage_parts(
    target: &mut Combatant,
    location: &HitLocation,
    damage: i32,
    category: AttackCategory,
) -> Vec<BodyPartId> {
    let Some(anatomy) = target.anatomy.as_deref_mut() else {
        return Vec::new();
    };

    let root = location.region.root();
    let mut struck = vec![location.struck_part()];
    if struck[0] != root {
        struck.push(root);
    }

    struck
        .into_iter()
        .filter(|id| {
            anatomy
                .part_mut(*id)
                .is_some_and(|part| part.take_damage(damage, category))
        })
        .collect()
}
