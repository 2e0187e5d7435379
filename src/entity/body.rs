//! Humanoid body: the stock `Anatomy` implementation
//!
//! Region roots carry general hp for glancing blows; sub-parts carry their
//! own. Bleeding drains a blood pool on `tick`, pain decays over time.

use crate::combat::body_zone::{BodyPartId, Region};
use crate::core::types::Turn;
use crate::entity::anatomy::{Anatomy, BodyPart, CombatPenalties, PenaltySource, Wound, WoundType};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

const MAX_BLOOD: f32 = 100.0;
const PAIN_DECAY_PER_TURN: f32 = 1.0;
const PAIN_PENALTY_THRESHOLD: f32 = 20.0;
const MAX_PAIN_HIT_PENALTY: f32 = 20.0;

/// Max hp for each part of an adult human
fn human_max_hp(id: BodyPartId) -> i32 {
    use BodyPartId::*;
    match id {
        Head => 25,
        Torso => 40,
        LeftArm | RightArm => 20,
        LeftLeg | RightLeg => 25,
        Brain => 10,
        LeftEye | RightEye => 5,
        Jaw => 10,
        Throat => 8,
        Heart => 12,
        LeftLung | RightLung => 15,
        Liver => 15,
        Stomach => 15,
        Spine => 15,
        LeftUpperArm | RightUpperArm => 15,
        LeftForearm | RightForearm => 15,
        LeftHand | RightHand => 10,
        LeftThigh | RightThigh => 20,
        LeftShin | RightShin => 15,
        LeftFoot | RightFoot => 10,
    }
}

/// Physical injury state of a humanoid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanBody {
    parts: AHashMap<BodyPartId, BodyPart>,
    wounds: Vec<Wound>,
    /// Accumulated pain, decays each turn
    pub pain: f32,
    pub last_pain_turn: Option<Turn>,
    pub blood: f32,
}

impl HumanBody {
    pub fn new() -> Self {
        let parts = BodyPartId::all()
            .into_iter()
            .map(|id| (id, BodyPart::new(human_max_hp(id))))
            .collect();

        Self {
            parts,
            wounds: Vec::new(),
            pain: 0.0,
            last_pain_turn: None,
            blood: MAX_BLOOD,
        }
    }

    /// Blood lost per turn from open wounds
    pub fn bleed_rate(&self) -> f32 {
        self.wounds
            .iter()
            .map(|w| w.severity * w.wound_type.bleed_rate())
            .sum()
    }

    fn is_destroyed(&self, id: BodyPartId) -> bool {
        self.parts.get(&id).is_some_and(|p| p.hp <= 0)
    }

    fn arm_penalty(&self, arm: Region, hand: BodyPartId) -> Option<PenaltySource> {
        if !self.is_functional(arm.root()) {
            return Some(PenaltySource {
                label: format!("{} disabled", arm.display_name()),
                hit_chance_mod: -10.0,
                crit_chance_mod: -2.0,
                damage_mod: 0.75,
                dodge_mod: 0.0,
            });
        }
        if !self.is_functional(hand) {
            return Some(PenaltySource {
                label: format!("{} disabled", hand.display_name()),
                hit_chance_mod: -5.0,
                crit_chance_mod: 0.0,
                damage_mod: 0.9,
                dodge_mod: 0.0,
            });
        }
        None
    }

    fn leg_penalty(&self, leg: Region) -> Option<PenaltySource> {
        let crippled = BodyPartId::all()
            .into_iter()
            .filter(|p| p.region() == leg)
            .any(|p| !self.is_functional(p));

        crippled.then(|| PenaltySource {
            label: format!("{} crippled", leg.display_name()),
            hit_chance_mod: 0.0,
            crit_chance_mod: 0.0,
            damage_mod: 1.0,
            dodge_mod: 10.0,
        })
    }
}

impl Default for HumanBody {
    fn default() -> Self {
        Self::new()
    }
}

impl Anatomy for HumanBody {
    fn combat_penalties(&self) -> CombatPenalties {
        let mut penalties = CombatPenalties::default();

        for eye in [BodyPartId::LeftEye, BodyPartId::RightEye] {
            if !self.is_functional(eye) {
                penalties.add(PenaltySource {
                    label: format!("{} blinded", eye.display_name()),
                    hit_chance_mod: -15.0,
                    crit_chance_mod: -2.0,
                    damage_mod: 1.0,
                    dodge_mod: 0.0,
                });
            }
        }

        let arms = [
            (Region::LeftArm, BodyPartId::LeftHand),
            (Region::RightArm, BodyPartId::RightHand),
        ];
        for (arm, hand) in arms {
            if let Some(source) = self.arm_penalty(arm, hand) {
                penalties.add(source);
            }
        }

        for leg in [Region::LeftLeg, Region::RightLeg] {
            if let Some(source) = self.leg_penalty(leg) {
                penalties.add(source);
            }
        }

        if self.pain > PAIN_PENALTY_THRESHOLD {
            let excess = self.pain - PAIN_PENALTY_THRESHOLD;
            penalties.add(PenaltySource {
                label: "pain".to_string(),
                hit_chance_mod: -(excess / 4.0).min(MAX_PAIN_HIT_PENALTY),
                crit_chance_mod: -(excess / 20.0).min(3.0),
                damage_mod: 1.0,
                dodge_mod: 0.0,
            });
        }

        if self.blood < MAX_BLOOD * 0.5 {
            penalties.add(PenaltySource {
                label: "blood loss".to_string(),
                hit_chance_mod: -5.0,
                crit_chance_mod: 0.0,
                damage_mod: 0.8,
                dodge_mod: 10.0,
            });
        }

        penalties
    }

    fn part(&self, id: BodyPartId) -> Option<&BodyPart> {
        self.parts.get(&id)
    }

    fn part_mut(&mut self, id: BodyPartId) -> Option<&mut BodyPart> {
        self.parts.get_mut(&id)
    }

    fn add_wound(&mut self, part: BodyPartId, severity: f32, wound_type: WoundType) {
        self.wounds.push(Wound {
            part,
            wound_type,
            severity,
            turns_active: 0,
        });
    }

    fn add_pain(&mut self, amount: f32, turn: Turn) {
        self.pain += amount.max(0.0);
        self.last_pain_turn = Some(turn);
    }

    fn is_dead(&self) -> bool {
        self.blood <= 0.0
            || [
                BodyPartId::Brain,
                BodyPartId::Heart,
                BodyPartId::Head,
                BodyPartId::Torso,
            ]
            .into_iter()
            .any(|id| self.is_destroyed(id))
    }

    fn wounds(&self) -> &[Wound] {
        &self.wounds
    }

    /// Age wounds, lose blood, let pain settle
    fn tick(&mut self) {
        for wound in &mut self.wounds {
            wound.turns_active += 1;
        }
        self.blood = (self.blood - self.bleed_rate()).max(0.0);
        self.pain = (self.pain - PAIN_DECAY_PER_TURN).max(0.0);
    }
}
