//! Armor coverage and mitigation
//!
//! Each equipment slot protects one or more regions. A hit to a region is
//! reduced by the summed defense of every worn item whose slot covers it,
//! but a hit always lands for at least 1.

use crate::combat::body_zone::Region;
use crate::combat::constants::MIN_HIT_DAMAGE;
use crate::combat::equipment::{Equipment, EquipmentSlot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slot -> protected regions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArmorCoverage {
    slots: BTreeMap<EquipmentSlot, Vec<Region>>,
}

impl Default for ArmorCoverage {
    fn default() -> Self {
        use EquipmentSlot::*;
        let slots = [
            (Head, vec![Region::Head]),
            (Torso, vec![Region::Torso]),
            (Legs, vec![Region::LeftLeg, Region::RightLeg]),
            (LeftHand, vec![Region::LeftArm]),
            (RightHand, vec![Region::RightArm]),
            (Back, vec![Region::Torso]),
            (Feet, vec![Region::LeftLeg, Region::RightLeg]),
        ]
        .into_iter()
        .collect();
        Self { slots }
    }
}

impl ArmorCoverage {
    pub fn from_slots(slots: BTreeMap<EquipmentSlot, Vec<Region>>) -> Self {
        Self { slots }
    }

    /// Regions a slot protects; empty for unmapped slots
    pub fn regions_for(&self, slot: EquipmentSlot) -> &[Region] {
        self.slots.get(&slot).map_or(&[], |r| r.as_slice())
    }

    pub fn covers(&self, slot: EquipmentSlot, region: Region) -> bool {
        self.regions_for(slot).contains(&region)
    }

    /// Every slot that protects a region, in slot order
    pub fn slots_covering(&self, region: Region) -> Vec<EquipmentSlot> {
        self.slots
            .iter()
            .filter(|(_, regions)| regions.contains(&region))
            .map(|(slot, _)| *slot)
            .collect()
    }
}

/// Outcome of armor against one hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mitigation {
    /// Damage that gets through, never below 1
    pub damage: i32,
    /// Damage the armor absorbed
    pub blocked: i32,
    /// First covering item, for messages
    pub armor_name: Option<String>,
}

/// Sum the defense of every worn item covering `region`
pub fn armor_reduction(
    equipment: &Equipment,
    coverage: &ArmorCoverage,
    region: Region,
) -> (i32, Option<String>) {
    let mut reduction: i32 = 0;
    let mut armor_name = None;

    for (slot, item) in equipment.iter() {
        if !coverage.covers(slot, region) {
            continue;
        }
        reduction = reduction.saturating_add(item.defense.unwrap_or(0));
        if armor_name.is_none() {
            armor_name = Some(item.name.clone());
        }
    }

    (reduction, armor_name)
}

/// Apply armor to a rolled hit
pub fn mitigate(
    rolled: i32,
    region: Region,
    equipment: &Equipment,
    coverage: &ArmorCoverage,
) -> Mitigation {
    let (reduction, armor_name) = armor_reduction(equipment, coverage, region);
    let damage = rolled.saturating_sub(reduction).max(MIN_HIT_DAMAGE);

    Mitigation {
        damage,
        blocked: rolled.saturating_sub(damage).max(0),
        armor_name,
    }
}
