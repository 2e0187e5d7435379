//! Worn equipment
//!
//! Slots map onto body regions through the armor coverage table; the
//! engine only reads each item's defense and name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where an item is worn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Torso,
    Legs,
    LeftHand,
    RightHand,
    Back,
    Feet,
}

/// A worn item; `defense` is flat damage reduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub defense: Option<i32>,
}

impl Item {
    pub fn new(name: impl Into<String>, defense: i32) -> Self {
        Self {
            name: name.into(),
            defense: Some(defense),
        }
    }

    /// Item with no protective value (a backpack, a scarf)
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defense: None,
        }
    }
}

/// Items by slot, iterated in slot order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    slots: BTreeMap<EquipmentSlot, Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an item in a slot, returning whatever was there
    pub fn equip(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        self.slots.insert(slot, item)
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        self.slots.iter().map(|(slot, item)| (*slot, item))
    }
}
