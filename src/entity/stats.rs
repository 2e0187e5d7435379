//! Character attributes
//!
//! Every attribute is optional. A missing attribute contributes no modifier,
//! exactly like a value sitting on the baseline of 10.

use crate::combat::constants::STAT_BASELINE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Strength,
    Agility,
    Endurance,
    Perception,
    Intelligence,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub strength: Option<i32>,
    pub agility: Option<i32>,
    pub endurance: Option<i32>,
    pub perception: Option<i32>,
    pub intelligence: Option<i32>,
}

impl Stats {
    /// All five attributes set to the same value
    pub fn uniform(value: i32) -> Self {
        Self {
            strength: Some(value),
            agility: Some(value),
            endurance: Some(value),
            perception: Some(value),
            intelligence: Some(value),
        }
    }

    pub fn get(&self, stat: Stat) -> Option<i32> {
        match stat {
            Stat::Strength => self.strength,
            Stat::Agility => self.agility,
            Stat::Endurance => self.endurance,
            Stat::Perception => self.perception,
            Stat::Intelligence => self.intelligence,
        }
    }

    /// Distance from the baseline, zero when unset
    pub fn offset(&self, stat: Stat) -> i32 {
        self.get(stat).map_or(0, |v| v - STAT_BASELINE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stat_has_no_offset() {
        let stats = Stats {
            strength: Some(14),
            ..Default::default()
        };
        assert_eq!(stats.offset(Stat::Strength), 4);
        assert_eq!(stats.offset(Stat::Agility), 0);
    }

    #[test]
    fn test_offset_can_be_negative() {
        assert_eq!(Stats::uniform(7).offset(Stat::Perception), -3);
    }
}
