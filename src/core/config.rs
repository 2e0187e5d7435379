//! Combat engine configuration
//!
//! Run-time knobs for the engine. Formula coefficients live in
//! `combat::constants`; this struct holds what a game may tune per save
//! or per test without recompiling.

use crate::core::error::{CombatError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the combat engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Turns without an exchange before an enemy drops out of engagement
    ///
    /// An enemy is still engaged while `current_turn - last_combat_turn`
    /// is at most this value.
    pub engagement_timeout: u64,

    /// Capacity of the structured event ring buffer
    ///
    /// The oldest event is evicted first once full.
    pub event_log_capacity: usize,

    /// Capacity of the pending human-readable message queue
    ///
    /// Presentation drains this every frame. Undrained messages past the
    /// capacity are dropped oldest first.
    pub message_log_capacity: usize,

    /// Seed for the presentation RNG that picks message templates
    ///
    /// Kept separate from the resolution RNG so text never shifts the
    /// sequence of combat draws.
    pub message_seed: u64,

    /// Display name used for the player in messages
    ///
    /// Verbs are conjugated in second person when the attacker's display
    /// name matches this.
    pub player_name: String,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            engagement_timeout: 5,
            event_log_capacity: 20,
            message_log_capacity: 100,
            message_seed: 0,
            player_name: "you".to_string(),
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a TOML string; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.event_log_capacity == 0 {
            return Err(CombatError::InvalidConfig(
                "event_log_capacity must be at least 1".into(),
            ));
        }

        if self.message_log_capacity == 0 {
            return Err(CombatError::InvalidConfig(
                "message_log_capacity must be at least 1".into(),
            ));
        }

        if self.player_name.trim().is_empty() {
            return Err(CombatError::InvalidConfig(
                "player_name must not be empty".into(),
            ));
        }

        Ok(())
    }
}
