//! Survival Melee - turn-based melee combat resolution

pub mod combat;
pub mod core;
pub mod entity;
