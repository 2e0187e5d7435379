pub mod anatomy;
pub mod body;
pub mod combatant;
pub mod stats;

pub use anatomy::{Anatomy, BodyPart, CombatPenalties, PenaltySource};
pub use body::HumanBody;
pub use combatant::{Combatant, DetectionState, NpcAwareness};
pub use stats::{Stat, Stats};
