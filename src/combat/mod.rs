pub mod armor;
pub mod body_zone;
pub mod constants;
pub mod damage;
pub mod dice;
pub mod engagement;
pub mod equipment;
pub mod events;
pub mod messages;
pub mod modifiers;
pub mod resolution;
pub mod stance;
pub mod status;
pub mod targeting;
pub mod weapons;
pub mod weighted;
pub mod wounds;

pub use armor::{mitigate, ArmorCoverage, Mitigation};
pub use body_zone::{BodyPartId, Region};
pub use damage::roll_weapon_damage;
pub use dice::DiceExpr;
pub use engagement::{EngagementRecord, EngagementTracker};
pub use equipment::{Equipment, EquipmentSlot, Item};
pub use events::{CombatEvent, CombatEventKind, CombatLog};
pub use messages::{CombatMessage, MessageKind, MessageTemplates};
pub use resolution::{AttackResult, CombatEngine};
pub use stance::Stance;
pub use status::{NoStatusEffects, StatusBoard, StatusEffects};
pub use targeting::{CombatTables, HitLocation, SubPart};
pub use weapons::{AttackCategory, Weapon};
pub use weighted::weighted_choice;
pub use wounds::{InflictedWound, Wound, WoundType};
