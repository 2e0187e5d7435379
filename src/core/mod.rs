pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::CombatConfig;
pub use error::{CombatError, Result};
pub use rng::ScriptedRng;
pub use types::{EntityId, Position, Turn};
