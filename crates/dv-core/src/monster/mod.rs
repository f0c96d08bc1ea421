//! Monster system: templates, instances, the level roster, creature memory
//! and the lifecycle of a monster under fire

mod catalog;
pub mod lifecycle;
mod memory;
mod monst;
mod permonst;
mod roster;

pub use catalog::MonsterCatalog;
pub use lifecycle::{Death, Fate, KillSource};
pub use memory::{CreatureMemory, DropRecord, Recall};
pub use monst::Monster;
pub use permonst::{Breaths, Capabilities, HitDice, PerMonst, TemplateId, Treasure};
pub use roster::{MonsterId, Roster};
