//! Player state
//!
//! Only the parts of the character that incoming effects read or change:
//! hit points, experience, attributes, resistances, timed status and
//! worn equipment.

mod attributes;
mod properties;
mod you;

pub use attributes::{Attribute, Attributes};
pub use properties::Resistances;
pub use you::{level_for_exp, Player, PlayerStatus, MAX_PLAYER_LEVEL, PLAYER_EXP};
