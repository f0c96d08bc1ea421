//! Damage types and the resistance table

mod damage_type;
mod resist;

pub use damage_type::DamageType;
pub use resist::{
    resolve, resolve_player, Multiplier, Outcome, PlayerResolution, Resolution, SideEffect,
};
