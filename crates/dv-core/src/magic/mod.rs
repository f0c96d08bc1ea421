//! Attack system
//!
//! Bolts, lines, balls and breaths, and the effect of one damage type on one
//! monster or on the player.

pub mod breath;
pub mod effect;
pub mod messages;
pub mod player_effect;
pub mod zap;

pub use breath::{breath_damage, breath_radius, breathe, monster_bolt};
pub use effect::{apply_to_monster, MonsterHit};
pub use messages::{death_message, monster_name, pain_message};
pub use player_effect::{apply_to_player, PlayerEffect, PlayerOutcome};
pub use zap::{
    decode_damage_type, fire_ball, fire_bolt, fire_line, Aim, AttackKind, AttackReport,
    AttackState,
};
