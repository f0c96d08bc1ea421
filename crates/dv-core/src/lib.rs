//! dv-core: elemental effect resolution for a Moria-style dungeon crawler
//!
//! Computes what happens when a bolt, a line, a ball or a breath strikes
//! terrain, monsters or the player. The crate owns no I/O: drawing and
//! messages go through the [`world::Presenter`] trait, and every roll comes
//! from one seeded [`GameRng`].
//!
//! Supports `no_std` environments by disabling the default `std` feature.
//! File-based configuration loading is gated behind `cfg(feature = "std")`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Re-exports of alloc types needed when building without std.
/// In std mode, these are provided by the std prelude.
#[cfg(not(feature = "std"))]
pub(crate) mod compat {
    pub use alloc::borrow::ToOwned;
    pub use alloc::boxed::Box;
    pub use alloc::format;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

pub mod combat;
pub mod data;
pub mod dungeon;
pub mod magic;
pub mod monster;
pub mod object;
pub mod player;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
