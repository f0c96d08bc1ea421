//! Monster templates (monster.h, monsters.c)
//!
//! Templates are read-only at runtime; only creature memory and the
//! monster instances change.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Index of a template in the monster catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TemplateId(pub u16);

impl core::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    /// Defensive capabilities (CD_* from constant.h)
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        const DRAGON = 0x0000_0001;
        const ANIMAL = 0x0000_0002;
        const EVIL = 0x0000_0004;
        const UNDEAD = 0x0000_0008;
        const DEMON = 0x0000_0010;
        const GIANT = 0x0000_0020;
        const UNIQUE = 0x0000_0040;
        /// Ancient dragons and their kin
        const POWERFUL = 0x0000_0080;
        const HURT_BY_LIGHT = 0x0000_0100;
        const HURT_BY_ROCK = 0x0000_0200;
        const IM_FROST = 0x0000_1000;
        const IM_FIRE = 0x0000_2000;
        const IM_LIGHTNING = 0x0000_4000;
        const IM_POISON = 0x0000_8000;
        const IM_ACID = 0x0001_0000;
        /// Water elementals and other water-aligned beings
        const IM_WATER = 0x0002_0000;
        const RES_NETHER = 0x0004_0000;
        const RES_PLASMA = 0x0008_0000;
        const RES_NEXUS = 0x0010_0000;
        const RES_DISENCHANT = 0x0020_0000;
        const NO_CONFUSION = 0x0040_0000;
        const NO_SLEEP = 0x0080_0000;
        /// Always generated with maximum hit points
        const MAX_HP = 0x0100_0000;
    }
}

bitflags! {
    /// Breath repertoire (CS_BR_* plus the later breaths)
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Breaths: u32 {
        const LIGHTNING = 0x0000_0001;
        const POISON = 0x0000_0002;
        const ACID = 0x0000_0004;
        const FROST = 0x0000_0008;
        const FIRE = 0x0000_0010;
        const PLASMA = 0x0000_0020;
        const NETHER = 0x0000_0040;
        const WATER = 0x0000_0080;
        const CHAOS = 0x0000_0100;
        const SHARDS = 0x0000_0200;
        const SOUND = 0x0000_0400;
        const CONFUSION = 0x0000_0800;
        const DISENCHANT = 0x0000_1000;
        const NEXUS = 0x0000_2000;
        const FORCE = 0x0000_4000;
        const INERTIA = 0x0000_8000;
        const LIGHT = 0x0001_0000;
        const DARK = 0x0002_0000;
        const TIME = 0x0004_0000;
        const GRAVITY = 0x0008_0000;
    }
}

bitflags! {
    /// Treasure propensity (CM_* carry flags from constant.h)
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Treasure: u32 {
        const CARRY_OBJECT = 0x0000_0001;
        const CARRY_GOLD = 0x0000_0002;
        const DROP_60 = 0x0000_0004;
        const DROP_90 = 0x0000_0008;
        const DROP_1D2 = 0x0000_0010;
        const DROP_2D2 = 0x0000_0020;
        const DROP_4D2 = 0x0000_0040;
    }
}

macro_rules! bits_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                self.bits().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bits = u32::deserialize(deserializer)?;
                Ok(<$ty>::from_bits_truncate(bits))
            }
        }
    };
}

bits_serde!(Capabilities);
bits_serde!(Breaths);
bits_serde!(Treasure);

/// Hit dice rolled for a fresh monster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitDice {
    pub num: u8,
    pub sides: u8,
}

impl HitDice {
    pub const fn new(num: u8, sides: u8) -> Self {
        Self { num, sides }
    }

    pub const fn max(&self) -> i32 {
        self.num as i32 * self.sides as i32
    }
}

/// Monster template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerMonst {
    pub id: TemplateId,

    /// Monster name, without article
    pub name: String,

    /// Display symbol
    pub symbol: char,

    /// Native dungeon level
    pub level: u8,

    /// Experience value per player level
    pub exp_value: u32,

    pub hit_dice: HitDice,

    /// Speed modifier, 0 is normal
    pub speed: i8,

    /// Initial sleep counter
    pub sleep: u8,

    pub capabilities: Capabilities,

    pub breaths: Breaths,

    pub treasure: Treasure,
}

impl PerMonst {
    pub fn new(id: u16, name: &str, symbol: char, level: u8) -> Self {
        Self {
            id: TemplateId(id),
            name: name.to_string(),
            symbol,
            level,
            exp_value: 0,
            hit_dice: HitDice::new(1, 8),
            speed: 0,
            sleep: 0,
            capabilities: Capabilities::empty(),
            breaths: Breaths::empty(),
            treasure: Treasure::empty(),
        }
    }

    pub fn with_hit_dice(mut self, num: u8, sides: u8) -> Self {
        self.hit_dice = HitDice::new(num, sides);
        self
    }

    pub fn with_exp(mut self, exp_value: u32) -> Self {
        self.exp_value = exp_value;
        self
    }

    pub fn with_speed(mut self, speed: i8) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    pub fn with_breaths(mut self, breaths: Breaths) -> Self {
        self.breaths |= breaths;
        self
    }

    pub fn with_treasure(mut self, treasure: Treasure) -> Self {
        self.treasure |= treasure;
        self
    }

    pub const fn has(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    pub const fn breathes(&self, breath: Breaths) -> bool {
        self.breaths.contains(breath)
    }

    pub const fn is_undead(&self) -> bool {
        self.has(Capabilities::UNDEAD)
    }

    pub const fn is_demon(&self) -> bool {
        self.has(Capabilities::DEMON)
    }

    pub const fn is_dragon(&self) -> bool {
        self.has(Capabilities::DRAGON)
    }

    pub const fn is_animal(&self) -> bool {
        self.has(Capabilities::ANIMAL)
    }

    pub const fn is_evil(&self) -> bool {
        self.has(Capabilities::EVIL)
    }

    pub const fn is_giant(&self) -> bool {
        self.has(Capabilities::GIANT)
    }

    pub const fn is_unique(&self) -> bool {
        self.has(Capabilities::UNIQUE)
    }

    pub const fn is_powerful(&self) -> bool {
        self.has(Capabilities::POWERFUL)
    }

    pub const fn hurt_by_light(&self) -> bool {
        self.has(Capabilities::HURT_BY_LIGHT)
    }

    pub const fn hurt_by_rock(&self) -> bool {
        self.has(Capabilities::HURT_BY_ROCK)
    }

    pub const fn resists_confusion(&self) -> bool {
        self.has(Capabilities::NO_CONFUSION)
    }

    /// Undead and demons are "destroyed" rather than killed
    pub const fn is_nonliving(&self) -> bool {
        self.is_undead() || self.is_demon()
    }
}
