//! Player resistances, immunities and sustains
//!
//! Intrinsic and item-granted flags are merged into one set; timed
//! oppositions live in the player status.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::Attribute;

bitflags! {
    /// Player protection flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Resistances: u64 {
        const IM_FIRE = 1 << 0;
        const IM_COLD = 1 << 1;
        const IM_ACID = 1 << 2;
        const IM_ELEC = 1 << 3;
        const IM_POIS = 1 << 4;

        const RES_FIRE = 1 << 8;
        const RES_COLD = 1 << 9;
        const RES_ACID = 1 << 10;
        const RES_ELEC = 1 << 11;
        const RES_POIS = 1 << 12;
        const RES_LIGHT = 1 << 13;
        const RES_DARK = 1 << 14;
        const RES_BLIND = 1 << 15;
        const RES_CONF = 1 << 16;
        const RES_SOUND = 1 << 17;
        const RES_SHARDS = 1 << 18;
        const RES_NETHER = 1 << 19;
        const RES_NEXUS = 1 << 20;
        const RES_CHAOS = 1 << 21;
        const RES_DISEN = 1 << 22;

        const FREE_ACT = 1 << 32;
        const HOLD_LIFE = 1 << 33;

        const SUST_STR = 1 << 40;
        const SUST_INT = 1 << 41;
        const SUST_WIS = 1 << 42;
        const SUST_DEX = 1 << 43;
        const SUST_CON = 1 << 44;
        const SUST_CHR = 1 << 45;
    }
}

impl Serialize for Resistances {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Resistances {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u64::deserialize(deserializer)?;
        Ok(Resistances::from_bits_truncate(bits))
    }
}

impl Resistances {
    /// The sustain flag protecting an attribute
    pub const fn sustain_for(attr: Attribute) -> Resistances {
        match attr {
            Attribute::Strength => Resistances::SUST_STR,
            Attribute::Intelligence => Resistances::SUST_INT,
            Attribute::Wisdom => Resistances::SUST_WIS,
            Attribute::Dexterity => Resistances::SUST_DEX,
            Attribute::Constitution => Resistances::SUST_CON,
            Attribute::Charisma => Resistances::SUST_CHR,
        }
    }

    pub const fn sustains(&self, attr: Attribute) -> bool {
        self.contains(Self::sustain_for(attr))
    }
}
