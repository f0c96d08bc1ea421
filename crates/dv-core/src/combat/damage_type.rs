//! Damage types carried by bolts, balls and breaths (GF_* from constant.h)
//!
//! These define WHAT an attack is made of. How each one interacts with a
//! target lives in the resistance table.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, FromRepr};

use crate::monster::Breaths;
use crate::object::ItemClass;
use crate::world::{Color, EngineError};

/// Elemental damage type
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DamageType {
    Arrow = 0,
    #[default]
    MagicMissile = 1,
    Lightning = 2,
    PoisonGas = 3,
    Acid = 4,
    Frost = 5,
    Fire = 6,
    HolyOrb = 7,
    Plasma = 8,
    Nether = 9,
    Water = 10,
    Chaos = 11,
    Shards = 12,
    Sound = 13,
    Confusion = 14,
    Disenchant = 15,
    Nexus = 16,
    Force = 17,
    Inertia = 18,
    Light = 19,
    Dark = 20,
    Time = 21,
    Gravity = 22,
    Mana = 23,
    Meteor = 24,
    Ice = 25,
}

impl TryFrom<u8> for DamageType {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        DamageType::from_repr(code).ok_or(EngineError::UnknownDamageType { code })
    }
}

impl DamageType {
    /// Noun used in messages ("The frost bolt strikes the orc.")
    pub const fn name(&self) -> &'static str {
        match self {
            DamageType::Arrow => "arrow",
            DamageType::MagicMissile => "magic missile",
            DamageType::Lightning => "lightning",
            DamageType::PoisonGas => "poison gas",
            DamageType::Acid => "acid",
            DamageType::Frost => "frost",
            DamageType::Fire => "fire",
            DamageType::HolyOrb => "holy power",
            DamageType::Plasma => "plasma",
            DamageType::Nether => "nether",
            DamageType::Water => "water",
            DamageType::Chaos => "chaos",
            DamageType::Shards => "shards",
            DamageType::Sound => "sound",
            DamageType::Confusion => "confusion",
            DamageType::Disenchant => "disenchantment",
            DamageType::Nexus => "nexus",
            DamageType::Force => "force",
            DamageType::Inertia => "inertia",
            DamageType::Light => "light",
            DamageType::Dark => "darkness",
            DamageType::Time => "time",
            DamageType::Gravity => "gravity",
            DamageType::Mana => "mana",
            DamageType::Meteor => "meteor",
            DamageType::Ice => "ice",
        }
    }

    /// Colour a bolt of this type is drawn in
    pub const fn bolt_color(&self) -> Color {
        match self {
            DamageType::MagicMissile | DamageType::Mana => Color::LightCyan,
            DamageType::Lightning | DamageType::Light => Color::Yellow,
            DamageType::PoisonGas | DamageType::Confusion => Color::Green,
            DamageType::Acid => Color::LightGreen,
            DamageType::Frost | DamageType::Water | DamageType::Ice => Color::LightBlue,
            DamageType::Fire => Color::Red,
            DamageType::HolyOrb
            | DamageType::Nether
            | DamageType::Chaos
            | DamageType::Time
            | DamageType::Dark => Color::DarkGray,
            DamageType::Arrow => Color::Brown,
            DamageType::Plasma | DamageType::Meteor => Color::LightRed,
            DamageType::Shards | DamageType::Sound => Color::White,
            DamageType::Disenchant => Color::Cyan,
            DamageType::Nexus | DamageType::Gravity => Color::Magenta,
            DamageType::Force | DamageType::Inertia => Color::LightGray,
        }
    }

    /// The breath a monster must have to shrug this element off
    pub const fn breath(&self) -> Option<Breaths> {
        match self {
            DamageType::Lightning => Some(Breaths::LIGHTNING),
            DamageType::PoisonGas => Some(Breaths::POISON),
            DamageType::Acid => Some(Breaths::ACID),
            DamageType::Frost => Some(Breaths::FROST),
            DamageType::Fire => Some(Breaths::FIRE),
            DamageType::Plasma => Some(Breaths::PLASMA),
            DamageType::Nether => Some(Breaths::NETHER),
            DamageType::Water => Some(Breaths::WATER),
            DamageType::Chaos => Some(Breaths::CHAOS),
            DamageType::Shards => Some(Breaths::SHARDS),
            DamageType::Sound => Some(Breaths::SOUND),
            DamageType::Confusion => Some(Breaths::CONFUSION),
            DamageType::Disenchant => Some(Breaths::DISENCHANT),
            DamageType::Nexus => Some(Breaths::NEXUS),
            DamageType::Force => Some(Breaths::FORCE),
            DamageType::Inertia => Some(Breaths::INERTIA),
            DamageType::Light => Some(Breaths::LIGHT),
            DamageType::Dark => Some(Breaths::DARK),
            DamageType::Time => Some(Breaths::TIME),
            DamageType::Gravity => Some(Breaths::GRAVITY),
            DamageType::Arrow
            | DamageType::MagicMissile
            | DamageType::HolyOrb
            | DamageType::Mana
            | DamageType::Meteor
            | DamageType::Ice => None,
        }
    }

    /// Whether an item of this class lying in the blast is destroyed
    ///
    /// Gold never is; artifacts are filtered out by the caller.
    pub const fn destroys(&self, class: ItemClass) -> bool {
        use ItemClass::*;
        if matches!(class, Gold) {
            return false;
        }
        const fn burns(class: ItemClass) -> bool {
            matches!(
                class,
                Arrow
                    | Bow
                    | Hafted
                    | Polearm
                    | Boots
                    | Gloves
                    | Cloak
                    | SoftArmor
                    | Staff
                    | Scroll
                    | Book
                    | Potion
                    | Flask
                    | Food
            )
        }
        const fn shatters(class: ItemClass) -> bool {
            matches!(class, Potion | Flask)
        }
        const fn shorts(class: ItemClass) -> bool {
            matches!(class, Ring | Wand | Spike)
        }
        const fn corrodes(class: ItemClass) -> bool {
            matches!(
                class,
                Misc | Chest
                    | Bolt
                    | Arrow
                    | Bow
                    | Hafted
                    | Polearm
                    | Boots
                    | Gloves
                    | Cloak
                    | SoftArmor
                    | Staff
                    | Scroll
                    | Book
                    | Food
            )
        }
        match self {
            DamageType::Fire => burns(class),
            DamageType::Frost => shatters(class),
            DamageType::Lightning => shorts(class),
            DamageType::Acid => corrodes(class),
            DamageType::Plasma | DamageType::Meteor => burns(class) || shorts(class),
            DamageType::Shards | DamageType::Sound | DamageType::Force | DamageType::Ice => {
                shatters(class)
            }
            DamageType::Mana => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_twenty_six_types() {
        assert_eq!(DamageType::iter().count(), 26);
        for (i, typ) in DamageType::iter().enumerate() {
            assert_eq!(typ as u8 as usize, i);
        }
    }

    #[test]
    fn test_try_from_code() {
        assert_eq!(DamageType::try_from(5).unwrap(), DamageType::Frost);
        assert!(matches!(
            DamageType::try_from(26),
            Err(EngineError::UnknownDamageType { code: 26 })
        ));
        assert!(DamageType::try_from(255).is_err());
    }

    #[test]
    fn test_parse_snake_case() {
        assert_eq!(DamageType::from_str("poison_gas").unwrap(), DamageType::PoisonGas);
        assert_eq!(DamageType::HolyOrb.to_string(), "holy_orb");
        assert!(DamageType::from_str("brimstone").is_err());
    }

    #[test]
    fn test_destruction_predicates() {
        assert!(DamageType::Fire.destroys(ItemClass::Scroll));
        assert!(!DamageType::Fire.destroys(ItemClass::Ring));
        assert!(DamageType::Frost.destroys(ItemClass::Potion));
        assert!(DamageType::Lightning.destroys(ItemClass::Wand));
        assert!(DamageType::Plasma.destroys(ItemClass::Ring));
        assert!(DamageType::Plasma.destroys(ItemClass::Cloak));
        assert!(DamageType::Mana.destroys(ItemClass::HardArmor));
        assert!(!DamageType::Mana.destroys(ItemClass::Gold));
        assert!(!DamageType::MagicMissile.destroys(ItemClass::Potion));
    }

    #[test]
    fn test_breath_mapping() {
        assert_eq!(DamageType::Sound.breath(), Some(Breaths::SOUND));
        assert_eq!(DamageType::Mana.breath(), None);
    }

    #[test]
    fn test_bolt_colors() {
        assert_eq!(DamageType::Fire.bolt_color(), Color::Red);
        assert_eq!(DamageType::Nexus.bolt_color(), Color::Magenta);
        assert_eq!(DamageType::Arrow.bolt_color(), Color::Brown);
    }
}
