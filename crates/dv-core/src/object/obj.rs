//! Object instances (inven_type in types.h)

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::Pos;

/// Object identifier, unique within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Item class (TV_* from constant.h)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum ItemClass {
    #[default]
    Misc = 1,
    Chest = 2,
    Spike = 3,
    Shot = 10,
    Bolt = 11,
    Arrow = 12,
    Bow = 20,
    Hafted = 21,
    Polearm = 22,
    Sword = 23,
    Digger = 25,
    Boots = 30,
    Gloves = 31,
    Cloak = 32,
    Helm = 33,
    Shield = 34,
    HardArmor = 35,
    SoftArmor = 36,
    Amulet = 40,
    Ring = 45,
    Staff = 55,
    Wand = 65,
    Scroll = 70,
    Book = 75,
    Potion = 76,
    Flask = 77,
    Food = 80,
    Gold = 100,
}

impl ItemClass {
    /// Worn for armour class
    pub const fn is_armour(&self) -> bool {
        matches!(
            self,
            ItemClass::Boots
                | ItemClass::Gloves
                | ItemClass::Cloak
                | ItemClass::Helm
                | ItemClass::Shield
                | ItemClass::HardArmor
                | ItemClass::SoftArmor
        )
    }

    pub const fn is_weapon(&self) -> bool {
        matches!(
            self,
            ItemClass::Bow
                | ItemClass::Hafted
                | ItemClass::Polearm
                | ItemClass::Sword
                | ItemClass::Digger
        )
    }
}

/// An item, on the floor or worn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub id: ObjectId,
    pub class: ItemClass,
    pub name: String,
    /// Floor position; meaningless while worn
    pub pos: Pos,
    pub to_hit: i16,
    pub to_dam: i16,
    pub to_ac: i16,
    /// Base armour class
    pub ac: i16,
    /// Gold value for coins
    pub value: u32,
    /// Artifacts are never destroyed or disenchanted
    pub artifact: bool,
    pub identified: bool,
}

impl Object {
    pub fn new(class: ItemClass, name: &str) -> Self {
        Self {
            id: ObjectId::default(),
            class,
            name: name.to_string(),
            pos: Pos::default(),
            to_hit: 0,
            to_dam: 0,
            to_ac: 0,
            ac: 0,
            value: 0,
            artifact: false,
            identified: false,
        }
    }

    pub fn gold(value: u32) -> Self {
        Self {
            value,
            ..Self::new(ItemClass::Gold, "gold")
        }
    }

    pub fn with_bonuses(mut self, to_hit: i16, to_dam: i16, to_ac: i16) -> Self {
        self.to_hit = to_hit;
        self.to_dam = to_dam;
        self.to_ac = to_ac;
        self
    }

    pub fn artifact(mut self) -> Self {
        self.artifact = true;
        self
    }

    pub fn is_gold(&self) -> bool {
        self.class == ItemClass::Gold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_groups() {
        assert!(ItemClass::Shield.is_armour());
        assert!(!ItemClass::Sword.is_armour());
        assert!(ItemClass::Sword.is_weapon());
    }

    #[test]
    fn test_gold() {
        let coins = Object::gold(120);
        assert!(coins.is_gold());
        assert_eq!(coins.value, 120);
        assert!(!coins.artifact);
    }
}
