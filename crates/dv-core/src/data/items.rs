//! Stock item kinds monsters can drop (treasure.c)

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::object::{ItemCatalog, ItemClass, ItemKind};

fn armour(name: &str, class: ItemClass, level: u8, ac: i16) -> ItemKind {
    ItemKind {
        ac,
        ..ItemKind::new(name, class, level)
    }
}

/// The stock item list
pub fn item_kinds() -> ItemCatalog {
    ItemCatalog::new(vec![
        ItemKind::new("ration of food", ItemClass::Food, 0),
        ItemKind::new("flask of oil", ItemClass::Flask, 1),
        ItemKind::new("iron spike", ItemClass::Spike, 1),
        ItemKind::new("arrow", ItemClass::Arrow, 2),
        ItemKind::new("crossbow bolt", ItemClass::Bolt, 2),
        ItemKind::new("dagger", ItemClass::Sword, 0),
        ItemKind::new("mace", ItemClass::Hafted, 2),
        ItemKind::new("spear", ItemClass::Polearm, 5),
        ItemKind::new("short bow", ItemClass::Bow, 3),
        ItemKind::new("Potion of Cure Light Wounds", ItemClass::Potion, 1),
        ItemKind::new("Potion of Resist Heat", ItemClass::Potion, 5),
        ItemKind::new("Scroll of Light", ItemClass::Scroll, 0),
        ItemKind::new("Scroll of Phase Door", ItemClass::Scroll, 1),
        ItemKind::new("Magic for Beginners", ItemClass::Book, 5),
        ItemKind::new("Wand of Magic Missile", ItemClass::Wand, 3),
        ItemKind::new("Staff of Detect Evil", ItemClass::Staff, 10),
        ItemKind::new("Ring of Protection", ItemClass::Ring, 10),
        ItemKind::new("Amulet of Slow Digestion", ItemClass::Amulet, 14),
        armour("soft leather boots", ItemClass::Boots, 2, 2),
        armour("leather gloves", ItemClass::Gloves, 1, 1),
        armour("cloak", ItemClass::Cloak, 1, 1),
        armour("hard leather cap", ItemClass::Helm, 2, 2),
        armour("small wooden shield", ItemClass::Shield, 3, 2),
        armour("soft leather armour", ItemClass::SoftArmor, 2, 8),
        armour("metal scale mail", ItemClass::HardArmor, 10, 38),
    ])
}
