//! Worn equipment

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::Object;
use crate::rng::GameRng;

/// Equipment slot (INVEN_* from constant.h)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum EquipSlot {
    Weapon = 0,
    Bow = 1,
    Body = 2,
    Cloak = 3,
    Shield = 4,
    Helm = 5,
    Gloves = 6,
    Boots = 7,
}

impl EquipSlot {
    pub const COUNT: usize = 8;

    pub const fn is_armour(&self) -> bool {
        !matches!(self, EquipSlot::Weapon | EquipSlot::Bow)
    }
}

/// What the player is wearing and wielding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    slots: [Option<Object>; EquipSlot::COUNT],
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an item on, returning whatever it replaced
    pub fn wear(&mut self, slot: EquipSlot, object: Object) -> Option<Object> {
        self.slots[slot as usize].replace(object)
    }

    pub fn take_off(&mut self, slot: EquipSlot) -> Option<Object> {
        self.slots[slot as usize].take()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&Object> {
        self.slots[slot as usize].as_ref()
    }

    pub fn get_mut(&mut self, slot: EquipSlot) -> Option<&mut Object> {
        self.slots[slot as usize].as_mut()
    }

    /// Occupied slots, in slot order
    pub fn worn(&self) -> impl Iterator<Item = (EquipSlot, &Object)> {
        EquipSlot::iter().filter_map(|slot| self.get(slot).map(|o| (slot, o)))
    }

    /// Total armour class from worn items
    pub fn armour_class(&self) -> i32 {
        self.worn()
            .map(|(_, o)| o.ac as i32 + o.to_ac as i32)
            .sum()
    }

    /// A uniformly chosen occupied slot among `candidates`
    pub fn random_worn(&self, candidates: &[EquipSlot], rng: &mut GameRng) -> Option<EquipSlot> {
        let worn: Vec<EquipSlot> = candidates
            .iter()
            .copied()
            .filter(|slot| self.get(*slot).is_some())
            .collect();
        rng.choose(&worn).copied()
    }
}
