//! Read-only item kinds, used to roll monster drops

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::{ItemClass, Object};
use crate::rng::GameRng;

/// One kind of item a monster can carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemKind {
    pub name: String,
    pub class: ItemClass,
    /// Shallowest level it appears on
    pub level: u8,
    #[serde(default)]
    pub ac: i16,
}

impl ItemKind {
    pub fn new(name: &str, class: ItemClass, level: u8) -> Self {
        Self {
            name: name.to_string(),
            class,
            level,
            ac: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCatalog {
    kinds: Vec<ItemKind>,
}

impl ItemCatalog {
    pub fn new(kinds: Vec<ItemKind>) -> Self {
        Self { kinds }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Roll an item no deeper than `level`
    pub fn roll_object(&self, level: u8, rng: &mut GameRng) -> Option<Object> {
        let eligible: Vec<&ItemKind> = self.kinds.iter().filter(|k| k.level <= level).collect();
        let kind = *rng.choose(&eligible)?;
        let mut object = Object::new(kind.class, &kind.name);
        object.ac = kind.ac;
        if kind.class.is_armour() && rng.one_in(3) {
            object.to_ac = rng.rnd(3) as i16;
        } else if kind.class.is_weapon() && rng.one_in(3) {
            object.to_hit = rng.rnd(3) as i16;
            object.to_dam = rng.rnd(3) as i16;
        }
        Some(object)
    }

    /// Roll a pile of coins scaled by level
    pub fn roll_gold(&self, level: u8, rng: &mut GameRng) -> Object {
        let level = level as u32;
        Object::gold(rng.rnd(8 * level + 8) + 10 * rng.rnd(level + 2))
    }
}
