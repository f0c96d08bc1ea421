//! Generational arena holding the monsters of a level
//!
//! Ids stay valid until the monster is removed; a reused slot bumps its
//! generation so stale ids resolve to nothing instead of to a newcomer.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::Monster;

/// Stable handle to a monster on the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId {
    index: u32,
    generation: u32,
}

impl MonsterId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub const fn index(&self) -> u32 {
        self.index
    }

    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl core::fmt::Display for MonsterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    monster: Option<Monster>,
}

/// The monster arena
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a monster, stamping it with its new id
    pub fn insert(&mut self, mut monster: Monster) -> MonsterId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let id = MonsterId::new(index, slot.generation);
        monster.id = id;
        slot.monster = Some(monster);
        self.len += 1;
        id
    }

    pub fn get(&self, id: MonsterId) -> Option<&Monster> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.monster.as_ref())
    }

    pub fn get_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.monster.as_mut())
    }

    pub fn contains(&self, id: MonsterId) -> bool {
        self.get(id).is_some()
    }

    /// Take a monster out; its id goes stale immediately
    pub fn remove(&mut self, id: MonsterId) -> Option<Monster> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let monster = slot.monster.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(monster)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.slots.iter().filter_map(|slot| slot.monster.as_ref())
    }

    /// Snapshot of the live ids, in slot order
    pub fn ids(&self) -> Vec<MonsterId> {
        self.iter().map(|m| m.id).collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Pos;
    use crate::monster::TemplateId;

    fn monster() -> Monster {
        Monster::with_hp(TemplateId(1), Pos::new(1, 1), 10)
    }

    #[test]
    fn test_insert_and_get() {
        let mut roster = Roster::new();
        let id = roster.insert(monster());
        assert_eq!(roster.get(id).map(|m| m.id), Some(id));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_stale_id_after_reuse() {
        let mut roster = Roster::new();
        let old = roster.insert(monster());
        assert!(roster.remove(old).is_some());
        let new = roster.insert(monster());
        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(roster.get(old).is_none());
        assert!(roster.get(new).is_some());
        assert!(roster.remove(old).is_none());
    }

    #[test]
    fn test_ids_snapshot() {
        let mut roster = Roster::new();
        let a = roster.insert(monster());
        let b = roster.insert(monster());
        roster.remove(a);
        assert_eq!(roster.ids(), vec![b]);
        assert!(!roster.is_empty());
    }
}
