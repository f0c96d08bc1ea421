//! Level structure: terrain grid, monster roster and floor objects

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::{Cell, Pos, Terrain};
use crate::monster::{Monster, MonsterId, Roster};
use crate::object::{Object, ObjectId};
use crate::world::EngineError;

/// One dungeon level
///
/// The grid stores ids only; monsters live in the roster and objects in the
/// floor list. Every mutation keeps grid and owners in step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    height: usize,
    width: usize,

    /// Map cells, row-major
    cells: Vec<Cell>,

    /// All monsters on this level
    monsters: Roster,

    /// All objects lying on the floor
    objects: Vec<Object>,

    /// Next object ID to assign
    next_object_id: u32,
}

impl Level {
    /// Create a level of solid granite
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::wall(); height * width],
            monsters: Roster::new(),
            objects: Vec::new(),
            next_object_id: 1,
        }
    }

    /// Create a single lit room filling the map inside a granite border
    pub fn with_room(height: usize, width: usize) -> Self {
        let mut level = Self::new(height, width);
        if height > 2 && width > 2 {
            level.fill(
                Pos::new(1, 1),
                Pos::new(height as i16 - 2, width as i16 - 2),
                Terrain::LitFloor,
            );
        }
        level
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Check if position is on the map
    pub fn is_valid(&self, pos: Pos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// Check if position is strictly inside the map border
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row > 0
            && pos.col > 0
            && (pos.row as usize) + 1 < self.height
            && (pos.col as usize) + 1 < self.width
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.is_valid(pos)
            .then(|| pos.row as usize * self.width + pos.col as usize)
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    /// Terrain at a position; off-map reads as the permanent boundary
    pub fn terrain_at(&self, pos: Pos) -> Terrain {
        self.cell(pos).map_or(Terrain::Boundary, |c| c.terrain)
    }

    pub fn set_terrain(&mut self, pos: Pos, terrain: Terrain) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.terrain = terrain;
        }
    }

    /// Set every cell of an inclusive rectangle
    pub fn fill(&mut self, top_left: Pos, bottom_right: Pos, terrain: Terrain) {
        for row in top_left.row..=bottom_right.row {
            for col in top_left.col..=bottom_right.col {
                self.set_terrain(Pos::new(row, col), terrain);
            }
        }
    }

    /// Whether the cell stops projections and sight
    pub fn blocks_at(&self, pos: Pos) -> bool {
        self.terrain_at(pos).blocks()
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        !self.blocks_at(pos)
    }

    /// Open and free of monsters
    pub fn is_vacant(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(Cell::is_vacant)
    }

    pub fn set_lit(&mut self, pos: Pos) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.lit = true;
        }
    }

    pub fn is_lit(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|c| c.lit)
    }

    // Monsters

    pub fn monsters(&self) -> &Roster {
        &self.monsters
    }

    pub fn monster_id_at(&self, pos: Pos) -> Option<MonsterId> {
        self.cell(pos)?.monster
    }

    /// Get monster at position
    pub fn monster_at(&self, pos: Pos) -> Option<&Monster> {
        self.monster_id_at(pos).and_then(|id| self.monsters.get(id))
    }

    /// Get monster by ID
    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.get(id)
    }

    /// Get mutable monster by ID
    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.get_mut(id)
    }

    /// Place a monster on its own position
    pub fn add_monster(&mut self, monster: Monster) -> Result<MonsterId, EngineError> {
        let pos = monster.pos;
        let cell = self.cell(pos).ok_or(EngineError::OutOfBounds { pos })?;
        if !cell.is_vacant() {
            return Err(EngineError::CellOccupied { pos });
        }
        let id = self.monsters.insert(monster);
        if let Some(cell) = self.cell_mut(pos) {
            cell.monster = Some(id);
        }
        Ok(id)
    }

    /// Remove a monster from the level, clearing its cell
    pub fn remove_monster(&mut self, id: MonsterId) -> Option<Monster> {
        let monster = self.monsters.remove(id)?;
        if let Some(cell) = self.cell_mut(monster.pos) {
            if cell.monster == Some(id) {
                cell.monster = None;
            }
        }
        Some(monster)
    }

    /// Move a monster to a vacant cell
    pub fn move_monster(&mut self, id: MonsterId, to: Pos) -> bool {
        if !self.is_vacant(to) {
            return false;
        }
        let Some(from) = self.monsters.get(id).map(|m| m.pos) else {
            return false;
        };
        if let Some(cell) = self.cell_mut(from) {
            cell.monster = None;
        }
        if let Some(cell) = self.cell_mut(to) {
            cell.monster = Some(id);
        }
        if let Some(monster) = self.monsters.get_mut(id) {
            monster.pos = to;
        }
        true
    }

    // Objects

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get the object at a position
    pub fn object_at(&self, pos: Pos) -> Option<&Object> {
        self.cell(pos)?.object.and_then(|id| self.object(id))
    }

    /// Drop an object on an open cell that holds none yet
    pub fn add_object(&mut self, mut object: Object, pos: Pos) -> Result<ObjectId, EngineError> {
        let cell = self.cell(pos).ok_or(EngineError::OutOfBounds { pos })?;
        if !cell.is_open() || cell.object.is_some() {
            return Err(EngineError::CellOccupied { pos });
        }
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        object.id = id;
        object.pos = pos;
        if let Some(cell) = self.cell_mut(pos) {
            cell.object = Some(id);
        }
        self.objects.push(object);
        Ok(id)
    }

    /// Remove an object from the level
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Object> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        let object = self.objects.remove(idx);
        if let Some(cell) = self.cell_mut(object.pos) {
            cell.object = None;
        }
        Some(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::TemplateId;
    use crate::object::ItemClass;

    #[test]
    fn test_room_layout() {
        let level = Level::with_room(10, 12);
        assert!(level.blocks_at(Pos::new(0, 0)));
        assert!(level.blocks_at(Pos::new(9, 5)));
        assert!(level.is_open(Pos::new(1, 1)));
        assert!(level.is_open(Pos::new(8, 10)));
        assert!(level.blocks_at(Pos::new(-1, 3)));
        assert_eq!(level.terrain_at(Pos::new(50, 50)), Terrain::Boundary);
    }

    #[test]
    fn test_bounds() {
        let level = Level::new(10, 12);
        assert!(level.is_valid(Pos::new(0, 0)));
        assert!(!level.in_bounds(Pos::new(0, 0)));
        assert!(level.in_bounds(Pos::new(1, 1)));
        assert!(!level.is_valid(Pos::new(10, 0)));
    }

    #[test]
    fn test_add_monster_updates_grid() {
        let mut level = Level::with_room(10, 10);
        let pos = Pos::new(3, 4);
        let id = level
            .add_monster(Monster::with_hp(TemplateId(1), pos, 5))
            .unwrap();
        assert_eq!(level.monster_id_at(pos), Some(id));
        assert_eq!(level.monster_at(pos).map(|m| m.hp), Some(5));
    }

    #[test]
    fn test_add_monster_rejects_occupied_and_walls() {
        let mut level = Level::with_room(10, 10);
        let pos = Pos::new(3, 4);
        level
            .add_monster(Monster::with_hp(TemplateId(1), pos, 5))
            .unwrap();
        assert!(matches!(
            level.add_monster(Monster::with_hp(TemplateId(1), pos, 5)),
            Err(EngineError::CellOccupied { .. })
        ));
        assert!(level
            .add_monster(Monster::with_hp(TemplateId(1), Pos::new(0, 0), 5))
            .is_err());
        assert!(matches!(
            level.add_monster(Monster::with_hp(TemplateId(1), Pos::new(40, 0), 5)),
            Err(EngineError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_remove_and_move_monster() {
        let mut level = Level::with_room(10, 10);
        let id = level
            .add_monster(Monster::with_hp(TemplateId(1), Pos::new(3, 3), 5))
            .unwrap();
        assert!(level.move_monster(id, Pos::new(4, 4)));
        assert_eq!(level.monster_id_at(Pos::new(3, 3)), None);
        assert_eq!(level.monster_id_at(Pos::new(4, 4)), Some(id));
        assert!(!level.move_monster(id, Pos::new(0, 0)));

        let removed = level.remove_monster(id).unwrap();
        assert_eq!(removed.pos, Pos::new(4, 4));
        assert_eq!(level.monster_id_at(Pos::new(4, 4)), None);
        assert!(level.monster(id).is_none());
    }

    #[test]
    fn test_one_object_per_cell() {
        let mut level = Level::with_room(10, 10);
        let pos = Pos::new(2, 2);
        let id = level
            .add_object(Object::new(ItemClass::Potion, "potion"), pos)
            .unwrap();
        assert!(level
            .add_object(Object::new(ItemClass::Scroll, "scroll"), pos)
            .is_err());
        assert_eq!(level.object_at(pos).map(|o| o.id), Some(id));
        assert!(level.remove_object(id).is_some());
        assert!(level.object_at(pos).is_none());
    }
}
