//! Map cell types (cave.h)

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::monster::MonsterId;
use crate::object::ObjectId;

/// Terrain classification of a grid cell
///
/// Everything up to `BrokenDoor` is open space: projections pass through it
/// and monsters may stand on it. The rest blocks both movement and sight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Terrain {
    DarkFloor = 1,
    LitFloor = 2,
    Corridor = 3,
    OpenDoor = 4,
    BrokenDoor = 5,
    ClosedDoor = 6,
    SecretDoor = 7,
    Rubble = 8,
    #[default]
    Granite = 12,
    MagmaVein = 13,
    QuartzVein = 14,
    Boundary = 15,
}

impl Terrain {
    /// Open space lets projections through
    pub const fn is_open(&self) -> bool {
        (*self as u8) <= Terrain::BrokenDoor as u8
    }

    /// Closed space stops projections and blocks line of sight
    pub const fn blocks(&self) -> bool {
        !self.is_open()
    }

    pub const fn is_wall(&self) -> bool {
        (*self as u8) >= Terrain::Granite as u8
    }

    pub const fn is_door(&self) -> bool {
        matches!(
            self,
            Terrain::OpenDoor | Terrain::BrokenDoor | Terrain::ClosedDoor | Terrain::SecretDoor
        )
    }

    /// Glyph used when the cell is redrawn after an effect passes
    pub const fn glyph(&self) -> char {
        match self {
            Terrain::DarkFloor | Terrain::LitFloor | Terrain::Corridor => '.',
            Terrain::OpenDoor | Terrain::BrokenDoor => '\'',
            Terrain::ClosedDoor => '+',
            Terrain::Rubble => ':',
            Terrain::SecretDoor | Terrain::Granite | Terrain::Boundary => '#',
            Terrain::MagmaVein | Terrain::QuartzVein => '%',
        }
    }
}

/// A single grid cell
///
/// Holds at most one monster and one object, by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,
    pub monster: Option<MonsterId>,
    pub object: Option<ObjectId>,
    /// Permanently lit (rooms, or cells a light line has passed over)
    pub lit: bool,
}

impl Cell {
    pub const fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            monster: None,
            object: None,
            lit: false,
        }
    }

    pub const fn floor() -> Self {
        Self::new(Terrain::LitFloor)
    }

    pub const fn wall() -> Self {
        Self::new(Terrain::Granite)
    }

    pub const fn is_open(&self) -> bool {
        self.terrain.is_open()
    }

    pub const fn blocks(&self) -> bool {
        self.terrain.blocks()
    }

    /// Open, with no monster standing on it
    pub const fn is_vacant(&self) -> bool {
        self.is_open() && self.monster.is_none()
    }
}
