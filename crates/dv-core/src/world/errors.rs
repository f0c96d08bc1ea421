//! Engine errors
//!
//! Faults inside an attack are logged and recorded on the attack's report;
//! they abort the current effect only.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use thiserror::Error;

use crate::dungeon::Pos;
use crate::monster::{MonsterId, TemplateId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown damage type code {code}")]
    UnknownDamageType { code: u8 },

    #[error("no monster template with id {id}")]
    UnknownTemplate { id: TemplateId },

    #[error("monster {id} is no longer on the level")]
    StaleMonster { id: MonsterId },

    #[error("position {pos} is off the map")]
    OutOfBounds { pos: Pos },

    #[error("cell {pos} is not free")]
    CellOccupied { pos: Pos },

    #[error("invalid configuration: {0}")]
    Config(String),
}
