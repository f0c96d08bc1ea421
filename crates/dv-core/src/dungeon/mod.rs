//! Dungeon grid
//!
//! Contains the level structure, cells, and the ray/area geometry that
//! attacks travel over.

mod cell;
mod geometry;
mod level;

pub use cell::{Cell, Terrain};
pub use geometry::{
    bolt_glyph, distance, enumerate_area, line_of_sight, project_path, step_glyph, trace_line,
    AreaCell, Direction, Pos, RayEnd, TraceIter, TracePath,
};
pub use level::Level;
