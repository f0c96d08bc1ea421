//! Ray and area geometry over the grid (misc1.c, spells.c)
//!
//! Everything here is a pure function of the level's terrain: tracing a ray
//! twice over the same level yields the same cells. Cells outside the map are
//! never produced.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::Level;

/// A grid position, row first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub row: i16,
    pub col: i16,
}

impl Pos {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// The neighbouring position one step in `dir`
    pub fn step(self, dir: Direction) -> Pos {
        let (dr, dc) = dir.delta();
        Pos::new(self.row + dr, self.col + dc)
    }

    pub fn offset(self, dr: i16, dc: i16) -> Pos {
        Pos::new(self.row + dr, self.col + dc)
    }

    pub fn distance(self, other: Pos) -> u32 {
        distance(self, other)
    }
}

impl core::fmt::Display for Pos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Keypad directions; `Here` is the "no direction" key
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Direction {
    SouthWest = 1,
    South = 2,
    SouthEast = 3,
    West = 4,
    Here = 5,
    East = 6,
    NorthWest = 7,
    North = 8,
    NorthEast = 9,
}

impl Direction {
    /// The eight directions a ray can travel in
    pub const COMPASS: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Row and column step
    pub const fn delta(&self) -> (i16, i16) {
        match self {
            Direction::SouthWest => (1, -1),
            Direction::South => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::West => (0, -1),
            Direction::Here => (0, 0),
            Direction::East => (0, 1),
            Direction::NorthWest => (-1, -1),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
        }
    }

    /// Direction for a keypad digit
    pub const fn from_keypad(key: u8) -> Option<Direction> {
        match key {
            1 => Some(Direction::SouthWest),
            2 => Some(Direction::South),
            3 => Some(Direction::SouthEast),
            4 => Some(Direction::West),
            5 => Some(Direction::Here),
            6 => Some(Direction::East),
            7 => Some(Direction::NorthWest),
            8 => Some(Direction::North),
            9 => Some(Direction::NorthEast),
            _ => None,
        }
    }

    /// Direction of a single step from one cell toward another
    pub fn toward(from: Pos, to: Pos) -> Direction {
        let dr = (to.row - from.row).signum();
        let dc = (to.col - from.col).signum();
        match (dr, dc) {
            (1, -1) => Direction::SouthWest,
            (1, 0) => Direction::South,
            (1, 1) => Direction::SouthEast,
            (0, -1) => Direction::West,
            (0, 1) => Direction::East,
            (-1, -1) => Direction::NorthWest,
            (-1, 0) => Direction::North,
            (-1, 1) => Direction::NorthEast,
            _ => Direction::Here,
        }
    }
}

/// Approximate Euclidean distance used for ranges and falloff
///
/// `(2 * (dy + dx) - min(dy, dx)) / 2`, rounded down.
pub fn distance(a: Pos, b: Pos) -> u32 {
    let dy = (a.row as i32 - b.row as i32).unsigned_abs();
    let dx = (a.col as i32 - b.col as i32).unsigned_abs();
    (((dy + dx) << 1) - dy.min(dx)) >> 1
}

/// Integer line of sight between two cell centres (Joseph Hall's algorithm)
///
/// The end cells themselves never block, adjacent cells always see each
/// other, and a line that merely clips the corner of a cell does not pass
/// through it.
pub fn line_of_sight(level: &Level, from: Pos, to: Pos) -> bool {
    let (from_y, from_x) = (from.row as i32, from.col as i32);
    let (to_y, to_x) = (to.row as i32, to.col as i32);
    let delta_x = to_x - from_x;
    let delta_y = to_y - from_y;

    if delta_x.abs() < 2 && delta_y.abs() < 2 {
        return true;
    }

    let blocked = |y: i32, x: i32| level.blocks_at(Pos::new(y as i16, x as i16));

    if delta_x == 0 {
        let (lo, hi) = if delta_y < 0 { (to_y, from_y) } else { (from_y, to_y) };
        return !(lo + 1..hi).any(|y| blocked(y, from_x));
    }
    if delta_y == 0 {
        let (lo, hi) = if delta_x < 0 { (to_x, from_x) } else { (from_x, to_x) };
        return !(lo + 1..hi).any(|x| blocked(from_y, x));
    }

    let scale2 = (delta_x * delta_y).abs();
    let scale = scale2 << 1;
    let x_sign = delta_x.signum();
    let y_sign = delta_y.signum();

    if delta_x.abs() >= delta_y.abs() {
        let mut dy = delta_y * delta_y;
        let m = dy << 1;
        let mut px = from_x + x_sign;
        let mut py = from_y;
        if dy == scale2 {
            py += y_sign;
            dy -= scale;
        }
        while to_x != px {
            if blocked(py, px) {
                return false;
            }
            dy += m;
            if dy < scale2 {
                px += x_sign;
            } else if dy > scale2 {
                py += y_sign;
                if blocked(py, px) {
                    return false;
                }
                px += x_sign;
                dy -= scale;
            } else {
                px += x_sign;
                py += y_sign;
                dy -= scale;
            }
        }
        true
    } else {
        let mut dx = delta_x * delta_x;
        let m = dx << 1;
        let mut py = from_y + y_sign;
        let mut px = from_x;
        if dx == scale2 {
            px += x_sign;
            dx -= scale;
        }
        while to_y != py {
            if blocked(py, px) {
                return false;
            }
            dx += m;
            if dx < scale2 {
                py += y_sign;
            } else if dx > scale2 {
                px += x_sign;
                if blocked(py, px) {
                    return false;
                }
                py += y_sign;
                dx -= scale;
            } else {
                px += x_sign;
                py += y_sign;
                dx -= scale;
            }
        }
        true
    }
}

/// Why a ray stopped producing cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayEnd {
    /// Stopped in front of a closed cell
    Blocked(Pos),
    /// Ran its full range
    Exhausted,
    /// Next step would leave the map
    Edge,
}

/// A ray cast from an origin in one direction
///
/// This is a description, not a cursor: every call to [`TracePath::iter`]
/// starts again from the origin.
#[derive(Debug, Clone, Copy)]
pub struct TracePath<'a> {
    level: &'a Level,
    origin: Pos,
    direction: Direction,
    range: u32,
}

impl<'a> TracePath<'a> {
    pub fn origin(&self) -> Pos {
        self.origin
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Fresh iterator over the open cells of the ray, origin excluded
    pub fn iter(&self) -> TraceIter<'a> {
        TraceIter {
            level: self.level,
            current: self.origin,
            direction: self.direction,
            remaining: if self.direction == Direction::Here {
                0
            } else {
                self.range
            },
            end: None,
        }
    }

    /// How the ray terminates
    pub fn end(&self) -> RayEnd {
        let mut iter = self.iter();
        for _ in iter.by_ref() {}
        iter.end.unwrap_or(RayEnd::Exhausted)
    }

    /// The last open cell of the ray, or the origin if the first step is blocked
    pub fn last_open(&self) -> Pos {
        self.iter().last().unwrap_or(self.origin)
    }
}

impl<'a> IntoIterator for &TracePath<'a> {
    type Item = Pos;
    type IntoIter = TraceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator produced by [`TracePath::iter`]
#[derive(Debug, Clone)]
pub struct TraceIter<'a> {
    level: &'a Level,
    current: Pos,
    direction: Direction,
    remaining: u32,
    end: Option<RayEnd>,
}

impl TraceIter<'_> {
    /// Termination reason, once the iterator is exhausted
    pub fn end(&self) -> Option<RayEnd> {
        self.end
    }
}

impl Iterator for TraceIter<'_> {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.end.is_some() {
            return None;
        }
        if self.remaining == 0 {
            self.end = Some(RayEnd::Exhausted);
            return None;
        }
        let next = self.current.step(self.direction);
        if !self.level.is_valid(next) {
            self.end = Some(RayEnd::Edge);
            return None;
        }
        if self.level.blocks_at(next) {
            self.end = Some(RayEnd::Blocked(next));
            return None;
        }
        self.remaining -= 1;
        self.current = next;
        Some(next)
    }
}

/// Cast a ray of at most `range` steps from `origin`
pub fn trace_line(level: &Level, origin: Pos, direction: Direction, range: u32) -> TracePath<'_> {
    TracePath {
        level,
        origin,
        direction,
        range,
    }
}

/// Cells from `from` toward `to`, stepping with a 22.5 degree slope rule
///
/// A step moves on one axis only while that axis' remaining delta exceeds the
/// other's by more than 2.41 times. The path ends on `to`, in front of the
/// first closed cell, at the map edge, or after `range` steps. `from` itself
/// is not included.
pub fn project_path(level: &Level, from: Pos, to: Pos, range: u32) -> Vec<Pos> {
    let mut path = Vec::new();
    let mut remaining_y = (to.row as i32 - from.row as i32).abs();
    let mut remaining_x = (to.col as i32 - from.col as i32).abs();
    let y_step = (to.row - from.row).signum();
    let x_step = (to.col - from.col).signum();
    let mut current = from;

    while remaining_y + remaining_x > 0 && (path.len() as u32) < range {
        let mut dy = y_step;
        let mut dx = x_step;
        if remaining_y * 100 > remaining_x * 241 {
            dx = 0;
        }
        if remaining_x * 100 > remaining_y * 241 {
            dy = 0;
        }
        if dy != 0 {
            remaining_y -= 1;
        }
        if dx != 0 {
            remaining_x -= 1;
        }
        let next = current.offset(dy, dx);
        if !level.is_valid(next) || level.blocks_at(next) {
            break;
        }
        path.push(next);
        current = next;
    }
    path
}

/// One cell of an area footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaCell {
    pub pos: Pos,
    /// Distance from the centre; falloff divisor is `distance + 1`
    pub distance: u32,
    pub open: bool,
    /// Whether the viewer can see the cell, gating the burst animation
    pub visible: bool,
}

/// Every cell within `radius` of `center` that the centre can see
///
/// Row-major order; the centre is always present with distance 0.
pub fn enumerate_area(level: &Level, center: Pos, radius: u32, viewer: Pos) -> Vec<AreaCell> {
    let r = radius.min(i16::MAX as u32) as i16;
    let mut cells = Vec::new();
    for row in center.row.saturating_sub(r)..=center.row.saturating_add(r) {
        for col in center.col.saturating_sub(r)..=center.col.saturating_add(r) {
            let pos = Pos::new(row, col);
            if !level.is_valid(pos) {
                continue;
            }
            let dist = distance(center, pos);
            if dist > radius || !line_of_sight(level, center, pos) {
                continue;
            }
            cells.push(AreaCell {
                pos,
                distance: dist,
                open: !level.blocks_at(pos),
                visible: line_of_sight(level, viewer, pos),
            });
        }
    }
    cells
}

/// Glyph of a bolt travelling in `dir`
pub const fn bolt_glyph(dir: Direction) -> char {
    match dir {
        Direction::SouthWest | Direction::NorthEast => '/',
        Direction::South | Direction::North => '|',
        Direction::SouthEast | Direction::NorthWest => '\\',
        Direction::West | Direction::East | Direction::Here => '-',
    }
}

/// Glyph of a bolt taking the step from `from` to `to`
pub fn step_glyph(from: Pos, to: Pos) -> char {
    let dy = to.row - from.row;
    let dx = to.col - from.col;
    if dy == 0 {
        '-'
    } else if dx == 0 {
        '|'
    } else if dy == dx {
        '\\'
    } else {
        '/'
    }
}
