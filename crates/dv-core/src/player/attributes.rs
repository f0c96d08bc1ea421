//! Player attributes (STR, INT, WIS, DEX, CON, CHR)

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::MIN_STAT;

/// Attribute type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Attribute {
    Strength = 0,
    Intelligence = 1,
    Wisdom = 2,
    Dexterity = 3,
    Constitution = 4,
    Charisma = 5,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Intelligence,
        Attribute::Wisdom,
        Attribute::Dexterity,
        Attribute::Constitution,
        Attribute::Charisma,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Attribute::Strength => "strength",
            Attribute::Intelligence => "intelligence",
            Attribute::Wisdom => "wisdom",
            Attribute::Dexterity => "dexterity",
            Attribute::Constitution => "constitution",
            Attribute::Charisma => "charisma",
        }
    }

    /// Create from index (0-5)
    pub const fn from_index(idx: usize) -> Option<Self> {
        if idx < Self::ALL.len() {
            Some(Self::ALL[idx])
        } else {
            None
        }
    }
}

/// Current and maximum attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    current: [u8; 6],
    maximum: [u8; 6],
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(14)
    }
}

impl Attributes {
    pub fn uniform(value: u8) -> Self {
        Self {
            current: [value; 6],
            maximum: [value; 6],
        }
    }

    pub fn get(&self, attr: Attribute) -> u8 {
        self.current[attr as usize]
    }

    pub fn max(&self, attr: Attribute) -> u8 {
        self.maximum[attr as usize]
    }

    pub fn set(&mut self, attr: Attribute, value: u8) {
        self.current[attr as usize] = value;
        self.maximum[attr as usize] = self.maximum[attr as usize].max(value);
    }

    /// Lower the current value by one point, never below the floor
    ///
    /// Returns false when nothing was lost.
    pub fn drain(&mut self, attr: Attribute) -> bool {
        let value = &mut self.current[attr as usize];
        if *value <= MIN_STAT {
            return false;
        }
        *value -= 1;
        true
    }

    /// Exchange two attributes, current and maximum alike
    pub fn swap(&mut self, a: Attribute, b: Attribute) {
        self.current.swap(a as usize, b as usize);
        self.maximum.swap(a as usize, b as usize);
    }
}
