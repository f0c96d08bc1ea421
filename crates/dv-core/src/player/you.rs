//! The player character as seen by incoming effects (player_type in types.h)

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::{Attributes, Resistances};
use crate::consts::EXP_FRACTION_UNIT;
use crate::dungeon::Pos;
use crate::object::Equipment;
use crate::rng::GameRng;

/// Experience needed to reach level `index + 2`
pub const PLAYER_EXP: [u32; 39] = [
    10, 25, 45, 70, 100, 140, 200, 280, 380, 500, 650, 850, 1100, 1400, 1800, 2300, 2900, 3600,
    4400, 5400, 6800, 8400, 10200, 12500, 17500, 25000, 35000, 50000, 75000, 100000, 150000,
    200000, 300000, 400000, 500000, 750000, 1500000, 2500000, 5000000,
];

/// Highest attainable character level
pub const MAX_PLAYER_LEVEL: u8 = 40;

/// Timed status counters, in game turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub confused: u16,
    pub stunned: u16,
    pub afraid: u16,
    pub blind: u16,
    pub slow: u16,
    pub poisoned: u16,
    pub cut: u16,
    /// Temporary resistances from potions and spells
    pub oppose_fire: u16,
    pub oppose_cold: u16,
    pub oppose_acid: u16,
    pub oppose_elec: u16,
    pub oppose_pois: u16,
}

/// Player state touched by effects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    pub max_mana: i32,
    /// Character level, at least 1
    pub level: u8,
    pub exp: u32,
    pub max_exp: u32,
    /// Fractional experience in 1/65536 units
    pub exp_frac: u32,
    pub attributes: Attributes,
    pub resistances: Resistances,
    pub status: PlayerStatus,
    pub equipment: Equipment,
    /// Saving throw, percent
    pub saving_throw: u32,
    pub dead: bool,
    /// What dealt the killing blow
    pub died_from: Option<String>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Pos::default())
    }
}

impl Player {
    pub fn new(pos: Pos) -> Self {
        Self {
            name: "Adventurer".to_string(),
            pos,
            hp: 20,
            max_hp: 20,
            mana: 0,
            max_mana: 0,
            level: 1,
            exp: 0,
            max_exp: 0,
            exp_frac: 0,
            attributes: Attributes::default(),
            resistances: Resistances::empty(),
            status: PlayerStatus::default(),
            equipment: Equipment::new(),
            saving_throw: 30,
            dead: false,
            died_from: None,
        }
    }

    pub fn has(&self, flag: Resistances) -> bool {
        self.resistances.contains(flag)
    }

    /// Roll a saving throw
    pub fn saves(&self, rng: &mut GameRng) -> bool {
        rng.rnd(100) <= self.saving_throw
    }

    /// Lose hit points; dropping below zero kills
    ///
    /// Returns true if this hit was fatal.
    pub fn take_hit(&mut self, damage: i32, killer: &str) -> bool {
        if self.dead {
            return false;
        }
        self.hp -= damage.max(0);
        if self.hp < 0 {
            self.dead = true;
            self.died_from = Some(killer.to_string());
            tracing::debug!(killer, "player killed");
            return true;
        }
        false
    }

    /// Add experience with its 16-bit fractional part
    pub fn gain_exp(&mut self, amount: u32, fraction: u32) {
        let frac = self.exp_frac + fraction;
        self.exp = self
            .exp
            .saturating_add(amount)
            .saturating_add(frac / EXP_FRACTION_UNIT);
        self.exp_frac = frac % EXP_FRACTION_UNIT;
        self.max_exp = self.max_exp.max(self.exp);
    }

    /// Drain experience; the level follows it down
    pub fn lose_exp(&mut self, amount: u32) {
        self.exp = self.exp.saturating_sub(amount);
        let earned = level_for_exp(self.exp);
        if earned < self.level {
            self.level = earned;
        }
    }
}

/// Level a given experience total qualifies for
pub fn level_for_exp(exp: u32) -> u8 {
    let reached = PLAYER_EXP.iter().take_while(|&&need| exp >= need).count() as u8;
    (1 + reached).min(MAX_PLAYER_LEVEL)
}
