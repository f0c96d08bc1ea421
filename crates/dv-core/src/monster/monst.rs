//! Monster instances (monster_type in types.h)

use serde::{Deserialize, Serialize};

use super::{MonsterId, PerMonst, TemplateId};
use crate::dungeon::Pos;
use crate::rng::GameRng;

/// A live monster on the level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    /// Assigned by the roster on insertion
    pub id: MonsterId,
    pub template: TemplateId,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    /// Sleep counter, 0 when awake
    pub sleep: u16,
    pub confused: u16,
    pub stunned: u16,
    pub slowed: u16,
    /// Whether the player can currently see it
    pub visible: bool,
    /// Speed modifier, 0 is normal
    pub speed: i8,
}

impl Monster {
    /// Roll up a fresh monster from its template
    pub fn spawn(race: &PerMonst, pos: Pos, rng: &mut GameRng) -> Self {
        let hp = if race.is_unique() || race.has(super::Capabilities::MAX_HP) {
            race.hit_dice.max()
        } else {
            rng.dice(race.hit_dice.num as u32, race.hit_dice.sides as u32) as i32
        };
        Self {
            sleep: race.sleep as u16,
            speed: race.speed,
            ..Self::with_hp(race.id, pos, hp.max(1))
        }
    }

    /// Awake monster with a fixed hit point total
    pub fn with_hp(template: TemplateId, pos: Pos, hp: i32) -> Self {
        Self {
            id: MonsterId::new(0, 0),
            template,
            pos,
            hp,
            max_hp: hp,
            sleep: 0,
            confused: 0,
            stunned: 0,
            slowed: 0,
            visible: true,
            speed: 0,
        }
    }

    pub fn is_asleep(&self) -> bool {
        self.sleep > 0
    }

    pub fn wake(&mut self) {
        self.sleep = 0;
    }

    /// Hit points left as a percentage of maximum
    pub fn hp_percent(&self) -> i32 {
        if self.max_hp <= 0 {
            return 0;
        }
        (100 * self.hp.max(0) as i64 / self.max_hp as i64) as i32
    }
}
