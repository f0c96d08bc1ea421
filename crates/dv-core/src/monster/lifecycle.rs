//! Monster lifecycle management (mon_take_hit, monster_death)
//!
//! The only place monsters leave the level through damage: hit point loss,
//! death, loot, experience, and the two in-place transformations an attack
//! can cause (polymorph and displacement).

#[cfg(not(feature = "std"))]
use crate::compat::*;

use super::{CreatureMemory, DropRecord, Monster, MonsterId, PerMonst, Recall, Treasure};
use crate::consts::EXP_FRACTION_UNIT;
use crate::dungeon::{enumerate_area, Pos};
use crate::object::ObjectId;
use crate::player::Player;
use crate::rng::GameRng;
use crate::world::{EffectContext, EngineError};

// ============================================================================
// Hit outcomes
// ============================================================================

/// Who dealt a blow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillSource {
    /// The player's spell, wand or missile
    Player,
    /// Another monster's breath or bolt
    Monster(MonsterId),
}

impl KillSource {
    pub const fn is_player(&self) -> bool {
        matches!(self, KillSource::Player)
    }
}

/// Everything a death left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Death {
    /// The removed monster, as it was at the killing blow
    pub monster: Monster,
    /// Experience awarded to the player (0 for non-player kills)
    pub exp: u32,
    /// Items placed on and around the vacated cell
    pub drops: Vec<ObjectId>,
    pub drop: DropRecord,
}

/// What happened to a monster after a hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fate {
    Alive,
    /// A unique took a killing blow from something other than the player
    Spared,
    Killed(Death),
}

impl Fate {
    pub const fn is_dead(&self) -> bool {
        matches!(self, Fate::Killed(_))
    }
}

/// Subtract `damage` and settle the consequences
///
/// A monster at 0 hit points or below dies, except a unique hit by anything
/// but the player, which is left at 0 and stays on the level.
pub fn take_hit(
    ctx: &mut EffectContext<'_>,
    id: MonsterId,
    damage: i32,
    source: KillSource,
) -> Result<Fate, EngineError> {
    let monster = ctx
        .level
        .monster_mut(id)
        .ok_or(EngineError::StaleMonster { id })?;
    monster.hp -= damage.max(0);
    if monster.hp > 0 {
        return Ok(Fate::Alive);
    }
    let template = monster.template;
    let race = ctx.monsters.get(template)?;
    if race.is_unique() && !source.is_player() {
        if let Some(monster) = ctx.level.monster_mut(id) {
            monster.hp = monster.hp.max(0);
        }
        tracing::debug!(monster = %id, template = %template, "unique survives at 0 hp");
        return Ok(Fate::Spared);
    }
    kill(ctx, id, source).map(Fate::Killed)
}

/// Remove a monster, drop its loot and pay out experience
pub fn kill(
    ctx: &mut EffectContext<'_>,
    id: MonsterId,
    source: KillSource,
) -> Result<Death, EngineError> {
    let template = ctx
        .level
        .monster(id)
        .ok_or(EngineError::StaleMonster { id })?
        .template;
    let race = ctx.monsters.get(template)?;
    let monster = ctx
        .level
        .remove_monster(id)
        .ok_or(EngineError::StaleMonster { id })?;

    let (drops, drop) = drop_loot(ctx, race, monster.pos);
    if monster.visible {
        ctx.memory.record_drop(template, drop);
    }
    ctx.memory.record_kill(template);

    let exp = if source.is_player() {
        award_experience(ctx.player, race)
    } else {
        0
    };
    tracing::debug!(monster = %id, template = %template, ?source, exp, "monster died");

    Ok(Death {
        monster,
        exp,
        drops,
        drop,
    })
}

// ============================================================================
// Loot
// ============================================================================

/// How many items a death produces
pub fn drop_count(treasure: Treasure, rng: &mut GameRng) -> u32 {
    let mut count = 0;
    if treasure.contains(Treasure::DROP_60) && rng.rnd(100) < 60 {
        count += 1;
    }
    if treasure.contains(Treasure::DROP_90) && rng.rnd(100) < 90 {
        count += 1;
    }
    if treasure.contains(Treasure::DROP_1D2) {
        count += rng.rnd(2);
    }
    if treasure.contains(Treasure::DROP_2D2) {
        count += rng.dice(2, 2);
    }
    if treasure.contains(Treasure::DROP_4D2) {
        count += rng.dice(4, 2);
    }
    count
}

/// Treasure a death of `race` rolls from: the template's flags merged with
/// the carry kinds creature memory has seen it drop
pub fn drop_treasure(race: &PerMonst, memory: &CreatureMemory) -> Treasure {
    race.treasure | memory.recall(race.id).map_or(Treasure::empty(), Recall::carried)
}

/// Roll a monster's drops and place them on and around `at`
///
/// The count comes from the template's drop flags; memory can widen what is
/// carried, and afterwards keeps the larger of the remembered and rolled
/// counts. The vacated cell fills first, then the nearest open cells within
/// two squares that `at` can see and that hold no object yet.
pub fn drop_loot(
    ctx: &mut EffectContext<'_>,
    race: &PerMonst,
    at: Pos,
) -> (Vec<ObjectId>, DropRecord) {
    let mut record = DropRecord::default();
    let mut placed = Vec::new();
    let treasure = drop_treasure(race, ctx.memory);
    let count = drop_count(treasure, ctx.rng);
    if count == 0 {
        return (placed, record);
    }

    let mut spots: Vec<_> = enumerate_area(ctx.level, at, 2, at)
        .into_iter()
        .filter(|c| c.open)
        .collect();
    spots.sort_by_key(|c| c.distance);
    let mut spots = spots.into_iter().map(|c| c.pos);

    let objects = treasure.contains(Treasure::CARRY_OBJECT);
    let gold = treasure.contains(Treasure::CARRY_GOLD);
    for _ in 0..count {
        let item = if objects && (!gold || ctx.rng.rnd(100) < 50) {
            ctx.items.roll_object(race.level, ctx.rng)
        } else {
            Some(ctx.items.roll_gold(race.level, ctx.rng))
        };
        let Some(item) = item else {
            continue;
        };
        let is_gold = item.is_gold();
        let Some(pos) = spots.find(|p| ctx.level.object_at(*p).is_none()) else {
            tracing::debug!(template = %race.id, at = %at, "no room for dropped item");
            break;
        };
        if let Ok(oid) = ctx.level.add_object(item, pos) {
            placed.push(oid);
            record.count += 1;
            record.gold |= is_gold;
            record.objects |= !is_gold;
        }
    }
    (placed, record)
}

// ============================================================================
// Experience
// ============================================================================

/// Experience for killing `race`: `exp_value * level / player level`, with
/// the remainder carried as a 16-bit fraction
pub fn experience_for(race: &PerMonst, player_level: u8) -> (u32, u32) {
    let plev = player_level.max(1) as u64;
    let total = race.exp_value as u64 * race.level.max(1) as u64;
    let whole = (total / plev).min(u32::MAX as u64) as u32;
    let frac = ((total % plev) * EXP_FRACTION_UNIT as u64 / plev) as u32;
    (whole, frac)
}

/// Credit the player for a kill, returning the whole points gained
pub fn award_experience(player: &mut Player, race: &PerMonst) -> u32 {
    let (whole, frac) = experience_for(race, player.level);
    let before = player.exp;
    player.gain_exp(whole, frac);
    player.exp - before
}

// ============================================================================
// Transformations
// ============================================================================

/// Turn a monster into a random kind of similar level
///
/// The original leaves without loot or experience; the newcomer takes the
/// same cell and visibility. Returns `None` when nothing fits the band.
pub fn polymorph(
    ctx: &mut EffectContext<'_>,
    id: MonsterId,
) -> Result<Option<MonsterId>, EngineError> {
    let old = ctx
        .level
        .monster(id)
        .ok_or(EngineError::StaleMonster { id })?;
    let (pos, visible, template) = (old.pos, old.visible, old.template);
    let race = ctx.monsters.get(template)?;
    if race.is_unique() {
        return Ok(None);
    }
    let Some(target) = ctx
        .monsters
        .polymorph_target(race, ctx.options.polymorph_band, ctx.rng)
    else {
        return Ok(None);
    };
    let new_race = ctx.monsters.get(target)?;

    ctx.level.remove_monster(id);
    let mut newcomer = Monster::spawn(new_race, pos, ctx.rng);
    newcomer.visible = visible;
    newcomer.wake();
    let new_id = ctx.level.add_monster(newcomer)?;
    tracing::debug!(
        monster = %id,
        from = %template,
        into = %target,
        new_id = %new_id,
        "monster polymorphed"
    );
    Ok(Some(new_id))
}

/// Hurl a monster up to `cells` squares in a random compass direction
///
/// It stops before the first cell that is not vacant or holds the player.
/// Returns the landing cell if it moved at all.
pub fn displace(
    ctx: &mut EffectContext<'_>,
    id: MonsterId,
    cells: u32,
) -> Result<Option<Pos>, EngineError> {
    let start = ctx
        .level
        .monster(id)
        .ok_or(EngineError::StaleMonster { id })?
        .pos;
    let dir = ctx.rng.random_direction();
    let mut landing = start;
    for _ in 0..cells {
        let next = landing.step(dir);
        if next == ctx.player.pos || !ctx.level.is_vacant(next) {
            break;
        }
        landing = next;
    }
    if landing == start || !ctx.level.move_monster(id, landing) {
        return Ok(None);
    }
    Ok(Some(landing))
}
