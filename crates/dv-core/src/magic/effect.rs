//! Effect executor: one damage type landing on one monster
//!
//! Scales raw damage by distance, looks the type up in the resistance
//! table, applies the result and hands the monster to the lifecycle code.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use super::messages::{death_message, monster_name, pain_message, sentence};
use crate::combat::{resolve, DamageType, Outcome, SideEffect};
use crate::consts::MAX_RAW_DAMAGE;
use crate::dungeon::Pos;
use crate::monster::lifecycle::{self, Fate, KillSource};
use crate::monster::{MonsterId, TemplateId};
use crate::world::{EffectContext, EngineError};

/// What one hit did to one monster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterHit {
    /// The monster struck; no longer on the level if it died or changed
    pub id: MonsterId,
    pub template: TemplateId,
    pub pos: Pos,
    /// Hit points actually taken
    pub damage: i32,
    pub outcome: Outcome,
    /// Experience the kill paid the player
    pub exp: u32,
    /// The monster it turned into, on a chaos hit
    pub polymorphed_into: Option<MonsterId>,
    /// Where a gravity hit threw it
    pub displaced_to: Option<Pos>,
    /// Whether the player could see it when struck
    pub visible: bool,
    /// Name as it read before the hit, capitalized as a subject
    pub name: String,
    /// The same name in object position ("the cave orc", "it")
    pub object_name: String,
    pub message: String,
}

impl MonsterHit {
    pub fn killed(&self) -> bool {
        self.outcome == Outcome::Dead
    }
}

/// Apply `raw` damage of type `typ` to monster `id`, `falloff - 1` cells
/// from the centre of the attack
///
/// Raw damage is clamped to `1..=MAX_RAW_DAMAGE` once a hit lands, then divided by
/// `falloff` and scaled by the resistance table. The monster wakes up.
pub fn apply_to_monster(
    ctx: &mut EffectContext<'_>,
    id: MonsterId,
    typ: DamageType,
    raw: i32,
    falloff: u32,
    source: KillSource,
) -> Result<MonsterHit, EngineError> {
    let monster = ctx
        .level
        .monster(id)
        .ok_or(EngineError::StaleMonster { id })?;
    let (template, pos, visible, hp) = (monster.template, monster.pos, monster.visible, monster.hp);
    let race = ctx.monsters.get(template)?;
    let name = monster_name(monster, race, true);
    let object_name = monster_name(monster, race, false);

    let falloff = falloff.clamp(1, MAX_RAW_DAMAGE as u32);
    let r = falloff - 1;
    let base = raw.clamp(1, MAX_RAW_DAMAGE) / falloff as i32;

    let resolution = resolve(typ, race);
    if visible {
        ctx.memory
            .record_observed_capability(template, resolution.learned);
        if !resolution.learned_breaths.is_empty() {
            ctx.memory.record_breath(template, resolution.learned_breaths);
        }
    }
    let damage = resolution.multiplier.apply(base, ctx.rng);

    let mut hit = MonsterHit {
        id,
        template,
        pos,
        damage,
        outcome: resolution.outcome,
        exp: 0,
        polymorphed_into: None,
        displaced_to: None,
        visible,
        name,
        object_name,
        message: String::new(),
    };

    let mut side_effect = resolution.side_effect;
    if side_effect == SideEffect::Polymorph {
        side_effect = SideEffect::CHAOS_CONFUSION;
        if hp > damage && !race.is_unique() {
            if let Some(new_id) = lifecycle::polymorph(ctx, id)? {
                hit.damage = 0;
                hit.outcome = Outcome::Changed;
                hit.polymorphed_into = Some(new_id);
                hit.message = sentence(&hit.name, "changes!");
                return Ok(hit);
            }
        }
    }

    if let Some(monster) = ctx.level.monster_mut(id) {
        monster.wake();
    }

    match lifecycle::take_hit(ctx, id, damage, source)? {
        Fate::Killed(death) => {
            hit.outcome = Outcome::Dead;
            hit.exp = death.exp;
            hit.message = sentence(&hit.name, death_message(race.is_nonliving()));
            return Ok(hit);
        }
        Fate::Alive | Fate::Spared => {}
    }

    if let Some(outcome) = apply_side_effect(ctx, id, side_effect, r, race.resists_confusion())? {
        if let Outcome::Displaced = outcome {
            hit.displaced_to = ctx.level.monster(id).map(|m| m.pos);
        }
        hit.outcome = outcome;
    } else if hit.outcome == Outcome::Hurt && damage == 0 {
        hit.outcome = Outcome::Unharmed;
    }

    let predicate = match hit.outcome.note() {
        Some(note) => note,
        None => {
            let hp_after = ctx.level.monster(id).map_or(0, |m| m.hp);
            pain_message(race.symbol, hp_after, damage)
        }
    };
    hit.message = sentence(&hit.name, predicate);
    Ok(hit)
}

/// Inflict a status change on a survivor, returning its message class
fn apply_side_effect(
    ctx: &mut EffectContext<'_>,
    id: MonsterId,
    side_effect: SideEffect,
    r: u32,
    resists_confusion: bool,
) -> Result<Option<Outcome>, EngineError> {
    let outcome = match side_effect {
        SideEffect::None | SideEffect::Polymorph => None,
        SideEffect::Confuse { .. } if resists_confusion => None,
        SideEffect::Confuse { base, roll } => {
            let ticks = SideEffect::ticks(base, roll, r, ctx.rng);
            let monster = ctx
                .level
                .monster_mut(id)
                .ok_or(EngineError::StaleMonster { id })?;
            let already = monster.confused > 0;
            monster.confused = monster.confused.saturating_add(ticks);
            Some(if already {
                Outcome::MoreConfused
            } else {
                Outcome::Confused
            })
        }
        SideEffect::Stun { base, roll } => {
            let ticks = SideEffect::ticks(base, roll, r, ctx.rng);
            let monster = ctx
                .level
                .monster_mut(id)
                .ok_or(EngineError::StaleMonster { id })?;
            let already = monster.stunned > 0;
            monster.stunned = monster.stunned.saturating_add(ticks);
            Some(if already {
                Outcome::MoreDazed
            } else {
                Outcome::Dazed
            })
        }
        SideEffect::Slow { base, roll } => {
            let ticks = SideEffect::ticks(base, roll, r, ctx.rng);
            let monster = ctx
                .level
                .monster_mut(id)
                .ok_or(EngineError::StaleMonster { id })?;
            monster.slowed = monster.slowed.saturating_add(ticks);
            Some(Outcome::Slowed)
        }
        SideEffect::Displace => {
            let cells = ctx.options.gravity_displacement;
            lifecycle::displace(ctx, id, cells)?.map(|_| Outcome::Displaced)
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ids;
    use crate::dungeon::Level;
    use crate::player::Player;
    use crate::world::{EngineOptions, NullPresenter, Scene};

    fn scene() -> Scene {
        let options = EngineOptions {
            seed: Some(5),
            ..EngineOptions::default()
        };
        Scene::new(Level::with_room(15, 25), Player::new(Pos::new(7, 2)), options)
    }

    #[test]
    fn test_plain_hit_with_falloff() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(5, 5), 50).unwrap();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit =
            apply_to_monster(&mut ctx, id, DamageType::MagicMissile, 30, 3, KillSource::Player)
                .unwrap();
        assert_eq!(hit.damage, 10);
        assert_eq!(hit.outcome, Outcome::Hurt);
        assert_eq!(hit.message, "The cave orc grunts with pain.");
        assert_eq!(ctx.level.monster(id).map(|m| m.hp), Some(40));
    }

    #[test]
    fn test_zero_raw_still_hurts() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(5, 5), 50).unwrap();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, id, DamageType::Fire, 0, 1, KillSource::Player)
            .unwrap();
        assert_eq!(hit.damage, 1);
    }

    #[test]
    fn test_huge_raw_is_clamped() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(5, 5), 1_000_000).unwrap();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, id, DamageType::Fire, i32::MAX, 1, KillSource::Player)
            .unwrap();
        assert_eq!(hit.damage, MAX_RAW_DAMAGE);
        let far = apply_to_monster(
            &mut ctx,
            id,
            DamageType::Fire,
            i32::MAX,
            u32::MAX,
            KillSource::Player,
        )
        .unwrap();
        assert_eq!(far.damage, 1);
        assert_eq!(
            ctx.level.monster(id).map(|m| m.hp),
            Some(1_000_000 - MAX_RAW_DAMAGE - 1)
        );
    }

    #[test]
    fn test_immune_records_memory() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::WHITE_WOLF, Pos::new(5, 5), 10).unwrap();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, id, DamageType::Frost, 24, 1, KillSource::Player)
            .unwrap();
        assert_eq!(hit.damage, 2);
        assert_eq!(hit.outcome, Outcome::Immune);
        assert_eq!(hit.message, "The white wolf is immune.");
        assert!(ctx
            .memory
            .knows(ids::WHITE_WOLF, crate::monster::Capabilities::IM_FROST));
    }

    #[test]
    fn test_unseen_monster_teaches_nothing() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::WHITE_WOLF, Pos::new(5, 5), 10).unwrap();
        s.level.monster_mut(id).unwrap().visible = false;
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, id, DamageType::Frost, 24, 1, KillSource::Player)
            .unwrap();
        assert!(hit.message.starts_with("It "));
        assert!(ctx.memory.recall(ids::WHITE_WOLF).is_none());
    }

    #[test]
    fn test_kill_message() {
        let mut s = scene();
        let orc = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(5, 5), 5).unwrap();
        let skel = s.spawn_with_hp(ids::SKELETON_ORC, Pos::new(5, 7), 5).unwrap();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, orc, DamageType::Fire, 20, 1, KillSource::Player)
            .unwrap();
        assert!(hit.killed());
        assert_eq!(hit.message, "The cave orc dies in a fit of agony.");
        let hit = apply_to_monster(&mut ctx, skel, DamageType::Fire, 20, 1, KillSource::Player)
            .unwrap();
        assert_eq!(hit.message, "The skeleton orc is destroyed.");
    }

    #[test]
    fn test_chaos_polymorphs_survivor() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(5, 5), 30).unwrap();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, id, DamageType::Chaos, 40, 2, KillSource::Player)
            .unwrap();
        assert_eq!(hit.outcome, Outcome::Changed);
        assert_eq!(hit.message, "The cave orc changes!");
        assert!(ctx.level.monster(id).is_none());
        let new_id = hit.polymorphed_into.unwrap();
        assert_eq!(ctx.level.monster_id_at(Pos::new(5, 5)), Some(new_id));
    }

    #[test]
    fn test_chaos_kill_does_not_polymorph() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(5, 5), 30).unwrap();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, id, DamageType::Chaos, 40, 1, KillSource::Player)
            .unwrap();
        assert!(hit.killed());
        assert!(hit.polymorphed_into.is_none());
    }

    #[test]
    fn test_chaos_confuses_uniques() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::BULLROARER, Pos::new(5, 5), 100).unwrap();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, id, DamageType::Chaos, 10, 1, KillSource::Player)
            .unwrap();
        assert_eq!(hit.outcome, Outcome::Confused);
        assert!(ctx.level.monster(id).unwrap().confused > 0);
        let again = apply_to_monster(&mut ctx, id, DamageType::Chaos, 10, 1, KillSource::Player)
            .unwrap();
        assert_eq!(again.outcome, Outcome::MoreConfused);
    }

    #[test]
    fn test_sound_stuns_and_wakes() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(5, 5), 100).unwrap();
        s.level.monster_mut(id).unwrap().sleep = 40;
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, id, DamageType::Sound, 10, 1, KillSource::Player)
            .unwrap();
        assert_eq!(hit.outcome, Outcome::Dazed);
        let m = ctx.level.monster(id).unwrap();
        assert!(!m.is_asleep());
        assert!((10..=25).contains(&m.stunned));
    }

    #[test]
    fn test_inertia_slows() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(5, 5), 100).unwrap();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, id, DamageType::Inertia, 10, 1, KillSource::Player)
            .unwrap();
        assert_eq!(hit.outcome, Outcome::Slowed);
        assert_eq!(hit.message, "The cave orc starts moving slower.");
    }

    #[test]
    fn test_gravity_displaces_survivor() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(7, 12), 500).unwrap();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let hit = apply_to_monster(&mut ctx, id, DamageType::Gravity, 10, 1, KillSource::Player)
            .unwrap();
        // the room is wide open around (7, 12), so the first step always succeeds
        assert_eq!(hit.outcome, Outcome::Displaced);
        let landing = hit.displaced_to.unwrap();
        assert_ne!(landing, Pos::new(7, 12));
        assert_eq!(ctx.level.monster_id_at(landing), Some(id));
    }

    #[test]
    fn test_stale_monster() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(5, 5), 10).unwrap();
        s.level.remove_monster(id);
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        assert_eq!(
            apply_to_monster(&mut ctx, id, DamageType::Fire, 10, 1, KillSource::Player),
            Err(EngineError::StaleMonster { id })
        );
    }
}
