//! Monster attacks aimed at the player (breath, monster bolts)

#[cfg(not(feature = "std"))]
use crate::compat::*;

use super::effect::apply_to_monster;
use super::messages::{monster_name, sentence};
use super::player_effect::apply_to_player;
use super::zap::{detonate, AttackKind, AttackReport, AttackState, Burst};
use crate::combat::DamageType;
use crate::dungeon::{project_path, step_glyph, Pos};
use crate::monster::{KillSource, MonsterId, PerMonst};
use crate::world::{EffectContext, EngineError};

/// Divisor and ceiling of breath damage by element
const fn breath_profile(typ: DamageType) -> Option<(i32, i32)> {
    match typ {
        DamageType::Fire | DamageType::Frost | DamageType::Acid | DamageType::Lightning => {
            Some((3, 1600))
        }
        DamageType::PoisonGas => Some((3, 800)),
        DamageType::Chaos => Some((6, 600)),
        DamageType::Disenchant => Some((6, 500)),
        DamageType::Shards
        | DamageType::Sound
        | DamageType::Confusion
        | DamageType::Nether
        | DamageType::Light
        | DamageType::Dark
        | DamageType::Water => Some((6, 400)),
        DamageType::Nexus => Some((3, 250)),
        DamageType::Force | DamageType::Inertia => Some((6, 200)),
        DamageType::Gravity => Some((3, 200)),
        DamageType::Time => Some((3, 150)),
        DamageType::Plasma => Some((6, 150)),
        DamageType::Arrow
        | DamageType::MagicMissile
        | DamageType::HolyOrb
        | DamageType::Mana
        | DamageType::Meteor
        | DamageType::Ice => None,
    }
}

/// Damage a breather with `hp` hit points deals
///
/// None for types no monster breathes.
pub fn breath_damage(typ: DamageType, hp: i32) -> Option<i32> {
    breath_profile(typ).map(|(divisor, cap)| (hp.max(0) / divisor).min(cap))
}

/// Radius of a breath: 2, one more for great dragons, one more again for
/// unique dragons
pub const fn breath_radius(race: &PerMonst) -> u32 {
    let mut radius = 2;
    if race.is_dragon() && race.is_powerful() {
        radius += 1;
    }
    if race.is_dragon() && race.is_unique() {
        radius += 1;
    }
    radius
}

/// Who is attacking, looked up once
struct Attacker {
    pos: Pos,
    name: String,
    killer: String,
    radius: u32,
}

fn attacker(ctx: &EffectContext<'_>, id: MonsterId) -> Result<Attacker, EngineError> {
    let monster = ctx.level.monster(id).ok_or(EngineError::StaleMonster { id })?;
    let race = ctx.monsters.get(monster.template)?;
    Ok(Attacker {
        pos: monster.pos,
        name: monster_name(monster, race, true),
        killer: race.name.clone(),
        radius: breath_radius(race),
    })
}

/// Draw a projectile along `path`, stopping short of `until`
fn animate(ctx: &mut EffectContext<'_>, from: Pos, path: &[Pos], typ: DamageType, until: Pos) {
    let color = typ.bolt_color();
    let mut prev = from;
    for &pos in path {
        if pos == until {
            break;
        }
        ctx.draw(pos, step_glyph(prev, pos), color);
        ctx.pause(ctx.options.bolt_delay_ms);
        ctx.restore(pos);
        prev = pos;
    }
}

/// Monster `breather` breathes `typ` at `target`
///
/// The breath flies toward the target and bursts where its path ends with a
/// radius set by the breather. The breather is never caught in its own
/// breath. The player, if inside the burst, takes the damage divided by the
/// distance plus one, capped by the configured ceiling.
pub fn breathe(
    ctx: &mut EffectContext<'_>,
    breather: MonsterId,
    typ: DamageType,
    target: Pos,
    dam: i32,
) -> AttackReport {
    let info = match attacker(ctx, breather) {
        Ok(info) => info,
        Err(err) => {
            let mut report = AttackReport::new(AttackKind::Breath, typ, target);
            report.fault(err);
            report.state = AttackState::Done;
            return report;
        }
    };
    tracing::debug!(kind = %AttackKind::Breath, damage_type = %typ, origin = %info.pos, "attack launched");
    let mut report = AttackReport::new(AttackKind::Breath, typ, info.pos);

    report.say(ctx, sentence(&info.name, &format!("breathes {}.", typ.name())));
    if let (Some(breath), Some(monster)) = (typ.breath(), ctx.level.monster(breather)) {
        if monster.visible {
            let template = monster.template;
            ctx.memory.record_breath(template, breath);
        }
    }

    let path = project_path(ctx.level, info.pos, target, ctx.options.bolt_range);
    let center = path.last().copied().unwrap_or(info.pos);
    animate(ctx, info.pos, &path, typ, center);
    report.path = path;

    let burst = Burst {
        center,
        radius: info.radius,
        typ,
        dam,
        desc: typ.name(),
        source: KillSource::Monster(breather),
        caster: Some(breather),
        player_cap: Some(ctx.options.breath_cap),
        killer: &info.killer,
    };
    detonate(ctx, &mut report, &burst);
    report.state = AttackState::Done;
    report
}

/// Monster `caster` fires a bolt at the player
///
/// Another monster standing in the way takes the bolt instead.
pub fn monster_bolt(
    ctx: &mut EffectContext<'_>,
    caster: MonsterId,
    typ: DamageType,
    dam: i32,
    desc: &str,
) -> AttackReport {
    let info = match attacker(ctx, caster) {
        Ok(info) => info,
        Err(err) => {
            let mut report = AttackReport::new(AttackKind::MonsterBolt, typ, ctx.player.pos);
            report.fault(err);
            report.state = AttackState::Done;
            return report;
        }
    };
    tracing::debug!(kind = %AttackKind::MonsterBolt, damage_type = %typ, origin = %info.pos, "attack launched");
    let mut report = AttackReport::new(AttackKind::MonsterBolt, typ, info.pos);
    report.say(ctx, sentence(&info.name, &format!("casts a {desc}.")));

    let player_pos = ctx.player.pos;
    let color = typ.bolt_color();
    let mut prev = info.pos;
    for pos in project_path(ctx.level, info.pos, player_pos, ctx.options.bolt_range) {
        report.path.push(pos);
        if pos == player_pos {
            report.state = AttackState::Detonated;
            let outcome = apply_to_player(ctx, typ, dam, &info.killer);
            report.player = Some(outcome);
            break;
        }
        if let Some(id) = ctx.level.monster_id_at(pos).filter(|&id| id != caster) {
            report.state = AttackState::Detonated;
            match apply_to_monster(ctx, id, typ, dam, 1, KillSource::Monster(caster)) {
                Ok(hit) => {
                    report.say(ctx, format!("The {desc} strikes {}.", hit.object_name));
                    report.say(ctx, hit.message.clone());
                    report.hits.push(hit);
                }
                Err(err) => report.fault(err),
            }
            break;
        }
        ctx.draw(pos, step_glyph(prev, pos), color);
        ctx.pause(ctx.options.bolt_delay_ms);
        ctx.restore(pos);
        prev = pos;
    }
    report.state = AttackState::Done;
    report
}
