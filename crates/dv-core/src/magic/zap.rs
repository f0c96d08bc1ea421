//! Attack orchestrators (fire_bolt, light_line, fire_ball)
//!
//! Each attack travels over the level, strikes what it meets and reports
//! back in an [`AttackReport`]. Faults inside an attack are logged and kept
//! on the report; they end the effect in progress, never the game.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use strum::Display;

use super::effect::{apply_to_monster, MonsterHit};
use super::player_effect::{apply_to_player, PlayerOutcome};
use crate::combat::DamageType;
use crate::dungeon::{bolt_glyph, enumerate_area, project_path, trace_line, Direction, Pos};
use crate::monster::{KillSource, MonsterId};
use crate::object::Object;
use crate::world::{EffectContext, EngineError};

/// Glyph of a ball in flight and of a burst
const BURST_GLYPH: char = '*';

// ============================================================================
// Reports
// ============================================================================

/// Shape of an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AttackKind {
    Bolt,
    Line,
    Ball,
    Breath,
    MonsterBolt,
}

/// Where an attack is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum AttackState {
    #[default]
    Traveling,
    Detonated,
    Done,
}

/// How a ball is aimed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aim {
    /// Fly until something stops it
    Direction(Direction),
    /// Fly to this cell and burst there
    Target(Pos),
}

/// Everything one attack did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    pub kind: AttackKind,
    pub damage_type: DamageType,
    pub origin: Pos,
    /// Cells travelled, origin excluded
    pub path: Vec<Pos>,
    /// Centre of the burst, for attacks that detonated
    pub center: Option<Pos>,
    pub radius: u32,
    pub hits: Vec<MonsterHit>,
    pub player: Option<PlayerOutcome>,
    /// Floor items the blast destroyed
    pub destroyed: Vec<Object>,
    pub messages: Vec<String>,
    pub errors: Vec<EngineError>,
    pub state: AttackState,
}

impl AttackReport {
    pub fn new(kind: AttackKind, damage_type: DamageType, origin: Pos) -> Self {
        Self {
            kind,
            damage_type,
            origin,
            path: Vec::new(),
            center: None,
            radius: 0,
            hits: Vec::new(),
            player: None,
            destroyed: Vec::new(),
            messages: Vec::new(),
            errors: Vec::new(),
            state: AttackState::Traveling,
        }
    }

    /// Monsters the attack killed
    pub fn killed(&self) -> impl Iterator<Item = &MonsterHit> {
        self.hits.iter().filter(|hit| hit.killed())
    }

    /// Monsters that changed form, as (old, new)
    pub fn polymorphed(&self) -> impl Iterator<Item = (MonsterId, MonsterId)> + '_ {
        self.hits
            .iter()
            .filter_map(|hit| hit.polymorphed_into.map(|new| (hit.id, new)))
    }

    /// Total hit points taken by monsters
    pub fn monster_damage(&self) -> i32 {
        self.hits.iter().map(|hit| hit.damage).sum()
    }

    /// Whether the attack had no effect at all
    pub fn is_noop(&self) -> bool {
        self.hits.is_empty() && self.player.is_none() && self.destroyed.is_empty()
    }

    /// Show a message and keep it
    pub(crate) fn say(&mut self, ctx: &mut EffectContext<'_>, text: String) {
        ctx.message(&text);
        self.messages.push(text);
    }

    /// Record a fault that ended one effect
    pub(crate) fn fault(&mut self, err: EngineError) {
        match &err {
            EngineError::StaleMonster { id } => {
                tracing::warn!(kind = %self.kind, monster = %id, "stale occupant skipped");
            }
            _ => tracing::error!(kind = %self.kind, error = %err, "effect aborted"),
        }
        self.errors.push(err);
    }

    fn finish(mut self) -> Self {
        self.state = AttackState::Done;
        self
    }
}

/// Turn a raw damage code into a type
///
/// An unknown code yields a finished no-op report carrying the error.
pub fn decode_damage_type(kind: AttackKind, origin: Pos, code: u8) -> Result<DamageType, AttackReport> {
    DamageType::try_from(code).map_err(|err| {
        tracing::error!(%kind, code, "unknown damage type code");
        let mut report = AttackReport::new(kind, DamageType::default(), origin);
        report.errors.push(err);
        report.finish()
    })
}

fn launched(kind: AttackKind, typ: DamageType, origin: Pos) -> AttackReport {
    tracing::debug!(%kind, damage_type = %typ, %origin, "attack launched");
    AttackReport::new(kind, typ, origin)
}

// ============================================================================
// Bolts and lines
// ============================================================================

/// Hit one monster with a full-strength projectile and describe it
fn strike(
    ctx: &mut EffectContext<'_>,
    report: &mut AttackReport,
    id: MonsterId,
    raw: i32,
    desc: &str,
    source: KillSource,
) {
    match apply_to_monster(ctx, id, report.damage_type, raw, 1, source) {
        Ok(hit) => {
            report.say(ctx, format!("The {desc} strikes {}.", hit.object_name));
            report.say(ctx, hit.message.clone());
            report.hits.push(hit);
        }
        Err(err) => report.fault(err),
    }
}

/// Fire a bolt from `origin`; it strikes the first monster in its way
pub fn fire_bolt(
    ctx: &mut EffectContext<'_>,
    origin: Pos,
    dir: Direction,
    typ: DamageType,
    dam: i32,
    desc: &str,
) -> AttackReport {
    let mut report = launched(AttackKind::Bolt, typ, origin);
    let cells: Vec<Pos> = trace_line(ctx.level, origin, dir, ctx.options.bolt_range)
        .iter()
        .collect();
    let glyph = bolt_glyph(dir);
    let color = typ.bolt_color();

    for pos in cells {
        report.path.push(pos);
        if let Some(id) = ctx.level.monster_id_at(pos) {
            report.state = AttackState::Detonated;
            strike(ctx, &mut report, id, dam, desc, KillSource::Player);
            break;
        }
        ctx.draw(pos, glyph, color);
        ctx.pause(ctx.options.bolt_delay_ms);
        ctx.restore(pos);
    }
    report.finish()
}

/// Fire a beam from `origin` that strikes every monster along it
///
/// The line is fixed before anything is struck, so kills and displacements
/// do not change where it goes. A light beam lights every cell it crosses.
pub fn fire_line(
    ctx: &mut EffectContext<'_>,
    origin: Pos,
    dir: Direction,
    typ: DamageType,
    dam: i32,
    desc: &str,
) -> AttackReport {
    let mut report = launched(AttackKind::Line, typ, origin);
    let cells: Vec<Pos> = trace_line(ctx.level, origin, dir, ctx.options.bolt_range)
        .iter()
        .collect();
    let glyph = bolt_glyph(dir);
    let color = typ.bolt_color();
    let mut struck: Vec<MonsterId> = Vec::new();

    for pos in cells {
        report.path.push(pos);
        if typ == DamageType::Light {
            ctx.level.set_lit(pos);
        }
        match ctx.level.monster_id_at(pos) {
            Some(id) if !struck.contains(&id) => {
                report.state = AttackState::Detonated;
                strike(ctx, &mut report, id, dam, desc, KillSource::Player);
                struck.push(id);
                if let Some(hit) = report.hits.last() {
                    struck.extend(hit.polymorphed_into);
                }
            }
            _ => {
                ctx.draw(pos, glyph, color);
                ctx.pause(ctx.options.bolt_delay_ms);
                ctx.restore(pos);
            }
        }
    }
    report.finish()
}

// ============================================================================
// Balls
// ============================================================================

/// Fire a ball from `origin` that bursts with the player's ball radius
///
/// Aimed in a direction it bursts on the first monster, or in front of the
/// first wall. Aimed at a cell it flies there, over anything in between,
/// and bursts where its path ends. Aimed at `origin` it bursts in place.
pub fn fire_ball(
    ctx: &mut EffectContext<'_>,
    origin: Pos,
    aim: Aim,
    typ: DamageType,
    dam: i32,
    desc: &str,
) -> AttackReport {
    let mut report = launched(AttackKind::Ball, typ, origin);
    let range = ctx.options.bolt_range;

    let (path, center) = match aim {
        Aim::Target(target) if target == origin => (Vec::new(), origin),
        Aim::Target(target) => {
            let path = project_path(ctx.level, origin, target, range);
            let center = path.last().copied().unwrap_or(origin);
            (path, center)
        }
        Aim::Direction(dir) => {
            let ray = trace_line(ctx.level, origin, dir, range);
            let mut path = Vec::new();
            for pos in ray.iter() {
                path.push(pos);
                if ctx.level.monster_id_at(pos).is_some() {
                    break;
                }
            }
            let center = path.last().copied().unwrap_or(origin);
            (path, center)
        }
    };

    let color = typ.bolt_color();
    for &pos in &path {
        if pos == center {
            break;
        }
        ctx.draw(pos, BURST_GLYPH, color);
        ctx.pause(ctx.options.bolt_delay_ms);
        ctx.restore(pos);
    }
    report.path = path;

    let burst = Burst {
        center,
        radius: ctx.options.ball_radius,
        typ,
        dam,
        desc,
        source: KillSource::Player,
        caster: None,
        player_cap: None,
        killer: "",
    };
    detonate(ctx, &mut report, &burst);
    report.finish()
}

/// One detonation
pub(crate) struct Burst<'a> {
    pub center: Pos,
    pub radius: u32,
    pub typ: DamageType,
    pub dam: i32,
    pub desc: &'a str,
    pub source: KillSource,
    /// Monster that set it off, never hit by its own burst
    pub caster: Option<MonsterId>,
    /// When set, the player inside the footprint is hit for at most this much
    pub player_cap: Option<i32>,
    /// Recorded as the cause of death if the player dies
    pub killer: &'a str,
}

/// Burst at `burst.center`
///
/// Floor items go first, then every monster in the footprint once, then the
/// player when the burst can hurt them. Damage is divided by the distance
/// from the centre plus one.
pub(crate) fn detonate(ctx: &mut EffectContext<'_>, report: &mut AttackReport, burst: &Burst<'_>) {
    tracing::debug!(center = %burst.center, radius = burst.radius, "detonation");
    report.state = AttackState::Detonated;
    report.center = Some(burst.center);
    report.radius = burst.radius;

    let area = enumerate_area(ctx.level, burst.center, burst.radius, ctx.player.pos);

    let color = burst.typ.bolt_color();
    let drawn: Vec<Pos> = area
        .iter()
        .filter(|cell| cell.open && cell.visible)
        .map(|cell| cell.pos)
        .collect();
    for &pos in &drawn {
        ctx.draw(pos, BURST_GLYPH, color);
    }
    ctx.pause(ctx.options.ball_delay_ms);

    for cell in &area {
        let doomed = ctx
            .level
            .object_at(cell.pos)
            .filter(|obj| !obj.artifact && burst.typ.destroys(obj.class))
            .map(|obj| obj.id);
        if let Some(object) = doomed.and_then(|id| ctx.level.remove_object(id)) {
            report.destroyed.push(object);
        }
    }

    let first_hit = report.hits.len();
    let mut processed: Vec<MonsterId> = burst.caster.into_iter().collect();
    for cell in area.iter().filter(|cell| cell.open) {
        let Some(id) = ctx.level.monster_id_at(cell.pos) else {
            continue;
        };
        if processed.contains(&id) {
            continue;
        }
        processed.push(id);
        match apply_to_monster(ctx, id, burst.typ, burst.dam, cell.distance + 1, burst.source) {
            Ok(hit) => {
                processed.extend(hit.polymorphed_into);
                report.hits.push(hit);
            }
            Err(err) => report.fault(err),
        }
    }

    for pos in drawn {
        ctx.restore(pos);
    }

    let hits = &report.hits[first_hit..];
    let killed = hits.iter().filter(|hit| hit.killed()).count();
    let mut lines = Vec::new();
    match hits {
        [] => {}
        [hit] => {
            lines.push(format!("The {} envelops {}!", burst.desc, hit.object_name));
            if !hit.killed() {
                lines.push(hit.message.clone());
            }
        }
        _ => lines.push(format!("The {} envelops several creatures!", burst.desc)),
    }
    match killed {
        0 => {}
        1 => lines.push("There is a scream of agony!".to_string()),
        _ => lines.push("There are several screams of agony!".to_string()),
    }
    for line in lines {
        report.say(ctx, line);
    }

    if let Some(cap) = burst.player_cap {
        let player_pos = ctx.player.pos;
        if let Some(cell) = area.iter().find(|cell| cell.pos == player_pos) {
            let dam = (burst.dam / (cell.distance as i32 + 1)).clamp(1, cap.max(1));
            let outcome = apply_to_player(ctx, burst.typ, dam, burst.killer);
            report.player = Some(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Outcome;
    use crate::data::ids;
    use crate::dungeon::Level;
    use crate::object::ItemClass;
    use crate::player::Player;
    use crate::world::{EngineOptions, NullPresenter, RecordingPresenter, Scene};

    fn scene() -> Scene {
        let options = EngineOptions {
            seed: Some(11),
            ..EngineOptions::default()
        };
        Scene::new(Level::with_room(15, 25), Player::new(Pos::new(7, 2)), options)
    }

    #[test]
    fn test_bolt_strikes_nearest_only() {
        let mut s = scene();
        let near = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(7, 6), 50).unwrap();
        let far = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(7, 9), 50).unwrap();
        let mut rec = RecordingPresenter::new();
        let report = {
            let mut ctx = s.context(&mut rec);
            fire_bolt(
                &mut ctx,
                Pos::new(7, 2),
                Direction::East,
                DamageType::MagicMissile,
                10,
                "magic missile",
            )
        };
        assert_eq!(report.hits.len(), 1);
        assert_eq!(report.hits[0].id, near);
        assert_eq!(report.hits[0].damage, 10);
        assert_eq!(report.path.last(), Some(&Pos::new(7, 6)));
        assert_eq!(report.state, AttackState::Done);
        assert_eq!(s.level.monster(near).unwrap().hp, 40);
        assert_eq!(s.level.monster(far).unwrap().hp, 50);
        assert_eq!(
            rec.messages()[0],
            "The magic missile strikes the cave orc."
        );
    }

    #[test]
    fn test_bolt_into_wall_hits_nothing() {
        let mut s = scene();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let report = fire_bolt(
            &mut ctx,
            Pos::new(7, 2),
            Direction::West,
            DamageType::Fire,
            30,
            "fire bolt",
        );
        assert_eq!(report.path, vec![Pos::new(7, 1)]);
        assert!(report.is_noop());
        assert!(report.center.is_none());
    }

    #[test]
    fn test_bolt_kill_message() {
        let mut s = scene();
        let id = s.spawn_with_hp(ids::JACKAL, Pos::new(7, 4), 5).unwrap();
        let mut rec = RecordingPresenter::new();
        let report = {
            let mut ctx = s.context(&mut rec);
            fire_bolt(
                &mut ctx,
                Pos::new(7, 2),
                Direction::East,
                DamageType::Fire,
                20,
                "fire bolt",
            )
        };
        assert_eq!(report.killed().count(), 1);
        assert!(s.level.monster(id).is_none());
        assert_eq!(
            rec.messages(),
            vec!["The fire bolt strikes the jackal.", "The jackal dies in a fit of agony."]
        );
    }

    #[test]
    fn test_line_hits_every_monster() {
        let mut s = scene();
        let a = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(7, 5), 5).unwrap();
        let b = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(7, 8), 50).unwrap();
        let mut p = NullPresenter;
        let report = {
            let mut ctx = s.context(&mut p);
            fire_line(
                &mut ctx,
                Pos::new(7, 2),
                Direction::East,
                DamageType::Lightning,
                12,
                "lightning beam",
            )
        };
        let struck: Vec<MonsterId> = report.hits.iter().map(|h| h.id).collect();
        assert_eq!(struck, vec![a, b]);
        assert!(report.hits[0].killed());
        assert_eq!(s.level.monster(b).unwrap().hp, 38);
        assert_eq!(report.path.last(), Some(&Pos::new(7, 20)));
    }

    #[test]
    fn test_light_line_lights_cells_and_burns_orcs() {
        let mut s = scene();
        for row in 1..14 {
            for col in 1..24 {
                if let Some(cell) = s.level.cell_mut(Pos::new(row, col)) {
                    cell.lit = false;
                }
            }
        }
        let orc = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(4, 2), 50).unwrap();
        let mut p = NullPresenter;
        let report = {
            let mut ctx = s.context(&mut p);
            fire_line(
                &mut ctx,
                Pos::new(7, 2),
                Direction::North,
                DamageType::Light,
                10,
                "beam of light",
            )
        };
        for row in 1..7 {
            assert!(s.level.is_lit(Pos::new(row, 2)));
        }
        assert!(!s.level.is_lit(Pos::new(7, 3)));
        assert_eq!(report.hits[0].outcome, Outcome::HitHard);
        assert_eq!(s.level.monster(orc).unwrap().hp, 30);
    }

    #[test]
    fn test_ball_bursts_on_first_monster() {
        let mut s = scene();
        let front = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(7, 6), 100).unwrap();
        let side = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(8, 7), 100).unwrap();
        let mut rec = RecordingPresenter::new();
        let report = {
            let mut ctx = s.context(&mut rec);
            fire_ball(
                &mut ctx,
                Pos::new(7, 2),
                Aim::Direction(Direction::East),
                DamageType::Fire,
                30,
                "fire ball",
            )
        };
        assert_eq!(report.center, Some(Pos::new(7, 6)));
        assert_eq!(report.radius, 2);
        assert_eq!(s.level.monster(front).unwrap().hp, 70);
        assert_eq!(s.level.monster(side).unwrap().hp, 85);
        assert_eq!(rec.messages(), vec!["The fire ball envelops several creatures!"]);
    }

    #[test]
    fn test_ball_stops_in_front_of_wall() {
        let mut s = scene();
        let mut p = NullPresenter;
        let mut ctx = s.context(&mut p);
        let report = fire_ball(
            &mut ctx,
            Pos::new(7, 4),
            Aim::Direction(Direction::West),
            DamageType::Frost,
            20,
            "frost ball",
        );
        assert_eq!(report.center, Some(Pos::new(7, 1)));
    }

    #[test]
    fn test_ball_flies_over_monsters_to_target() {
        let mut s = scene();
        let between = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(7, 4), 100).unwrap();
        let mut p = NullPresenter;
        let report = {
            let mut ctx = s.context(&mut p);
            fire_ball(
                &mut ctx,
                Pos::new(7, 2),
                Aim::Target(Pos::new(7, 12)),
                DamageType::Acid,
                20,
                "acid ball",
            )
        };
        assert_eq!(report.center, Some(Pos::new(7, 12)));
        assert!(report.hits.is_empty());
        assert_eq!(s.level.monster(between).unwrap().hp, 100);
    }

    #[test]
    fn test_self_targeted_ball_spares_caster() {
        let mut s = scene();
        let origin = Pos::new(7, 2);
        let adjacent = s.spawn_with_hp(ids::CAVE_ORC, Pos::new(7, 3), 100).unwrap();
        let mut rec = RecordingPresenter::new();
        let report = {
            let mut ctx = s.context(&mut rec);
            fire_ball(
                &mut ctx,
                origin,
                Aim::Target(origin),
                DamageType::Fire,
                40,
                "fire ball",
            )
        };
        assert_eq!(report.center, Some(origin));
        assert!(report.path.is_empty());
        assert!(report.player.is_none());
        assert_eq!(s.player.hp, s.player.max_hp);
        assert_eq!(s.level.monster(adjacent).unwrap().hp, 80);
        assert_eq!(rec.messages()[0], "The fire ball envelops the cave orc!");
    }

    #[test]
    fn test_ball_screams() {
        let mut s = scene();
        s.spawn_with_hp(ids::JACKAL, Pos::new(7, 6), 3).unwrap();
        s.spawn_with_hp(ids::JACKAL, Pos::new(6, 7), 3).unwrap();
        let mut rec = RecordingPresenter::new();
        let report = {
            let mut ctx = s.context(&mut rec);
            fire_ball(
                &mut ctx,
                Pos::new(7, 2),
                Aim::Direction(Direction::East),
                DamageType::Fire,
                30,
                "fire ball",
            )
        };
        assert_eq!(report.killed().count(), 2);
        assert!(report.hits.iter().all(|h| h.exp > 0));
        assert_eq!(
            rec.messages(),
            vec!["The fire ball envelops several creatures!", "There are several screams of agony!"]
        );
    }

    #[test]
    fn test_ball_destroys_floor_items() {
        let mut s = scene();
        let potion = s
            .level
            .add_object(Object::new(ItemClass::Potion, "potion of cure light wounds"), Pos::new(7, 9))
            .unwrap();
        let relic = s
            .level
            .add_object(Object::new(ItemClass::Potion, "phial").artifact(), Pos::new(7, 10))
            .unwrap();
        let sword = s
            .level
            .add_object(Object::new(ItemClass::Sword, "long sword"), Pos::new(8, 10))
            .unwrap();
        let coins = s.level.add_object(Object::gold(40), Pos::new(6, 10)).unwrap();
        let mut p = NullPresenter;
        let report = {
            let mut ctx = s.context(&mut p);
            fire_ball(
                &mut ctx,
                Pos::new(7, 2),
                Aim::Target(Pos::new(7, 10)),
                DamageType::Frost,
                20,
                "frost ball",
            )
        };
        assert_eq!(report.destroyed.len(), 1);
        assert_eq!(report.destroyed[0].id, potion);
        assert!(s.level.object(relic).is_some());
        assert!(s.level.object(sword).is_some());
        assert!(s.level.object(coins).is_some());
    }

    #[test]
    fn test_ball_animation_when_enabled() {
        let mut s = scene();
        s.options.animate = true;
        let mut rec = RecordingPresenter::new();
        {
            let mut ctx = s.context(&mut rec);
            fire_ball(
                &mut ctx,
                Pos::new(7, 2),
                Aim::Target(Pos::new(7, 8)),
                DamageType::Fire,
                10,
                "fire ball",
            );
        }
        let draws: Vec<(Pos, char)> = rec.draws().collect();
        assert!(draws.contains(&(Pos::new(7, 3), '*')));
        assert!(draws.contains(&(Pos::new(7, 10), '*')));
        assert!(!draws.iter().any(|(pos, _)| pos.distance(Pos::new(7, 8)) > 2 && pos.row != 7));
        assert!(rec.total_pause_ms() >= s.options.ball_delay_ms);
    }

    #[test]
    fn test_unknown_code_is_noop() {
        let report = decode_damage_type(AttackKind::Ball, Pos::new(1, 1), 200).unwrap_err();
        assert!(report.is_noop());
        assert_eq!(report.state, AttackState::Done);
        assert_eq!(report.errors, vec![EngineError::UnknownDamageType { code: 200 }]);
        assert_eq!(
            decode_damage_type(AttackKind::Bolt, Pos::new(1, 1), 6),
            Ok(DamageType::Fire)
        );
    }
}
