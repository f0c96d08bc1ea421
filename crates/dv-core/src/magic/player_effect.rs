//! Effects on the player (take_hit, poison_gas, acid_dam and friends)
//!
//! The same damage types that hurt monsters, seen from the receiving end:
//! the resistance table scales the hit, then unresisted types add their
//! status changes, drains and item damage.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::combat::{resolve_player, DamageType, Multiplier};
use crate::consts::MAX_RAW_DAMAGE;
use crate::dungeon::Pos;
use crate::object::EquipSlot;
use crate::player::{Attribute, Resistances};
use crate::world::EffectContext;

/// Experience drain multiplier for life-draining attacks
const DRAIN_LIFE: u32 = 2;

/// Range of a nexus teleport
const NEXUS_TELEPORT: i16 = 200;

/// Range of a gravity blink
const GRAVITY_BLINK: i16 = 5;

/// Slots a disenchantment may strike, one roll in seven
const DISENCHANT_SLOTS: [EquipSlot; 7] = [
    EquipSlot::Weapon,
    EquipSlot::Body,
    EquipSlot::Shield,
    EquipSlot::Cloak,
    EquipSlot::Gloves,
    EquipSlot::Helm,
    EquipSlot::Boots,
];

/// Percent chance a disenchantment strips an ordinary item at full bonus
const DISENCHANT_STRIP: u32 = 70;

/// Same for an artifact
const DISENCHANT_ARTIFACT_STRIP: u32 = 30;

/// Bonus at and above which an item gets no extra resistance
const DISENCHANT_FULL_BONUS: i16 = 10;

/// Extra resist percent per point below the full bonus
const DISENCHANT_RESIST_STEP: u32 = 5;

const ARMOUR_SLOTS: [EquipSlot; 6] = [
    EquipSlot::Body,
    EquipSlot::Cloak,
    EquipSlot::Shield,
    EquipSlot::Helm,
    EquipSlot::Gloves,
    EquipSlot::Boots,
];

/// One consequence of a hit beyond hit point loss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEffect {
    Poisoned(u16),
    Stunned(u16),
    Confused(u16),
    Blinded(u16),
    Slowed(u16),
    Cut(u16),
    ExpDrained(u32),
    /// Hold life kept the experience
    LifeHeld,
    StatDrained(Attribute),
    StatSustained(Attribute),
    StatsSwapped(Attribute, Attribute),
    Teleported(Pos),
    Disenchanted(EquipSlot),
    ResistedDisenchantment(EquipSlot),
    ArmourDamaged(EquipSlot),
    /// A saving throw warded off the secondary effect
    Saved,
}

/// What a hit did to the player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerOutcome {
    pub damage: i32,
    /// The player resisted the damage type
    pub resisted: bool,
    pub died: bool,
    pub effects: Vec<PlayerEffect>,
}

impl PlayerOutcome {
    pub fn has(&self, effect: PlayerEffect) -> bool {
        self.effects.contains(&effect)
    }
}

/// Apply `raw` damage of type `typ` to the player
///
/// `killer` names the source for the death record ("an ancient red
/// dragon"). Raw damage is clamped to `1..=MAX_RAW_DAMAGE`.
pub fn apply_to_player(
    ctx: &mut EffectContext<'_>,
    typ: DamageType,
    raw: i32,
    killer: &str,
) -> PlayerOutcome {
    let raw = raw.clamp(1, MAX_RAW_DAMAGE);
    let resolution = resolve_player(typ, ctx.player);
    let damage = resolution.multiplier.apply(raw, ctx.rng);
    let mut outcome = PlayerOutcome {
        damage,
        resisted: resolution.resisted,
        ..PlayerOutcome::default()
    };

    if damage > 0 {
        ctx.message(&format!("You are hit by {}!", typ.name()));
    } else {
        ctx.message("You are unharmed.");
    }

    secondary_effects(ctx, typ, damage, resolution.multiplier, &mut outcome);

    outcome.died = ctx.player.take_hit(damage, killer);
    if outcome.died {
        ctx.message("You die.");
    }
    outcome
}

fn secondary_effects(
    ctx: &mut EffectContext<'_>,
    typ: DamageType,
    damage: i32,
    multiplier: Multiplier,
    outcome: &mut PlayerOutcome,
) {
    let resisted = outcome.resisted;
    let dam = damage.max(0) as u32;
    let res_sound = ctx.player.has(Resistances::RES_SOUND);
    let res_conf = ctx.player.has(Resistances::RES_CONF);
    match typ {
        DamageType::PoisonGas if !resisted => {
            let ticks = 12u16.saturating_add(ctx.rng.rnd(dam.min(u16::MAX as u32)) as u16);
            add_poison(ctx, ticks, outcome);
        }
        DamageType::Acid if multiplier != Multiplier::Blocked => {
            damage_armour(ctx, outcome);
        }
        DamageType::Plasma if !res_sound => {
            let k = ctx.rng.rnd(if dam > 40 { 35 } else { dam * 3 / 4 + 5 }) as u16;
            add_stun(ctx, k, outcome);
        }
        DamageType::Nether if !resisted => drain_life(ctx, 200, outcome),
        DamageType::Water => {
            if !res_sound {
                let k = ctx.rng.rnd(40) as u16;
                add_stun(ctx, k, outcome);
            }
            if !res_conf {
                let k = ctx.rng.rnd(5) as u16 + 5;
                add_confusion(ctx, k, outcome);
            }
        }
        DamageType::Chaos if !resisted => {
            if !res_conf {
                let k = ctx.rng.rn2(20) as u16 + 10;
                add_confusion(ctx, k, outcome);
            }
            if !ctx.player.has(Resistances::RES_NETHER) {
                drain_life(ctx, 5000, outcome);
            }
        }
        DamageType::Shards if !resisted => {
            add_cut(ctx, dam.min(u16::MAX as u32) as u16, outcome);
        }
        DamageType::Sound if !resisted => {
            let k = ctx.rng.rnd(if dam > 90 { 35 } else { dam / 3 + 5 }) as u16;
            add_stun(ctx, k, outcome);
        }
        DamageType::Confusion if !resisted => {
            let k = ctx.rng.rnd(20) as u16 + 10;
            add_confusion(ctx, k, outcome);
        }
        DamageType::Disenchant if !resisted => disenchant(ctx, outcome),
        DamageType::Nexus if !resisted => nexus(ctx, outcome),
        DamageType::Force if !res_sound => {
            let k = ctx.rng.rnd(20) as u16;
            add_stun(ctx, k, outcome);
        }
        DamageType::Inertia => {
            let k = ctx.rng.rn2(4) as u16 + 4;
            add_slow(ctx, k, outcome);
        }
        DamageType::Light | DamageType::Dark if !resisted => {
            if !ctx.player.has(Resistances::RES_BLIND) {
                let k = ctx.rng.rnd(5) as u16 + 2;
                ctx.player.status.blind = ctx.player.status.blind.saturating_add(k);
                ctx.message("You are blinded!");
                outcome.effects.push(PlayerEffect::Blinded(k));
            }
        }
        DamageType::Time => time_warp(ctx, outcome),
        DamageType::Gravity => {
            ctx.message("Gravity warps around you.");
            teleport(ctx, GRAVITY_BLINK, outcome);
            let k = ctx.rng.rn2(4) as u16 + 4;
            add_slow(ctx, k, outcome);
            if !res_sound {
                let k = ctx.rng.rnd(if dam > 90 { 35 } else { dam / 3 + 5 }) as u16;
                add_stun(ctx, k, outcome);
            }
        }
        DamageType::Ice if multiplier != Multiplier::Blocked => {
            if !ctx.player.has(Resistances::RES_SHARDS) {
                let k = ctx.rng.dice(5, 8) as u16;
                add_cut(ctx, k, outcome);
            }
            if !res_sound {
                let k = ctx.rng.rnd(15) as u16;
                add_stun(ctx, k, outcome);
            }
        }
        _ => {}
    }
}

fn add_poison(ctx: &mut EffectContext<'_>, ticks: u16, outcome: &mut PlayerOutcome) {
    let status = &mut ctx.player.status;
    status.poisoned = status.poisoned.saturating_add(ticks);
    outcome.effects.push(PlayerEffect::Poisoned(ticks));
}

fn add_stun(ctx: &mut EffectContext<'_>, ticks: u16, outcome: &mut PlayerOutcome) {
    if ticks == 0 {
        return;
    }
    let status = &mut ctx.player.status;
    status.stunned = status.stunned.saturating_add(ticks);
    ctx.message("You are stunned.");
    outcome.effects.push(PlayerEffect::Stunned(ticks));
}

fn add_confusion(ctx: &mut EffectContext<'_>, ticks: u16, outcome: &mut PlayerOutcome) {
    let status = &mut ctx.player.status;
    status.confused = status.confused.saturating_add(ticks);
    ctx.message("You are confused.");
    outcome.effects.push(PlayerEffect::Confused(ticks));
}

fn add_slow(ctx: &mut EffectContext<'_>, ticks: u16, outcome: &mut PlayerOutcome) {
    let status = &mut ctx.player.status;
    status.slow = status.slow.saturating_add(ticks);
    ctx.message("You feel yourself moving slower.");
    outcome.effects.push(PlayerEffect::Slowed(ticks));
}

fn add_cut(ctx: &mut EffectContext<'_>, ticks: u16, outcome: &mut PlayerOutcome) {
    if ticks == 0 {
        return;
    }
    let status = &mut ctx.player.status;
    status.cut = status.cut.saturating_add(ticks);
    outcome.effects.push(PlayerEffect::Cut(ticks));
}

/// Nether-style experience loss; hold life keeps it three times in four
fn drain_life(ctx: &mut EffectContext<'_>, base: u32, outcome: &mut PlayerOutcome) {
    let exp = ctx.player.exp;
    let amount = if ctx.player.has(Resistances::HOLD_LIFE) {
        if ctx.rng.rn2(100) < 75 {
            ctx.message("You keep hold of your life force!");
            outcome.effects.push(PlayerEffect::LifeHeld);
            return;
        }
        ctx.message("You feel your life slipping away!");
        base + exp / 1000 * DRAIN_LIFE
    } else {
        ctx.message("You feel your life draining away!");
        base + exp / 100 * DRAIN_LIFE
    };
    ctx.player.lose_exp(amount);
    outcome.effects.push(PlayerEffect::ExpDrained(amount));
}

/// Strip the bonuses of one worn item
///
/// Each positive bonus loses exactly one point. The strip lands seven times
/// in ten, three in ten on an artifact, and a worn-down item shrugs it off
/// more often: every point its best bonus sits below
/// [`DISENCHANT_FULL_BONUS`] adds [`DISENCHANT_RESIST_STEP`] percent to the
/// chance of merely resisting.
fn disenchant(ctx: &mut EffectContext<'_>, outcome: &mut PlayerOutcome) {
    let Some(&slot) = ctx.rng.choose(&DISENCHANT_SLOTS) else {
        return;
    };
    let Some(item) = ctx.player.equipment.get(slot) else {
        return;
    };
    let best = item.to_hit.max(item.to_dam).max(item.to_ac);
    if best <= 0 {
        return;
    }
    let name = item.name.clone();
    if !ctx.rng.percent(disenchant_chance(item.artifact, best)) {
        ctx.message(&format!("Your {name} resists disenchantment!"));
        outcome.effects.push(PlayerEffect::ResistedDisenchantment(slot));
        return;
    }
    let Some(item) = ctx.player.equipment.get_mut(slot) else {
        return;
    };
    for bonus in [&mut item.to_hit, &mut item.to_dam, &mut item.to_ac] {
        if *bonus > 0 {
            *bonus -= 1;
        }
    }
    ctx.message(&format!("Your {name} was disenchanted!"));
    outcome.effects.push(PlayerEffect::Disenchanted(slot));
}

/// Percent chance that a disenchantment strips an item whose best bonus is
/// `best` (positive)
fn disenchant_chance(artifact: bool, best: i16) -> u32 {
    let base = if artifact {
        DISENCHANT_ARTIFACT_STRIP
    } else {
        DISENCHANT_STRIP
    };
    let shortfall = (DISENCHANT_FULL_BONUS - best.min(DISENCHANT_FULL_BONUS)) as u32;
    let resist = shortfall * DISENCHANT_RESIST_STEP;
    base * (100 - resist) / 100
}

/// Acid eats one point of armour class from a random worn piece
fn damage_armour(ctx: &mut EffectContext<'_>, outcome: &mut PlayerOutcome) {
    let Some(slot) = ctx.player.equipment.random_worn(&ARMOUR_SLOTS, ctx.rng) else {
        return;
    };
    let Some(item) = ctx.player.equipment.get_mut(slot) else {
        return;
    };
    if item.artifact || item.ac + item.to_ac <= 0 {
        return;
    }
    item.to_ac -= 1;
    let name = item.name.clone();
    ctx.message(&format!("Your {name} is damaged!"));
    outcome.effects.push(PlayerEffect::ArmourDamaged(slot));
}

/// Nexus scrambles the player in space or in body, unless a saving throw
/// holds
fn nexus(ctx: &mut EffectContext<'_>, outcome: &mut PlayerOutcome) {
    if ctx.player.saves(ctx.rng) {
        ctx.message("You resist the effects!");
        outcome.effects.push(PlayerEffect::Saved);
        return;
    }
    if ctx.rng.rnd(7) <= 5 {
        teleport(ctx, NEXUS_TELEPORT, outcome);
        return;
    }
    let a = Attribute::ALL[ctx.rng.rn2(6) as usize];
    let mut b = Attribute::ALL[ctx.rng.rn2(5) as usize];
    if b == a {
        b = Attribute::Charisma;
    }
    ctx.player.attributes.swap(a, b);
    ctx.message("Your body starts to scramble...");
    outcome.effects.push(PlayerEffect::StatsSwapped(a, b));
}

/// Time drains experience half the time, otherwise one or all stats
fn time_warp(ctx: &mut EffectContext<'_>, outcome: &mut PlayerOutcome) {
    match ctx.rng.rnd(10) {
        1..=5 => {
            ctx.message("You feel life has clocked back.");
            let amount = 100 + ctx.player.exp / 100 * DRAIN_LIFE;
            ctx.player.lose_exp(amount);
            outcome.effects.push(PlayerEffect::ExpDrained(amount));
        }
        6..=9 => {
            let attr = Attribute::ALL[ctx.rng.rn2(6) as usize];
            drain_stat(ctx, attr, outcome);
        }
        _ => {
            ctx.message("You're not as powerful as you used to be...");
            for attr in Attribute::ALL {
                drain_stat(ctx, attr, outcome);
            }
        }
    }
}

fn drain_stat(ctx: &mut EffectContext<'_>, attr: Attribute, outcome: &mut PlayerOutcome) {
    if ctx.player.resistances.sustains(attr) {
        outcome.effects.push(PlayerEffect::StatSustained(attr));
    } else if ctx.player.attributes.drain(attr) {
        ctx.message(&format!("You feel your {} drain away.", attr.name()));
        outcome.effects.push(PlayerEffect::StatDrained(attr));
    }
}

/// Move the player to a random vacant cell within `range`
fn teleport(ctx: &mut EffectContext<'_>, range: i16, outcome: &mut PlayerOutcome) {
    let from = ctx.player.pos;
    let span = (range as u32) * 2 + 1;
    for _ in 0..500 {
        let dr = ctx.rng.rn2(span) as i16 - range;
        let dc = ctx.rng.rn2(span) as i16 - range;
        let to = from.offset(dr, dc);
        if to == from
            || !ctx.level.in_bounds(to)
            || !ctx.level.is_vacant(to)
            || from.distance(to) > range as u32
        {
            continue;
        }
        ctx.player.pos = to;
        outcome.effects.push(PlayerEffect::Teleported(to));
        return;
    }
    tracing::debug!(at = %from, "no room to teleport");
}
