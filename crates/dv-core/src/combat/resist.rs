//! Resistance table
//!
//! For every damage type, how a monster template or the player takes it:
//! a damage multiplier, an optional side effect, what the attack reveals
//! about the target, and the message class of the outcome. Pure lookups;
//! random parts are carried symbolically and rolled by the executor.
//!
//! Within one damage type, immunity and resistance are always checked
//! before any susceptibility.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::DamageType;
use crate::consts::IMMUNE_DIVISOR;
use crate::monster::{Breaths, Capabilities, PerMonst};
use crate::player::{Player, Resistances};
use crate::rng::GameRng;

/// How incoming damage is scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multiplier {
    /// Full damage
    Normal,
    /// One ninth, rounded down, without the one-point minimum
    Immune,
    /// No damage at all
    Blocked,
    /// `num / den`
    Ratio { num: i32, den: i32 },
    /// `factor / (1d6 + 6)`, rolled per hit
    Resist { factor: i32 },
}

impl Multiplier {
    pub const HALF: Multiplier = Multiplier::Ratio { num: 1, den: 2 };
    pub const DOUBLE: Multiplier = Multiplier::Ratio { num: 2, den: 1 };
    pub const THREE_HALVES: Multiplier = Multiplier::Ratio { num: 3, den: 2 };

    /// Scale `damage`
    ///
    /// Everything but `Immune` and `Blocked` leaves at least one point.
    pub fn apply(self, damage: i32, rng: &mut GameRng) -> i32 {
        let damage = damage.max(0);
        match self {
            Multiplier::Normal => damage.max(1),
            Multiplier::Immune => damage / IMMUNE_DIVISOR,
            Multiplier::Blocked => 0,
            Multiplier::Ratio { num, den } => scale(damage, num, den.max(1)).max(1),
            Multiplier::Resist { factor } => {
                let divisor = rng.rnd(6) as i32 + 6;
                scale(damage, factor, divisor).max(1)
            }
        }
    }

    /// Whether the target shrugs off part of the blow
    pub const fn reduces(&self) -> bool {
        match self {
            Multiplier::Normal => false,
            Multiplier::Immune | Multiplier::Blocked => true,
            Multiplier::Ratio { num, den } => *num < *den,
            Multiplier::Resist { factor } => *factor < 7,
        }
    }
}

/// `damage * num / den` without overflowing, clamped back into `i32`
fn scale(damage: i32, num: i32, den: i32) -> i32 {
    let scaled = i64::from(damage) * i64::from(num) / i64::from(den);
    scaled.clamp(0, i64::from(i32::MAX)) as i32
}

/// Status change an attack inflicts besides damage
///
/// Tick counts come from `(base + 1d{roll} + r) / (r + 1)`, `r` being the
/// distance from the centre of the blast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideEffect {
    None,
    Confuse { base: u32, roll: u32 },
    Stun { base: u32, roll: u32 },
    Slow { base: u32, roll: u32 },
    /// Change into another monster if the hit would not kill, otherwise confuse
    Polymorph,
    /// Hurl the target away if the hit would not kill
    Displace,
}

impl SideEffect {
    /// Confusion a failed polymorph falls back to
    pub const CHAOS_CONFUSION: SideEffect = SideEffect::Confuse { base: 5, roll: 11 };

    /// Roll the duration for a target `r` cells from the centre
    pub fn ticks(base: u32, roll: u32, r: u32, rng: &mut GameRng) -> u16 {
        ((base + rng.rnd(roll) + r) / (r + 1)).min(u16::MAX as u32) as u16
    }
}

/// Message class of a hit on a monster
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Outcome {
    Unharmed,
    /// Ordinary damage, reported with a pain message
    #[default]
    Hurt,
    ResistsSomewhat,
    Resists,
    Immune,
    HitHard,
    Confused,
    MoreConfused,
    Dazed,
    MoreDazed,
    Slowed,
    Changed,
    Displaced,
    Dead,
}

impl Outcome {
    /// Text following the monster's name; `None` when a pain or death
    /// message is chosen elsewhere
    pub const fn note(&self) -> Option<&'static str> {
        match self {
            Outcome::Unharmed => Some("is unharmed."),
            Outcome::ResistsSomewhat => Some("resists somewhat."),
            Outcome::Resists => Some("resists."),
            Outcome::Immune => Some("is immune."),
            Outcome::HitHard => Some("is hit hard."),
            Outcome::Confused => Some("looks confused."),
            Outcome::MoreConfused => Some("looks more confused."),
            Outcome::Dazed => Some("is dazed."),
            Outcome::MoreDazed => Some("is more dazed."),
            Outcome::Slowed => Some("starts moving slower."),
            Outcome::Changed => Some("changes!"),
            Outcome::Displaced => Some("disappears!"),
            Outcome::Hurt | Outcome::Dead => None,
        }
    }
}

/// What the table says about one damage type against one monster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub multiplier: Multiplier,
    pub side_effect: SideEffect,
    /// Capabilities the hit reveals
    pub learned: Capabilities,
    /// Breaths the hit reveals
    pub learned_breaths: Breaths,
    pub outcome: Outcome,
}

impl Resolution {
    const fn plain() -> Self {
        Self {
            multiplier: Multiplier::Normal,
            side_effect: SideEffect::None,
            learned: Capabilities::empty(),
            learned_breaths: Breaths::empty(),
            outcome: Outcome::Hurt,
        }
    }

    const fn with(multiplier: Multiplier, outcome: Outcome) -> Self {
        Self {
            multiplier,
            outcome,
            ..Self::plain()
        }
    }

    const fn side(side_effect: SideEffect) -> Self {
        Self {
            side_effect,
            ..Self::plain()
        }
    }

    const fn learning(mut self, learned: Capabilities) -> Self {
        self.learned = learned;
        self
    }

    const fn breath(mut self, breath: Breaths) -> Self {
        self.learned_breaths = breath;
        self
    }
}

/// Elemental immunity for the five basic elements
const fn element_immunity(typ: DamageType) -> Option<Capabilities> {
    match typ {
        DamageType::Lightning => Some(Capabilities::IM_LIGHTNING),
        DamageType::PoisonGas => Some(Capabilities::IM_POISON),
        DamageType::Acid => Some(Capabilities::IM_ACID),
        DamageType::Frost | DamageType::Ice => Some(Capabilities::IM_FROST),
        DamageType::Fire => Some(Capabilities::IM_FIRE),
        _ => None,
    }
}

/// Resist by breathing the element: `factor / (1d6 + 6)`
fn breather(typ: DamageType, race: &PerMonst, factor: i32) -> Option<Resolution> {
    let breath = typ.breath()?;
    race.breathes(breath).then(|| {
        Resolution::with(Multiplier::Resist { factor }, Outcome::Resists).breath(breath)
    })
}

/// Look up how `race` takes `typ`
pub fn resolve(typ: DamageType, race: &PerMonst) -> Resolution {
    if let Some(flag) = element_immunity(typ) {
        if race.has(flag) {
            return Resolution::with(Multiplier::Immune, Outcome::Immune).learning(flag);
        }
    }

    match typ {
        DamageType::Arrow
        | DamageType::MagicMissile
        | DamageType::Mana
        | DamageType::Meteor
        | DamageType::Lightning
        | DamageType::PoisonGas
        | DamageType::Acid
        | DamageType::Frost
        | DamageType::Fire => Resolution::plain(),

        DamageType::Ice => Resolution::side(SideEffect::Stun { base: 0, roll: 15 }),

        DamageType::HolyOrb => {
            if race.is_evil() {
                Resolution::with(Multiplier::DOUBLE, Outcome::HitHard)
                    .learning(Capabilities::EVIL)
            } else {
                Resolution::plain()
            }
        }

        DamageType::Plasma => {
            if race.has(Capabilities::RES_PLASMA) {
                Resolution::with(Multiplier::Resist { factor: 3 }, Outcome::Resists)
                    .learning(Capabilities::RES_PLASMA)
            } else {
                breather(typ, race, 3).unwrap_or_else(Resolution::plain)
            }
        }

        DamageType::Nether => {
            if race.is_undead() {
                Resolution::with(Multiplier::Blocked, Outcome::Immune)
                    .learning(Capabilities::UNDEAD)
            } else if race.has(Capabilities::RES_NETHER) {
                Resolution::with(Multiplier::Resist { factor: 3 }, Outcome::Resists)
                    .learning(Capabilities::RES_NETHER)
            } else if let Some(res) = breather(typ, race, 3) {
                res
            } else if race.is_evil() {
                Resolution::with(Multiplier::HALF, Outcome::ResistsSomewhat)
                    .learning(Capabilities::EVIL)
            } else {
                Resolution::plain()
            }
        }

        DamageType::Water => {
            if race.has(Capabilities::IM_WATER) {
                Resolution::with(Multiplier::Blocked, Outcome::Immune)
                    .learning(Capabilities::IM_WATER)
            } else {
                Resolution::plain()
            }
        }

        DamageType::Chaos => {
            breather(typ, race, 3).unwrap_or_else(|| Resolution::side(SideEffect::Polymorph))
        }

        DamageType::Shards | DamageType::Time => {
            breather(typ, race, 3).unwrap_or_else(Resolution::plain)
        }

        DamageType::Sound => breather(typ, race, 2)
            .unwrap_or_else(|| Resolution::side(SideEffect::Stun { base: 10, roll: 15 })),

        DamageType::Confusion => {
            if let Some(res) = breather(typ, race, 2) {
                res
            } else if race.resists_confusion() {
                Resolution::with(Multiplier::HALF, Outcome::ResistsSomewhat)
                    .learning(Capabilities::NO_CONFUSION)
            } else {
                Resolution::side(SideEffect::Confuse { base: 10, roll: 15 })
            }
        }

        DamageType::Disenchant => {
            if race.has(Capabilities::RES_DISENCHANT) {
                Resolution::with(Multiplier::Resist { factor: 3 }, Outcome::Resists)
                    .learning(Capabilities::RES_DISENCHANT)
            } else {
                breather(typ, race, 3).unwrap_or_else(Resolution::plain)
            }
        }

        DamageType::Nexus => {
            if race.has(Capabilities::RES_NEXUS) {
                Resolution::with(Multiplier::Resist { factor: 3 }, Outcome::Resists)
                    .learning(Capabilities::RES_NEXUS)
            } else {
                breather(typ, race, 3).unwrap_or_else(Resolution::plain)
            }
        }

        DamageType::Force => breather(typ, race, 3)
            .unwrap_or_else(|| Resolution::side(SideEffect::Stun { base: 0, roll: 15 })),

        DamageType::Inertia => breather(typ, race, 3)
            .unwrap_or_else(|| Resolution::side(SideEffect::Slow { base: 5, roll: 10 })),

        DamageType::Light => {
            if let Some(res) = breather(typ, race, 2) {
                res
            } else if race.hurt_by_light() {
                Resolution::with(Multiplier::DOUBLE, Outcome::HitHard)
                    .learning(Capabilities::HURT_BY_LIGHT)
            } else if race.breathes(Breaths::DARK) {
                Resolution::with(Multiplier::THREE_HALVES, Outcome::HitHard)
                    .breath(Breaths::DARK)
            } else {
                Resolution::plain()
            }
        }

        DamageType::Dark => {
            if let Some(res) = breather(typ, race, 2) {
                res
            } else if race.breathes(Breaths::LIGHT) {
                Resolution::with(Multiplier::THREE_HALVES, Outcome::HitHard)
                    .breath(Breaths::LIGHT)
            } else {
                Resolution::plain()
            }
        }

        DamageType::Gravity => {
            breather(typ, race, 3).unwrap_or_else(|| Resolution::side(SideEffect::Displace))
        }
    }
}

/// How the player takes a damage type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerResolution {
    pub multiplier: Multiplier,
    /// Resisted types skip their secondary effects
    pub resisted: bool,
}

impl PlayerResolution {
    const fn full() -> Self {
        Self {
            multiplier: Multiplier::Normal,
            resisted: false,
        }
    }

    const fn resist(factor: i32) -> Self {
        Self {
            multiplier: Multiplier::Resist { factor },
            resisted: true,
        }
    }
}

/// Element damage: immunity blocks, each of the permanent and the timed
/// resistance divides by three
fn player_element(
    player: &Player,
    immune: Resistances,
    resist: Resistances,
    oppose: u16,
) -> PlayerResolution {
    if player.has(immune) {
        return PlayerResolution {
            multiplier: Multiplier::Blocked,
            resisted: true,
        };
    }
    let layers = player.has(resist) as u32 + (oppose > 0) as u32;
    if layers == 0 {
        return PlayerResolution::full();
    }
    PlayerResolution {
        multiplier: Multiplier::Ratio {
            num: 1,
            den: 3i32.pow(layers),
        },
        resisted: true,
    }
}

fn player_resist(player: &Player, flag: Resistances, factor: i32) -> PlayerResolution {
    if player.has(flag) {
        PlayerResolution::resist(factor)
    } else {
        PlayerResolution::full()
    }
}

/// Look up how the player takes `typ`
pub fn resolve_player(typ: DamageType, player: &Player) -> PlayerResolution {
    let status = &player.status;
    match typ {
        DamageType::Lightning => player_element(
            player,
            Resistances::IM_ELEC,
            Resistances::RES_ELEC,
            status.oppose_elec,
        ),
        DamageType::PoisonGas => player_element(
            player,
            Resistances::IM_POIS,
            Resistances::RES_POIS,
            status.oppose_pois,
        ),
        DamageType::Acid => player_element(
            player,
            Resistances::IM_ACID,
            Resistances::RES_ACID,
            status.oppose_acid,
        ),
        DamageType::Frost | DamageType::Ice => player_element(
            player,
            Resistances::IM_COLD,
            Resistances::RES_COLD,
            status.oppose_cold,
        ),
        DamageType::Fire => player_element(
            player,
            Resistances::IM_FIRE,
            Resistances::RES_FIRE,
            status.oppose_fire,
        ),
        DamageType::Nether => player_resist(player, Resistances::RES_NETHER, 6),
        DamageType::Chaos => player_resist(player, Resistances::RES_CHAOS, 6),
        DamageType::Shards => player_resist(player, Resistances::RES_SHARDS, 6),
        DamageType::Sound => player_resist(player, Resistances::RES_SOUND, 5),
        DamageType::Confusion => player_resist(player, Resistances::RES_CONF, 5),
        DamageType::Disenchant => player_resist(player, Resistances::RES_DISEN, 6),
        DamageType::Nexus => player_resist(player, Resistances::RES_NEXUS, 6),
        DamageType::Light => player_resist(player, Resistances::RES_LIGHT, 4),
        DamageType::Dark => player_resist(player, Resistances::RES_DARK, 4),
        DamageType::Arrow
        | DamageType::MagicMissile
        | DamageType::HolyOrb
        | DamageType::Plasma
        | DamageType::Water
        | DamageType::Force
        | DamageType::Inertia
        | DamageType::Time
        | DamageType::Gravity
        | DamageType::Mana
        | DamageType::Meteor => PlayerResolution::full(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn race() -> PerMonst {
        PerMonst::new(1, "cave orc", 'o', 7)
    }

    #[test]
    fn test_element_immunity() {
        let ghoul = race().with_capabilities(Capabilities::IM_FROST);
        let res = resolve(DamageType::Frost, &ghoul);
        assert_eq!(res.multiplier, Multiplier::Immune);
        assert_eq!(res.side_effect, SideEffect::None);
        assert_eq!(res.learned, Capabilities::IM_FROST);
        assert_eq!(res.outcome, Outcome::Immune);
    }

    #[test]
    fn test_ice_immunity_skips_stun() {
        let wolf = race().with_capabilities(Capabilities::IM_FROST);
        assert_eq!(resolve(DamageType::Ice, &wolf).side_effect, SideEffect::None);
        assert!(matches!(
            resolve(DamageType::Ice, &race()).side_effect,
            SideEffect::Stun { .. }
        ));
    }

    #[test]
    fn test_immunity_precedes_susceptibility() {
        // Every type an immune monster is immune to must resolve as immune,
        // whatever else it is vulnerable to
        let all_caps = Capabilities::all() & !Capabilities::UNDEAD;
        let odd = race().with_capabilities(all_caps);
        for typ in DamageType::iter() {
            if let Some(flag) = element_immunity(typ) {
                assert!(odd.has(flag));
                assert_eq!(resolve(typ, &odd).multiplier, Multiplier::Immune);
            }
        }
    }

    #[test]
    fn test_nether_rules() {
        let skeleton = race().with_capabilities(Capabilities::UNDEAD | Capabilities::EVIL);
        assert_eq!(resolve(DamageType::Nether, &skeleton).multiplier, Multiplier::Blocked);

        let priest = race().with_capabilities(Capabilities::EVIL);
        let res = resolve(DamageType::Nether, &priest);
        assert_eq!(res.multiplier, Multiplier::HALF);
        assert_eq!(res.outcome, Outcome::ResistsSomewhat);

        assert_eq!(resolve(DamageType::Nether, &race()).multiplier, Multiplier::Normal);
    }

    #[test]
    fn test_holy_doubles_vs_evil() {
        let priest = race().with_capabilities(Capabilities::EVIL);
        let res = resolve(DamageType::HolyOrb, &priest);
        assert_eq!(res.multiplier, Multiplier::DOUBLE);
        assert_eq!(res.outcome, Outcome::HitHard);
    }

    #[test]
    fn test_light_and_dark_mirror() {
        let orc = race().with_capabilities(Capabilities::HURT_BY_LIGHT);
        assert_eq!(resolve(DamageType::Light, &orc).multiplier, Multiplier::DOUBLE);

        let shade = race().with_breaths(Breaths::DARK);
        assert_eq!(resolve(DamageType::Light, &shade).multiplier, Multiplier::THREE_HALVES);
        assert!(matches!(
            resolve(DamageType::Dark, &shade).multiplier,
            Multiplier::Resist { factor: 2 }
        ));

        let hound = race().with_breaths(Breaths::LIGHT);
        assert_eq!(resolve(DamageType::Dark, &hound).multiplier, Multiplier::THREE_HALVES);
    }

    #[test]
    fn test_water_blocked_for_water_beings() {
        let elemental = race().with_capabilities(Capabilities::IM_WATER);
        assert_eq!(resolve(DamageType::Water, &elemental).multiplier, Multiplier::Blocked);
    }

    #[test]
    fn test_chaos_polymorph_unless_breather() {
        assert_eq!(resolve(DamageType::Chaos, &race()).side_effect, SideEffect::Polymorph);
        let drake = race().with_breaths(Breaths::CHAOS);
        let res = resolve(DamageType::Chaos, &drake);
        assert_eq!(res.side_effect, SideEffect::None);
        assert_eq!(res.learned_breaths, Breaths::CHAOS);
    }

    #[test]
    fn test_stun_unless_breather() {
        let hound = race().with_breaths(Breaths::SOUND);
        assert_eq!(resolve(DamageType::Sound, &hound).side_effect, SideEffect::None);
        assert!(matches!(
            resolve(DamageType::Sound, &race()).side_effect,
            SideEffect::Stun { base: 10, roll: 15 }
        ));
        let vortex = race().with_breaths(Breaths::FORCE);
        assert_eq!(resolve(DamageType::Force, &vortex).side_effect, SideEffect::None);
    }

    #[test]
    fn test_confusion_resisters() {
        let golem = race().with_capabilities(Capabilities::NO_CONFUSION);
        let res = resolve(DamageType::Confusion, &golem);
        assert_eq!(res.multiplier, Multiplier::HALF);
        assert_eq!(res.side_effect, SideEffect::None);
    }

    #[test]
    fn test_gravity_displaces() {
        assert_eq!(resolve(DamageType::Gravity, &race()).side_effect, SideEffect::Displace);
    }

    #[test]
    fn test_multiplier_application() {
        let mut rng = GameRng::new(1);
        assert_eq!(Multiplier::Immune.apply(24, &mut rng), 2);
        assert_eq!(Multiplier::Immune.apply(5, &mut rng), 0);
        assert_eq!(Multiplier::Blocked.apply(100, &mut rng), 0);
        assert_eq!(Multiplier::Normal.apply(0, &mut rng), 1);
        assert_eq!(Multiplier::HALF.apply(1, &mut rng), 1);
        assert_eq!(Multiplier::DOUBLE.apply(7, &mut rng), 14);
        assert_eq!(Multiplier::THREE_HALVES.apply(7, &mut rng), 10);
    }

    #[test]
    fn test_multiplier_huge_damage_saturates() {
        let mut rng = GameRng::new(1);
        let huge = i32::MAX / 2 + 1;
        assert_eq!(Multiplier::DOUBLE.apply(huge, &mut rng), i32::MAX);
        assert_eq!(Multiplier::THREE_HALVES.apply(i32::MAX, &mut rng), i32::MAX);
        assert_eq!(Multiplier::HALF.apply(i32::MAX, &mut rng), i32::MAX / 2);
        let resisted = Multiplier::Resist { factor: 3 }.apply(i32::MAX, &mut rng);
        assert!((i32::MAX / 4..=i32::MAX / 2).contains(&resisted));
        assert_eq!(Multiplier::Immune.apply(i32::MAX, &mut rng), i32::MAX / 9);
    }

    #[test]
    fn test_resist_fraction_bounds() {
        let mut rng = GameRng::new(77);
        let mut total = 0;
        for _ in 0..600 {
            let dam = Multiplier::Resist { factor: 3 }.apply(120, &mut rng);
            assert!((30..=51).contains(&dam));
            total += dam;
        }
        // Mean of 360 / (1d6 + 6) is about 38.9
        let mean = total / 600;
        assert!((36..=42).contains(&mean));
    }

    #[test]
    fn test_player_elements_stack() {
        let mut p = Player::default();
        assert_eq!(resolve_player(DamageType::Fire, &p).multiplier, Multiplier::Normal);
        p.resistances |= Resistances::RES_FIRE;
        assert_eq!(
            resolve_player(DamageType::Fire, &p).multiplier,
            Multiplier::Ratio { num: 1, den: 3 }
        );
        p.status.oppose_fire = 10;
        assert_eq!(
            resolve_player(DamageType::Fire, &p).multiplier,
            Multiplier::Ratio { num: 1, den: 9 }
        );
        p.resistances |= Resistances::IM_FIRE;
        assert_eq!(resolve_player(DamageType::Fire, &p).multiplier, Multiplier::Blocked);
    }

    #[test]
    fn test_player_high_resists() {
        let mut p = Player::default();
        assert!(!resolve_player(DamageType::Nexus, &p).resisted);
        p.resistances |= Resistances::RES_NEXUS;
        let res = resolve_player(DamageType::Nexus, &p);
        assert!(res.resisted);
        assert_eq!(res.multiplier, Multiplier::Resist { factor: 6 });
    }

    #[test]
    fn test_notes() {
        assert_eq!(Outcome::Dazed.note(), Some("is dazed."));
        assert_eq!(Outcome::Hurt.note(), None);
        assert_eq!(Outcome::Dead.note(), None);
    }
}
