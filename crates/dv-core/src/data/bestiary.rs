//! Stock monster templates (monsters.c)
//!
//! A cross-section of the dungeon: enough kinds to exercise every branch
//! of the resistance table and to give polymorph a populated level band.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::monster::{Breaths, Capabilities, MonsterCatalog, PerMonst, Treasure};

const EVIL: Capabilities = Capabilities::EVIL;
const UNIQUE: Capabilities = Capabilities::UNIQUE;

/// Template ids of the stock catalog, for callers that place monsters
pub mod ids {
    use crate::monster::TemplateId;

    pub const FLOATING_EYE: TemplateId = TemplateId(1);
    pub const JACKAL: TemplateId = TemplateId(2);
    pub const KOBOLD: TemplateId = TemplateId(3);
    pub const CAVE_SPIDER: TemplateId = TemplateId(4);
    pub const GRIP: TemplateId = TemplateId(5);
    pub const YELLOW_MOLD: TemplateId = TemplateId(6);
    pub const SNAGA: TemplateId = TemplateId(7);
    pub const CAVE_ORC: TemplateId = TemplateId(8);
    pub const WORMTONGUE: TemplateId = TemplateId(9);
    pub const BABY_WHITE_DRAGON: TemplateId = TemplateId(10);
    pub const BULLROARER: TemplateId = TemplateId(11);
    pub const SKELETON_ORC: TemplateId = TemplateId(12);
    pub const WHITE_WOLF: TemplateId = TemplateId(13);
    pub const GIANT_FROG: TemplateId = TemplateId(14);
    pub const DARK_ELVEN_PRIEST: TemplateId = TemplateId(15);
    pub const HILL_GIANT: TemplateId = TemplateId(16);
    pub const FIRE_VORTEX: TemplateId = TemplateId(17);
    pub const VAMPIRE: TemplateId = TemplateId(18);
    pub const YOUNG_BLUE_DRAGON: TemplateId = TemplateId(19);
    pub const CHAOS_DRAKE: TemplateId = TemplateId(20);
    pub const WATER_ELEMENTAL: TemplateId = TemplateId(21);
    pub const GRAVITY_HOUND: TemplateId = TemplateId(22);
    pub const IMPACT_HOUND: TemplateId = TemplateId(23);
    pub const LICH: TemplateId = TemplateId(24);
    pub const ANCIENT_RED_DRAGON: TemplateId = TemplateId(25);
    pub const SMAUG: TemplateId = TemplateId(26);
}

/// The stock monster catalog
pub fn bestiary() -> MonsterCatalog {
    MonsterCatalog::new(vec![
        PerMonst::new(1, "floating eye", 'e', 1)
            .with_hit_dice(11, 8)
            .with_exp(1)
            .with_capabilities(Capabilities::HURT_BY_LIGHT | Capabilities::NO_CONFUSION),
        PerMonst::new(2, "jackal", 'C', 1)
            .with_hit_dice(3, 8)
            .with_exp(1)
            .with_capabilities(Capabilities::ANIMAL),
        PerMonst::new(3, "kobold", 'k', 2)
            .with_hit_dice(3, 7)
            .with_exp(5)
            .with_capabilities(EVIL | Capabilities::IM_POISON)
            .with_treasure(Treasure::CARRY_GOLD | Treasure::DROP_60),
        PerMonst::new(4, "cave spider", 'S', 2)
            .with_hit_dice(1, 4)
            .with_exp(1)
            .with_speed(10)
            .with_capabilities(Capabilities::ANIMAL | Capabilities::HURT_BY_LIGHT),
        PerMonst::new(5, "Grip, Farmer Maggot's Dog", 'C', 2)
            .with_hit_dice(5, 6)
            .with_exp(30)
            .with_speed(10)
            .with_capabilities(UNIQUE | Capabilities::ANIMAL),
        PerMonst::new(6, "yellow mold", 'm', 3)
            .with_hit_dice(15, 8)
            .with_exp(9)
            .with_capabilities(Capabilities::NO_CONFUSION | Capabilities::IM_POISON),
        PerMonst::new(7, "snaga", 'o', 6)
            .with_hit_dice(8, 8)
            .with_exp(10)
            .with_capabilities(EVIL | Capabilities::HURT_BY_LIGHT)
            .with_treasure(Treasure::CARRY_GOLD | Treasure::DROP_60),
        PerMonst::new(8, "cave orc", 'o', 7)
            .with_hit_dice(11, 10)
            .with_exp(30)
            .with_capabilities(EVIL | Capabilities::HURT_BY_LIGHT)
            .with_treasure(Treasure::CARRY_GOLD | Treasure::DROP_60),
        PerMonst::new(9, "Wormtongue, Agent of Saruman", 'p', 8)
            .with_hit_dice(28, 10)
            .with_exp(150)
            .with_capabilities(UNIQUE | EVIL | Capabilities::IM_POISON)
            .with_treasure(
                Treasure::CARRY_GOLD
                    | Treasure::CARRY_OBJECT
                    | Treasure::DROP_90
                    | Treasure::DROP_1D2,
            ),
        PerMonst::new(10, "baby white dragon", 'd', 9)
            .with_hit_dice(29, 10)
            .with_exp(35)
            .with_capabilities(Capabilities::DRAGON | EVIL | Capabilities::IM_FROST)
            .with_breaths(Breaths::FROST)
            .with_treasure(Treasure::CARRY_OBJECT | Treasure::DROP_1D2),
        PerMonst::new(11, "Bullroarer the Hobbit", 'h', 10)
            .with_hit_dice(20, 10)
            .with_exp(90)
            .with_capabilities(UNIQUE)
            .with_treasure(Treasure::CARRY_GOLD | Treasure::CARRY_OBJECT | Treasure::DROP_90),
        PerMonst::new(12, "skeleton orc", 's', 10)
            .with_hit_dice(26, 10)
            .with_exp(15)
            .with_capabilities(
                Capabilities::UNDEAD
                    | EVIL
                    | Capabilities::IM_POISON
                    | Capabilities::NO_CONFUSION
                    | Capabilities::NO_SLEEP,
            ),
        PerMonst::new(13, "white wolf", 'C', 12)
            .with_hit_dice(28, 7)
            .with_exp(30)
            .with_speed(20)
            .with_capabilities(Capabilities::ANIMAL | Capabilities::IM_FROST),
        PerMonst::new(14, "giant frog", 'R', 12)
            .with_hit_dice(9, 8)
            .with_exp(40)
            .with_capabilities(Capabilities::ANIMAL),
        PerMonst::new(15, "dark elven priest", 'h', 18)
            .with_hit_dice(7, 10)
            .with_exp(50)
            .with_capabilities(EVIL | Capabilities::HURT_BY_LIGHT)
            .with_treasure(Treasure::CARRY_OBJECT | Treasure::DROP_1D2),
        PerMonst::new(16, "hill giant", 'P', 20)
            .with_hit_dice(16, 10)
            .with_exp(60)
            .with_capabilities(Capabilities::GIANT | EVIL | Capabilities::HURT_BY_ROCK)
            .with_treasure(Treasure::CARRY_GOLD | Treasure::DROP_90),
        PerMonst::new(17, "fire vortex", 'v', 21)
            .with_hit_dice(9, 9)
            .with_exp(100)
            .with_speed(20)
            .with_capabilities(Capabilities::IM_FIRE | Capabilities::NO_CONFUSION)
            .with_breaths(Breaths::FIRE),
        PerMonst::new(18, "vampire", 'V', 27)
            .with_hit_dice(25, 12)
            .with_exp(175)
            .with_capabilities(
                Capabilities::UNDEAD
                    | EVIL
                    | Capabilities::HURT_BY_LIGHT
                    | Capabilities::IM_POISON
                    | Capabilities::RES_NETHER,
            )
            .with_treasure(Treasure::CARRY_GOLD | Treasure::CARRY_OBJECT | Treasure::DROP_60),
        PerMonst::new(19, "young blue dragon", 'd', 29)
            .with_hit_dice(27, 10)
            .with_exp(300)
            .with_capabilities(Capabilities::DRAGON | EVIL | Capabilities::IM_LIGHTNING)
            .with_breaths(Breaths::LIGHTNING)
            .with_treasure(Treasure::CARRY_GOLD | Treasure::CARRY_OBJECT | Treasure::DROP_2D2),
        PerMonst::new(20, "chaos drake", 'd', 33)
            .with_hit_dice(50, 10)
            .with_exp(1400)
            .with_capabilities(Capabilities::DRAGON | EVIL)
            .with_breaths(Breaths::CHAOS | Breaths::DISENCHANT)
            .with_treasure(Treasure::CARRY_OBJECT | Treasure::DROP_2D2),
        PerMonst::new(21, "water elemental", 'E', 33)
            .with_hit_dice(25, 8)
            .with_exp(325)
            .with_capabilities(
                EVIL | Capabilities::IM_WATER | Capabilities::IM_POISON | Capabilities::NO_SLEEP,
            ),
        PerMonst::new(22, "gravity hound", 'Z', 35)
            .with_hit_dice(35, 10)
            .with_exp(500)
            .with_speed(20)
            .with_capabilities(Capabilities::ANIMAL)
            .with_breaths(Breaths::GRAVITY),
        PerMonst::new(23, "impact hound", 'Z', 35)
            .with_hit_dice(25, 10)
            .with_exp(500)
            .with_speed(20)
            .with_capabilities(Capabilities::ANIMAL)
            .with_breaths(Breaths::FORCE),
        PerMonst::new(24, "lich", 'L', 34)
            .with_hit_dice(30, 10)
            .with_exp(800)
            .with_capabilities(
                Capabilities::UNDEAD
                    | EVIL
                    | Capabilities::IM_FROST
                    | Capabilities::IM_POISON
                    | Capabilities::NO_CONFUSION,
            )
            .with_treasure(Treasure::CARRY_OBJECT | Treasure::DROP_1D2),
        PerMonst::new(25, "ancient red dragon", 'D', 40)
            .with_hit_dice(88, 10)
            .with_exp(2500)
            .with_capabilities(
                Capabilities::DRAGON | EVIL | Capabilities::POWERFUL | Capabilities::IM_FIRE,
            )
            .with_breaths(Breaths::FIRE)
            .with_treasure(Treasure::CARRY_GOLD | Treasure::CARRY_OBJECT | Treasure::DROP_4D2),
        PerMonst::new(26, "Smaug the Golden", 'D', 50)
            .with_hit_dice(100, 20)
            .with_exp(10000)
            .with_capabilities(
                UNIQUE
                    | Capabilities::DRAGON
                    | EVIL
                    | Capabilities::POWERFUL
                    | Capabilities::IM_FIRE,
            )
            .with_breaths(Breaths::FIRE)
            .with_treasure(Treasure::CARRY_GOLD | Treasure::CARRY_OBJECT | Treasure::DROP_4D2),
    ])
}
