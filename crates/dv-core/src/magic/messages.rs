//! Message text for hits, deaths and blasts (monster_name, pain_message)

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::monster::{Monster, PerMonst};

/// How a monster is referred to
///
/// Unseen monsters are "it"; uniques go by their bare name; everything else
/// takes the definite article.
pub fn monster_name(monster: &Monster, race: &PerMonst, capitalize: bool) -> String {
    if !monster.visible {
        return if capitalize { "It" } else { "it" }.to_string();
    }
    if race.is_unique() {
        return race.name.clone();
    }
    let article = if capitalize { "The" } else { "the" };
    format!("{article} {}", race.name)
}

/// Groups of monsters that complain alike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Voice {
    /// Molds, jellies, vortices, eyes
    Silent,
    /// Dogs and hounds
    Canine,
    /// Insects, rodents, reptiles and the like
    Critter,
    Other,
}

impl Voice {
    fn of(symbol: char) -> Self {
        match symbol {
            'j' | 'Q' | 'v' | 'm' | 'e' => Voice::Silent,
            'C' | 'Z' => Voice::Canine,
            'K' | 'c' | 'a' | 'U' | 'q' | 'R' | 'X' | 'b' | 'F' | 'J' | 'l' | 'r' | 's' | 'S'
            | 't' => Voice::Critter,
            _ => Voice::Other,
        }
    }

    /// Lines from lightest to worst wound
    const fn lines(self) -> [&'static str; 7] {
        match self {
            Voice::Silent => [
                "barely notices.",
                "flinches.",
                "squelches.",
                "draws back in pain.",
                "writhes about.",
                "writhes in agony.",
                "jerks limply.",
            ],
            Voice::Canine => [
                "shrugs off the attack.",
                "snarls with pain.",
                "yelps in pain.",
                "howls in pain.",
                "howls in agony.",
                "writhes in agony.",
                "yelps feebly.",
            ],
            Voice::Critter => [
                "ignores the attack.",
                "grunts with pain.",
                "squeals in pain.",
                "shrieks in pain.",
                "shrieks in agony.",
                "writhes in agony.",
                "cries out feebly.",
            ],
            Voice::Other => [
                "shrugs off the attack.",
                "grunts with pain.",
                "cries out in pain.",
                "screams in pain.",
                "screams in agony.",
                "writhes in agony.",
                "cries out feebly.",
            ],
        }
    }
}

/// Reaction to a hit that did not kill
///
/// Chosen by what fraction of its pre-hit hit points the monster kept.
pub fn pain_message(symbol: char, hp_after: i32, damage: i32) -> &'static str {
    if damage <= 0 {
        return "is unharmed.";
    }
    let before = (hp_after + damage).max(1) as i64;
    let percentage = hp_after.max(0) as i64 * 100 / before;
    let index = match percentage {
        p if p > 95 => 0,
        p if p > 75 => 1,
        p if p > 50 => 2,
        p if p > 35 => 3,
        p if p > 20 => 4,
        p if p > 10 => 5,
        _ => 6,
    };
    Voice::of(symbol).lines()[index]
}

/// Line for a killing blow
pub const fn death_message(race_nonliving: bool) -> &'static str {
    if race_nonliving {
        "is destroyed."
    } else {
        "dies in a fit of agony."
    }
}

/// Full sentence: subject plus predicate
pub fn sentence(name: &str, predicate: &str) -> String {
    format!("{name} {predicate}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Pos;
    use crate::monster::{Capabilities, TemplateId};

    #[test]
    fn test_names() {
        let orc = PerMonst::new(8, "cave orc", 'o', 7);
        let mut m = Monster::with_hp(TemplateId(8), Pos::new(1, 1), 10);
        assert_eq!(monster_name(&m, &orc, true), "The cave orc");
        assert_eq!(monster_name(&m, &orc, false), "the cave orc");
        m.visible = false;
        assert_eq!(monster_name(&m, &orc, true), "It");

        let grip = PerMonst::new(5, "Grip, Farmer Maggot's Dog", 'C', 2)
            .with_capabilities(Capabilities::UNIQUE);
        m.visible = true;
        assert_eq!(monster_name(&m, &grip, false), "Grip, Farmer Maggot's Dog");
    }

    #[test]
    fn test_pain_thresholds() {
        assert_eq!(pain_message('o', 99, 1), "shrugs off the attack.");
        assert_eq!(pain_message('o', 60, 40), "cries out in pain.");
        assert_eq!(pain_message('o', 1, 99), "cries out feebly.");
        assert_eq!(pain_message('C', 40, 60), "howls in pain.");
        assert_eq!(pain_message('m', 80, 20), "flinches.");
        assert_eq!(pain_message('S', 15, 85), "writhes in agony.");
        assert_eq!(pain_message('o', 10, 0), "is unharmed.");
    }

    #[test]
    fn test_death_lines() {
        assert_eq!(death_message(true), "is destroyed.");
        assert_eq!(death_message(false), "dies in a fit of agony.");
    }
}
