//! Effect context: everything one attack may read or change
//!
//! Attacks run to completion against a single `EffectContext`; nothing else
//! touches the level while one is in flight.

use super::{EngineError, EngineOptions, Presenter};
use crate::data;
use crate::dungeon::{Level, Pos};
use crate::monster::{CreatureMemory, Monster, MonsterCatalog, MonsterId, TemplateId};
use crate::object::ItemCatalog;
use crate::player::Player;
use crate::rng::GameRng;
use crate::world::Color;

/// Borrowed game state handed to the effect engine
pub struct EffectContext<'a> {
    pub level: &'a mut Level,
    pub player: &'a mut Player,
    pub rng: &'a mut GameRng,
    pub monsters: &'a MonsterCatalog,
    pub items: &'a ItemCatalog,
    pub memory: &'a mut CreatureMemory,
    pub presenter: &'a mut dyn Presenter,
    pub options: &'a EngineOptions,
}

impl EffectContext<'_> {
    pub fn message(&mut self, text: &str) {
        self.presenter.show_message(text);
    }

    /// Draw a projectile frame, when animation is on
    pub fn draw(&mut self, pos: Pos, glyph: char, color: Color) {
        if self.options.animate {
            self.presenter.draw_cell(pos, glyph, color);
        }
    }

    pub fn restore(&mut self, pos: Pos) {
        if self.options.animate {
            self.presenter.restore_cell(pos);
        }
    }

    pub fn pause(&mut self, ms: u32) {
        if self.options.animate && ms > 0 {
            self.presenter.pause(ms);
        }
    }
}

/// Owned game state, for callers that do not keep their own
#[derive(Debug, Clone)]
pub struct Scene {
    pub level: Level,
    pub player: Player,
    pub rng: GameRng,
    pub monsters: MonsterCatalog,
    pub items: ItemCatalog,
    pub memory: CreatureMemory,
    pub options: EngineOptions,
}

impl Scene {
    /// Build a scene with the stock bestiary and item list
    pub fn new(level: Level, player: Player, options: EngineOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => GameRng::new(seed),
            #[cfg(feature = "std")]
            None => GameRng::from_entropy(),
            #[cfg(not(feature = "std"))]
            None => GameRng::new(0),
        };
        Self {
            level,
            player,
            rng,
            monsters: data::bestiary(),
            items: data::item_kinds(),
            memory: CreatureMemory::new(),
            options,
        }
    }

    pub fn context<'a>(&'a mut self, presenter: &'a mut dyn Presenter) -> EffectContext<'a> {
        EffectContext {
            level: &mut self.level,
            player: &mut self.player,
            rng: &mut self.rng,
            monsters: &self.monsters,
            items: &self.items,
            memory: &mut self.memory,
            presenter,
            options: &self.options,
        }
    }

    /// Roll a monster from the catalog and place it
    pub fn spawn(&mut self, template: TemplateId, pos: Pos) -> Result<MonsterId, EngineError> {
        let race = self.monsters.get(template)?;
        let monster = Monster::spawn(race, pos, &mut self.rng);
        self.level.add_monster(monster)
    }

    /// Place a monster with a fixed hit point total
    pub fn spawn_with_hp(
        &mut self,
        template: TemplateId,
        pos: Pos,
        hp: i32,
    ) -> Result<MonsterId, EngineError> {
        self.monsters.get(template)?;
        self.level.add_monster(Monster::with_hp(template, pos, hp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{NullPresenter, RecordingPresenter};

    fn scene() -> Scene {
        let options = EngineOptions {
            seed: Some(3),
            ..EngineOptions::default()
        };
        Scene::new(Level::with_room(12, 20), Player::new(Pos::new(5, 5)), options)
    }

    #[test]
    fn test_seeded_scene_is_reproducible() {
        let mut a = scene();
        let mut b = scene();
        assert_eq!(a.rng.rnd(1000), b.rng.rnd(1000));
    }

    #[test]
    fn test_spawn_unknown_template() {
        let mut s = scene();
        assert!(matches!(
            s.spawn(TemplateId(60000), Pos::new(2, 2)),
            Err(EngineError::UnknownTemplate { .. })
        ));
    }

    #[test]
    fn test_animation_gated_by_option() {
        let mut s = scene();
        let mut rec = RecordingPresenter::new();
        {
            let mut ctx = s.context(&mut rec);
            ctx.draw(Pos::new(1, 1), '*', Color::Red);
            ctx.pause(75);
            ctx.message("You feel a draft.");
        }
        assert_eq!(rec.events.len(), 1);

        s.options.animate = true;
        let mut rec = RecordingPresenter::new();
        {
            let mut ctx = s.context(&mut rec);
            ctx.draw(Pos::new(1, 1), '*', Color::Red);
            ctx.pause(75);
        }
        assert_eq!(rec.events.len(), 2);

        let mut null = NullPresenter;
        s.context(&mut null).message("nothing");
    }
}
