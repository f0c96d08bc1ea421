//! Scenario files: a map, a player, some monsters and a list of attacks

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;

use dv_core::combat::DamageType;
use dv_core::dungeon::{Direction, Level, Pos, Terrain};
use dv_core::magic::{
    self, Aim, AttackKind, AttackReport, breath_damage, decode_damage_type,
};
use dv_core::monster::MonsterId;
use dv_core::object::{ItemClass, Object};
use dv_core::player::{Player, Resistances};
use dv_core::world::{EffectContext, EngineOptions, Scene};

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub map: MapSpec,
    pub player: PlayerSpec,
    #[serde(default)]
    pub monsters: Vec<MonsterSpec>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    pub attacks: Vec<AttackSpec>,
}

/// A walled room with optional interior walls
#[derive(Debug, Deserialize)]
pub struct MapSpec {
    pub height: usize,
    pub width: usize,
    #[serde(default)]
    pub walls: Vec<Pos>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerSpec {
    pub pos: Pos,
    pub hp: Option<i32>,
    /// Flag names, e.g. "RES_FIRE"
    #[serde(default)]
    pub resistances: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonsterSpec {
    /// Catalog name, e.g. "cave orc"
    pub race: String,
    pub pos: Pos,
    /// Rolled from the hit dice when absent
    pub hp: Option<i32>,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ObjectSpec {
    pub class: ItemClass,
    pub name: String,
    pub pos: Pos,
    #[serde(default)]
    pub artifact: bool,
}

/// A damage type by name, or by its raw code
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Code(u8),
    Name(DamageType),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackSpec {
    Bolt {
        element: Element,
        direction: Direction,
        dam: i32,
        desc: Option<String>,
    },
    Line {
        element: Element,
        direction: Direction,
        dam: i32,
        desc: Option<String>,
    },
    Ball {
        element: Element,
        direction: Option<Direction>,
        target: Option<Pos>,
        dam: i32,
        desc: Option<String>,
    },
    /// `monster` indexes the scenario's monster list
    Breath {
        monster: usize,
        element: Element,
        /// Derived from the breather's hit points when absent
        dam: Option<i32>,
        target: Option<Pos>,
    },
    MonsterBolt {
        monster: usize,
        element: Element,
        dam: i32,
        desc: Option<String>,
    },
}

impl AttackSpec {
    fn kind(&self) -> AttackKind {
        match self {
            AttackSpec::Bolt { .. } => AttackKind::Bolt,
            AttackSpec::Line { .. } => AttackKind::Line,
            AttackSpec::Ball { .. } => AttackKind::Ball,
            AttackSpec::Breath { .. } => AttackKind::Breath,
            AttackSpec::MonsterBolt { .. } => AttackKind::MonsterBolt,
        }
    }

    fn element(&self) -> Element {
        match self {
            AttackSpec::Bolt { element, .. }
            | AttackSpec::Line { element, .. }
            | AttackSpec::Ball { element, .. }
            | AttackSpec::Breath { element, .. }
            | AttackSpec::MonsterBolt { element, .. } => *element,
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// Lay out the level and spawn everything
    ///
    /// Returns the scene and the ids of the spawned monsters, in file order.
    pub fn build(&self, options: EngineOptions) -> Result<(Scene, Vec<MonsterId>)> {
        let mut level = Level::with_room(self.map.height, self.map.width);
        for &pos in &self.map.walls {
            if !level.in_bounds(pos) {
                bail!("wall at {pos} is off the map");
            }
            level.set_terrain(pos, Terrain::Granite);
        }

        let mut player = Player::new(self.player.pos);
        if let Some(hp) = self.player.hp {
            player.hp = hp;
            player.max_hp = hp;
        }
        for name in &self.player.resistances {
            let flag = Resistances::from_name(name)
                .ok_or_else(|| anyhow!("unknown resistance {name:?}"))?;
            player.resistances |= flag;
        }

        let mut scene = Scene::new(level, player, options);
        let mut spawned = Vec::with_capacity(self.monsters.len());
        for spec in &self.monsters {
            let template = scene
                .monsters
                .by_name(&spec.race)
                .map(|race| race.id)
                .ok_or_else(|| anyhow!("no monster called {:?}", spec.race))?;
            let id = match spec.hp {
                Some(hp) => scene.spawn_with_hp(template, spec.pos, hp),
                None => scene.spawn(template, spec.pos),
            }
            .with_context(|| format!("placing {} at {}", spec.race, spec.pos))?;
            if let Some(monster) = scene.level.monster_mut(id) {
                monster.visible = spec.visible;
            }
            spawned.push(id);
        }

        for spec in &self.objects {
            let mut object = Object::new(spec.class, &spec.name);
            object.artifact = spec.artifact;
            scene
                .level
                .add_object(object, spec.pos)
                .with_context(|| format!("placing {} at {}", spec.name, spec.pos))?;
        }

        Ok((scene, spawned))
    }
}

fn monster_at(spawned: &[MonsterId], index: usize) -> Result<MonsterId> {
    spawned
        .get(index)
        .copied()
        .ok_or_else(|| anyhow!("attack refers to monster #{index}, scenario has {}", spawned.len()))
}

/// Run one attack against the scene
pub fn run_attack(
    ctx: &mut EffectContext<'_>,
    spawned: &[MonsterId],
    attack: &AttackSpec,
) -> Result<AttackReport> {
    let kind = attack.kind();
    let origin = ctx.player.pos;
    let typ = match attack.element() {
        Element::Name(typ) => typ,
        Element::Code(code) => match decode_damage_type(kind, origin, code) {
            Ok(typ) => typ,
            Err(report) => return Ok(report),
        },
    };
    let name = |desc: &Option<String>, shape: &str| {
        desc.clone()
            .unwrap_or_else(|| format!("{} {shape}", typ.name()))
    };

    let report = match attack {
        AttackSpec::Bolt { direction, dam, desc, .. } => {
            magic::fire_bolt(ctx, origin, *direction, typ, *dam, &name(desc, "bolt"))
        }
        AttackSpec::Line { direction, dam, desc, .. } => {
            magic::fire_line(ctx, origin, *direction, typ, *dam, &name(desc, "beam"))
        }
        AttackSpec::Ball { direction, target, dam, desc, .. } => {
            let aim = match (target, direction) {
                (Some(target), _) => Aim::Target(*target),
                (None, Some(direction)) => Aim::Direction(*direction),
                (None, None) => Aim::Target(origin),
            };
            magic::fire_ball(ctx, origin, aim, typ, *dam, &name(desc, "ball"))
        }
        AttackSpec::Breath { monster, dam, target, .. } => {
            let id = monster_at(spawned, *monster)?;
            let dam = match dam {
                Some(dam) => *dam,
                None => {
                    let hp = ctx.level.monster(id).map_or(0, |m| m.hp);
                    breath_damage(typ, hp).unwrap_or(hp / 6)
                }
            };
            magic::breathe(ctx, id, typ, target.unwrap_or(origin), dam)
        }
        AttackSpec::MonsterBolt { monster, dam, desc, .. } => {
            let id = monster_at(spawned, *monster)?;
            magic::monster_bolt(ctx, id, typ, *dam, &name(desc, "bolt"))
        }
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::world::NullPresenter;

    const SAMPLE: &str = r#"{
        "name": "orc corridor",
        "map": { "height": 11, "width": 21, "walls": [{ "row": 3, "col": 10 }] },
        "player": { "pos": { "row": 5, "col": 2 }, "resistances": ["RES_FIRE"] },
        "monsters": [
            { "race": "cave orc", "pos": { "row": 5, "col": 6 }, "hp": 11 },
            { "race": "ancient red dragon", "pos": { "row": 5, "col": 15 }, "hp": 600 }
        ],
        "attacks": [
            { "kind": "bolt", "element": "frost", "direction": "East", "dam": 4 },
            { "kind": "ball", "element": 99, "dam": 10 },
            { "kind": "breath", "monster": 1, "element": "fire" }
        ]
    }"#;

    #[test]
    fn test_sample_runs() {
        let scenario: Scenario = serde_json::from_str(SAMPLE).unwrap();
        let options = EngineOptions {
            seed: Some(1),
            ..EngineOptions::default()
        };
        let (mut scene, spawned) = scenario.build(options).unwrap();
        assert_eq!(spawned.len(), 2);
        assert!(scene.level.blocks_at(Pos::new(3, 10)));
        assert!(scene.player.has(Resistances::RES_FIRE));

        let mut presenter = NullPresenter;
        let mut ctx = scene.context(&mut presenter);
        let reports: Vec<AttackReport> = scenario
            .attacks
            .iter()
            .map(|attack| run_attack(&mut ctx, &spawned, attack).unwrap())
            .collect();

        assert_eq!(reports[0].hits.len(), 1);
        assert_eq!(reports[0].hits[0].damage, 4);
        assert!(reports[1].is_noop());
        assert_eq!(reports[1].errors.len(), 1);
        assert_eq!(reports[2].kind, AttackKind::Breath);
        assert!(reports[2].player.is_some());
    }

    #[test]
    fn test_unknown_race_is_an_error() {
        let json = r#"{
            "name": "bad",
            "map": { "height": 5, "width": 5 },
            "player": { "pos": { "row": 2, "col": 2 } },
            "monsters": [{ "race": "balrog of the north", "pos": { "row": 1, "col": 1 } }],
            "attacks": []
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        let err = scenario.build(EngineOptions::default()).unwrap_err();
        assert!(err.to_string().contains("balrog"));
    }
}
