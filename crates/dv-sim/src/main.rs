//! dv-sim: run effect scenarios headless
//!
//! Loads a scenario file, fires its attacks in order and prints what
//! happened. Logs go to stderr; filter them with RUST_LOG.

mod scenario;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dv_core::dungeon::Pos;
use dv_core::magic::AttackReport;
use dv_core::world::{Color, EngineOptions, Presenter};

use scenario::{Scenario, run_attack};

/// Fire bolts, balls and breaths at a scripted dungeon
#[derive(Parser, Debug)]
#[command(name = "dv-sim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Engine options file (JSON); defaults apply otherwise
    #[arg(short = 'o', long = "options")]
    options: Option<PathBuf>,

    /// Seed for the random generator
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Print every projectile frame and honour the animation pauses
    #[arg(short = 'a', long = "animate")]
    animate: bool,
}

/// Prints messages to stdout and, when animating, each frame
struct Console {
    animate: bool,
}

impl Presenter for Console {
    fn draw_cell(&mut self, pos: Pos, glyph: char, color: Color) {
        if self.animate {
            println!("    {glyph} at {pos} ({color})");
        }
    }

    fn show_message(&mut self, text: &str) {
        println!("  {text}");
    }

    fn pause(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms.into()));
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn summarize(report: &AttackReport) -> String {
    let mut line = format!(
        "{} of {}: {} hit, {} killed",
        report.kind,
        report.damage_type,
        report.hits.len(),
        report.killed().count()
    );
    if let Some(center) = report.center {
        line.push_str(&format!(", burst at {center} radius {}", report.radius));
    }
    if !report.destroyed.is_empty() {
        line.push_str(&format!(", {} item(s) destroyed", report.destroyed.len()));
    }
    if let Some(player) = &report.player {
        line.push_str(&format!(", player took {}", player.damage));
    }
    if !report.errors.is_empty() {
        line.push_str(&format!(", {} error(s)", report.errors.len()));
    }
    line
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut options = match &args.options {
        Some(path) => EngineOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => EngineOptions::default(),
    };
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    options.animate |= args.animate;
    init_logging(&options.log_level);

    let scenario = Scenario::load(&args.scenario)?;
    tracing::info!(name = %scenario.name, attacks = scenario.attacks.len(), "scenario loaded");

    let (mut scene, spawned) = scenario.build(options.clone())?;
    let mut console = Console {
        animate: options.animate,
    };

    println!("== {} ==", scenario.name);
    for (n, attack) in scenario.attacks.iter().enumerate() {
        println!("[{}]", n + 1);
        let mut ctx = scene.context(&mut console);
        let report = run_attack(&mut ctx, &spawned, attack)
            .with_context(|| format!("attack {}", n + 1))?;
        println!("  -> {}", summarize(&report));
        if scene.player.dead {
            println!("You have died.");
            break;
        }
    }

    println!("-- survivors --");
    for monster in scene.level.monsters().iter() {
        let name = scene
            .monsters
            .get(monster.template)
            .map(|race| race.name.as_str())
            .unwrap_or("?");
        println!("  {name} at {}: {}/{} hp", monster.pos, monster.hp, monster.max_hp);
    }
    println!("player: {}/{} hp, {} exp", scene.player.hp, scene.player.max_hp, scene.player.exp);
    Ok(())
}
