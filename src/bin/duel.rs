//! Headless Duel Runner
//!
//! Pits the player against one NPC until someone dies or the turn limit
//! runs out. Prints the combat log as text, or the event history as JSON.

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use survival_melee::combat::{
    CombatEngine, CombatEvent, CombatTables, EquipmentSlot, Item, MessageTemplates, Stance,
    StatusBoard, Weapon,
};
use survival_melee::core::{CombatConfig, CombatError, Result};
use survival_melee::entity::{Combatant, HumanBody, Stats};

/// Headless Duel Runner - seeded player vs NPC melee
#[derive(Parser, Debug)]
#[command(name = "duel")]
#[command(about = "Run a seeded melee duel and print the combat log")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum turns before the duel is called a draw
    #[arg(long, default_value_t = 30)]
    turns: u64,

    /// Player weapon preset, or "fists"
    #[arg(long, default_value = "machete")]
    weapon: String,

    /// Player stance preset
    #[arg(long, default_value = "balanced")]
    stance: String,

    /// Enemy display name
    #[arg(long, default_value = "bandit")]
    enemy: String,

    /// Enemy weapon preset, or "fists"
    #[arg(long, default_value = "crowbar")]
    enemy_weapon: String,

    /// Targeting and armor tables (TOML); built-in tables when omitted
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Message templates (TOML); built-in templates when omitted
    #[arg(long)]
    messages: Option<PathBuf>,

    /// Engine config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging of every pipeline stage
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct DuelReport {
    seed: u64,
    turns: u64,
    winner: Option<String>,
    events: Vec<CombatEvent>,
}

fn pick_weapon(name: &str) -> Result<Option<Weapon>> {
    if name == "fists" {
        return Ok(None);
    }
    Weapon::preset(name)
        .map(Some)
        .ok_or_else(|| CombatError::InvalidConfig(format!("unknown weapon '{name}'")))
}

/// One round of blows; stunned or dead combatants lose their swing
fn exchange_blows<R: Rng>(
    engine: &mut CombatEngine<'_, R, StatusBoard>,
    player: &mut Combatant,
    enemy: &mut Combatant,
) {
    if !player.is_dead() && !engine.status().is_stunned(player.id) {
        engine.resolve_attack(player, enemy, None);
    }
    if !enemy.is_dead() && !engine.status().is_stunned(enemy.id) {
        engine.resolve_attack(enemy, player, None);
    }
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("duel failed: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let tables = match &args.tables {
        Some(path) => CombatTables::load(path)?,
        None => CombatTables::default(),
    };
    let templates = match &args.messages {
        Some(path) => MessageTemplates::load(path)?,
        None => MessageTemplates::default(),
    };
    let config = match &args.config {
        Some(path) => CombatConfig::load(path)?,
        None => CombatConfig::default(),
    };
    let stance = Stance::preset(&args.stance)
        .ok_or_else(|| CombatError::InvalidConfig(format!("unknown stance '{}'", args.stance)))?;

    let mut player = Combatant::player()
        .with_stats(Stats::uniform(11))
        .with_anatomy(HumanBody::new())
        .with_stance(stance)
        .with_item(EquipmentSlot::Torso, Item::new("leather jacket", 2));
    player.weapon = pick_weapon(&args.weapon)?;

    let mut enemy = Combatant::npc(args.enemy.clone())
        .with_stats(Stats::uniform(10))
        .with_anatomy(HumanBody::new())
        .with_item(EquipmentSlot::Head, Item::new("hard hat", 1));
    enemy.weapon = pick_weapon(&args.enemy_weapon)?;

    let mut engine = CombatEngine::new(&tables, ChaCha8Rng::seed_from_u64(seed))
        .with_config(config)
        .with_templates(templates)
        .with_status(StatusBoard::new());

    tracing::info!(seed, weapon = %args.weapon, enemy = %args.enemy, "duel started");

    let mut winner = None;
    let mut turns = 0;
    while turns < args.turns {
        turns += 1;
        engine.set_turn(turns);

        exchange_blows(&mut engine, &mut player, &mut enemy);

        for combatant in [&mut player, &mut enemy] {
            if let Some(anatomy) = combatant.anatomy.as_deref_mut() {
                anatomy.tick();
            }
        }
        engine.observe(&enemy);
        engine.status_mut().tick();

        if args.format == "text" {
            for message in engine.drain_messages() {
                println!("[turn {:>2}] {}", message.turn, message.text);
            }
        }

        if enemy.is_dead() {
            winner = Some(player.name.clone());
            break;
        }
        if player.is_dead() {
            winner = Some(enemy.name.clone());
            break;
        }
    }

    match args.format.as_str() {
        "json" => {
            let report = DuelReport {
                seed,
                turns,
                winner,
                events: engine.events().iter().cloned().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            match winner {
                Some(name) => println!("{name} won after {turns} turns (seed {seed})"),
                None => println!("no winner after {turns} turns (seed {seed})"),
            }
        }
    }

    Ok(())
}
