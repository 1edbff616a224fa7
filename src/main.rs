//! gridmotion headless demo.
//!
//! Loads a level layout, spawns its tanks and runs the physics tick for a
//! fixed number of steps, logging contacts and final positions. There is no
//! window: the point is to watch the collision core at work.
//!
//! # Main Loop
//!
//! 1. Read `config.ini` (or `--config`), falling back to defaults
//! 2. Load the level layout (`--level`) or the built-in arena
//! 3. Each tick: AI fires → physics tick → contact reactions → spawn timers
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --ticks 300
//! ```

use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use gridmotion::components::mapposition::MapPosition;
use gridmotion::components::tank::Tank;
use gridmotion::events::contact::ContactEvent;
use gridmotion::game::{ai_fire_system, load_level, projectile_contact_system, tank_timer_system};
use gridmotion::resources::engineconfig::EngineConfig;
use gridmotion::resources::levellayout::LevelLayout;
use gridmotion::resources::physicsworld::PhysicsWorld;
use gridmotion::systems::physics::{physics_update, setup_physics};

const DEFAULT_LEVEL: &str = r#"{
    "cell_size": 16.0,
    "borders": true,
    "grid": [
        "..........",
        ".BB....CC.",
        ".BB....CC.",
        "....WW....",
        "....WW....",
        ".TT....BB.",
        ".TT....BB.",
        "....E....."
    ],
    "legend": {
        "B": { "kind": "brick_wall", "subdivide": true },
        "C": { "kind": "concrete_wall" },
        "W": { "kind": "water" },
        "T": { "kind": "trees" },
        "E": { "kind": "eagle" }
    },
    "tanks": [
        { "x": 0.0, "y": 112.0, "facing": "down", "ai": true },
        { "x": 144.0, "y": 112.0, "facing": "left", "ai": true },
        { "x": 48.0, "y": 0.0, "facing": "up", "ai": false, "shield": true }
    ]
}"#;

/// gridmotion headless tank arena
#[derive(Parser)]
#[command(version, about = "Runs the grid-aligned collision core on a tank arena without a window.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON level layout. The built-in arena is used when omitted.
    #[arg(long, value_name = "PATH")]
    level: Option<String>,

    /// Number of ticks to simulate (overrides the config file).
    #[arg(long)]
    ticks: Option<u32>,

    /// Write a default configuration file and exit.
    /// Optionally provide a path (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    write_config: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write defaults and quit
    if let Some(maybe_path) = cli.write_config {
        let config = match maybe_path {
            Some(path) => EngineConfig::with_path(path),
            None => EngineConfig::new(),
        };
        if let Err(e) = config.save_to_file() {
            log::error!("{e}");
            std::process::exit(1);
        }
        return;
    }

    let mut config = match cli.config {
        Some(path) => EngineConfig::with_path(path),
        None => EngineConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{e}, using defaults");
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }

    let layout = match cli.level.as_deref() {
        Some(path) => match LevelLayout::load_from_file(path) {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("Failed to load level {}: {}, using built-in arena", path, e);
                builtin_level()
            }
        },
        None => builtin_level(),
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(config.physics_config());
    setup_physics(&mut world);
    world.insert_resource(config.clone());

    let tanks = load_level(&mut world, &layout, &config);

    let mut pre_physics = Schedule::default();
    pre_physics.add_systems(ai_fire_system);
    let mut post_physics = Schedule::default();
    post_physics.add_systems((projectile_contact_system, tank_timer_system).chain());

    let mut contact_reader = world
        .resource::<Messages<ContactEvent>>()
        .get_cursor();

    // --------------- Main loop ---------------
    let mut contacts_seen = 0usize;
    for tick in 0..config.ticks {
        pre_physics.run(&mut world);
        physics_update(&mut world, config.fixed_dt);
        post_physics.run(&mut world);

        let messages = world.resource::<Messages<ContactEvent>>();
        for contact in contact_reader.read(messages) {
            contacts_seen += 1;
            log::debug!(
                "tick {}: {:?} touched {:?} ({:?}, collider {})",
                tick,
                contact.subject,
                contact.other,
                contact.direction,
                contact.collider
            );
        }
        world.clear_trackers();
    }

    log::info!(
        "Simulated {} ticks, {} contacts, {} registered movers",
        config.ticks,
        contacts_seen,
        world.resource::<PhysicsWorld>().registry().len()
    );
    for tank in tanks {
        if let (Some(pos), Some(_)) = (world.get::<MapPosition>(tank), world.get::<Tank>(tank)) {
            log::info!("Tank {:?} ended at ({}, {})", tank, pos.pos.x, pos.pos.y);
        }
    }

    world.resource_mut::<PhysicsWorld>().clear();
}

fn builtin_level() -> LevelLayout {
    match LevelLayout::from_json_str(DEFAULT_LEVEL) {
        Ok(layout) => layout,
        Err(e) => {
            log::error!("Built-in level is invalid: {e}");
            std::process::exit(1);
        }
    }
}
