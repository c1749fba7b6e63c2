//! Scenekeeper main entry point.
//!
//! Runs a headless session: loads the persistence configuration and a scene
//! library, then walks a route of scene loads, ticking the world a number of
//! frames in each scene, and prints what happened to the persistent actor.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --route Escena1,Escena2,MainMenu,Escena1 --frames 60
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;

use scenekeeper::components::camerafollower::CameraFollower;
use scenekeeper::components::hudcoins::HudCoinLabel;
use scenekeeper::components::inactive::Inactive;
use scenekeeper::components::mapposition::MapPosition;
use scenekeeper::components::rigidbody::RigidBody;
use scenekeeper::game::{
    build_update_schedule, count_actors, demo_config, demo_scene_library, new_world, tick,
};
use scenekeeper::resources::actorslot::ActorSlot;
use scenekeeper::resources::diagnostics::{DiagnosticKind, DiagnosticLog};
use scenekeeper::resources::persistenceconfig::PersistenceConfig;
use scenekeeper::resources::scenelibrary::SceneLibrary;
use scenekeeper::resources::scenestate::{ActiveScene, NextScene};
use scenekeeper::systems::teardown::return_to_main_menu;

/// Headless driver for the persistent actor subsystem.
#[derive(Parser)]
#[command(version, about = "Keeps one player actor alive across scene loads.")]
struct Cli {
    /// Persistence configuration file. Defaults are used when it is missing.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Directory of `*.json` scene descriptions. The built-in demo scenes
    /// are used when omitted.
    #[arg(long, value_name = "DIR")]
    scenes: Option<PathBuf>,

    /// Comma-separated sequence of scenes to load.
    #[arg(long, default_value = "Escena1,Escena2,MainMenu,Escena1")]
    route: String,

    /// Frames to run in each scene.
    #[arg(long, default_value_t = 30)]
    frames: u32,

    /// Frame delta, in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Go through the teardown path and return to the main menu at the end.
    #[arg(long)]
    return_to_menu: bool,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: PathBuf) -> PersistenceConfig {
    let mut config = PersistenceConfig::with_path(path);
    match config.load_from_file() {
        Ok(()) => config,
        Err(e) => {
            log::warn!("{}; using the demo configuration", e);
            PersistenceConfig {
                config_path: config.config_path,
                ..demo_config()
            }
        }
    }
}

fn load_library(dir: Option<PathBuf>) -> SceneLibrary {
    let Some(dir) = dir else {
        return demo_scene_library();
    };
    let mut library = SceneLibrary::new();
    match library.load_dir(&dir) {
        Ok(0) => {
            log::warn!("No scene descriptions in {:?}; using the demo scenes", dir);
            demo_scene_library()
        }
        Ok(_) => library,
        Err(e) => {
            log::error!("{}; using the demo scenes", e);
            demo_scene_library()
        }
    }
}

fn print_summary(world: &mut World) {
    let scene = world
        .resource::<ActiveScene>()
        .name()
        .unwrap_or("<none>")
        .to_string();
    let loads = world.resource::<ActiveScene>().loads();
    let actor = world.resource::<ActorSlot>().current();
    println!("active scene: {} ({} loads)", scene, loads);
    println!("player actors alive: {}", count_actors(world));

    if let Some(entity) = actor.and_then(|actor| world.get_entity(actor).ok()) {
        let position = entity.get::<MapPosition>().map(|p| p.pos);
        let gravity = entity.get::<RigidBody>().map(|b| b.gravity_scale);
        let inactive = entity.contains::<Inactive>();
        println!(
            "actor {:?}: position={:?} gravity_scale={:?} inactive={}",
            entity.id(),
            position,
            gravity,
            inactive
        );
    } else {
        println!("actor: none");
    }

    for (camera, position) in world
        .query::<(&CameraFollower, &MapPosition)>()
        .iter(world)
    {
        println!(
            "camera: bound={:?} position={:?}",
            camera.binding.target(),
            position.pos
        );
    }
    for label in world.query::<&HudCoinLabel>().iter(world) {
        println!("hud: bound={:?} text={:?}", label.binding.target(), label.text);
    }

    let diagnostics = world.resource::<DiagnosticLog>();
    for kind in [
        DiagnosticKind::DuplicateDestroyed,
        DiagnosticKind::Rebind,
        DiagnosticKind::RebindMissing,
        DiagnosticKind::DiscoveryFailed,
        DiagnosticKind::SubscriptionLeak,
        DiagnosticKind::Teardown,
    ] {
        println!("{:?}: {}", kind, diagnostics.count(kind));
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    log::info!("Scenekeeper starting");
    let config = load_config(cli.config);
    let library = load_library(cli.scenes);

    let mut world = new_world(config, library);
    let mut update = build_update_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    for scene in cli.route.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        log::info!("Requesting scene '{}'", scene);
        world.resource_mut::<NextScene>().set(scene);
        for _ in 0..cli.frames.max(1) {
            tick(&mut world, &mut update, cli.dt);
        }
    }

    if cli.return_to_menu {
        if let Err(e) = return_to_main_menu(&mut world) {
            log::error!("Return to main menu failed: {}", e);
        }
        for _ in 0..cli.frames {
            tick(&mut world, &mut update, cli.dt);
        }
    }

    print_summary(&mut world);
}
