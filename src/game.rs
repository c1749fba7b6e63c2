//! World setup and the per-frame update.
//!
//! [`init_world`] inserts every resource the persistence systems need and
//! spawns the global observers. [`build_update_schedule`] wires the
//! per-frame systems in order, and [`tick`] advances time and runs one frame.
//!
//! The demo scene set used by the binary lives here too.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::persistent::Persistent;
use crate::components::player::PlayerActor;
use crate::resources::actorslot::ActorSlot;
use crate::resources::diagnostics::DiagnosticLog;
use crate::resources::persistenceconfig::{PersistenceConfig, SpawnPolicy};
use crate::resources::roleregistry::RoleRegistry;
use crate::resources::scenelibrary::{SceneDescription, SceneLibrary};
use crate::resources::scenestate::{ActiveScene, NextScene};
use crate::resources::worldtime::WorldTime;
use crate::systems::actortimer::update_actor_timers;
use crate::systems::camerafollow::camera_follow_system;
use crate::systems::discovery::{camera_discovery_system, hud_discovery_system};
use crate::systems::hud::hud_display_system;
use crate::systems::rebinding::rebind_observers_on_activation;
use crate::systems::sceneloader::apply_pending_scene;
use crate::systems::time::update_world_time;

/// Insert the persistence resources and observers into `world`.
pub fn init_world(world: &mut World, config: PersistenceConfig, library: SceneLibrary) {
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(ActorSlot::new());
    world.insert_resource(RoleRegistry::new());
    world.insert_resource(ActiveScene::new());
    world.insert_resource(NextScene::new());
    world.insert_resource(DiagnosticLog::new());
    world.insert_resource(config);
    world.insert_resource(library);

    world.spawn((Observer::new(rebind_observers_on_activation), Persistent));
    // Ensure the observer is registered before any scene load triggers.
    world.flush();
}

/// Create a world ready for scene loads.
pub fn new_world(config: PersistenceConfig, library: SceneLibrary) -> World {
    let mut world = World::new();
    init_world(&mut world, config, library);
    world
}

/// Build the per-frame update schedule.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(apply_pending_scene); // Must run first so the frame sees the new scene
    update.add_systems(update_actor_timers.after(apply_pending_scene));
    update.add_systems(camera_discovery_system.after(apply_pending_scene));
    update.add_systems(hud_discovery_system.after(apply_pending_scene));
    update.add_systems(camera_follow_system.after(camera_discovery_system));
    update.add_systems(hud_display_system.after(hud_discovery_system));
    update
}

/// Advance time by `dt` seconds and run one frame.
pub fn tick(world: &mut World, update: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    update.run(world);
    world.clear_trackers(); // Clear changed components for next frame
}

/// Number of player actors currently alive.
pub fn count_actors(world: &mut World) -> usize {
    world
        .query_filtered::<Entity, With<PlayerActor>>()
        .iter(world)
        .count()
}

/// A main menu and three playable scenes. Every playable scene carries a
/// player prefab, a spawn marker, a camera and a HUD.
pub fn demo_scene_library() -> SceneLibrary {
    SceneLibrary::new()
        .with(SceneDescription::new("MainMenu").with_camera())
        .with(
            SceneDescription::new("Escena1")
                .with_player(0.0, 0.0, 3.0)
                .with_marker(Some("PlayerSpawn"), Some("PlayerSpawn"), 3.0, 4.0)
                .with_camera()
                .with_hud(),
        )
        .with(
            SceneDescription::new("Escena2")
                .with_player(0.0, 0.0, 3.0)
                .with_marker(Some("PlayerSpawn"), None, -6.0, 2.0)
                .with_marker(Some("Exit"), Some("Door"), 12.0, 0.0)
                .with_camera()
                .with_hud(),
        )
        .with(
            SceneDescription::new("Escena3")
                .with_player(0.0, 0.0, 3.0)
                .with_camera(),
        )
}

/// Policy of the demo: the actor lives in the first two scenes only.
pub fn demo_config() -> PersistenceConfig {
    let mut config = PersistenceConfig::new();
    config.policy = SpawnPolicy::default()
        .allow("Escena1")
        .allow("Escena2")
        .with_default_position("Escena3", Vec2::new(1.0, 1.0));
    config
}
