//! Scene loading.
//!
//! A scene load runs to completion inside one exclusive call and publishes
//! itself in two phases:
//!
//! 1. **Construction.** In [`LoadMode::Single`] every scene object that is
//!    not [`Persistent`] is despawned first. The new scene's objects are then
//!    constructed; player prefabs go through the singleton guard, observers
//!    register their role. [`SceneLoadedEvent`] is triggered and its
//!    reactions (the actor's subscription) are applied.
//! 2. **Activation.** [`SceneActivatedEvent`] is triggered once the first
//!    phase has fully settled, and the actor reference is pushed to the new
//!    scene's observers.
//!
//! Requests normally go through the [`NextScene`] resource and are applied
//! by [`apply_pending_scene`] at the start of the next update.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::camerafollower::CameraFollower;
use crate::components::group::Group;
use crate::components::hudcoins::HudCoinLabel;
use crate::components::mapposition::MapPosition;
use crate::components::nametag::NameTag;
use crate::components::persistent::Persistent;
use crate::components::scenemember::SceneMember;
use crate::events::scene::{SceneActivatedEvent, SceneLoadedEvent};
use crate::resources::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::resources::persistenceconfig::PersistenceConfig;
use crate::resources::roleregistry::{Role, RoleRegistry};
use crate::resources::scenelibrary::{SceneDescription, SceneError, SceneLibrary, SceneObject};
use crate::resources::scenestate::{ActiveScene, LoadMode, NextScene};
use crate::systems::singleton::{PlayerPrefab, spawn_player_actor};

/// Perform the pending scene load request, if any.
///
/// A request for a scene missing from the library is logged and dropped;
/// the current scene stays loaded.
pub fn apply_pending_scene(world: &mut World) {
    let Some(request) = world.resource_mut::<NextScene>().take() else {
        return;
    };
    if let Err(err) = load_scene(world, &request.scene, request.mode) {
        log::warn!("Scene load request ignored: {}", err);
        world.resource_mut::<DiagnosticLog>().record(
            DiagnosticKind::SceneLoad,
            None,
            format!("request for '{}' rejected: {}", request.scene, err),
        );
    }
}

/// Load `scene` from the [`SceneLibrary`] and run both activation phases.
pub fn load_scene(world: &mut World, scene: &str, mode: LoadMode) -> Result<(), SceneError> {
    let description = world.resource::<SceneLibrary>().get(scene)?.clone();

    let unloaded = match mode {
        LoadMode::Single => unload_scene_objects(world),
        LoadMode::Additive => 0,
    };
    construct_scene(world, &description);
    world
        .resource_mut::<ActiveScene>()
        .set(description.name.as_str(), mode);
    world.flush();

    world.trigger(SceneLoadedEvent {
        scene: description.name.clone(),
        mode,
    });
    world.flush();

    world.trigger(SceneActivatedEvent {
        scene: description.name.clone(),
    });
    world.flush();

    world.resource_mut::<DiagnosticLog>().record(
        DiagnosticKind::SceneLoad,
        None,
        format!(
            "loaded '{}' ({:?}): {} objects constructed, {} unloaded",
            description.name,
            mode,
            description.objects.len(),
            unloaded
        ),
    );
    Ok(())
}

/// Despawn every scene object that is not persistent and prune the role
/// registry. Returns the number of entities despawned.
pub fn unload_scene_objects(world: &mut World) -> usize {
    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, (With<SceneMember>, Without<Persistent>)>()
        .iter(world)
        .collect();
    for entity in &doomed {
        world.despawn(*entity);
    }
    world.resource_scope(|world, mut registry: Mut<RoleRegistry>| {
        registry.retain_alive(|entity| world.get_entity(entity).is_ok());
    });
    doomed.len()
}

/// Construct every object of `description` as a member of its scene.
pub fn construct_scene(world: &mut World, description: &SceneDescription) {
    let scene = description.name.as_str();
    for object in &description.objects {
        match object {
            SceneObject::Player {
                position,
                gravity_scale,
                coins,
            } => {
                let prefab = PlayerPrefab {
                    position: Vec2::from(*position),
                    gravity_scale: *gravity_scale,
                    coins: *coins,
                };
                spawn_player_actor(world, prefab, scene);
            }
            SceneObject::Marker {
                name,
                tag,
                position,
            } => {
                let mut marker = world.spawn((
                    SceneMember::new(scene),
                    MapPosition::from_vec(Vec2::from(*position)),
                ));
                if let Some(tag) = tag {
                    marker.insert(Group::new(tag.as_str()));
                }
                if let Some(name) = name {
                    marker.insert(NameTag::new(name.as_str()));
                }
            }
            SceneObject::Camera {
                position,
                offset,
                smoothing,
            } => {
                let defaults = &world.resource::<PersistenceConfig>().camera;
                let follower = CameraFollower::new(
                    offset.map(Vec2::from).unwrap_or(defaults.offset),
                    smoothing.unwrap_or(defaults.smoothing),
                );
                let camera = world
                    .spawn((
                        SceneMember::new(scene),
                        MapPosition::from_vec(Vec2::from(*position)),
                        follower,
                    ))
                    .id();
                register_role(world, Role::CameraFollower, camera);
            }
            SceneObject::HudCoins => {
                let label = world
                    .spawn((SceneMember::new(scene), HudCoinLabel::new()))
                    .id();
                register_role(world, Role::HudCoinLabel, label);
            }
        }
    }
}

fn register_role(world: &mut World, role: Role, entity: Entity) {
    if let Some(previous) = world
        .resource_mut::<RoleRegistry>()
        .register(role, entity)
    {
        log::debug!("{:?} role moved from {:?} to {:?}", role, previous, entity);
    }
}
