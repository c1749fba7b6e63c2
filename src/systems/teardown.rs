//! Teardown of the persistent actor.
//!
//! Destroying the actor goes through [`teardown_persistent_actor`], which
//! works in a fixed order:
//!
//! 1. cancel the actor's pending timed behaviors,
//! 2. release its scene transition subscription,
//! 3. empty the [`ActorSlot`] and drop the actor's role,
//! 4. despawn the actor.
//!
//! After that, scene loads behave as if the actor never existed: the next
//! player prefab registers as a fresh actor.

use bevy_ecs::prelude::*;

use crate::components::actortimer::ActorTimers;
use crate::components::subscription::{SceneSubscription, SubscriptionOwner};
use crate::resources::actorslot::ActorSlot;
use crate::resources::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::resources::persistenceconfig::PersistenceConfig;
use crate::resources::roleregistry::{Role, RoleRegistry};
use crate::resources::scenelibrary::SceneError;
use crate::resources::scenestate::LoadMode;
use crate::systems::sceneloader::load_scene;

/// Destroy the registered actor. Returns false when there was none.
pub fn teardown_persistent_actor(world: &mut World) -> bool {
    let Some(actor) = world.resource::<ActorSlot>().current() else {
        log::debug!("Teardown requested with no persistent actor");
        return false;
    };

    let cancelled = world
        .get_mut::<ActorTimers>(actor)
        .map(|mut timers| timers.cancel_all())
        .unwrap_or(0);

    let subscription = world
        .get::<SceneSubscription>(actor)
        .map(|subscription| subscription.observer);
    let mut observers: Vec<Entity> = world
        .query::<(Entity, &SubscriptionOwner)>()
        .iter(world)
        .filter(|(_, owner)| owner.0 == actor)
        .map(|(observer, _)| observer)
        .collect();
    if let Some(observer) = subscription {
        if !observers.contains(&observer) {
            observers.push(observer);
        }
    }
    for observer in &observers {
        world.despawn(*observer);
    }

    world.resource_mut::<ActorSlot>().release(actor);
    world
        .resource_mut::<RoleRegistry>()
        .unregister(Role::Player, actor);

    let despawned = world.despawn(actor);
    world.flush();

    world.resource_mut::<DiagnosticLog>().record(
        DiagnosticKind::Teardown,
        Some(actor),
        format!(
            "torn down: {} timers cancelled, {} subscriptions released, despawned={}",
            cancelled,
            observers.len(),
            despawned
        ),
    );
    true
}

/// Tear the actor down and load the configured main menu scene.
pub fn return_to_main_menu(world: &mut World) -> Result<(), SceneError> {
    teardown_persistent_actor(world);
    let menu = world.resource::<PersistenceConfig>().main_menu_scene.clone();
    load_scene(world, &menu, LoadMode::Single)
}
