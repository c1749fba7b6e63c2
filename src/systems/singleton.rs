//! Singleton guard for the persistent player actor.
//!
//! Every playable scene carries a player prefab, so a player is constructed
//! on each scene load. The guard runs right after construction:
//!
//! - If the [`ActorSlot`] is empty, the newcomer becomes the persistent
//!   actor: it claims the slot, is marked [`Persistent`], is registered under
//!   [`Role::Player`], and gets its one scene transition subscription.
//! - If a live actor is already registered, the newcomer is despawned on the
//!   spot. Nothing is merged from it.
//!
//! A duplicate is the normal result of re-entering a scene and is only
//! logged.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::actortimer::ActorTimers;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::player::{CoinPurse, PlayerActor, PlayerCombat};
use crate::components::rigidbody::RigidBody;
use crate::components::scenemember::SceneMember;
use crate::components::subscription::{SceneSubscription, SubscriptionOwner};
use crate::resources::actorslot::ActorSlot;
use crate::resources::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::resources::roleregistry::{Role, RoleRegistry};
use crate::systems::scenereaction::actor_scene_loaded_observer;

/// Tag carried by the player actor.
pub const PLAYER_TAG: &str = "Player";

/// What the guard did with a newly constructed actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The newcomer is now the persistent actor.
    Registered(Entity),
    /// Another actor was already live; the newcomer was despawned.
    Destroyed { newcomer: Entity, survivor: Entity },
}

/// Initial values of a player prefab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPrefab {
    pub position: Vec2,
    pub gravity_scale: f32,
    pub coins: u32,
}

impl Default for PlayerPrefab {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            gravity_scale: 1.0,
            coins: 0,
        }
    }
}

/// Construct a player from `prefab` as an object of `scene`, then run the
/// guard on it.
pub fn spawn_player_actor(world: &mut World, prefab: PlayerPrefab, scene: &str) -> GuardOutcome {
    let newcomer = world
        .spawn((
            PlayerActor,
            Group::new(PLAYER_TAG),
            SceneMember::new(scene),
            MapPosition::from_vec(prefab.position),
            RigidBody::with_gravity(prefab.gravity_scale),
            PlayerCombat::default(),
            ActorTimers::new(),
            CoinPurse::new(prefab.coins),
        ))
        .id();
    guard_actor(world, newcomer)
}

/// Run the singleton guard on a freshly constructed actor entity.
pub fn guard_actor(world: &mut World, newcomer: Entity) -> GuardOutcome {
    let current = world.resource::<ActorSlot>().current();

    if let Some(existing) = current {
        if existing == newcomer {
            return GuardOutcome::Registered(existing);
        }
        if world.get_entity(existing).is_ok() {
            world.despawn(newcomer);
            world.resource_mut::<DiagnosticLog>().record(
                DiagnosticKind::DuplicateDestroyed,
                Some(newcomer),
                format!("actor {:?} already registered, duplicate destroyed", existing),
            );
            return GuardOutcome::Destroyed {
                newcomer,
                survivor: existing,
            };
        }
        // The registered actor vanished without going through teardown.
        world.resource_mut::<ActorSlot>().release(existing);
        world
            .resource_mut::<RoleRegistry>()
            .unregister(Role::Player, existing);
        let leaked: Vec<Entity> = world
            .query::<(Entity, &SubscriptionOwner)>()
            .iter(world)
            .filter(|(_, owner)| owner.0 == existing)
            .map(|(observer, _)| observer)
            .collect();
        for observer in leaked {
            world.despawn(observer);
        }
        log::warn!(
            "Actor slot held {:?}, which no longer exists; releasing it",
            existing
        );
    }

    register_actor(world, newcomer);
    GuardOutcome::Registered(newcomer)
}

fn register_actor(world: &mut World, actor: Entity) {
    world.resource_mut::<ActorSlot>().claim(actor);

    let observer = world
        .spawn((
            Observer::new(actor_scene_loaded_observer),
            Persistent,
            SubscriptionOwner(actor),
        ))
        .id();

    world
        .entity_mut(actor)
        .insert((Persistent, SceneSubscription { observer }))
        .remove::<SceneMember>();
    world
        .resource_mut::<RoleRegistry>()
        .register(Role::Player, actor);
    // Observers must be registered before the next trigger.
    world.flush();

    world.resource_mut::<DiagnosticLog>().record(
        DiagnosticKind::ActorRegistered,
        Some(actor),
        format!("registered as persistent actor, subscription {:?}", observer),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::init_world;
    use crate::resources::persistenceconfig::PersistenceConfig;
    use crate::resources::scenelibrary::SceneLibrary;

    fn make_world() -> World {
        let mut world = World::new();
        init_world(&mut world, PersistenceConfig::new(), SceneLibrary::new());
        world
    }

    fn count_actors(world: &mut World) -> usize {
        world
            .query_filtered::<Entity, With<PlayerActor>>()
            .iter(world)
            .count()
    }

    #[test]
    fn test_first_actor_is_registered() {
        let mut world = make_world();
        let outcome = spawn_player_actor(&mut world, PlayerPrefab::default(), "Escena1");
        let GuardOutcome::Registered(actor) = outcome else {
            panic!("expected registration, got {:?}", outcome);
        };
        assert_eq!(world.resource::<ActorSlot>().current(), Some(actor));
        assert!(world.get::<Persistent>(actor).is_some());
        assert!(world.get::<SceneMember>(actor).is_none());
        assert!(world.get::<SceneSubscription>(actor).is_some());
        assert_eq!(
            world.resource::<RoleRegistry>().get(Role::Player),
            Some(actor)
        );
    }

    #[test]
    fn test_second_actor_is_destroyed() {
        let mut world = make_world();
        let GuardOutcome::Registered(first) =
            spawn_player_actor(&mut world, PlayerPrefab::default(), "Escena1")
        else {
            panic!("first actor not registered");
        };
        let outcome = spawn_player_actor(
            &mut world,
            PlayerPrefab {
                gravity_scale: 9.0,
                ..PlayerPrefab::default()
            },
            "Escena1",
        );
        let GuardOutcome::Destroyed { newcomer, survivor } = outcome else {
            panic!("expected duplicate to be destroyed, got {:?}", outcome);
        };
        assert_eq!(survivor, first);
        assert!(world.get_entity(newcomer).is_err());
        assert_eq!(count_actors(&mut world), 1);
        // no merge
        assert_eq!(world.get::<RigidBody>(first).unwrap().gravity_scale, 1.0);
        assert_eq!(
            world
                .resource::<DiagnosticLog>()
                .count(DiagnosticKind::DuplicateDestroyed),
            1
        );
    }

    #[test]
    fn test_only_one_subscription_exists() {
        let mut world = make_world();
        for _ in 0..5 {
            spawn_player_actor(&mut world, PlayerPrefab::default(), "Escena1");
        }
        let subscriptions = world
            .query::<&SubscriptionOwner>()
            .iter(&world)
            .count();
        assert_eq!(subscriptions, 1);
    }

    #[test]
    fn test_stale_slot_is_replaced() {
        let mut world = make_world();
        let GuardOutcome::Registered(first) =
            spawn_player_actor(&mut world, PlayerPrefab::default(), "Escena1")
        else {
            panic!("first actor not registered");
        };
        // Destroyed behind the guard's back.
        world.despawn(first);

        let outcome = spawn_player_actor(&mut world, PlayerPrefab::default(), "Escena1");
        assert!(matches!(outcome, GuardOutcome::Registered(e) if e != first));
        assert_eq!(count_actors(&mut world), 1);
        let subscriptions = world
            .query::<&SubscriptionOwner>()
            .iter(&world)
            .count();
        assert_eq!(subscriptions, 1);
    }
}
