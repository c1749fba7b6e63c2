//! The persistent actor's reaction to a scene load.
//!
//! [`actor_scene_loaded_observer`] is the body of the actor's scene
//! transition subscription: the singleton guard spawns one observer entity
//! running it per registered actor. On each [`SceneLoadedEvent`] it:
//!
//! 1. resolves the spawn policy for the new scene,
//! 2. deactivates the actor when it must not appear (and stops there), or
//!    reactivates it,
//! 3. moves it to the resolved position,
//! 4. restores its transient state while keeping its configured gravity.
//!
//! Pushing the actor to the scene's observers is not done here; it happens
//! in the post-activation pass, see [`crate::systems::rebinding`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::components::actortimer::ActorTimers;
use crate::components::group::Group;
use crate::components::inactive::Inactive;
use crate::components::mapposition::MapPosition;
use crate::components::nametag::NameTag;
use crate::components::player::{PlayerActor, PlayerCombat};
use crate::components::rigidbody::RigidBody;
use crate::components::scenemember::SceneMember;
use crate::components::subscription::SceneSubscription;
use crate::events::scene::SceneLoadedEvent;
use crate::resources::actorslot::ActorSlot;
use crate::resources::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::resources::persistenceconfig::PersistenceConfig;
use crate::systems::restoration::{ActorState, restore_transient_state};
use crate::systems::spawnpolicy::{SpawnCandidate, resolve_spawn};

/// Scene objects the actor may be placed at.
pub type MarkerQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static MapPosition,
        &'static SceneMember,
        Option<&'static Group>,
        Option<&'static NameTag>,
    ),
    Without<PlayerActor>,
>;

/// Collect the spawn candidates belonging to `scene`.
pub fn collect_spawn_candidates<'a>(
    markers: &'a MarkerQuery,
    scene: &str,
) -> SmallVec<[SpawnCandidate<'a>; 4]> {
    markers
        .iter()
        .filter(|(_, _, member, _, _)| member.scene() == scene)
        .filter(|(_, _, _, tag, name)| tag.is_some() || name.is_some())
        .map(|(entity, position, _, tag, name)| SpawnCandidate {
            entity,
            position: position.pos,
            tag: tag.map(Group::name),
            name: name.map(NameTag::as_str),
        })
        .collect()
}

/// Scene transition subscription of the persistent actor.
///
/// An observer that no longer serves the registered actor (its actor was
/// despawned without teardown, or replaced) despawns itself and reports the
/// leak instead of reacting.
pub fn actor_scene_loaded_observer(
    trigger: On<SceneLoadedEvent>,
    mut commands: Commands,
    slot: Res<ActorSlot>,
    config: Res<PersistenceConfig>,
    mut diagnostics: ResMut<DiagnosticLog>,
    mut actors: Query<
        (
            &SceneSubscription,
            &mut MapPosition,
            &mut RigidBody,
            &mut PlayerCombat,
            &mut ActorTimers,
            Has<Inactive>,
        ),
        With<PlayerActor>,
    >,
    markers: MarkerQuery,
) {
    let event = trigger.event();
    let observer = trigger.observer();

    let Some(actor) = slot.current() else {
        release_leaked_subscription(&mut commands, &mut diagnostics, observer, None);
        return;
    };
    let Ok((subscription, mut position, mut body, mut combat, mut timers, inactive)) =
        actors.get_mut(actor)
    else {
        release_leaked_subscription(&mut commands, &mut diagnostics, observer, Some(actor));
        return;
    };
    if subscription.observer != observer {
        release_leaked_subscription(&mut commands, &mut diagnostics, observer, Some(actor));
        return;
    }

    let candidates = collect_spawn_candidates(&markers, &event.scene);
    let resolution = resolve_spawn(&event.scene, &config.policy, &candidates);

    diagnostics.record(
        DiagnosticKind::Visibility,
        Some(actor),
        format!(
            "scene '{}' ({:?}): visible={}",
            event.scene, event.mode, resolution.visible
        ),
    );

    if !resolution.visible {
        if !inactive {
            commands.entity(actor).insert(Inactive);
        }
        return;
    }
    if inactive {
        commands.entity(actor).remove::<Inactive>();
    }

    position.set(resolution.position);
    diagnostics.record(
        DiagnosticKind::SpawnPosition,
        Some(actor),
        format!(
            "placed at ({}, {}) from {:?}",
            resolution.position.x, resolution.position.y, resolution.source
        ),
    );

    let restoration = restore_transient_state(&mut ActorState {
        body: &mut body,
        combat: &mut combat,
        timers: &mut timers,
    });
    diagnostics.record(
        DiagnosticKind::Restoration,
        Some(actor),
        format!(
            "gravity_scale before={} after_reset={} after={}",
            restoration.before, restoration.after_reset, restoration.after
        ),
    );
}

fn release_leaked_subscription(
    commands: &mut Commands,
    diagnostics: &mut DiagnosticLog,
    observer: Entity,
    actor: Option<Entity>,
) {
    commands.entity(observer).despawn();
    diagnostics.record(
        DiagnosticKind::SubscriptionLeak,
        Some(observer),
        format!(
            "subscription no longer serves the registered actor ({:?}), released",
            actor
        ),
    );
}
