//! Post-activation rebinding of observers.
//!
//! After every reaction to [`SceneLoadedEvent`](crate::events::scene::SceneLoadedEvent)
//! has been applied, [`load_scene`](crate::systems::sceneloader::load_scene)
//! triggers [`SceneActivatedEvent`]. By then every object of the new scene is
//! constructed and registered, so the actor reference can be pushed to each
//! observer role found in the [`RoleRegistry`].
//!
//! The push is best effort. A missing observer is reported and skipped, and
//! observers keep discovering the actor on their own
//! (see [`crate::systems::discovery`]).

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::binding::{ActorBinding, BindOutcome};
use crate::components::camerafollower::CameraFollower;
use crate::components::hudcoins::HudCoinLabel;
use crate::components::inactive::Inactive;
use crate::components::player::PlayerActor;
use crate::events::scene::SceneActivatedEvent;
use crate::resources::actorslot::ActorSlot;
use crate::resources::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::resources::roleregistry::{Role, RoleRegistry};

/// Bind `actor` into an observer's binding and report the outcome.
///
/// Pushing the actor an observer already holds leaves it unchanged.
pub fn push_actor(
    observer: Entity,
    binding: &mut ActorBinding,
    actor: Entity,
    diagnostics: &mut DiagnosticLog,
) -> BindOutcome {
    let outcome = binding.bind(actor);
    diagnostics.record(
        DiagnosticKind::Rebind,
        Some(actor),
        format!("pushed to observer {:?}: {:?}", observer, outcome),
    );
    outcome
}

/// Global observer for [`SceneActivatedEvent`].
pub fn rebind_observers_on_activation(
    trigger: On<SceneActivatedEvent>,
    slot: Res<ActorSlot>,
    registry: Res<RoleRegistry>,
    actors: Query<(), (With<PlayerActor>, Without<Inactive>)>,
    mut cameras: Query<&mut CameraFollower>,
    mut huds: Query<&mut HudCoinLabel>,
    mut diagnostics: ResMut<DiagnosticLog>,
) {
    let scene = &trigger.event().scene;
    let Some(actor) = slot.current() else {
        log::debug!("Scene '{}' activated with no persistent actor", scene);
        return;
    };
    if !actors.contains(actor) {
        log::debug!(
            "Scene '{}' activated, actor {:?} is inactive; nothing pushed",
            scene,
            actor
        );
        return;
    }

    for role in Role::OBSERVERS {
        let pushed = registry.get(role).and_then(|observer| match role {
            Role::CameraFollower => cameras.get_mut(observer).ok().map(|mut camera| {
                push_actor(observer, &mut camera.binding, actor, &mut diagnostics)
            }),
            Role::HudCoinLabel => huds.get_mut(observer).ok().map(|mut hud| {
                push_actor(observer, &mut hud.binding, actor, &mut diagnostics)
            }),
            Role::Player => None,
        });
        if pushed.is_none() {
            diagnostics.record(
                DiagnosticKind::RebindMissing,
                Some(actor),
                format!("scene '{}' has no {:?}", scene, role),
            );
        }
    }
}
