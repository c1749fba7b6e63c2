//! Observer-side actor discovery.
//!
//! Observers are told about the actor after each scene activation (see
//! [`crate::systems::rebinding`]), but they do not rely on it: every frame,
//! an observer that holds no valid actor looks for one itself.
//!
//! [`ActorFinder`] searches in three tiers and stops at the first hit:
//!
//! 1. [`DiscoveryTier::Registry`] – the entity registered for
//!    [`Role::Player`] in the [`RoleRegistry`];
//! 2. [`DiscoveryTier::Tag`] – a [`PlayerActor`] tagged [`PLAYER_TAG`];
//! 3. [`DiscoveryTier::PersistentKind`] – any [`PlayerActor`] that is also
//!    [`Persistent`].
//!
//! Inactive entities are never found. Among several matches of one tier the
//! lowest entity wins.
//!
//! A bound observer whose target no longer exists falls back to unbound in
//! the same pass and searches again. An observer that finds nothing stays
//! where it is and reports it, at most once per
//! `discovery_warning_interval` seconds of unscaled time, so a paused game
//! keeps reporting.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;

use crate::components::binding::{ActorBinding, BindOutcome};
use crate::components::camerafollower::CameraFollower;
use crate::components::group::Group;
use crate::components::hudcoins::HudCoinLabel;
use crate::components::inactive::Inactive;
use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::player::{CoinPurse, PlayerActor};
use crate::resources::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::resources::persistenceconfig::PersistenceConfig;
use crate::resources::roleregistry::{Role, RoleRegistry};
use crate::resources::worldtime::WorldTime;
use crate::systems::singleton::PLAYER_TAG;

/// Which search tier found the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryTier {
    Registry,
    Tag,
    PersistentKind,
}

/// Tiered lookup of the live, active player actor.
#[derive(SystemParam)]
pub struct ActorFinder<'w, 's> {
    registry: Res<'w, RoleRegistry>,
    candidates: Query<
        'w,
        's,
        (
            Entity,
            Option<&'static Group>,
            Has<PlayerActor>,
            Has<Persistent>,
        ),
        (With<MapPosition>, Without<Inactive>),
    >,
}

impl ActorFinder<'_, '_> {
    pub fn find(&self) -> Option<(Entity, DiscoveryTier)> {
        if let Some(actor) = self.registry.get(Role::Player) {
            if self.candidates.contains(actor) {
                return Some((actor, DiscoveryTier::Registry));
            }
        }
        if let Some((actor, ..)) = self
            .candidates
            .iter()
            .filter(|(_, group, is_player, _)| {
                *is_player && group.is_some_and(|g| g.is(PLAYER_TAG))
            })
            .min_by_key(|(entity, ..)| *entity)
        {
            return Some((actor, DiscoveryTier::Tag));
        }
        self.candidates
            .iter()
            .filter(|(_, _, is_player, persistent)| *is_player && *persistent)
            .map(|(entity, ..)| entity)
            .min()
            .map(|actor| (actor, DiscoveryTier::PersistentKind))
    }
}

/// Validate and, if needed, re-acquire one observer's binding.
///
/// `still_valid` tells whether a bound target still exists. Returns the
/// outcome when the binding was (re)established in this call.
#[allow(clippy::too_many_arguments)]
pub fn refresh_binding(
    owner: Entity,
    what: &str,
    binding: &mut ActorBinding,
    finder: &ActorFinder,
    still_valid: impl Fn(Entity) -> bool,
    now: f32,
    warning_interval: f32,
    diagnostics: &mut DiagnosticLog,
) -> Option<BindOutcome> {
    if let Some(target) = binding.target() {
        if still_valid(target) {
            return None;
        }
        binding.unbind();
        log::info!("{} {:?}: target {:?} destroyed, unbound", what, owner, target);
    }

    match finder.find() {
        Some((actor, tier)) if still_valid(actor) => {
            let outcome = binding.bind(actor);
            diagnostics.record(
                DiagnosticKind::Rebind,
                Some(owner),
                format!("{} discovered actor {:?} via {:?}", what, actor, tier),
            );
            Some(outcome)
        }
        _ => {
            if binding.record_failed_search(now, warning_interval) {
                diagnostics.record(
                    DiagnosticKind::DiscoveryFailed,
                    Some(owner),
                    format!(
                        "{} found no actor after {} searches",
                        what,
                        binding.failed_searches()
                    ),
                );
            }
            None
        }
    }
}

/// Keep every active camera follower bound to the actor.
pub fn camera_discovery_system(
    finder: ActorFinder,
    time: Res<WorldTime>,
    config: Res<PersistenceConfig>,
    mut diagnostics: ResMut<DiagnosticLog>,
    mut cameras: Query<(Entity, &mut CameraFollower), Without<Inactive>>,
    anchors: Query<(), With<MapPosition>>,
) {
    for (entity, mut camera) in cameras.iter_mut() {
        refresh_binding(
            entity,
            "camera",
            &mut camera.binding,
            &finder,
            |target| anchors.contains(target),
            time.real_elapsed,
            config.camera.discovery_warning_interval,
            &mut diagnostics,
        );
    }
}

/// Keep every active HUD coin label bound to the actor's coin purse.
pub fn hud_discovery_system(
    finder: ActorFinder,
    time: Res<WorldTime>,
    config: Res<PersistenceConfig>,
    mut diagnostics: ResMut<DiagnosticLog>,
    mut labels: Query<(Entity, &mut HudCoinLabel), Without<Inactive>>,
    purses: Query<(), With<CoinPurse>>,
) {
    for (entity, mut label) in labels.iter_mut() {
        refresh_binding(
            entity,
            "hud",
            &mut label.binding,
            &finder,
            |target| purses.contains(target),
            time.real_elapsed,
            config.camera.discovery_warning_interval,
            &mut diagnostics,
        );
    }
}
