//! Spawn policy resolution.
//!
//! Given the identity of the scene that just loaded and the markers it
//! contains, decide whether the persistent actor may appear in it and where.
//! Resolution is a pure function of its inputs: resolving the same load
//! twice yields the same answer.
//!
//! # Visibility
//!
//! 1. A scene whose name contains the menu keyword (case-insensitive
//!    substring) never shows the actor, whatever the allow-list says.
//! 2. Otherwise the actor is visible when `persist_in_all_scenes` is on, or
//!    when the scene is in the allow-list (case-insensitive exact match).
//!
//! # Position, in priority order
//!
//! 1. a marker tagged with the spawn tag
//! 2. a marker named with the spawn name
//! 3. the per-scene default coordinate
//! 4. the origin
//!
//! When several markers match the same rule, the one with the lowest entity
//! wins so the outcome does not depend on query order.

use bevy_ecs::prelude::Entity;
use glam::Vec2;

use crate::resources::persistenceconfig::SpawnPolicy;

/// A scene object the actor could be placed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnCandidate<'a> {
    pub entity: Entity,
    pub position: Vec2,
    pub tag: Option<&'a str>,
    pub name: Option<&'a str>,
}

/// Which rule produced the spawn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSource {
    TaggedMarker(Entity),
    NamedMarker(Entity),
    SceneDefault,
    Origin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnResolution {
    pub visible: bool,
    pub position: Vec2,
    pub source: SpawnSource,
}

/// Whether `scene` is classified as a menu.
pub fn is_menu_scene(scene: &str, policy: &SpawnPolicy) -> bool {
    let keyword = policy.menu_keyword.to_lowercase();
    !keyword.is_empty() && scene.to_lowercase().contains(&keyword)
}

/// Whether the actor may appear in `scene`.
pub fn is_visible_in(scene: &str, policy: &SpawnPolicy) -> bool {
    if is_menu_scene(scene, policy) {
        return false;
    }
    let scene = scene.to_lowercase();
    policy.persist_in_all_scenes
        || policy
            .allowed_scenes
            .iter()
            .any(|allowed| allowed.to_lowercase() == scene)
}

/// Where the actor should appear in `scene`.
pub fn resolve_position(
    scene: &str,
    policy: &SpawnPolicy,
    candidates: &[SpawnCandidate<'_>],
) -> (Vec2, SpawnSource) {
    if let Some(marker) = candidates
        .iter()
        .filter(|c| c.tag == Some(policy.spawn_tag.as_str()))
        .min_by_key(|c| c.entity)
    {
        return (marker.position, SpawnSource::TaggedMarker(marker.entity));
    }
    if let Some(marker) = candidates
        .iter()
        .filter(|c| c.name == Some(policy.spawn_name.as_str()))
        .min_by_key(|c| c.entity)
    {
        return (marker.position, SpawnSource::NamedMarker(marker.entity));
    }
    if let Some(position) = policy.default_position(scene) {
        return (position, SpawnSource::SceneDefault);
    }
    (Vec2::ZERO, SpawnSource::Origin)
}

/// Resolve visibility and position for a scene load.
pub fn resolve_spawn(
    scene: &str,
    policy: &SpawnPolicy,
    candidates: &[SpawnCandidate<'_>],
) -> SpawnResolution {
    let visible = is_visible_in(scene, policy);
    let (position, source) = resolve_position(scene, policy, candidates);
    SpawnResolution {
        visible,
        position,
        source,
    }
}
