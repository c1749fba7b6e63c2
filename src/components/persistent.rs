//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component are not despawned when a scene
//! is unloaded. The guarded player actor, its scene subscription, and the
//! engine-level observers all carry it.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that survive scene unloads.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Persistent;
