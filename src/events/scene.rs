//! Scene transition events.
//!
//! A scene load is published in two phases, both from
//! [`load_scene`](crate::systems::sceneloader::load_scene):
//!
//! 1. [`SceneLoadedEvent`] once every object of the new scene has been
//!    constructed. The persistent actor's subscription observer reacts to it
//!    (visibility, placement, state restoration).
//! 2. [`SceneActivatedEvent`] after every reaction to the first phase has
//!    been applied. Cross-object notification (pushing the actor reference
//!    to the scene's observers) happens here, so it never races the
//!    construction of the objects it targets.

use bevy_ecs::prelude::*;

use crate::resources::scenestate::LoadMode;

/// A scene finished loading; delivered to scene transition subscribers.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneLoadedEvent {
    pub scene: String,
    pub mode: LoadMode,
}

/// Post-activation pass of a scene load.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneActivatedEvent {
    pub scene: String,
}
