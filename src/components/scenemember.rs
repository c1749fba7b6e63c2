//! Ownership of an entity by a loaded scene.
//!
//! Every object constructed from a scene description gets a [`SceneMember`]
//! naming the scene it came from. The spawn policy only considers markers of
//! the scene that was just loaded, which matters for additive loads.

use bevy_ecs::prelude::Component;

/// The scene an entity was constructed from.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct SceneMember(pub String);

impl SceneMember {
    pub fn new(scene: impl Into<String>) -> Self {
        SceneMember(scene.into())
    }

    pub fn scene(&self) -> &str {
        &self.0
    }
}
