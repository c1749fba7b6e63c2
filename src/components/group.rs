//! Tag component for discovering entities by a well-known name.
//!
//! A [`Group`] is the scene-authored tag of an object, such as `"Player"` on
//! the actor or `"PlayerSpawn"` on a spawn marker. Several entities may share
//! the same tag.

use bevy_ecs::prelude::Component;

/// Tag shared by all entities of the same kind.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Group(String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Exact, case-sensitive comparison, like scene-authored tags.
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}
