//! Scene-authored object name.

use bevy_ecs::prelude::Component;

/// Name given to an object in its scene description.
///
/// Unlike [`Group`](super::group::Group), a name identifies a single object,
/// e.g. the `"PlayerSpawn"` marker when it carries no tag.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct NameTag(pub String);

impl NameTag {
    pub fn new(name: impl Into<String>) -> Self {
        NameTag(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
