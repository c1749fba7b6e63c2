//! Active scene and pending scene load resources.
//!
//! [`ActiveScene`] names the scene graph currently loaded. [`NextScene`]
//! holds a requested load; the
//! [`apply_pending_scene`](crate::systems::sceneloader::apply_pending_scene)
//! system performs it at the next update and clears the request.

use bevy_ecs::prelude::Resource;

/// How a scene load treats the scene objects already in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadMode {
    /// Unload every non-persistent entity first.
    #[default]
    Single,
    /// Keep existing scene objects and add the new scene's objects.
    Additive,
}

/// The currently loaded scene.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveScene {
    name: Option<String>,
    mode: LoadMode,
    loads: u32,
}

impl ActiveScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the active scene, `None` before the first load.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// Number of scene loads performed so far.
    pub fn loads(&self) -> u32 {
        self.loads
    }

    pub(crate) fn set(&mut self, name: impl Into<String>, mode: LoadMode) {
        self.name = Some(name.into());
        self.mode = mode;
        self.loads += 1;
    }
}

/// A requested scene load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRequest {
    pub scene: String,
    pub mode: LoadMode,
}

/// Intent to load a new scene.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct NextScene {
    next: Option<SceneRequest>,
}

impl NextScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a single-mode load of `scene`. A later request overrides an
    /// earlier one that has not been applied yet.
    pub fn set(&mut self, scene: impl Into<String>) {
        self.set_with_mode(scene, LoadMode::Single);
    }

    pub fn set_with_mode(&mut self, scene: impl Into<String>, mode: LoadMode) {
        self.next = Some(SceneRequest {
            scene: scene.into(),
            mode,
        });
    }

    pub fn get(&self) -> Option<&SceneRequest> {
        self.next.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.next.is_some()
    }

    /// Take the pending request, leaving none.
    pub fn take(&mut self) -> Option<SceneRequest> {
        self.next.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_scene_last_request_wins() {
        let mut next = NextScene::new();
        next.set("Escena1");
        next.set_with_mode("Escena2", LoadMode::Additive);
        let request = next.take().unwrap();
        assert_eq!(request.scene, "Escena2");
        assert_eq!(request.mode, LoadMode::Additive);
        assert!(!next.is_pending());
    }

    #[test]
    fn test_active_scene_counts_loads() {
        let mut active = ActiveScene::new();
        assert_eq!(active.name(), None);
        active.set("Escena1", LoadMode::Single);
        active.set("Escena2", LoadMode::Single);
        assert_eq!(active.name(), Some("Escena2"));
        assert_eq!(active.loads(), 2);
    }
}
