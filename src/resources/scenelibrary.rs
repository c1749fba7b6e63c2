//! Scene descriptions and the library that stores them.
//!
//! A scene is described by a JSON document listing the objects to construct
//! when it loads. Descriptions are registered in a [`SceneLibrary`] resource,
//! either in code or from a directory of `*.json` files (one scene per file).
//!
//! # Format
//!
//! ```json
//! {
//!   "name": "Escena1",
//!   "objects": [
//!     { "kind": "player", "position": [0.0, 0.0], "gravity_scale": 3.0 },
//!     { "kind": "marker", "name": "PlayerSpawn", "tag": "PlayerSpawn", "position": [3.0, 4.0] },
//!     { "kind": "camera", "offset": [0.0, 1.0], "smoothing": 5.0 },
//!     { "kind": "hud_coins" }
//!   ]
//! }
//! ```
//!
//! Every playable scene usually carries its own `player` prefab so it can be
//! started directly; the singleton guard destroys it whenever a persistent
//! actor already exists.

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while building or querying the scene library.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene description {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("scene {0:?} is not in the library")]
    UnknownScene(String),
}

/// Description of a single object placed in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneObject {
    /// Player prefab. Subject to the singleton guard.
    Player {
        #[serde(default)]
        position: [f32; 2],
        #[serde(default = "default_gravity_scale")]
        gravity_scale: f32,
        #[serde(default)]
        coins: u32,
    },
    /// Any named and/or tagged object with a position, e.g. a spawn marker.
    Marker {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        tag: Option<String>,
        #[serde(default)]
        position: [f32; 2],
    },
    /// Camera follower. Missing values come from the persistence config.
    Camera {
        #[serde(default)]
        position: [f32; 2],
        #[serde(default)]
        offset: Option<[f32; 2]>,
        #[serde(default)]
        smoothing: Option<f32>,
    },
    /// HUD label showing the player's coins.
    HudCoins,
}

fn default_gravity_scale() -> f32 {
    1.0
}

/// Everything constructed when a scene loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl SceneDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    /// Builder: add an object.
    pub fn with(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Builder: add a player prefab.
    pub fn with_player(self, x: f32, y: f32, gravity_scale: f32) -> Self {
        self.with(SceneObject::Player {
            position: [x, y],
            gravity_scale,
            coins: 0,
        })
    }

    /// Builder: add a marker.
    pub fn with_marker(self, name: Option<&str>, tag: Option<&str>, x: f32, y: f32) -> Self {
        self.with(SceneObject::Marker {
            name: name.map(String::from),
            tag: tag.map(String::from),
            position: [x, y],
        })
    }

    /// Builder: add a camera follower using the configured defaults.
    pub fn with_camera(self) -> Self {
        self.with(SceneObject::Camera {
            position: [0.0, 0.0],
            offset: None,
            smoothing: None,
        })
    }

    /// Builder: add a HUD coin label.
    pub fn with_hud(self) -> Self {
        self.with(SceneObject::HudCoins)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Registered scene descriptions keyed by scene name.
#[derive(Resource, Debug, Default, Clone)]
pub struct SceneLibrary {
    scenes: FxHashMap<String, SceneDescription>,
}

impl SceneLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a description, replacing any scene with the same name.
    pub fn insert(&mut self, scene: SceneDescription) {
        debug!("SceneLibrary: registered scene '{}'", scene.name);
        self.scenes.insert(scene.name.clone(), scene);
    }

    /// Builder: register a description.
    pub fn with(mut self, scene: SceneDescription) -> Self {
        self.insert(scene);
        self
    }

    pub fn get(&self, name: &str) -> Result<&SceneDescription, SceneError> {
        self.scenes
            .get(name)
            .ok_or_else(|| SceneError::UnknownScene(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Scene names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Load one scene description file.
    pub fn load_file(&mut self, path: &Path) -> Result<(), SceneError> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = SceneDescription::from_json(&text).map_err(|source| SceneError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        self.insert(scene);
        Ok(())
    }

    /// Load every `*.json` file in `dir`. Returns how many scenes were loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, SceneError> {
        let entries = std::fs::read_dir(dir).map_err(|source| SceneError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SceneError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        for path in &paths {
            self.load_file(path)?;
        }
        info!("Loaded {} scene descriptions from {:?}", paths.len(), dir);
        Ok(paths.len())
    }
}
