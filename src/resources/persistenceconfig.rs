//! Persistence configuration resource.
//!
//! Holds the spawn policy (where the persistent actor may appear and where it
//! is placed), camera follower tuning, and the main menu scene used by the
//! teardown path. Values are loaded from an INI file; anything missing keeps
//! its default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [persistence]
//! persist_in_all_scenes = false
//! allowed_scenes = Escena1, Escena2
//! menu_keyword = menu
//! main_menu_scene = MainMenu
//!
//! [spawn]
//! tag = PlayerSpawn
//! name = PlayerSpawn
//!
//! [spawn_defaults]
//! escena1 = 0.0, 0.0
//! escena2 = 10.0, -2.5
//!
//! [camera]
//! smoothing = 5.0
//! offset_x = 0.0
//! offset_y = 1.0
//! discovery_warning_interval = 2.0
//! ```
//!
//! Section and key names are case-insensitive, so scene names under
//! `[spawn_defaults]` are matched case-insensitively.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec2;
use log::info;
use rustc_hash::FxHashMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::camerafollower::DEFAULT_SMOOTHING;

const DEFAULT_PERSIST_IN_ALL_SCENES: bool = false;
const DEFAULT_MENU_KEYWORD: &str = "menu";
const DEFAULT_MAIN_MENU_SCENE: &str = "MainMenu";
const DEFAULT_SPAWN_TAG: &str = "PlayerSpawn";
const DEFAULT_SPAWN_NAME: &str = "PlayerSpawn";
const DEFAULT_DISCOVERY_WARNING_INTERVAL: f32 = 2.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Errors raised while loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {detail}")]
    Load { path: PathBuf, detail: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid value for [{section}] {key}: {detail}")]
    InvalidValue {
        section: String,
        key: String,
        detail: String,
    },
    #[error("failed to save config file {path:?}: {detail}")]
    Save { path: PathBuf, detail: String },
}

/// Rules deciding whether the actor appears in a scene and where.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPolicy {
    /// Actor is visible in every non-menu scene.
    pub persist_in_all_scenes: bool,
    /// Scenes the actor may appear in when `persist_in_all_scenes` is off.
    /// Compared case-insensitively.
    pub allowed_scenes: Vec<String>,
    /// Any scene whose name contains this keyword (case-insensitive) is a
    /// menu, and the actor never appears there.
    pub menu_keyword: String,
    /// Tag of the preferred spawn marker.
    pub spawn_tag: String,
    /// Name of the fallback spawn marker.
    pub spawn_name: String,
    /// Per-scene default coordinates, keyed by lowercase scene name.
    default_positions: FxHashMap<String, Vec2>,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            persist_in_all_scenes: DEFAULT_PERSIST_IN_ALL_SCENES,
            allowed_scenes: Vec::new(),
            menu_keyword: DEFAULT_MENU_KEYWORD.to_string(),
            spawn_tag: DEFAULT_SPAWN_TAG.to_string(),
            spawn_name: DEFAULT_SPAWN_NAME.to_string(),
            default_positions: FxHashMap::default(),
        }
    }
}

impl SpawnPolicy {
    /// Builder: allow the actor in `scene`.
    pub fn allow(mut self, scene: impl Into<String>) -> Self {
        self.allowed_scenes.push(scene.into());
        self
    }

    /// Builder: make the actor visible in every non-menu scene.
    pub fn persist_everywhere(mut self, enabled: bool) -> Self {
        self.persist_in_all_scenes = enabled;
        self
    }

    /// Builder: set the default coordinate for `scene`.
    pub fn with_default_position(mut self, scene: &str, position: Vec2) -> Self {
        self.set_default_position(scene, position);
        self
    }

    pub fn set_default_position(&mut self, scene: &str, position: Vec2) {
        self.default_positions
            .insert(scene.to_lowercase(), position);
    }

    /// Default coordinate for `scene`, matched case-insensitively.
    pub fn default_position(&self, scene: &str) -> Option<Vec2> {
        self.default_positions.get(&scene.to_lowercase()).copied()
    }

    pub fn default_positions(&self) -> &FxHashMap<String, Vec2> {
        &self.default_positions
    }
}

/// Tuning of the camera follower and observer discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub smoothing: f32,
    pub offset: Vec2,
    /// Minimum seconds between two "actor not found" warnings per observer.
    pub discovery_warning_interval: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            offset: Vec2::ZERO,
            discovery_warning_interval: DEFAULT_DISCOVERY_WARNING_INTERVAL,
        }
    }
}

/// Configuration of the persistence subsystem.
#[derive(Resource, Debug, Clone)]
pub struct PersistenceConfig {
    pub policy: SpawnPolicy,
    pub camera: CameraSettings,
    /// Scene loaded by the return-to-menu path.
    pub main_menu_scene: String,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            policy: SpawnPolicy::default(),
            camera: CameraSettings::default(),
            main_menu_scene: DEFAULT_MAIN_MENU_SCENE.to_string(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|detail| ConfigError::Load {
            path: self.config_path.clone(),
            detail,
        })?;
        self.apply_ini(&ini)?;
        info!(
            "Loaded config from {:?}: persist_in_all_scenes={}, allowed_scenes={:?}, main_menu={}",
            self.config_path,
            self.policy.persist_in_all_scenes,
            self.policy.allowed_scenes,
            self.main_menu_scene
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(ConfigError::Parse)?;
        self.apply_ini(&ini)
    }

    fn apply_ini(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [persistence] section
        if let Some(enabled) = read_bool(ini, "persistence", "persist_in_all_scenes")? {
            self.policy.persist_in_all_scenes = enabled;
        }
        if let Some(list) = ini.get("persistence", "allowed_scenes") {
            self.policy.allowed_scenes = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        // An empty keyword is kept: it turns menu classification off.
        if let Some(keyword) = ini.get("persistence", "menu_keyword") {
            self.policy.menu_keyword = keyword.trim().to_string();
        }
        if let Some(scene) = ini.get("persistence", "main_menu_scene") {
            self.main_menu_scene = scene.trim().to_string();
        }

        // [spawn] section
        if let Some(tag) = ini.get("spawn", "tag") {
            self.policy.spawn_tag = tag.trim().to_string();
        }
        if let Some(name) = ini.get("spawn", "name") {
            self.policy.spawn_name = name.trim().to_string();
        }

        // [spawn_defaults] section
        if let Some(section) = ini.get_map_ref().get("spawn_defaults") {
            for (scene, value) in section {
                let Some(value) = value else { continue };
                let position = parse_point(value).ok_or_else(|| ConfigError::InvalidValue {
                    section: "spawn_defaults".to_string(),
                    key: scene.clone(),
                    detail: format!("expected \"x, y\", got {:?}", value),
                })?;
                self.policy.set_default_position(scene, position);
            }
        }

        // [camera] section
        if let Some(smoothing) = read_float(ini, "camera", "smoothing")? {
            self.camera.smoothing = smoothing;
        }
        if let Some(x) = read_float(ini, "camera", "offset_x")? {
            self.camera.offset.x = x;
        }
        if let Some(y) = read_float(ini, "camera", "offset_y")? {
            self.camera.offset.y = y;
        }
        if let Some(interval) = read_float(ini, "camera", "discovery_warning_interval")? {
            self.camera.discovery_warning_interval = interval;
        }

        Ok(())
    }

    /// Save configuration to the INI file at `config_path`.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let ini = self.to_ini();
        ini.write(&self.config_path).map_err(|e| ConfigError::Save {
            path: self.config_path.clone(),
            detail: e.to_string(),
        })?;
        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        // [persistence] section
        ini.set(
            "persistence",
            "persist_in_all_scenes",
            Some(self.policy.persist_in_all_scenes.to_string()),
        );
        ini.set(
            "persistence",
            "allowed_scenes",
            Some(self.policy.allowed_scenes.join(", ")),
        );
        ini.set(
            "persistence",
            "menu_keyword",
            Some(self.policy.menu_keyword.clone()),
        );
        ini.set(
            "persistence",
            "main_menu_scene",
            Some(self.main_menu_scene.clone()),
        );

        // [spawn] section
        ini.set("spawn", "tag", Some(self.policy.spawn_tag.clone()));
        ini.set("spawn", "name", Some(self.policy.spawn_name.clone()));

        // [spawn_defaults] section
        for (scene, pos) in self.policy.default_positions() {
            ini.set(
                "spawn_defaults",
                scene,
                Some(format!("{}, {}", pos.x, pos.y)),
            );
        }

        // [camera] section
        ini.set("camera", "smoothing", Some(self.camera.smoothing.to_string()));
        ini.set("camera", "offset_x", Some(self.camera.offset.x.to_string()));
        ini.set("camera", "offset_y", Some(self.camera.offset.y.to_string()));
        ini.set(
            "camera",
            "discovery_warning_interval",
            Some(self.camera.discovery_warning_interval.to_string()),
        );

        ini
    }
}

fn read_bool(ini: &Ini, section: &str, key: &str) -> Result<Option<bool>, ConfigError> {
    ini.getbool(section, key)
        .map_err(|detail| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            detail,
        })
}

fn read_float(ini: &Ini, section: &str, key: &str) -> Result<Option<f32>, ConfigError> {
    ini.getfloat(section, key)
        .map(|v| v.map(|v| v as f32))
        .map_err(|detail| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            detail,
        })
}

/// Parse `"x, y"` into a vector.
fn parse_point(text: &str) -> Option<Vec2> {
    let mut parts = text.split(',').map(str::trim);
    let x = parts.next()?.parse::<f32>().ok()?;
    let y = parts.next()?.parse::<f32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Vec2::new(x, y))
}
