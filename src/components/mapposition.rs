//! World-space position component.
//!
//! [`MapPosition`] is the pivot of an entity in scene space. The persistent
//! actor, spawn markers, and camera followers all carry one; it is the
//! "position anchor" observers track.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space position (pivot) for an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    /// Create a position from its coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    /// Create a position from a vector.
    pub fn from_vec(pos: Vec2) -> Self {
        Self { pos }
    }

    /// Overwrite the position.
    pub fn set(&mut self, pos: Vec2) {
        self.pos = pos;
    }
}

impl Default for MapPosition {
    fn default() -> Self {
        Self { pos: Vec2::ZERO }
    }
}
