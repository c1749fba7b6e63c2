//! Camera follower component.
//!
//! A [`CameraFollower`] is authored into each scene. It does not know the
//! player when the scene is built: the actor reference arrives either by a
//! push after scene activation or through the follower's own discovery.
//! Once bound, it eases toward `target + offset` every frame.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::binding::ActorBinding;

/// Default smoothing factor, in 1/seconds.
pub const DEFAULT_SMOOTHING: f32 = 5.0;

#[derive(Component, Clone, Debug)]
pub struct CameraFollower {
    /// Non-owning reference to the actor being followed.
    pub binding: ActorBinding,
    /// Offset added to the actor position.
    pub offset: Vec2,
    /// Exponential smoothing factor. Higher values catch up faster;
    /// 0 keeps the camera still.
    pub smoothing: f32,
}

impl Default for CameraFollower {
    fn default() -> Self {
        Self::new(Vec2::ZERO, DEFAULT_SMOOTHING)
    }
}

impl CameraFollower {
    pub fn new(offset: Vec2, smoothing: f32) -> Self {
        Self {
            binding: ActorBinding::new(),
            offset,
            smoothing,
        }
    }

    /// Position the camera wants to reach for an actor at `target`.
    pub fn desired_position(&self, target: Vec2) -> Vec2 {
        target + self.offset
    }

    /// One frame of exponential smoothing from `current` toward the desired
    /// position. Frame-rate independent: the fraction covered in `delta`
    /// seconds is `1 - e^(-smoothing * delta)`.
    pub fn step(&self, current: Vec2, target: Vec2, delta: f32) -> Vec2 {
        let desired = self.desired_position(target);
        let t = 1.0 - (-self.smoothing.max(0.0) * delta.max(0.0)).exp();
        current.lerp(desired, t)
    }
}
