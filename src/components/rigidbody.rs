//! Kinematic body of the player actor.
//!
//! The [`RigidBody`] component stores the actor's velocity and its
//! `gravity_scale`. Physics integration itself lives outside this crate; what
//! matters here is the split between transient motion (velocity) and the
//! tuned `gravity_scale`, which is configuration and must survive a
//! transient reset (see [`crate::systems::restoration`]).

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Gravity scale the body falls back to when reset.
pub const RESET_GRAVITY_SCALE: f32 = 0.0;

/// Kinematic body storing velocity and a tunable gravity scale.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_gravity(3.0);
/// rb.velocity = Vec2::new(2.0, 0.0);
///
/// // Transient reset drops everything, including gravity.
/// rb.reset();
/// assert_eq!(rb.gravity_scale, 0.0);
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Multiplier applied to world gravity.
    pub gravity_scale: f32,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest with a gravity scale of 1.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }

    /// Create a RigidBody at rest with the given gravity scale.
    pub fn with_gravity(gravity_scale: f32) -> Self {
        Self {
            gravity_scale,
            ..Self::new()
        }
    }

    /// Drop all motion state. Gravity goes back to [`RESET_GRAVITY_SCALE`].
    pub fn reset(&mut self) {
        self.velocity = Vec2::ZERO;
        self.gravity_scale = RESET_GRAVITY_SCALE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rigidbody_new_is_at_rest() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert_eq!(rb.gravity_scale, 1.0);
    }

    #[test]
    fn test_with_gravity() {
        let rb = RigidBody::with_gravity(3.0);
        assert_eq!(rb.gravity_scale, 3.0);
        assert_eq!(rb.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_reset_clears_gravity_and_motion() {
        let mut rb = RigidBody::with_gravity(3.0);
        rb.velocity = Vec2::new(4.0, -9.0);
        rb.reset();
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert_eq!(rb.gravity_scale, RESET_GRAVITY_SCALE);
    }
}
