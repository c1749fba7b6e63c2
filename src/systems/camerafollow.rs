//! Camera follow system.
//!
//! Moves every active [`CameraFollower`] toward its bound actor. Binding and
//! re-binding are handled elsewhere; a follower that is unbound, or whose
//! target has no active position, holds still for the frame.
//!
//! # Related
//!
//! - [`crate::systems::discovery`] – keeps the binding valid
//! - [`crate::systems::rebinding`] – pushes the actor after scene activation

use bevy_ecs::prelude::*;

use crate::components::camerafollower::CameraFollower;
use crate::components::inactive::Inactive;
use crate::components::mapposition::MapPosition;
use crate::resources::worldtime::WorldTime;

/// Ease each follower toward `target + offset`.
pub fn camera_follow_system(
    time: Res<WorldTime>,
    mut cameras: Query<(&CameraFollower, &mut MapPosition), Without<Inactive>>,
    targets: Query<&MapPosition, (Without<CameraFollower>, Without<Inactive>)>,
) {
    for (camera, mut position) in cameras.iter_mut() {
        let Some(target) = camera.binding.target() else {
            continue;
        };
        if let Ok(target_pos) = targets.get(target) {
            position.pos = camera.step(position.pos, target_pos.pos, time.delta);
        }
    }
}
