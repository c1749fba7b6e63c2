//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance the `WorldTime` resource by one frame.
///
/// `dt` is the unscaled frame delta in seconds. The current `time_scale` is
/// applied before `elapsed` and `delta` are written. `real_elapsed` takes the
/// unscaled delta, and `frame_count` is incremented.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let dt = dt.max(0.0);
    let scaled_dt = dt * wt.time_scale;
    wt.real_elapsed += dt;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}
