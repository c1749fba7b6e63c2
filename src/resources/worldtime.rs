//! Simulation time resource.

use bevy_ecs::prelude::Resource;

/// Elapsed and per-frame time, in seconds.
///
/// `elapsed` and `delta` are scaled by `time_scale`. `real_elapsed` is not,
/// so it keeps moving while the game is paused.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub real_elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            real_elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
