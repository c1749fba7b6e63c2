//! Transient state restoration.
//!
//! Every scene transition wipes the actor's transient state (attacks in
//! progress, combo chain, queued timers, velocity). The wipe is destructive:
//! it also drops the tuned gravity scale. Restoration therefore runs in a
//! fixed order:
//!
//! 1. read the configured value,
//! 2. run the full transient reset,
//! 3. write the value read in step 1 back.
//!
//! Reading after the reset would only ever see the reset default.

use crate::components::actortimer::ActorTimers;
use crate::components::player::PlayerCombat;
use crate::components::rigidbody::RigidBody;

/// Access to an actor's tunable physics value and its transient reset.
pub trait TransientReset {
    /// Current configured physics value (gravity scale).
    fn physics_scale(&self) -> f32;
    fn set_physics_scale(&mut self, value: f32);
    /// Clear every transient field. May clobber the physics value.
    fn reset_transient(&mut self);
}

/// Values observed while restoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restoration {
    /// Configured value read before the reset.
    pub before: f32,
    /// Value left behind by the reset.
    pub after_reset: f32,
    /// Value after re-applying the configured one.
    pub after: f32,
}

/// Reset `target`'s transient state while keeping its configured value.
pub fn restore_transient_state<T: TransientReset + ?Sized>(target: &mut T) -> Restoration {
    let before = target.physics_scale();
    target.reset_transient();
    let after_reset = target.physics_scale();
    target.set_physics_scale(before);
    Restoration {
        before,
        after_reset,
        after: target.physics_scale(),
    }
}

/// Mutable view over the components making up the actor's state.
pub struct ActorState<'a> {
    pub body: &'a mut RigidBody,
    pub combat: &'a mut PlayerCombat,
    pub timers: &'a mut ActorTimers,
}

impl TransientReset for ActorState<'_> {
    fn physics_scale(&self) -> f32 {
        self.body.gravity_scale
    }

    fn set_physics_scale(&mut self, value: f32) {
        self.body.gravity_scale = value;
    }

    fn reset_transient(&mut self) {
        self.body.reset();
        self.combat.reset();
        self.timers.cancel_all();
    }
}
