//! The process-wide persistent actor slot.
//!
//! [`ActorSlot`] holds the one live persistent actor, if any. It replaces a
//! global singleton: the slot lives in the [`World`](bevy_ecs::world::World)
//! and only two places write to it, the singleton guard when it registers a
//! newly constructed actor and the teardown path when it destroys that actor.
//! Everything else reads it through [`ActorSlot::current`].

use bevy_ecs::prelude::{Entity, Resource};

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActorSlot {
    current: Option<Entity>,
}

impl ActorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registered actor, if any.
    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }

    /// Register `actor`. Only the singleton guard calls this.
    pub(crate) fn claim(&mut self, actor: Entity) {
        self.current = Some(actor);
    }

    /// Empty the slot if it still holds `actor`. Only the teardown path and
    /// the guard (for stale entries) call this.
    pub(crate) fn release(&mut self, actor: Entity) -> bool {
        if self.current == Some(actor) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
