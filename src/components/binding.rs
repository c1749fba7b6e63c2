//! Non-owning reference from a dependent observer to the persistent actor.
//!
//! Observers (the camera follower, the HUD coin label) never own the actor.
//! They hold an [`ActorBinding`]: an optional [`Entity`] plus the bookkeeping
//! needed to rate-limit diagnostics while the actor cannot be found.
//!
//! # States
//!
//! - [`BindingState::Unbound`] – no target; the owner searches every update.
//! - [`BindingState::Bound`] – a target is held; the owner tracks it. The
//!   owner drops back to `Unbound` when the entity no longer exists.
//!
//! There is no terminal state: a binding lives as long as its scene object.

use bevy_ecs::prelude::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound(Entity),
}

/// Result of [`ActorBinding::bind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// Was unbound, now bound.
    Bound,
    /// Already bound to the same entity; nothing changed.
    Unchanged,
    /// Was bound to another entity, which has been replaced.
    Replaced(Entity),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActorBinding {
    target: Option<Entity>,
    failed_searches: u32,
    last_warning_at: Option<f32>,
}

impl ActorBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `actor`. Binding the entity already held is a no-op.
    pub fn bind(&mut self, actor: Entity) -> BindOutcome {
        let outcome = match self.target {
            Some(current) if current == actor => return BindOutcome::Unchanged,
            Some(current) => BindOutcome::Replaced(current),
            None => BindOutcome::Bound,
        };
        self.target = Some(actor);
        self.failed_searches = 0;
        self.last_warning_at = None;
        outcome
    }

    /// Forget the target. Returns the entity that was held, if any.
    pub fn unbind(&mut self) -> Option<Entity> {
        self.target.take()
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn state(&self) -> BindingState {
        match self.target {
            Some(entity) => BindingState::Bound(entity),
            None => BindingState::Unbound,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    pub fn failed_searches(&self) -> u32 {
        self.failed_searches
    }

    /// Record a failed search at time `now` (seconds).
    ///
    /// Returns `true` when a warning should be emitted: on the first failure
    /// and then at most once every `interval` seconds.
    pub fn record_failed_search(&mut self, now: f32, interval: f32) -> bool {
        self.failed_searches = self.failed_searches.saturating_add(1);
        match self.last_warning_at {
            Some(last) if now - last < interval => false,
            _ => {
                self.last_warning_at = Some(now);
                true
            }
        }
    }
}
