//! Timed behaviors queued on the player actor.
//!
//! [`ActorTimers`] holds the actor's pending timed behaviors (attack windows,
//! cooldowns, invulnerability...). They are ticked by
//! [`update_actor_timers`](crate::systems::actortimer::update_actor_timers),
//! dropped by a transient reset, and cancelled before the actor is torn down
//! so nothing fires against a half-destroyed entity.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

/// A single countdown with a label describing what it ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorTimer {
    pub label: String,
    pub remaining: f32,
}

impl ActorTimer {
    pub fn new(label: impl Into<String>, duration: f32) -> Self {
        Self {
            label: label.into(),
            remaining: duration,
        }
    }
}

/// Pending timed behaviors of an actor.
#[derive(Component, Debug, Clone, Default)]
pub struct ActorTimers {
    timers: SmallVec<[ActorTimer; 4]>,
}

impl ActorTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a timer. A timer with the same label is restarted instead.
    pub fn schedule(&mut self, label: impl Into<String>, duration: f32) {
        let label = label.into();
        if let Some(timer) = self.timers.iter_mut().find(|t| t.label == label) {
            timer.remaining = duration;
        } else {
            self.timers.push(ActorTimer::new(label, duration));
        }
    }

    /// Advance every timer by `delta` seconds and return the labels that
    /// expired, in scheduling order.
    pub fn tick(&mut self, delta: f32) -> SmallVec<[String; 2]> {
        let mut expired = SmallVec::new();
        for timer in self.timers.iter_mut() {
            timer.remaining -= delta;
        }
        self.timers.retain(|t| {
            if t.remaining <= 0.0 {
                expired.push(t.label.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Drop every pending timer without firing it. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    pub fn is_scheduled(&self, label: &str) -> bool {
        self.timers.iter().any(|t| t.label == label)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
