//! Scene transition subscription handle.
//!
//! A subscription to [`SceneLoadedEvent`](crate::events::scene::SceneLoadedEvent)
//! is an observer entity. The actor holding the subscription keeps its
//! [`SceneSubscription`] so the teardown path can release it; the observer
//! entity carries [`SubscriptionOwner`] pointing back at the actor.

use bevy_ecs::prelude::{Component, Entity};

/// Handle to the scene transition observer owned by an actor.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneSubscription {
    pub observer: Entity,
}

/// Back-reference from a subscription observer to the actor it serves.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionOwner(pub Entity);
