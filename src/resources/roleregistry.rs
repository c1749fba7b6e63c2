//! Registry of live objects by role.
//!
//! The [`RoleRegistry`] maps a well-known [`Role`] to the entity currently
//! filling it. Scene objects register themselves when they are constructed,
//! so observers find the actor (and the actor finds observers) with an O(1)
//! lookup instead of scanning the world. Scene unloads prune the entries of
//! despawned entities.
//!
//! Lookups can still return an entity that has since been despawned by some
//! other path; callers validate the entity with a query before using it.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

/// Well-known roles an entity can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The persistent player actor.
    Player,
    /// The camera following the player in the active scene.
    CameraFollower,
    /// The HUD label showing the player's coins.
    HudCoinLabel,
}

impl Role {
    /// Roles filled by per-scene observers of the actor.
    pub const OBSERVERS: [Role; 2] = [Role::CameraFollower, Role::HudCoinLabel];
}

#[derive(Resource, Debug, Default, Clone)]
pub struct RoleRegistry {
    entries: FxHashMap<Role, Entity>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` for `role`, returning the entity it replaced.
    pub fn register(&mut self, role: Role, entity: Entity) -> Option<Entity> {
        self.entries.insert(role, entity)
    }

    pub fn get(&self, role: Role) -> Option<Entity> {
        self.entries.get(&role).copied()
    }

    /// Remove `role` only if it is still held by `entity`.
    pub fn unregister(&mut self, role: Role, entity: Entity) -> bool {
        if self.entries.get(&role) == Some(&entity) {
            self.entries.remove(&role);
            true
        } else {
            false
        }
    }

    /// Drop every entry for which `is_alive` returns false.
    pub fn retain_alive(&mut self, mut is_alive: impl FnMut(Entity) -> bool) {
        self.entries.retain(|_, entity| is_alive(*entity));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_register_and_get() {
        let mut world = World::new();
        let camera = world.spawn_empty().id();
        let mut registry = RoleRegistry::new();
        assert_eq!(registry.register(Role::CameraFollower, camera), None);
        assert_eq!(registry.get(Role::CameraFollower), Some(camera));
        assert_eq!(registry.get(Role::Player), None);
    }

    #[test]
    fn test_unregister_only_matching_entity() {
        let mut world = World::new();
        let old = world.spawn_empty().id();
        let new = world.spawn_empty().id();
        let mut registry = RoleRegistry::new();
        registry.register(Role::CameraFollower, old);
        assert_eq!(registry.register(Role::CameraFollower, new), Some(old));

        assert!(!registry.unregister(Role::CameraFollower, old));
        assert_eq!(registry.get(Role::CameraFollower), Some(new));
        assert!(registry.unregister(Role::CameraFollower, new));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_retain_alive_prunes_dead_entries() {
        let mut world = World::new();
        let player = world.spawn_empty().id();
        let camera = world.spawn_empty().id();
        let mut registry = RoleRegistry::new();
        registry.register(Role::Player, player);
        registry.register(Role::CameraFollower, camera);

        world.despawn(camera);
        registry.retain_alive(|e| world.get_entity(e).is_ok());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(Role::Player), Some(player));
    }
}
