//! Scenekeeper library.
//!
//! Keeps exactly one player actor alive across scene loads and keeps each
//! scene's observers (camera follower, HUD) bound to it. Built on
//! `bevy_ecs`: the components, resources, systems, and events are exposed
//! for embedding and for integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
