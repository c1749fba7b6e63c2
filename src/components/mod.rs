//! ECS components for entities.
//!
//! This module groups the component types attached to the persistent actor,
//! to scene-authored objects, and to the observers that depend on the actor.
//!
//! Submodules overview:
//! - [`actortimer`] – timed behaviors queued on the actor
//! - [`binding`] – non-owning actor reference held by observers
//! - [`camerafollower`] – camera that tracks the actor with smoothing
//! - [`group`] – tag component for discovering entities by tag
//! - [`hudcoins`] – HUD label showing the actor's coins
//! - [`inactive`] – marker for entities taken out of update participation
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`nametag`] – scene-authored object name
//! - [`persistent`] – marker for entities that survive scene unloads
//! - [`player`] – player marker, combat state and coin purse
//! - [`rigidbody`] – velocity and tunable gravity scale
//! - [`scenemember`] – the scene an entity was constructed from
//! - [`subscription`] – scene transition subscription handle

pub mod actortimer;
pub mod binding;
pub mod camerafollower;
pub mod group;
pub mod hudcoins;
pub mod inactive;
pub mod mapposition;
pub mod nametag;
pub mod persistent;
pub mod player;
pub mod rigidbody;
pub mod scenemember;
pub mod subscription;
