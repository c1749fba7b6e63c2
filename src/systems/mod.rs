//! Persistence systems.
//!
//! This module groups the ECS systems and observers that keep one player
//! actor alive across scene loads and keep the scene's observers pointed at
//! it.
//!
//! Submodules overview
//! - [`actortimer`] – count down actor timers and end attack windows
//! - [`camerafollow`] – ease camera followers toward their bound actor
//! - [`discovery`] – per-frame tiered search for observers without a valid actor
//! - [`hud`] – refresh the HUD coin label from the bound actor
//! - [`rebinding`] – push the actor to the scene's observers after activation
//! - [`restoration`] – reset transient actor state, keeping configured values
//! - [`scenereaction`] – the actor's scene transition subscription
//! - [`sceneloader`] – two-phase scene loading and pending load requests
//! - [`singleton`] – player construction and the singleton guard
//! - [`spawnpolicy`] – visibility and spawn position resolution
//! - [`teardown`] – ordered destruction of the actor, return to main menu
//! - [`time`] – update simulation time and delta

pub mod actortimer;
pub mod camerafollow;
pub mod discovery;
pub mod hud;
pub mod rebinding;
pub mod restoration;
pub mod sceneloader;
pub mod scenereaction;
pub mod singleton;
pub mod spawnpolicy;
pub mod teardown;
pub mod time;
