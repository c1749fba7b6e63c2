//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! shared by the persistence systems.
//!
//! Overview
//! - `actorslot` – the one process-wide persistent actor, if any
//! - `diagnostics` – bounded history of subsystem diagnostics
//! - `persistenceconfig` – spawn policy and camera tuning loaded from INI
//! - `roleregistry` – live entity per well-known role
//! - `scenelibrary` – scene descriptions loaded from JSON
//! - `scenestate` – active scene and pending scene load
//! - `worldtime` – simulation time and delta
pub mod actorslot;
pub mod diagnostics;
pub mod persistenceconfig;
pub mod roleregistry;
pub mod scenelibrary;
pub mod scenestate;
pub mod worldtime;
