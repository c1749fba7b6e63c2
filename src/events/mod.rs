//! Event types used by the persistence subsystem.
//!
//! Submodules:
//! - [`scene`] – scene loaded / scene activated notifications
pub mod scene;
