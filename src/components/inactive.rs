//! Deactivation marker.
//!
//! An entity with [`Inactive`] is kept alive but takes no part in per-frame
//! updates and cannot be discovered by observers. The persistent actor gets
//! it in scenes where it must not appear, and loses it again as soon as a
//! scene load resolves it to visible.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Inactive;
