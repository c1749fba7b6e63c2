//! Diagnostic sink of the persistence subsystem.
//!
//! Every decision worth explaining (a duplicate actor destroyed, a visibility
//! verdict, a spawn position, a restoration, a rebind...) is written through
//! [`DiagnosticLog::record`]. The line goes to the `log` facade and is kept
//! in a bounded in-memory history so tools and tests can inspect what the
//! subsystem did and to which entity.

use bevy_ecs::prelude::{Entity, Resource};
use log::{Level, log};
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 256;

/// What a diagnostic line is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A second actor was constructed and destroyed by the singleton guard.
    DuplicateDestroyed,
    /// An actor was registered in the actor slot.
    ActorRegistered,
    /// Visibility verdict for the loaded scene.
    Visibility,
    /// Where the actor was placed.
    SpawnPosition,
    /// Configured value before/after a transient reset.
    Restoration,
    /// An observer was bound to the actor.
    Rebind,
    /// The loaded scene has no observer for a role.
    RebindMissing,
    /// An observer could not find any actor (rate limited).
    DiscoveryFailed,
    /// The actor was torn down.
    Teardown,
    /// A subscription outlived its actor and released itself.
    SubscriptionLeak,
    /// A scene was loaded, or a load request was rejected.
    SceneLoad,
}

impl DiagnosticKind {
    fn level(self) -> Level {
        match self {
            DiagnosticKind::DiscoveryFailed | DiagnosticKind::SubscriptionLeak => Level::Warn,
            _ => Level::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Entity the line is attributable to, if any.
    pub subject: Option<Entity>,
    pub message: String,
}

/// Bounded history of subsystem diagnostics.
#[derive(Resource, Debug, Clone)]
pub struct DiagnosticLog {
    entries: VecDeque<Diagnostic>,
    capacity: usize,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    /// Log `message` and keep it in the history, evicting the oldest line
    /// when full.
    pub fn record(
        &mut self,
        kind: DiagnosticKind,
        subject: Option<Entity>,
        message: impl Into<String>,
    ) {
        let message = message.into();
        match subject {
            Some(entity) => log!(kind.level(), "[{:?}] {:?}: {}", kind, entity, message),
            None => log!(kind.level(), "[{:?}] {}", kind, message),
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Diagnostic {
            kind,
            subject,
            message,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Lines of the given kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    /// Lines attributable to `entity`.
    pub fn about(&self, entity: Entity) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(move |d| d.subject == Some(entity))
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn last(&self) -> Option<&Diagnostic> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
