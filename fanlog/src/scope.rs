use fanlog_core::{Settings, Sink};

use crate::{Logger, SinkId};

/// How a scope treats the sinks registered before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// Only sinks of this scope and the scopes inside it receive records.
    Global,
    /// Sinks of the enclosing scopes keep receiving records.
    Local,
}

/// Keeps a scope active; dropping it restores the settings the scope
/// replaced and tears down the sinks registered with the scope.
#[must_use = "the scope ends as soon as the guard is dropped. Do \"let _guard = ...;\""]
pub struct ScopeGuard<'a> {
    logger: &'a Logger,
    frame: u64,
    kind: ScopeKind,
}

impl<'a> ScopeGuard<'a> {
    pub(crate) fn new(logger: &'a Logger, frame: u64, kind: ScopeKind) -> Self {
        Self {
            logger,
            frame,
            kind,
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Registers `sink` with this scope, even when inner scopes are active.
    pub fn add_sink(&self, sink: Sink) -> SinkId {
        self.logger.add_sink_to(self.frame, sink)
    }

    /// Replaces this scope's settings, for every sink registered so far.
    pub fn set_settings(&self, settings: Settings) {
        self.logger.set_frame_settings(self.frame, settings);
    }

    /// Overrides the process name written by records while this scope is
    /// the innermost one naming a process.
    pub fn set_process_name(&self, name: impl Into<String>) {
        self.logger.set_frame_name(self.frame, Some(name.into()));
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.logger.pop_frame(self.frame);
    }
}

/// Removes its sink from the logger when dropped.
#[must_use = "the sink is removed as soon as the guard is dropped"]
pub struct SinkGuard<'a> {
    logger: &'a Logger,
    id: SinkId,
}

impl<'a> SinkGuard<'a> {
    pub(crate) fn new(logger: &'a Logger, id: SinkId) -> Self {
        Self { logger, id }
    }

    pub fn id(&self) -> SinkId {
        self.id
    }
}

impl Drop for SinkGuard<'_> {
    fn drop(&mut self) {
        // Dropped outside the lock so files close without holding it.
        drop(self.logger.remove_sink(self.id));
    }
}
