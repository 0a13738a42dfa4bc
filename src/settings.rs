use std::cell::Cell;

/// Read-only snapshot of the persisted window-behavior flags, injected at
/// construction rather than read from a global store.
///
/// `start_minimized` is sampled once, at attach time. `minimize_on_close` is
/// consulted on every close attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowSettings {
    pub start_minimized: bool,
    pub minimize_on_close: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownMode {
    /// Normal operation: closing the main window is subject to interception.
    OnMainWindowClose,
    /// The process is terminating deliberately; close interception stands
    /// down and lets the window die.
    OnExplicitShutdown,
}

/// Live shutdown-mode query shared across the UI thread.
///
/// The exit subsystem flips this to [`ShutdownMode::OnExplicitShutdown`]
/// before tearing the window down; the coordinator's close hook reads it at
/// each close attempt. Single-thread only, hence `Cell` and no locking.
#[derive(Debug)]
pub struct ShutdownSignal {
    mode: Cell<ShutdownMode>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            mode: Cell::new(ShutdownMode::OnMainWindowClose),
        }
    }

    pub fn mode(&self) -> ShutdownMode {
        self.mode.get()
    }

    pub fn explicit_shutdown(&self) -> bool {
        self.mode.get() == ShutdownMode::OnExplicitShutdown
    }

    pub fn begin_explicit_shutdown(&self) {
        self.mode.set(ShutdownMode::OnExplicitShutdown);
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
