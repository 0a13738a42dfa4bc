mod term_window;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

pub use term_window::TermWindow;

/// Native window state. Visibility is tracked separately: the tray policy
/// collapses "minimized but on the taskbar" into "minimized and hidden", so a
/// minimized window here is normally also invisible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Minimized,
}

/// Verdict a close hook hands back to the windowing layer. Cancellation is a
/// result flag, never an unwind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseResponse {
    Proceed,
    Cancel,
}

/// Mutation and query surface of a managed window.
///
/// This is the view handed to lifecycle hooks, deliberately without hook
/// registration so a hook cannot re-enter the registry that is invoking it.
pub trait WindowCtl {
    fn show(&mut self);
    fn hide(&mut self);
    fn set_state(&mut self, state: WindowState);
    fn state(&self) -> WindowState;
    fn is_visible(&self) -> bool;
    fn set_always_on_top(&mut self, on_top: bool);
    fn is_always_on_top(&self) -> bool;
    fn focus(&mut self);
    fn is_focused(&self) -> bool;
    /// Terminal transition. Only the windowing layer calls this, and only
    /// after a close request was allowed to proceed.
    fn close(&mut self);
    fn is_closed(&self) -> bool;
}

pub type StateChangedHook = Box<dyn FnMut(&mut dyn WindowCtl, WindowState)>;
pub type CloseRequestedHook = Box<dyn FnMut(&mut dyn WindowCtl) -> CloseResponse>;

/// Opaque token for a registered lifecycle hook. Keep it to unsubscribe later;
/// dropping it leaves the hook installed for the window's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// A window whose lifecycle can be observed and overridden.
pub trait ManagedWindow: WindowCtl {
    /// Invoked synchronously after the native state changes.
    fn on_state_changed(&mut self, hook: StateChangedHook) -> Subscription;
    /// Invoked synchronously when a close gesture arrives, before the window
    /// is destroyed. Any hook answering [`CloseResponse::Cancel`] wins.
    fn on_close_requested(&mut self, hook: CloseRequestedHook) -> Subscription;
    fn unsubscribe(&mut self, token: Subscription);
}

pub type SharedWindow = Rc<RefCell<dyn ManagedWindow>>;
pub type WeakWindow = Weak<RefCell<dyn ManagedWindow>>;

/// Plain flag holder implementing [`WindowCtl`]. Window implementations hold
/// one of these next to their [`HookSet`] so hooks can borrow the core while
/// the registry is being iterated.
#[derive(Debug)]
pub struct WindowCore {
    state: WindowState,
    visible: bool,
    always_on_top: bool,
    focused: bool,
    closed: bool,
}

impl WindowCore {
    pub fn new() -> Self {
        Self {
            state: WindowState::Normal,
            visible: true,
            always_on_top: false,
            focused: false,
            closed: false,
        }
    }
}

impl Default for WindowCore {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowCtl for WindowCore {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn set_state(&mut self, state: WindowState) {
        if self.state != state {
            debug!(?state, "window state change");
        }
        self.state = state;
    }

    fn state(&self) -> WindowState {
        self.state
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_always_on_top(&mut self, on_top: bool) {
        self.always_on_top = on_top;
    }

    fn is_always_on_top(&self) -> bool {
        self.always_on_top
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn close(&mut self) {
        debug!("window closed");
        self.closed = true;
        self.visible = false;
        self.focused = false;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Registry of lifecycle hooks, shared by window implementations.
///
/// Firing borrows the registry and the window core disjointly, which is why
/// hooks receive `&mut dyn WindowCtl` instead of the whole window.
pub struct HookSet {
    next_id: u64,
    state_changed: Vec<(u64, StateChangedHook)>,
    close_requested: Vec<(u64, CloseRequestedHook)>,
}

impl HookSet {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            state_changed: Vec::new(),
            close_requested: Vec::new(),
        }
    }

    fn next_token(&mut self) -> Subscription {
        let token = Subscription(self.next_id);
        self.next_id += 1;
        token
    }

    pub fn add_state_changed(&mut self, hook: StateChangedHook) -> Subscription {
        let token = self.next_token();
        self.state_changed.push((token.0, hook));
        token
    }

    pub fn add_close_requested(&mut self, hook: CloseRequestedHook) -> Subscription {
        let token = self.next_token();
        self.close_requested.push((token.0, hook));
        token
    }

    pub fn remove(&mut self, token: Subscription) {
        self.state_changed.retain(|(id, _)| *id != token.0);
        self.close_requested.retain(|(id, _)| *id != token.0);
    }

    pub fn fire_state_changed(&mut self, ctl: &mut dyn WindowCtl, state: WindowState) {
        for (_, hook) in &mut self.state_changed {
            hook(ctl, state);
        }
    }

    /// Runs every close hook even after one cancels, so observers further
    /// down the list still see the attempt. Cancel wins.
    pub fn fire_close_requested(&mut self, ctl: &mut dyn WindowCtl) -> CloseResponse {
        let mut response = CloseResponse::Proceed;
        for (_, hook) in &mut self.close_requested {
            if hook(ctl) == CloseResponse::Cancel {
                response = CloseResponse::Cancel;
            }
        }
        response
    }
}

impl Default for HookSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_defaults_to_visible_normal() {
        let core = WindowCore::new();
        assert_eq!(core.state(), WindowState::Normal);
        assert!(core.is_visible());
        assert!(!core.is_closed());
        assert!(!core.is_always_on_top());
    }

    #[test]
    fn close_drops_visibility_and_focus() {
        let mut core = WindowCore::new();
        core.focus();
        core.close();
        assert!(core.is_closed());
        assert!(!core.is_visible());
        assert!(!core.is_focused());
    }

    #[test]
    fn hooks_fire_and_unsubscribe() {
        let mut core = WindowCore::new();
        let mut hooks = HookSet::new();
        let token = hooks.add_state_changed(Box::new(|ctl, state| {
            if state == WindowState::Minimized {
                ctl.hide();
            }
        }));
        core.set_state(WindowState::Minimized);
        hooks.fire_state_changed(&mut core, WindowState::Minimized);
        assert!(!core.is_visible());

        hooks.remove(token);
        core.show();
        hooks.fire_state_changed(&mut core, WindowState::Minimized);
        // hook is gone, visibility untouched
        assert!(core.is_visible());
    }

    #[test]
    fn any_cancel_wins_but_all_close_hooks_run() {
        let mut core = WindowCore::new();
        let mut hooks = HookSet::new();
        hooks.add_close_requested(Box::new(|_| CloseResponse::Cancel));
        hooks.add_close_requested(Box::new(|ctl| {
            // later observer still sees the attempt
            ctl.focus();
            CloseResponse::Proceed
        }));
        let response = hooks.fire_close_requested(&mut core);
        assert_eq!(response, CloseResponse::Cancel);
        assert!(core.is_focused());
    }
}
