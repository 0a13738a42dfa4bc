use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::constants::{
    APP_NAME, BIND_FAILED_CAPTION, BIND_FAILED_TEXT, PROJECT_SITE_URL, WINDOW_TITLE_DEFAULT,
};
use crate::dialogs::{DialogError, DialogService, OptionsFactory};
use crate::events::{Notification, OutboundEvent, Publisher};
use crate::launcher::LinkOpener;
use crate::settings::{ShutdownSignal, WindowSettings};
use crate::window::{
    CloseResponse, ManagedWindow, SharedWindow, Subscription, WeakWindow, WindowState,
};

/// Mediator between background application events and the visible state of
/// the single main window.
///
/// Holds a non-owning reference to the window; until [`MainCoordinator::attach`]
/// runs (and after the window is dropped) every window-mutating operation is a
/// silent no-op rather than an error. Dialog failures, by contrast, propagate
/// to the dispatcher untouched.
///
/// Single-threaded by construction: whoever drains the notification bus must
/// call [`MainCoordinator::handle`] on the thread that owns window state.
pub struct MainCoordinator {
    title: String,
    title_dirty: bool,
    window: Option<WeakWindow>,
    dialogs: Rc<RefCell<dyn DialogService>>,
    publisher: Rc<dyn Publisher>,
    opener: Rc<dyn LinkOpener>,
    options_factory: OptionsFactory,
    settings: WindowSettings,
    shutdown: Rc<ShutdownSignal>,
    subscriptions: Vec<Subscription>,
}

impl MainCoordinator {
    pub fn new(
        dialogs: Rc<RefCell<dyn DialogService>>,
        publisher: Rc<dyn Publisher>,
        opener: Rc<dyn LinkOpener>,
        options_factory: OptionsFactory,
        settings: WindowSettings,
        shutdown: Rc<ShutdownSignal>,
    ) -> Self {
        Self {
            title: WINDOW_TITLE_DEFAULT.to_string(),
            title_dirty: false,
            window: None,
            dialogs,
            publisher,
            opener,
            options_factory,
            settings,
            shutdown,
            subscriptions: Vec::new(),
        }
    }

    /// Single dispatch entry point for the three subscribed notification
    /// kinds. Runs synchronously on the caller's thread.
    pub fn handle(&mut self, notification: Notification) -> Result<(), DialogError> {
        debug!(%notification, "dispatching notification");
        match notification {
            Notification::ShowMessage { text, caption } => {
                self.dialogs.borrow_mut().show_message(&text, &caption)
            }
            Notification::ServerBindFailed => {
                self.dialogs
                    .borrow_mut()
                    .show_message(BIND_FAILED_TEXT, BIND_FAILED_CAPTION)?;
                self.show_options()
            }
            Notification::ShowMainWindow => {
                self.restore_main_window();
                Ok(())
            }
        }
    }

    /// One-time wiring against the live window. Fires once because view
    /// attachment itself fires once; a second call is ignored.
    pub fn attach<W: ManagedWindow + 'static>(&mut self, window: &Rc<RefCell<W>>) {
        if self.window.is_some() {
            warn!("a window is already attached; ignoring");
            return;
        }
        let shared: SharedWindow = window.clone();
        self.window = Some(Rc::downgrade(&shared));

        let mut win = window.borrow_mut();

        // Startup-only branch; the flag is sampled exactly once.
        if self.settings.start_minimized {
            win.set_state(WindowState::Minimized);
            win.hide();
        }

        // Minimize never leaves a taskbar-visible window behind.
        let token = win.on_state_changed(Box::new(|ctl, state| {
            if state == WindowState::Minimized {
                ctl.hide();
            }
        }));
        self.subscriptions.push(token);

        let shutdown = Rc::clone(&self.shutdown);
        let minimize_on_close = self.settings.minimize_on_close;
        let token = win.on_close_requested(Box::new(move |ctl| {
            if shutdown.explicit_shutdown() {
                return CloseResponse::Proceed;
            }
            if minimize_on_close {
                ctl.set_state(WindowState::Minimized);
                ctl.hide();
                return CloseResponse::Cancel;
            }
            CloseResponse::Proceed
        }));
        self.subscriptions.push(token);
    }

    /// Restore and force-raise, regardless of how the window got hidden.
    /// No-op while no window is attached.
    fn restore_main_window(&self) {
        let Some(window) = self.window.as_ref().and_then(Weak::upgrade) else {
            warn!("show-main-window before a window was attached; ignoring");
            return;
        };
        let mut window = window.borrow_mut();
        window.show();
        window.set_state(WindowState::Normal);
        window.set_always_on_top(true);
        window.focus();
        window.set_always_on_top(false);
    }

    /// Present the options dialog with a freshly constructed view model.
    pub fn show_options(&self) -> Result<(), DialogError> {
        let options = (self.options_factory)();
        self.dialogs.borrow_mut().show_options(options)
    }

    /// Open the project site in the default browser. Fire-and-forget.
    pub fn open_project_site(&self) {
        self.opener.open(PROJECT_SITE_URL);
    }

    /// Ask the application to exit. Termination is delegated to whoever owns
    /// the lifecycle; the window is not touched here.
    pub fn request_exit(&self) {
        self.publisher.publish(OutboundEvent::AppForceShutdown);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.title == title {
            return;
        }
        self.title = title;
        self.title_dirty = true;
    }

    /// Consumes the pending title change, if any, for the render loop.
    pub fn take_title_change(&mut self) -> Option<&str> {
        if self.title_dirty {
            self.title_dirty = false;
            Some(&self.title)
        } else {
            None
        }
    }

    pub fn version(&self) -> String {
        format!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"))
    }
}
