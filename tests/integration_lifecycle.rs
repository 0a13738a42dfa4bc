use std::cell::RefCell;
use std::rc::Rc;

use tray_shell::coordinator::MainCoordinator;
use tray_shell::dialogs::{DialogError, DialogService, OptionsViewModel};
use tray_shell::events::{Notification, OutboundEvent, Publisher};
use tray_shell::launcher::LinkOpener;
use tray_shell::settings::{ShutdownSignal, WindowSettings};
use tray_shell::window::{TermWindow, WindowCtl, WindowState};

#[derive(Default)]
struct CountingDialogs {
    messages: Vec<(String, String)>,
    options: Vec<OptionsViewModel>,
}

impl DialogService for CountingDialogs {
    fn show_message(&mut self, text: &str, caption: &str) -> Result<(), DialogError> {
        self.messages.push((text.to_string(), caption.to_string()));
        Ok(())
    }

    fn show_options(&mut self, options: OptionsViewModel) -> Result<(), DialogError> {
        self.options.push(options);
        Ok(())
    }
}

#[derive(Default)]
struct CountingPublisher {
    events: RefCell<Vec<OutboundEvent>>,
}

impl Publisher for CountingPublisher {
    fn publish(&self, event: OutboundEvent) {
        self.events.borrow_mut().push(event);
    }
}

struct NullOpener;

impl LinkOpener for NullOpener {
    fn open(&self, _url: &str) {}
}

struct Harness {
    coordinator: MainCoordinator,
    window: Rc<RefCell<TermWindow>>,
    dialogs: Rc<RefCell<CountingDialogs>>,
    publisher: Rc<CountingPublisher>,
    shutdown: Rc<ShutdownSignal>,
}

fn harness(settings: WindowSettings) -> Harness {
    let dialogs = Rc::new(RefCell::new(CountingDialogs::default()));
    let publisher = Rc::new(CountingPublisher::default());
    let shutdown = Rc::new(ShutdownSignal::new());
    let mut coordinator = MainCoordinator::new(
        dialogs.clone(),
        publisher.clone(),
        Rc::new(NullOpener),
        Box::new(move || OptionsViewModel::new("127.0.0.1:2525", settings)),
        settings,
        shutdown.clone(),
    );
    let window = Rc::new(RefCell::new(TermWindow::new("test")));
    coordinator.attach(&window);
    Harness {
        coordinator,
        window,
        dialogs,
        publisher,
        shutdown,
    }
}

#[test]
fn minimize_then_restore_round_trip() {
    let mut h = harness(WindowSettings::default());

    h.window.borrow_mut().request_minimize();
    {
        let win = h.window.borrow();
        assert_eq!(win.state(), WindowState::Minimized);
        assert!(!win.is_visible());
    }

    h.coordinator.handle(Notification::ShowMainWindow).unwrap();
    let win = h.window.borrow();
    assert_eq!(win.state(), WindowState::Normal);
    assert!(win.is_visible());
    assert!(win.is_focused());
    assert!(!win.is_always_on_top());
}

#[test]
fn intercepted_close_keeps_the_window_alive_until_forced() {
    let mut h = harness(WindowSettings {
        start_minimized: false,
        minimize_on_close: true,
    });

    // close gesture is redirected to the tray, repeatedly
    for _ in 0..3 {
        assert!(!h.window.borrow_mut().request_close());
        assert!(!h.window.borrow().is_closed());
    }

    // the exit path: coordinator publishes, the lifecycle owner reacts
    h.coordinator.request_exit();
    assert_eq!(
        h.publisher.events.borrow().as_slice(),
        [OutboundEvent::AppForceShutdown]
    );
    h.shutdown.begin_explicit_shutdown();
    assert!(h.window.borrow_mut().request_close());
    assert!(h.window.borrow().is_closed());
}

#[test]
fn start_minimized_attach_never_shows_the_window() {
    let h = harness(WindowSettings {
        start_minimized: true,
        minimize_on_close: false,
    });
    let win = h.window.borrow();
    assert_eq!(win.state(), WindowState::Minimized);
    assert!(!win.is_visible());
}

#[test]
fn bind_failure_chains_diagnostic_and_options_dialogs() {
    let mut h = harness(WindowSettings::default());
    h.coordinator
        .handle(Notification::ServerBindFailed)
        .unwrap();

    let dialogs = h.dialogs.borrow();
    assert_eq!(dialogs.messages.len(), 1);
    assert_eq!(dialogs.messages[0].1, "Failed");
    assert_eq!(dialogs.options.len(), 1);
    assert_eq!(dialogs.options[0].listen_addr, "127.0.0.1:2525");
}

#[test]
fn restore_works_even_when_hidden_externally() {
    let mut h = harness(WindowSettings::default());
    // hidden by something other than the coordinator's own policy
    h.window.borrow_mut().hide();

    h.coordinator.handle(Notification::ShowMainWindow).unwrap();
    let win = h.window.borrow();
    assert!(win.is_visible());
    assert_eq!(win.state(), WindowState::Normal);
}
