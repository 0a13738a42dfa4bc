use std::cell::RefCell;
use std::io;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use indoc::indoc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::widgets::Paragraph;
use tracing::info;

use tray_shell::actions::Action;
use tray_shell::constants::WINDOW_TITLE_DEFAULT;
use tray_shell::coordinator::MainCoordinator;
use tray_shell::dialogs::{OptionsViewModel, SharedTerminal, TermDialogs};
use tray_shell::events::{
    ChannelPublisher, Notification, NotificationBus, NotificationSender, OutboundEvent,
};
use tray_shell::keybindings::Keymap;
use tray_shell::launcher::Browser;
use tray_shell::settings::{ShutdownSignal, WindowSettings};
use tray_shell::shell_loop::{ControlFlow, LoopEvent, ShellLoop};
use tray_shell::tracing_sub;
use tray_shell::window::{TermWindow, WindowCtl};

const HIDDEN_HINT: &str = indoc! {"


    Tray Shell is running in the background.

    Press R to restore the window, Ctrl+Q to exit."};

#[derive(Debug, Parser)]
#[command(name = "tray-shell", version, about = "Tray-style shell around a background listener.")]
struct Args {
    /// Address the background listener binds to.
    #[arg(long, default_value = "127.0.0.1:2525")]
    bind: String,
    /// Hide the main window immediately on startup.
    #[arg(long)]
    start_minimized: bool,
    /// Intercept the close gesture and hide to the tray instead.
    #[arg(long)]
    minimize_on_close: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    tracing_sub::init_default();

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Rc::new(RefCell::new(Terminal::new(backend)?));

    let result = run(terminal.clone(), &args);

    terminal::disable_raw_mode()?;
    execute!(terminal.borrow_mut().backend_mut(), LeaveAlternateScreen)?;
    terminal.borrow_mut().show_cursor()?;

    result
}

fn run(terminal: SharedTerminal, args: &Args) -> io::Result<()> {
    let settings = WindowSettings {
        start_minimized: args.start_minimized,
        minimize_on_close: args.minimize_on_close,
    };
    let listen_addr = args.bind.clone();

    let bus = NotificationBus::new();
    spawn_listener(listen_addr.clone(), bus.sender());

    let (outbound_tx, outbound_rx) = mpsc::channel();
    let publisher = Rc::new(ChannelPublisher::new(outbound_tx));
    let shutdown = Rc::new(ShutdownSignal::new());
    let dialogs = Rc::new(RefCell::new(TermDialogs::new(terminal.clone())));
    let factory_addr = listen_addr.clone();
    let mut coordinator = MainCoordinator::new(
        dialogs,
        publisher,
        Rc::new(Browser),
        Box::new(move || OptionsViewModel::new(factory_addr.clone(), settings)),
        settings,
        shutdown.clone(),
    );

    let window = Rc::new(RefCell::new(TermWindow::new(WINDOW_TITLE_DEFAULT)));
    coordinator.attach(&window);

    let keymap = Keymap::default_bindings();
    let version = coordinator.version();
    let help = keymap.help_lines().join("\n");
    let restore = bus.sender();
    let mut shell = ShellLoop::new(bus, Duration::from_millis(16));

    shell.run(|event| match event {
        LoopEvent::Tick => {
            drain_shutdown_requests(&outbound_rx, &shutdown, &window);
            if window.borrow().is_closed() {
                return Ok(ControlFlow::Quit);
            }
            if let Some(title) = coordinator.take_title_change() {
                let title = title.to_string();
                window.borrow_mut().set_title(title);
            }
            let win = window.borrow();
            if win.is_visible() {
                let body = format!("{version}\nListening on {listen_addr}\n\n{help}");
                terminal.borrow_mut().draw(|frame| {
                    let area = frame.area();
                    win.render(frame, area, &body);
                })?;
            } else {
                terminal.borrow_mut().draw(|frame| {
                    let hint = Paragraph::new(HIDDEN_HINT).alignment(Alignment::Center);
                    frame.render_widget(hint, frame.area());
                })?;
            }
            Ok(ControlFlow::Continue)
        }
        LoopEvent::Notice(notification) => {
            coordinator.handle(notification).map_err(io::Error::other)?;
            Ok(ControlFlow::Continue)
        }
        LoopEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            match keymap.lookup(&key) {
                Some(Action::RequestExit) => coordinator.request_exit(),
                Some(Action::Minimize) => window.borrow_mut().request_minimize(),
                Some(Action::CloseWindow) => {
                    window.borrow_mut().request_close();
                }
                Some(Action::RestoreWindow) => restore.send(Notification::ShowMainWindow),
                Some(Action::OpenOptions) => {
                    coordinator.show_options().map_err(io::Error::other)?;
                }
                Some(Action::OpenSite) => coordinator.open_project_site(),
                None => {}
            }
            Ok(ControlFlow::Continue)
        }
        LoopEvent::Input(_) => Ok(ControlFlow::Continue),
    })
}

/// The exit subsystem: on `AppForceShutdown`, flip the shutdown mode first so
/// close interception stands down, then close the window for real.
fn drain_shutdown_requests(
    outbound_rx: &Receiver<OutboundEvent>,
    shutdown: &Rc<ShutdownSignal>,
    window: &Rc<RefCell<TermWindow>>,
) {
    loop {
        match outbound_rx.try_recv() {
            Ok(OutboundEvent::AppForceShutdown) => {
                info!("force shutdown requested");
                shutdown.begin_explicit_shutdown();
                window.borrow_mut().request_close();
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return,
        }
    }
}

fn spawn_listener(addr: String, notices: NotificationSender) {
    thread::spawn(move || match TcpListener::bind(&addr) {
        Err(err) => {
            info!(%addr, "listener bind failed: {err}");
            notices.send(Notification::ServerBindFailed);
        }
        Ok(listener) => {
            info!(%addr, "listener bound");
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let peer = stream
                    .peer_addr()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|_| String::from("unknown peer"));
                notices.send(Notification::ShowMessage {
                    text: format!("Connection received from {peer}."),
                    caption: String::from("Listener"),
                });
                notices.send(Notification::ShowMainWindow);
            }
        }
    });
}
