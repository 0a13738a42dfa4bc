use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use thiserror::Error;

use crate::settings::WindowSettings;

/// Everything the options dialog needs, built fresh for each presentation.
/// No instance is ever cached or reused across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsViewModel {
    pub listen_addr: String,
    pub start_minimized: bool,
    pub minimize_on_close: bool,
}

impl OptionsViewModel {
    pub fn new(listen_addr: impl Into<String>, settings: WindowSettings) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            start_minimized: settings.start_minimized,
            minimize_on_close: settings.minimize_on_close,
        }
    }
}

/// Stateless constructor for [`OptionsViewModel`] instances.
pub type OptionsFactory = Box<dyn Fn() -> OptionsViewModel>;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("dialog presentation failed: {0}")]
    Io(#[from] io::Error),
}

/// Modal dialog presentation. Both calls block the UI thread until the user
/// dismisses the dialog; there is no timeout and no result beyond dismissal.
pub trait DialogService {
    fn show_message(&mut self, text: &str, caption: &str) -> Result<(), DialogError>;
    fn show_options(&mut self, options: OptionsViewModel) -> Result<(), DialogError>;
}

/// Preferred dialog box size in terminal cells.
const DIALOG_WIDTH: u16 = 70;
const DIALOG_HEIGHT: u16 = 9;

/// Centered dialog rect, clamped so it never draws outside the buffer when
/// the terminal is smaller than the preferred minimums.
pub fn dialog_rect(area: Rect) -> Rect {
    let mut width = area.width.min(DIALOG_WIDTH).max(1);
    let mut height = area.height.min(DIALOG_HEIGHT).max(1);
    if area.width >= 24 {
        width = width.max(24);
    }
    if area.height >= 5 {
        height = height.max(5);
    }
    let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

pub type SharedTerminal = Rc<RefCell<Terminal<CrosstermBackend<io::Stdout>>>>;

/// [`DialogService`] over the live terminal session.
///
/// Presentation runs its own read loop, so the surrounding UI loop is halted
/// until dismissal. That is the modal contract, not an accident.
pub struct TermDialogs {
    terminal: SharedTerminal,
}

impl TermDialogs {
    pub fn new(terminal: SharedTerminal) -> Self {
        Self { terminal }
    }

    fn present(&mut self, caption: &str, body: &str) -> Result<(), DialogError> {
        let footer = "Press Enter or Esc to dismiss";
        let text = format!("{}\n\n{}", body, footer);
        self.terminal.borrow_mut().draw(|frame| {
            let rect = dialog_rect(frame.area());
            frame.render_widget(Clear, rect);
            let block = Block::default().title(caption).borders(Borders::ALL);
            let paragraph = Paragraph::new(text.as_str())
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, rect);
        })?;
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Enter | KeyCode::Esc)
            {
                return Ok(());
            }
        }
    }
}

impl DialogService for TermDialogs {
    fn show_message(&mut self, text: &str, caption: &str) -> Result<(), DialogError> {
        self.present(caption, text)
    }

    fn show_options(&mut self, options: OptionsViewModel) -> Result<(), DialogError> {
        let body = format!(
            "Listener bindings: {}\nStart minimized: {}\nMinimize on close: {}",
            options.listen_addr, options.start_minimized, options.minimize_on_close,
        );
        self.present("Options", &body)
    }
}
