use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::{
    CloseRequestedHook, CloseResponse, HookSet, ManagedWindow, StateChangedHook, Subscription,
    WindowCore, WindowCtl, WindowState,
};

/// The single top-level window of a tray-style terminal app.
///
/// Deliberately a light model: flags plus lifecycle hooks. Rendering is pull
/// based; the UI loop calls [`TermWindow::render`] each frame while the window
/// is visible, and stops calling it once it is hidden to the tray.
pub struct TermWindow {
    title: String,
    core: WindowCore,
    hooks: HookSet,
}

impl TermWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            core: WindowCore::new(),
            hooks: HookSet::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Native minimize gesture. Updates the state first, then lets the
    /// state-changed hooks react (the tray policy hides the window here).
    pub fn request_minimize(&mut self) {
        if self.core.is_closed() {
            return;
        }
        self.core.set_state(WindowState::Minimized);
        self.hooks.fire_state_changed(&mut self.core, WindowState::Minimized);
    }

    /// Native close gesture. Hooks may cancel; returns whether the window
    /// actually closed.
    pub fn request_close(&mut self) -> bool {
        if self.core.is_closed() {
            return true;
        }
        match self.hooks.fire_close_requested(&mut self.core) {
            CloseResponse::Cancel => false,
            CloseResponse::Proceed => {
                self.core.close();
                true
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, body: &str) {
        if !self.core.is_visible() || area.width == 0 || area.height == 0 {
            return;
        }
        let mut title_style = Style::default();
        if self.core.is_focused() {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }
        let block = Block::default()
            .title(Line::styled(self.title.clone(), title_style))
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(body)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

impl WindowCtl for TermWindow {
    fn show(&mut self) {
        self.core.show();
    }

    fn hide(&mut self) {
        self.core.hide();
    }

    fn set_state(&mut self, state: WindowState) {
        self.core.set_state(state);
    }

    fn state(&self) -> WindowState {
        self.core.state()
    }

    fn is_visible(&self) -> bool {
        self.core.is_visible()
    }

    fn set_always_on_top(&mut self, on_top: bool) {
        self.core.set_always_on_top(on_top);
    }

    fn is_always_on_top(&self) -> bool {
        self.core.is_always_on_top()
    }

    fn focus(&mut self) {
        self.core.focus();
    }

    fn is_focused(&self) -> bool {
        self.core.is_focused()
    }

    fn close(&mut self) {
        self.core.close();
    }

    fn is_closed(&self) -> bool {
        self.core.is_closed()
    }
}

impl ManagedWindow for TermWindow {
    fn on_state_changed(&mut self, hook: StateChangedHook) -> Subscription {
        self.hooks.add_state_changed(hook)
    }

    fn on_close_requested(&mut self, hook: CloseRequestedHook) -> Subscription {
        self.hooks.add_close_requested(hook)
    }

    fn unsubscribe(&mut self, token: Subscription) {
        self.hooks.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimize_gesture_runs_state_hooks() {
        let mut window = TermWindow::new("t");
        window.on_state_changed(Box::new(|ctl, state| {
            if state == WindowState::Minimized {
                ctl.hide();
            }
        }));
        window.request_minimize();
        assert_eq!(window.state(), WindowState::Minimized);
        assert!(!window.is_visible());
    }

    #[test]
    fn close_gesture_honors_cancel() {
        let mut window = TermWindow::new("t");
        window.on_close_requested(Box::new(|_| CloseResponse::Cancel));
        assert!(!window.request_close());
        assert!(!window.is_closed());
    }

    #[test]
    fn close_gesture_proceeds_without_hooks() {
        let mut window = TermWindow::new("t");
        assert!(window.request_close());
        assert!(window.is_closed());
        // further gestures are inert
        window.request_minimize();
        assert!(window.request_close());
    }
}
