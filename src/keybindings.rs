use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

/// Key-to-action map for the demo shell.
pub struct Keymap {
    bindings: Vec<(KeyCombo, Action)>,
}

impl Keymap {
    pub fn default_bindings() -> Self {
        let bindings = vec![
            (
                KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
                Action::RequestExit,
            ),
            (
                KeyCombo::new(KeyCode::Char('m'), KeyModifiers::NONE),
                Action::Minimize,
            ),
            (
                KeyCombo::new(KeyCode::Char('x'), KeyModifiers::NONE),
                Action::CloseWindow,
            ),
            (
                KeyCombo::new(KeyCode::Char('r'), KeyModifiers::NONE),
                Action::RestoreWindow,
            ),
            (
                KeyCombo::new(KeyCode::Char('o'), KeyModifiers::NONE),
                Action::OpenOptions,
            ),
            (
                KeyCombo::new(KeyCode::Char('g'), KeyModifiers::NONE),
                Action::OpenSite,
            ),
        ];
        Self { bindings }
    }

    pub fn lookup(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(combo, _)| combo.matches(key))
            .map(|(_, action)| *action)
    }

    /// One "Key  Action" line per binding, for the help footer.
    pub fn help_lines(&self) -> Vec<String> {
        self.bindings
            .iter()
            .map(|(combo, action)| format!("{:<8} {}", combo.display(), action))
            .collect()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::default_bindings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        let mut key = KeyEvent::new(code, mods);
        key.kind = KeyEventKind::Press;
        key
    }

    #[test]
    fn lookup_finds_bound_actions() {
        let map = Keymap::default_bindings();
        assert_eq!(
            map.lookup(&press(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(Action::RequestExit)
        );
        assert_eq!(
            map.lookup(&press(KeyCode::Char('m'), KeyModifiers::NONE)),
            Some(Action::Minimize)
        );
        assert_eq!(map.lookup(&press(KeyCode::Char('z'), KeyModifiers::NONE)), None);
        // modifiers must match exactly
        assert_eq!(
            map.lookup(&press(KeyCode::Char('m'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn no_duplicate_combos() {
        let map = Keymap::default_bindings();
        for (i, (a, _)) in map.bindings.iter().enumerate() {
            for (b, _) in &map.bindings[i + 1..] {
                assert_ne!(a, b, "duplicate key combo in default bindings");
            }
        }
    }

    #[test]
    fn combo_display_is_readable() {
        let combo = KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(combo.display(), "Ctrl+Q");
    }
}
