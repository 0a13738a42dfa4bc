use std::fmt;

/// User-facing actions the demo shell binds keys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RequestExit,
    Minimize,
    CloseWindow,
    RestoreWindow,
    OpenOptions,
    OpenSite,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::RequestExit => "Request exit",
            Action::Minimize => "Minimize to tray",
            Action::CloseWindow => "Close window",
            Action::RestoreWindow => "Restore window",
            Action::OpenOptions => "Open options",
            Action::OpenSite => "Open project site",
        };
        write!(f, "{}", s)
    }
}
