//! Shared crate-wide constants.

use indoc::indoc;

/// Application name used for the default window title and version banner.
pub const APP_NAME: &str = "Tray Shell";

/// Window title shown before any subsystem overrides it.
pub const WINDOW_TITLE_DEFAULT: &str = APP_NAME;

/// Project site opened by the "go to site" action. The launch result is not
/// observed; a dead link simply does nothing useful in the user's browser.
pub const PROJECT_SITE_URL: &str = "https://github.com/jzombie/tray-shell";

/// Caption for the listener bind-failure dialog.
pub const BIND_FAILED_CAPTION: &str = "Failed";

/// Body for the listener bind-failure dialog. Shown verbatim, then followed
/// by the options dialog so the user can change the bindings immediately.
pub const BIND_FAILED_TEXT: &str = indoc! {"
    Failed to start the background listener. The address and port
    combination is in use by another program. To fix, change the
    listener bindings in the options."};
