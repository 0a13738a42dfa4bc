use std::env;
use std::io;

use tracing::Level;

/// Initialize the tracing subscriber writing to stderr. Safe to call multiple
/// times; subsequent calls are no-ops for the global subscriber.
///
/// Stderr is deliberate: the alternate screen owns stdout, and redirecting
/// stderr to a file keeps log lines off the UI (`tray-shell 2>shell.log`).
pub fn init_default() {
    let level = if env::var_os("TRAY_SHELL_DEBUG").is_some() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
