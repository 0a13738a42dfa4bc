pub mod actions;
pub mod constants;
pub mod coordinator;
pub mod dialogs;
pub mod events;
pub mod keybindings;
pub mod launcher;
pub mod settings;
pub mod shell_loop;
pub mod tracing_sub;
pub mod window;
