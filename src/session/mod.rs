//! Interactive front-end: a numbered text menu driven one line at a time.
//! The controller owns the roster and the file it persists to; the other
//! submodules parse answers, number the menu, and talk to the terminal.

mod console;
mod controller;
pub mod input;
pub mod menu;

pub use console::{Console, StatusKind};
pub use controller::{Session, SessionState};
pub use input::InputError;
pub use menu::MenuAction;

/// Render an error with its whole cause chain on one line, e.g.
/// `could not open class_list: No such file or directory`.
pub(crate) fn surface_error(err: impl Into<anyhow::Error>) -> String {
    format!("{:#}", err.into())
}
