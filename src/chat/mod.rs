//! Interactive chat mode.
//!
//! A REPL that feeds each line into the session controller and prints the
//! assistant's reply, with slash commands for inspecting the session.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;
mod ui;

pub use session::ChatSession;
