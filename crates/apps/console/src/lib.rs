//! Command-prompt app: a scrollback buffer, a prompt line with history, and a few built-in
//! commands, including `apps` and `open` for the rest of the desktop.

#![warn(rustdoc::broken_intra_doc_links)]

mod components;
pub mod session;

pub use components::ConsoleApp;
pub use session::{split_args, ConsoleLine, ConsoleRequest, ConsoleSession, PROMPT};
