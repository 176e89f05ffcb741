//! Interactive terminal chat widget.
//!
//! The terminal counterpart of an embeddable chat widget: it remembers one
//! session token on disk, restores that conversation on start and talks to
//! the server over HTTP. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod client;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod session_file;
