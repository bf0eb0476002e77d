//! Console front-end
//!
//! A line-oriented command protocol over the auth gateway, replying with
//! three-digit status codes.

pub mod commands;
pub mod handler;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handler::{handle_command, run_shell};
