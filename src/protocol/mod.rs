//! Control protocol
//!
//! Command-line parsing and reply formatting for the control connection.

pub mod commands;
pub mod replies;

pub use commands::{Command, parse_command};
pub use replies::Reply;
