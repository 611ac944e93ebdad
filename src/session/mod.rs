//! Session
//!
//! Per-connection state machine: owns authentication state, working
//! directory, and the pending data endpoint, and drives the
//! read-dispatch-reply loop until termination.

pub mod dispatcher;
pub mod handler;
pub mod state;

pub use dispatcher::{CommandOutcome, SessionAction, handle_command};
pub use handler::handle_session;
pub use state::{AuthState, Session};
