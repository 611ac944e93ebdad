//! Error handling for the FTP session engine
//!
//! Every failure mode a command handler can hit is an explicit error kind.
//! The dispatcher converts each one to exactly one reply line via `reply_for`.

pub mod handlers;
pub mod types;

pub use handlers::reply_for;
pub use types::{AuthError, EndpointError, PathError, ProtocolError, SessionError, TransferError};
