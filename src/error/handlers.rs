//! Error-to-reply mapping
//!
//! Converts each error kind to the single reply line the client sees.
//! Reply texts are fixed strings; internal detail stays in the logs.

use crate::error::types::{AuthError, PathError, SessionError};
use crate::protocol::replies::{self, Reply};

/// Select the reply line for a failed command.
pub fn reply_for(error: &SessionError) -> Reply {
    match error {
        SessionError::Auth(AuthError::MissingUsername) => Reply::new(
            replies::NOT_LOGGED_IN,
            "Please enter the username first",
        ),
        SessionError::Auth(AuthError::InvalidCredentials(_)) => {
            Reply::new(replies::LOGIN_FAILED, "Invalid user name or password")
        }
        SessionError::NotLoggedIn => Reply::new(replies::NOT_LOGGED_IN, "Not logged in"),
        SessionError::Path(e) => match e {
            PathError::EscapesRoot(_)
            | PathError::CreateFailed(_)
            | PathError::RemoveFailed(_) => Reply::new(
                replies::ACTION_NOT_TAKEN,
                "Requested file action not taken",
            ),
            PathError::NotADirectory(_)
            | PathError::NotFound(_)
            | PathError::AlreadyExists(_) => Reply::new(
                replies::FILE_UNAVAILABLE,
                "Requested action not taken. File unavailable",
            ),
        },
        SessionError::Endpoint(_) => Reply::new(
            replies::LOCAL_ERROR,
            "Requested action aborted. Local error in processing.",
        ),
        SessionError::Transfer(_) => {
            Reply::new(replies::CANT_OPEN_DATA, "Can't open data connection.")
        }
        SessionError::Protocol(_) => {
            Reply::new(replies::NOT_IMPLEMENTED, "Command not implemented.")
        }
    }
}
