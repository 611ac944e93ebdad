//! Error types
//!
//! Defines domain-specific error types for each module of the session engine.

use std::fmt;
use std::io;

/// Authentication errors: bad credentials or commands issued out of order.
#[derive(Debug)]
pub enum AuthError {
    /// PASS received before any USER supplied a name
    MissingUsername,
    /// PASS secret did not match the stored user name
    InvalidCredentials(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingUsername => write!(f, "No username on record"),
            AuthError::InvalidCredentials(u) => write!(f, "Invalid credentials for user: {}", u),
        }
    }
}

impl std::error::Error for AuthError {}

/// Path resolution and filesystem mutation errors.
#[derive(Debug)]
pub enum PathError {
    /// Navigation would leave the session root
    EscapesRoot(String),
    /// A path segment does not name an existing directory
    NotADirectory(String),
    /// Target file does not exist
    NotFound(String),
    /// Target file already exists (STOR never overwrites)
    AlreadyExists(String),
    CreateFailed(String),
    RemoveFailed(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::EscapesRoot(p) => write!(f, "Path escapes session root: {}", p),
            PathError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            PathError::NotFound(p) => write!(f, "File not found: {}", p),
            PathError::AlreadyExists(p) => write!(f, "File already exists: {}", p),
            PathError::CreateFailed(p) => write!(f, "Failed to create directory: {}", p),
            PathError::RemoveFailed(p) => write!(f, "Failed to remove file: {}", p),
        }
    }
}

impl std::error::Error for PathError {}

/// Data endpoint parsing errors for PORT and EPRT arguments.
#[derive(Debug)]
pub enum EndpointError {
    Malformed(String),
    Unresolvable(String),
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointError::Malformed(s) => write!(f, "Malformed endpoint argument: {}", s),
            EndpointError::Unresolvable(h) => write!(f, "Cannot resolve endpoint host: {}", h),
        }
    }
}

impl std::error::Error for EndpointError {}

/// Data transfer errors.
#[derive(Debug)]
pub enum TransferError {
    /// RETR/STOR issued without a preceding PORT/EPRT
    NoEndpoint,
    Io(io::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::NoEndpoint => write!(f, "No data connection configured"),
            TransferError::Io(e) => write!(f, "Data connection failure: {}", e),
        }
    }
}

impl std::error::Error for TransferError {}

impl From<io::Error> for TransferError {
    fn from(error: io::Error) -> Self {
        TransferError::Io(error)
    }
}

/// Control-line protocol errors.
#[derive(Debug)]
pub enum ProtocolError {
    UnknownCommand(String),
    EmptyLine,
    LineTooLong,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownCommand(c) => write!(f, "Unrecognized command: {}", c),
            ProtocolError::EmptyLine => write!(f, "Empty command line"),
            ProtocolError::LineTooLong => write!(f, "Command line too long"),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Umbrella error consumed by the command dispatcher to select a reply code.
#[derive(Debug)]
pub enum SessionError {
    Auth(AuthError),
    /// Command requires login and the session is not authenticated
    NotLoggedIn,
    Path(PathError),
    Endpoint(EndpointError),
    Transfer(TransferError),
    Protocol(ProtocolError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Auth(e) => write!(f, "Authentication error: {}", e),
            SessionError::NotLoggedIn => write!(f, "Not logged in"),
            SessionError::Path(e) => write!(f, "Path error: {}", e),
            SessionError::Endpoint(e) => write!(f, "Endpoint error: {}", e),
            SessionError::Transfer(e) => write!(f, "Transfer error: {}", e),
            SessionError::Protocol(e) => write!(f, "Protocol error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<AuthError> for SessionError {
    fn from(error: AuthError) -> Self {
        SessionError::Auth(error)
    }
}

impl From<PathError> for SessionError {
    fn from(error: PathError) -> Self {
        SessionError::Path(error)
    }
}

impl From<EndpointError> for SessionError {
    fn from(error: EndpointError) -> Self {
        SessionError::Endpoint(error)
    }
}

impl From<TransferError> for SessionError {
    fn from(error: TransferError) -> Self {
        SessionError::Transfer(error)
    }
}

impl From<ProtocolError> for SessionError {
    fn from(error: ProtocolError) -> Self {
        SessionError::Protocol(error)
    }
}
