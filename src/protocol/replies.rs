//! Reply handling
//!
//! Defines the reply codes recognized by this server and their wire format:
//! one line of `<three-digit code> <text>\r\n` per reply.

/// Data connection already open, transfer starting
pub const DATA_OPEN: u16 = 125;
/// Endpoint negotiation accepted
pub const OK: u16 = 200;
/// Directory status (used for XPWD)
pub const DIR_STATUS: u16 = 212;
/// Greeting on connect
pub const READY: u16 = 220;
/// Transfer completed
pub const TRANSFER_COMPLETE: u16 = 226;
/// Login successful
pub const LOGIN_SUCCESS: u16 = 230;
/// Logout acknowledged
pub const LOGOUT: u16 = 231;
/// Directory or file action completed
pub const ACTION_OK: u16 = 250;
/// Directory created
pub const DIR_CREATED: u16 = 257;
/// Username accepted, password required
pub const PASSWORD_REQUIRED: u16 = 331;
/// Cannot open data connection
pub const CANT_OPEN_DATA: u16 = 425;
/// Invalid login
pub const LOGIN_FAILED: u16 = 430;
/// Requested action not taken
pub const ACTION_NOT_TAKEN: u16 = 450;
/// Local error while resolving endpoint
pub const LOCAL_ERROR: u16 = 451;
/// Command not implemented
pub const NOT_IMPLEMENTED: u16 = 502;
/// Not logged in
pub const NOT_LOGGED_IN: u16 = 530;
/// File/path unavailable
pub const FILE_UNAVAILABLE: u16 = 550;

/// A numeric status code plus human-readable text, produced and discarded
/// per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    code: u16,
    text: String,
}

impl Reply {
    pub fn new(code: u16, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the reply as one control-connection line.
    pub fn line(&self) -> String {
        format!("{} {}\r\n", self.code, self.text)
    }
}
