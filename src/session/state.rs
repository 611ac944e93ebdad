//! Module `state`
//!
//! Defines the `Session` struct holding per-connection state. Sessions are
//! owned by their connection's task and never shared.

use std::path::{Path, PathBuf};

use crate::endpoint::DataEndpoint;

/// Authentication progress of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    AwaitingPassword,
    Authenticated,
}

/// Per-connection session state.
///
/// Invariant: `cwd` is always `root` or a descendant of it; `root` is bound
/// at successful login and immutable until the next login.
pub struct Session {
    auth: AuthState,
    username: Option<String>,
    root: Option<PathBuf>,
    cwd: Option<PathBuf>,
    endpoint: Option<DataEndpoint>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            auth: AuthState::Unauthenticated,
            username: None,
            root: None,
            cwd: None,
            endpoint: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth == AuthState::Authenticated
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Stores the name from USER and drops any prior authentication; the
    /// client must re-authenticate with PASS.
    pub fn set_pending_user(&mut self, name: &str) {
        self.username = Some(name.to_string());
        self.auth = AuthState::AwaitingPassword;
    }

    /// Marks the session authenticated and binds root/current directory.
    pub fn login(&mut self, root: PathBuf) {
        self.auth = AuthState::Authenticated;
        self.cwd = Some(root.clone());
        self.root = Some(root);
    }

    /// Updates the current directory. Callers only pass paths already
    /// validated by the sandbox.
    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = Some(cwd);
    }

    /// Stores the endpoint negotiated by PORT/EPRT.
    pub fn set_endpoint(&mut self, endpoint: DataEndpoint) {
        self.endpoint = Some(endpoint);
    }

    /// Consumes the pending endpoint. Endpoints are single-use: every
    /// transfer requires a fresh PORT/EPRT.
    pub fn take_endpoint(&mut self) -> Option<DataEndpoint> {
        self.endpoint.take()
    }

    /// Clears authentication on QUIT.
    pub fn logout(&mut self) {
        self.auth = AuthState::Unauthenticated;
        self.username = None;
        self.endpoint = None;
    }
}
