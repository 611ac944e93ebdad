//! Module `dispatcher`
//!
//! Routes one parsed command to its handler given the session's current
//! state. Every handler returns a `Result<Reply, SessionError>`; this module
//! converts errors to reply lines so each command produces exactly one final
//! reply (the 125 transfer-starting line is the only preliminary).

use log::{info, warn};

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::ServerConfig;
use crate::endpoint::{parse_eprt_arg, parse_port_arg};
use crate::error::{AuthError, PathError, SessionError, TransferError, reply_for};
use crate::error::ProtocolError;
use crate::protocol::replies::{self, Reply};
use crate::protocol::Command;
use crate::sandbox;
use crate::session::Session;
use crate::transfer;

/// What the session loop should do after sending the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Continue,
    Close,
}

/// Result of dispatching one command.
pub struct CommandOutcome {
    pub reply: Reply,
    pub action: SessionAction,
}

/// Dispatches a parsed command to its handler.
///
/// USER, PASS and QUIT are valid in any state; everything else requires an
/// authenticated session. Unrecognized verbs and blank lines are protocol
/// errors regardless of authentication and never alter state.
pub async fn handle_command<W>(
    session: &mut Session,
    command: &Command,
    control: &mut W,
    config: &ServerConfig,
) -> CommandOutcome
where
    W: AsyncWrite + Unpin,
{
    let result = match command {
        Command::User(name) => handle_user(session, name),
        Command::Pass(secret) => handle_pass(session, secret, config),
        Command::Quit => handle_quit(session),
        Command::Unknown(line) => Err(ProtocolError::UnknownCommand(line.clone()).into()),
        Command::Empty => Err(ProtocolError::EmptyLine.into()),
        _ if !session.is_authenticated() => Err(SessionError::NotLoggedIn),
        Command::Xmkd(path) => handle_xmkd(session, path).await,
        Command::Cwd(path) => handle_cwd(session, path),
        Command::Xpwd => handle_xpwd(session),
        Command::Eprt(arg) => handle_eprt(session, arg),
        Command::Port(arg) => handle_port(session, arg),
        Command::Retr(name) => handle_retr(session, name, control).await,
        Command::Stor(name) => handle_stor(session, name, control).await,
        Command::Dele(name) => handle_dele(session, name).await,
    };

    let action = if matches!(command, Command::Quit) {
        SessionAction::Close
    } else {
        SessionAction::Continue
    };

    let reply = match result {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Command rejected: {}", e);
            reply_for(&e)
        }
    };

    CommandOutcome { reply, action }
}

/// USER: stores the name and demotes any prior authentication.
fn handle_user(session: &mut Session, name: &str) -> Result<Reply, SessionError> {
    session.set_pending_user(name);
    Ok(Reply::new(
        replies::PASSWORD_REQUIRED,
        "User name okay, need password.",
    ))
}

/// PASS: toy authentication, the secret must equal the stored user name.
/// On success binds root/current directory to the server root.
fn handle_pass(
    session: &mut Session,
    secret: &str,
    config: &ServerConfig,
) -> Result<Reply, SessionError> {
    let username = session
        .username()
        .map(str::to_string)
        .ok_or(AuthError::MissingUsername)?;

    if secret != username {
        return Err(AuthError::InvalidCredentials(username).into());
    }

    let root = config.server_root_path().canonicalize().map_err(|e| {
        warn!("Server root {} is unusable: {}", config.server_root, e);
        SessionError::Path(PathError::NotFound(config.server_root.clone()))
    })?;

    session.login(root);
    info!("User {} logged in", username);
    Ok(Reply::new(replies::LOGIN_SUCCESS, "User logged in, proceed."))
}

fn handle_quit(session: &mut Session) -> Result<Reply, SessionError> {
    session.logout();
    Ok(Reply::new(
        replies::LOGOUT,
        "User logged out; service terminated.",
    ))
}

async fn handle_xmkd(session: &mut Session, path: &str) -> Result<Reply, SessionError> {
    let cwd = session.cwd().ok_or(SessionError::NotLoggedIn)?;
    let target = sandbox::full_path(cwd, path);

    transfer::make_directories(&target).await?;
    Ok(Reply::new(
        replies::DIR_CREATED,
        format!("'{}' created.", path),
    ))
}

/// CWD: atomic; the session's directory only changes when the whole
/// relative path resolves inside the root.
fn handle_cwd(session: &mut Session, path: &str) -> Result<Reply, SessionError> {
    let root = session.root().ok_or(SessionError::NotLoggedIn)?;
    let cwd = session.cwd().ok_or(SessionError::NotLoggedIn)?;

    let resolved = sandbox::resolve(cwd, root, path)?;
    session.set_cwd(resolved);
    Ok(Reply::new(
        replies::ACTION_OK,
        "Requested file action okay, completed.",
    ))
}

/// XPWD: reports the current directory with the root shown as `~`.
fn handle_xpwd(session: &Session) -> Result<Reply, SessionError> {
    let root = session.root().ok_or(SessionError::NotLoggedIn)?;
    let cwd = session.cwd().ok_or(SessionError::NotLoggedIn)?;

    let shown = match cwd.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => "~".to_string(),
        Ok(rel) => format!("~/{}", rel.display()),
        Err(_) => cwd.display().to_string(),
    };

    Ok(Reply::new(replies::DIR_STATUS, format!("\"{}\"", shown)))
}

fn handle_eprt(session: &mut Session, arg: &str) -> Result<Reply, SessionError> {
    let endpoint = parse_eprt_arg(arg)?;
    info!("Data endpoint set to {}", endpoint.socket_addr());
    session.set_endpoint(endpoint);
    Ok(Reply::new(
        replies::OK,
        "The requested action has been successfully completed.",
    ))
}

fn handle_port(session: &mut Session, arg: &str) -> Result<Reply, SessionError> {
    let endpoint = parse_port_arg(arg)?;
    info!("Data endpoint set to {}", endpoint.socket_addr());
    session.set_endpoint(endpoint);
    Ok(Reply::new(
        replies::OK,
        "The requested action has been successfully completed.",
    ))
}

/// RETR: sends the file to the negotiated endpoint. The endpoint is
/// consumed up front, so every transfer needs a fresh PORT/EPRT.
async fn handle_retr<W>(
    session: &mut Session,
    name: &str,
    control: &mut W,
) -> Result<Reply, SessionError>
where
    W: AsyncWrite + Unpin,
{
    let endpoint = session.take_endpoint().ok_or(TransferError::NoEndpoint)?;
    let cwd = session.cwd().ok_or(SessionError::NotLoggedIn)?;
    let path = sandbox::full_path(cwd, name);

    // Missing files are rejected before any data connection is opened.
    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(PathError::NotFound(name.to_string()).into());
    }

    send_transfer_starting(control).await?;
    transfer::retrieve(&endpoint, &path).await?;
    Ok(Reply::new(
        replies::TRANSFER_COMPLETE,
        "Closing data connection. Requested file action successful.",
    ))
}

/// STOR: receives a file from the negotiated endpoint. Never overwrites;
/// an existing target is rejected before any data connection is opened.
async fn handle_stor<W>(
    session: &mut Session,
    name: &str,
    control: &mut W,
) -> Result<Reply, SessionError>
where
    W: AsyncWrite + Unpin,
{
    let endpoint = session.take_endpoint().ok_or(TransferError::NoEndpoint)?;
    let cwd = session.cwd().ok_or(SessionError::NotLoggedIn)?;
    let path = sandbox::full_path(cwd, name);

    if tokio::fs::metadata(&path).await.is_ok() {
        return Err(PathError::AlreadyExists(name.to_string()).into());
    }

    send_transfer_starting(control).await?;
    transfer::store(&endpoint, &path).await?;
    Ok(Reply::new(
        replies::TRANSFER_COMPLETE,
        "Closing data connection. Requested file action successful.",
    ))
}

async fn handle_dele(session: &mut Session, name: &str) -> Result<Reply, SessionError> {
    let cwd = session.cwd().ok_or(SessionError::NotLoggedIn)?;
    let path = sandbox::full_path(cwd, name);

    transfer::delete(&path).await?;
    Ok(Reply::new(
        replies::ACTION_OK,
        "Requested file action okay, completed.",
    ))
}

/// Writes the 125 preliminary reply announcing the transfer.
async fn send_transfer_starting<W>(control: &mut W) -> Result<(), SessionError>
where
    W: AsyncWrite + Unpin,
{
    let reply = Reply::new(
        replies::DATA_OPEN,
        "Data connection already open; transfer starting.",
    );
    control
        .write_all(reply.line().as_bytes())
        .await
        .map_err(TransferError::Io)?;
    control.flush().await.map_err(TransferError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::parse_command;
    use crate::session::AuthState;
    use tempfile::TempDir;

    fn test_config(root: &TempDir) -> ServerConfig {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            control_port: 0,
            server_root: root.path().display().to_string(),
        }
    }

    async fn dispatch(
        session: &mut Session,
        line: &str,
        config: &ServerConfig,
    ) -> CommandOutcome {
        let command = parse_command(line);
        let mut sink: Vec<u8> = Vec::new();
        handle_command(session, &command, &mut sink, config).await
    }

    async fn login(session: &mut Session, config: &ServerConfig) {
        assert_eq!(dispatch(session, "USER alice", config).await.reply.code(), 331);
        assert_eq!(dispatch(session, "PASS alice", config).await.reply.code(), 230);
    }

    #[tokio::test]
    async fn commands_before_login_are_rejected_without_state_change() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();

        for line in [
            "CWD sub",
            "XPWD",
            "XMKD dir",
            "PORT 127,0,0,1,19,136",
            "EPRT |1|127.0.0.1|5000|",
            "RETR x",
            "STOR x",
            "DELE x",
        ] {
            let outcome = dispatch(&mut session, line, &config).await;
            assert_eq!(outcome.reply.code(), 530, "line: {}", line);
            assert_eq!(outcome.action, SessionAction::Continue);
        }

        assert_eq!(session.auth_state(), AuthState::Unauthenticated);
        assert!(session.cwd().is_none());
        assert!(session.take_endpoint().is_none());
    }

    #[tokio::test]
    async fn unknown_verb_is_502_even_before_login() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();

        assert_eq!(dispatch(&mut session, "NOOP", &config).await.reply.code(), 502);
        assert_eq!(dispatch(&mut session, "user alice", &config).await.reply.code(), 502);
        assert_eq!(dispatch(&mut session, "", &config).await.reply.code(), 502);
        assert_eq!(session.auth_state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn pass_before_user_is_rejected() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();

        let outcome = dispatch(&mut session, "PASS alice", &config).await;
        assert_eq!(outcome.reply.code(), 530);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn pass_succeeds_only_when_secret_equals_username() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();

        assert_eq!(dispatch(&mut session, "USER bob", &config).await.reply.code(), 331);
        let outcome = dispatch(&mut session, "PASS wrong", &config).await;
        assert_eq!(outcome.reply.code(), 430);
        assert!(!session.is_authenticated());

        let outcome = dispatch(&mut session, "PASS bob", &config).await;
        assert_eq!(outcome.reply.code(), 230);
        assert!(session.is_authenticated());
        assert_eq!(
            session.root(),
            Some(root.path().canonicalize().unwrap().as_path())
        );
        assert_eq!(session.root(), session.cwd());
    }

    #[tokio::test]
    async fn user_after_login_requires_fresh_pass() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();
        login(&mut session, &config).await;

        assert_eq!(dispatch(&mut session, "USER bob", &config).await.reply.code(), 331);
        assert_eq!(dispatch(&mut session, "PASS wrong", &config).await.reply.code(), 430);
        assert!(!session.is_authenticated());
        assert_eq!(dispatch(&mut session, "RETR x", &config).await.reply.code(), 530);
    }

    #[tokio::test]
    async fn quit_closes_from_any_state() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);

        let mut session = Session::new();
        let outcome = dispatch(&mut session, "QUIT", &config).await;
        assert_eq!(outcome.reply.code(), 231);
        assert_eq!(outcome.action, SessionAction::Close);

        let mut session = Session::new();
        login(&mut session, &config).await;
        let outcome = dispatch(&mut session, "QUIT", &config).await;
        assert_eq!(outcome.reply.code(), 231);
        assert_eq!(outcome.action, SessionAction::Close);
    }

    #[tokio::test]
    async fn cwd_parent_from_root_is_rejected_and_cwd_unchanged() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();
        login(&mut session, &config).await;

        let before = session.cwd().unwrap().to_path_buf();
        let outcome = dispatch(&mut session, "CWD ..", &config).await;
        assert_eq!(outcome.reply.code(), 450);
        assert_eq!(session.cwd(), Some(before.as_path()));
    }

    #[tokio::test]
    async fn cwd_descends_and_xpwd_reports_tilde_path() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("docs/old")).unwrap();
        let config = test_config(&root);
        let mut session = Session::new();
        login(&mut session, &config).await;

        let outcome = dispatch(&mut session, "XPWD", &config).await;
        assert_eq!(outcome.reply.code(), 212);
        assert_eq!(outcome.reply.text(), "\"~\"");

        assert_eq!(dispatch(&mut session, "CWD docs/old", &config).await.reply.code(), 250);
        let outcome = dispatch(&mut session, "XPWD", &config).await;
        assert_eq!(outcome.reply.text(), "\"~/docs/old\"");

        // Partial failure leaves the directory where it was.
        assert_eq!(dispatch(&mut session, "CWD ../../nope", &config).await.reply.code(), 550);
        let outcome = dispatch(&mut session, "XPWD", &config).await;
        assert_eq!(outcome.reply.text(), "\"~/docs/old\"");
    }

    #[tokio::test]
    async fn xmkd_creates_and_rejects_duplicates() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();
        login(&mut session, &config).await;

        let outcome = dispatch(&mut session, "XMKD fresh/nested", &config).await;
        assert_eq!(outcome.reply.code(), 257);
        assert_eq!(outcome.reply.text(), "'fresh/nested' created.");
        assert!(session.cwd().unwrap().join("fresh/nested").is_dir());

        let outcome = dispatch(&mut session, "XMKD fresh/nested", &config).await;
        assert_eq!(outcome.reply.code(), 450);
    }

    #[tokio::test]
    async fn dele_distinguishes_missing_from_removed() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();
        login(&mut session, &config).await;

        std::fs::write(root.path().join("junk.txt"), b"junk").unwrap();
        assert_eq!(dispatch(&mut session, "DELE junk.txt", &config).await.reply.code(), 250);
        assert_eq!(dispatch(&mut session, "DELE junk.txt", &config).await.reply.code(), 550);
    }

    #[tokio::test]
    async fn port_and_eprt_accept_and_reject() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();
        login(&mut session, &config).await;

        assert_eq!(
            dispatch(&mut session, "PORT 127,0,0,1,19,136", &config).await.reply.code(),
            200
        );
        assert_eq!(session.take_endpoint().unwrap().port(), 5000);

        assert_eq!(
            dispatch(&mut session, "EPRT |1|127.0.0.1|5000|", &config).await.reply.code(),
            200
        );
        assert_eq!(
            dispatch(&mut session, "PORT 1,2,3", &config).await.reply.code(),
            451
        );
        assert_eq!(
            dispatch(&mut session, "EPRT |1|no-such-host.invalid|5000|", &config)
                .await
                .reply
                .code(),
            451
        );
    }

    #[tokio::test]
    async fn retr_without_endpoint_is_rejected() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();
        login(&mut session, &config).await;

        std::fs::write(root.path().join("data.bin"), b"payload").unwrap();
        assert_eq!(dispatch(&mut session, "RETR data.bin", &config).await.reply.code(), 425);
        assert_eq!(dispatch(&mut session, "STOR new.bin", &config).await.reply.code(), 425);
    }

    #[tokio::test]
    async fn retr_missing_file_consumes_endpoint_without_connecting() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();
        login(&mut session, &config).await;

        // Endpoint points nowhere; a connection attempt would fail with 425,
        // so the 550 proves no connection was made.
        assert_eq!(
            dispatch(&mut session, "PORT 127,0,0,1,0,9", &config).await.reply.code(),
            200
        );
        let outcome = dispatch(&mut session, "RETR nope.txt", &config).await;
        assert_eq!(outcome.reply.code(), 550);
        assert!(session.take_endpoint().is_none(), "endpoint must be consumed");
    }

    #[tokio::test]
    async fn stor_existing_file_consumes_endpoint_without_connecting() {
        let root = TempDir::new().unwrap();
        let config = test_config(&root);
        let mut session = Session::new();
        login(&mut session, &config).await;

        std::fs::write(root.path().join("keep.txt"), b"original").unwrap();
        assert_eq!(
            dispatch(&mut session, "PORT 127,0,0,1,0,9", &config).await.reply.code(),
            200
        );
        let outcome = dispatch(&mut session, "STOR keep.txt", &config).await;
        assert_eq!(outcome.reply.code(), 550);
        assert!(session.take_endpoint().is_none());
        assert_eq!(std::fs::read(root.path().join("keep.txt")).unwrap(), b"original");
    }

    #[tokio::test]
    async fn file_paths_are_relative_to_current_directory() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("inbox")).unwrap();
        std::fs::write(root.path().join("inbox/a.txt"), b"a").unwrap();
        let config = test_config(&root);
        let mut session = Session::new();
        login(&mut session, &config).await;

        assert_eq!(dispatch(&mut session, "CWD inbox", &config).await.reply.code(), 250);
        assert_eq!(dispatch(&mut session, "DELE a.txt", &config).await.reply.code(), 250);
        assert!(!root.path().join("inbox/a.txt").exists());
    }
}
