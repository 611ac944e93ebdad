//! Module `commands`
//!
//! Parses one control-connection line into a verb and a single argument.
//! Verbs are case-sensitive; the argument is the untokenized remainder of
//! the line (handlers that need sub-fields parse their own argument).

/// One parsed control-connection command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    User(String),
    Pass(String),
    Xmkd(String),
    Cwd(String),
    Xpwd,
    Eprt(String),
    Port(String),
    Retr(String),
    Stor(String),
    Dele(String),
    Quit,
    /// Recognizable line with an unsupported or misused verb
    Unknown(String),
    /// Blank line, no verb obtainable
    Empty,
}

/// Parses a raw command line into the `Command` enum.
///
/// Commands that require an argument fall through to `Unknown` when the
/// argument is missing.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or("");
    let arg = parts.next().unwrap_or("").trim();

    match verb {
        "" => Command::Empty,
        "USER" if !arg.is_empty() => Command::User(arg.to_string()),
        "PASS" if !arg.is_empty() => Command::Pass(arg.to_string()),
        "XMKD" if !arg.is_empty() => Command::Xmkd(arg.to_string()),
        "CWD" if !arg.is_empty() => Command::Cwd(arg.to_string()),
        "XPWD" => Command::Xpwd,
        "EPRT" if !arg.is_empty() => Command::Eprt(arg.to_string()),
        "PORT" if !arg.is_empty() => Command::Port(arg.to_string()),
        "RETR" if !arg.is_empty() => Command::Retr(arg.to_string()),
        "STOR" if !arg.is_empty() => Command::Stor(arg.to_string()),
        "DELE" if !arg.is_empty() => Command::Dele(arg.to_string()),
        "QUIT" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}
