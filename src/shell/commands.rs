//! Module `commands`
//!
//! Parses console input lines into `Command` values and defines the result
//! type handlers return.

/// A console command parsed from one input line.
#[derive(PartialEq)]
pub enum Command {
    Signup(String, String), // username, secret
    Login(String, String),  // username, secret
    Logout,
    Whoami,
    Help,
    Quit,
    Malformed(&'static str), // known command, bad arguments; holds usage
    Unknown(String),
}

impl Command {
    /// Command name for logging. Never includes arguments.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Signup(..) => "SIGNUP",
            Command::Login(..) => "LOGIN",
            Command::Logout => "LOGOUT",
            Command::Whoami => "WHOAMI",
            Command::Help => "HELP",
            Command::Quit => "QUIT",
            Command::Malformed(_) => "MALFORMED",
            Command::Unknown(_) => "UNKNOWN",
        }
    }
}

// Secrets must not leak into logs through `{:?}`.
impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Signup(user, _) => write!(f, "Signup({:?}, <redacted>)", user),
            Command::Login(user, _) => write!(f, "Login({:?}, <redacted>)", user),
            Command::Malformed(usage) => write!(f, "Malformed({:?})", usage),
            Command::Unknown(raw) => write!(f, "Unknown({:?})", raw),
            other => f.write_str(other.name()),
        }
    }
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

const SIGNUP_USAGE: &str = "SIGNUP <username> <password>";
const LOGIN_USAGE: &str = "LOGIN <username> <password>";

/// Splits `<username> <secret...>`; the secret is the rest of the line.
fn split_credentials(arg: &str) -> Option<(String, String)> {
    let mut parts = arg.splitn(2, char::is_whitespace);
    let username = parts.next().unwrap_or("");
    let secret = parts.next().unwrap_or("").trim_start();

    if username.is_empty() || secret.is_empty() {
        return None;
    }
    Some((username.to_string(), secret.to_string()))
}

/// Parse a raw input line into a Command
///
/// Only the line terminator is stripped from the end, so a secret keeps any
/// trailing whitespace it was typed with.
pub fn parse_command(raw: &str) -> Command {
    let line = raw.trim_start().trim_end_matches(['\r', '\n']);
    let mut parts = line.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim_start();

    match cmd.as_str() {
        "SIGNUP" => match split_credentials(arg) {
            Some((user, secret)) => Command::Signup(user, secret),
            None => Command::Malformed(SIGNUP_USAGE),
        },
        "LOGIN" => match split_credentials(arg) {
            Some((user, secret)) => Command::Login(user, secret),
            None => Command::Malformed(LOGIN_USAGE),
        },
        "LOGOUT" => Command::Logout,
        "WHOAMI" => Command::Whoami,
        "HELP" | "?" => Command::Help,
        "QUIT" | "Q" => Command::Quit,
        _ => Command::Unknown(line.trim_end().to_string()),
    }
}
