//! Command handlers and the console read loop.

use log::{error, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::commands::{Command, CommandResult, CommandStatus, parse_command};
use super::responses::{self, format_response};
use crate::auth::AuthGateway;
use crate::error::AuthError;
use crate::error::handlers::error_to_reply_code;
use crate::storage::KeyValueStorage;

const HELP_TEXT: &str = "Commands: SIGNUP <username> <password>, LOGIN <username> <password>, LOGOUT, WHOAMI, HELP, QUIT";

fn success(code: u16, message: &str) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(format_response(code, message)),
    }
}

fn failure(err: &AuthError) -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure(err.to_string()),
        message: Some(format_response(error_to_reply_code(err), &err.to_string())),
    }
}

/// Dispatches a parsed command to the gateway.
pub fn handle_command<S: KeyValueStorage>(
    gateway: &AuthGateway<S>,
    command: &Command,
) -> CommandResult {
    match command {
        Command::Signup(username, secret) => match gateway.signup(username, secret) {
            Ok(()) => success(
                responses::ACCOUNT_CREATED,
                "Account created, you can now log in",
            ),
            Err(e) => failure(&e),
        },
        Command::Login(username, secret) => match gateway.login(username, secret) {
            Ok(identity) => success(
                responses::LOGIN_SUCCESS,
                &format!("Logged in as {}", identity),
            ),
            Err(e) => failure(&e),
        },
        Command::Logout => {
            gateway.logout();
            success(responses::CLOSING, "Logged out")
        }
        Command::Whoami => match gateway.require_user() {
            Ok(identity) => success(responses::STATUS, &identity.username),
            Err(e) => failure(&e),
        },
        Command::Help => success(responses::HELP, HELP_TEXT),
        Command::Quit => CommandResult {
            status: CommandStatus::CloseConnection,
            message: Some(format_response(responses::CLOSING, "Goodbye")),
        },
        Command::Malformed(usage) => CommandResult {
            status: CommandStatus::Failure("Malformed command".into()),
            message: Some(format_response(
                responses::INVALID_ARGUMENT,
                &format!("Usage: {}", usage),
            )),
        },
        Command::Unknown(_) => CommandResult {
            status: CommandStatus::Failure("Unknown command".into()),
            message: Some(format_response(responses::SYNTAX_ERROR, "Unknown command")),
        },
    }
}

/// Reads commands line by line until QUIT or end of input.
///
/// - Rejects lines longer than the configured command length.
/// - Writes one reply per line.
pub async fn run_shell<S, R, W>(
    gateway: &AuthGateway<S>,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    S: KeyValueStorage,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let max_command_length = gateway.config().max_command_length;

    let greeting = match gateway.current_user() {
        Some(identity) => format!("nexus-auth ready (logged in as {})", identity),
        None => "nexus-auth ready".to_string(),
    };
    writer
        .write_all(format_response(responses::READY, &greeting).as_bytes())
        .await?;
    writer.flush().await?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                info!("Input closed");
                break;
            }
            Ok(_) => {
                if buf.len() > max_command_length {
                    let reply = format_response(responses::SYNTAX_ERROR, "Command too long");
                    writer.write_all(reply.as_bytes()).await?;
                    writer.flush().await?;
                    continue;
                }

                let line = match std::str::from_utf8(&buf) {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Rejected non UTF-8 input: {}", e);
                        let reply = format_response(responses::SYNTAX_ERROR, "Invalid UTF-8");
                        writer.write_all(reply.as_bytes()).await?;
                        writer.flush().await?;
                        continue;
                    }
                };

                let trimmed = line.trim_end_matches(['\r', '\n']);
                if trimmed.trim().is_empty() {
                    continue;
                }

                let command = parse_command(trimmed);
                info!("Received command: {}", command.name());

                let result = handle_command(gateway, &command);
                if let CommandStatus::Failure(reason) = &result.status {
                    warn!("{} rejected: {}", command.name(), reason);
                }
                if let Some(msg) = &result.message {
                    writer.write_all(msg.as_bytes()).await?;
                    writer.flush().await?;
                }

                if result.status == CommandStatus::CloseConnection {
                    info!("Shell closed by QUIT");
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read command: {}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}
