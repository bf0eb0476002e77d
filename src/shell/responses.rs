//! Console reply codes and formatting

pub const READY: u16 = 220;
pub const ACCOUNT_CREATED: u16 = 201;
pub const STATUS: u16 = 211;
pub const HELP: u16 = 214;
pub const CLOSING: u16 = 221;
pub const LOGIN_SUCCESS: u16 = 230;
pub const STORAGE_UNAVAILABLE: u16 = 451;
pub const SYNTAX_ERROR: u16 = 500;
pub const INVALID_ARGUMENT: u16 = 501;
pub const NOT_LOGGED_IN: u16 = 530;
pub const ACTION_NOT_TAKEN: u16 = 550;

/// Format a reply line
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\n", code, message)
}
