//! Error handling
//!
//! Defines error types and their mapping to console replies.

pub mod handlers;
pub mod types;

pub use types::*;
