//! nexus-auth
//!
//! A local credential and session store over durable key-value storage, with
//! a console front-end.

pub mod auth;
pub mod config;
pub mod error;
pub mod shell;
pub mod storage;
pub mod utils;

pub use auth::{AuthGateway, Identity};
pub use config::AuthConfig;
pub use error::{AuthError, CredentialError, StorageError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
