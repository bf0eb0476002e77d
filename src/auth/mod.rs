//! Authentication system
//!
//! Credential storage, session management, and the gateway that composes them.

pub mod credentials;
pub mod gateway;
pub mod results;
pub mod session;
pub mod validator;

pub use credentials::{CredentialRecord, CredentialStore};
pub use gateway::AuthGateway;
pub use results::Identity;
pub use session::{Session, SessionManager, SessionState};
pub use validator::validate_signup;
