//! Auth gateway
//!
//! The public signup / login / logout / current-user surface. Composes the
//! credential store and the session manager over one shared storage handle.

use log::{info, warn};
use std::sync::Arc;

use super::credentials::{CredentialRecord, CredentialStore};
use super::results::Identity;
use super::session::{SessionManager, SessionState};
use super::validator::validate_signup;
use crate::config::AuthConfig;
use crate::error::handlers::handle_error;
use crate::error::AuthError;
use crate::storage::KeyValueStorage;

pub struct AuthGateway<S> {
    credentials: CredentialStore<S>,
    sessions: SessionManager<S>,
    config: AuthConfig,
}

impl<S: KeyValueStorage> AuthGateway<S> {
    pub fn new(storage: Arc<S>, config: AuthConfig) -> Self {
        Self {
            credentials: CredentialStore::new(Arc::clone(&storage), &config),
            sessions: SessionManager::new(storage, &config),
            config,
        }
    }

    /// Creates an account. Does not log the new user in.
    pub fn signup(&self, username: &str, secret: &str) -> Result<(), AuthError> {
        validate_signup(username, secret, &self.config).inspect_err(handle_error)?;

        self.credentials
            .insert(CredentialRecord::new(username, secret))
            .map_err(AuthError::from)
            .inspect_err(handle_error)?;

        info!("Account created for {}", username);
        Ok(())
    }

    /// Starts a session for the account matching both fields exactly.
    ///
    /// Unknown usernames and wrong secrets are reported identically.
    pub fn login(&self, username: &str, secret: &str) -> Result<Identity, AuthError> {
        let Some(record) = self.credentials.verify(username, secret) else {
            warn!("Failed login attempt for {}", username);
            return Err(AuthError::InvalidCredentials);
        };

        let session = self
            .sessions
            .start_session(record.username())
            .map_err(AuthError::from)
            .inspect_err(handle_error)?;

        info!("User {} logged in", session.username);
        Ok(Identity::from(session))
    }

    /// Ends the active session, if any. Always succeeds from the caller's view.
    pub fn logout(&self) {
        if let Err(e) = self.sessions.end_session() {
            handle_error(&AuthError::from(e));
            return;
        }
        info!("Logged out");
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.sessions.current_session().map(Identity::from)
    }

    /// Like `current_user`, but anonymous callers get `NotLoggedIn`.
    pub fn require_user(&self) -> Result<Identity, AuthError> {
        self.current_user().ok_or(AuthError::NotLoggedIn)
    }

    pub fn state(&self) -> SessionState {
        self.sessions.state()
    }

    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.credentials
    }

    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn gateway() -> (Arc<MemoryStorage>, AuthGateway<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let gateway = AuthGateway::new(Arc::clone(&storage), AuthConfig::default());
        (storage, gateway)
    }

    #[test]
    fn test_signup_does_not_start_session() {
        let (_, gateway) = gateway();
        gateway.signup("alice", "pw1").unwrap();
        assert_eq!(gateway.current_user(), None);
    }

    #[test]
    fn test_signup_validation() {
        let (_, gateway) = gateway();
        assert!(matches!(
            gateway.signup("  ", "pw"),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            gateway.signup("alice", ""),
            Err(AuthError::Validation(_))
        ));
        assert!(gateway.credentials().is_empty());
    }

    #[test]
    fn test_signup_duplicate() {
        let (_, gateway) = gateway();
        gateway.signup("alice", "pw1").unwrap();
        assert!(matches!(
            gateway.signup("alice", "pw2"),
            Err(AuthError::DuplicateUsername(u)) if u == "alice"
        ));
    }

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let (_, gateway) = gateway();
        gateway.signup("alice", "pw1").unwrap();

        let unknown = gateway.login("mallory", "pw1").unwrap_err();
        let wrong = gateway.login("alice", "pw2").unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(gateway.current_user(), None);
    }

    #[test]
    fn test_login_is_exact_match() {
        let (_, gateway) = gateway();
        gateway.signup("alice", "pw1").unwrap();

        assert!(gateway.login("Alice", "pw1").is_err());
        assert!(gateway.login("alice ", "pw1").is_err());
        assert!(gateway.login("alice", "PW1").is_err());
        assert_eq!(gateway.login("alice", "pw1").unwrap(), Identity::new("alice"));
    }

    #[test]
    fn test_login_overwrites_session() {
        let (_, gateway) = gateway();
        gateway.signup("alice", "a").unwrap();
        gateway.signup("bob", "b").unwrap();

        gateway.login("alice", "a").unwrap();
        gateway.login("bob", "b").unwrap();
        assert_eq!(gateway.current_user(), Some(Identity::new("bob")));
    }

    #[test]
    fn test_logout_twice() {
        let (_, gateway) = gateway();
        gateway.signup("alice", "a").unwrap();
        gateway.login("alice", "a").unwrap();

        gateway.logout();
        assert_eq!(gateway.current_user(), None);
        gateway.logout();
        assert_eq!(gateway.current_user(), None);
        assert_eq!(gateway.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_require_user() {
        let (_, gateway) = gateway();
        assert!(matches!(gateway.require_user(), Err(AuthError::NotLoggedIn)));

        gateway.signup("alice", "a").unwrap();
        gateway.login("alice", "a").unwrap();
        assert_eq!(gateway.require_user().unwrap().username, "alice");
    }

    #[test]
    fn test_session_outlives_missing_record() {
        let (storage, gateway) = gateway();
        gateway.signup("alice", "a").unwrap();
        gateway.login("alice", "a").unwrap();

        storage.remove("users").unwrap();
        assert_eq!(gateway.current_user(), Some(Identity::new("alice")));
    }
}
