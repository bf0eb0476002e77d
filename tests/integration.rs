use std::fs;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

use nexus_auth::auth::{CredentialRecord, CredentialStore, SessionState};
use nexus_auth::{AuthConfig, AuthError, AuthGateway, FileStorage, Identity};

// Helper to open a gateway over a storage directory
fn open_gateway(dir: &TempDir) -> AuthGateway<FileStorage> {
    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    AuthGateway::new(storage, AuthConfig::default())
}

#[test]
fn test_signup_login_logout_scenario() {
    let dir = TempDir::new().unwrap();
    let gateway = open_gateway(&dir);

    gateway.signup("alice", "pw1").unwrap();
    assert!(matches!(
        gateway.signup("alice", "pw2"),
        Err(AuthError::DuplicateUsername(_))
    ));

    let identity = gateway.login("alice", "pw1").unwrap();
    assert_eq!(identity, Identity::new("alice"));
    assert_eq!(gateway.current_user(), Some(Identity::new("alice")));

    assert!(matches!(
        gateway.login("alice", "pw2"),
        Err(AuthError::InvalidCredentials)
    ));

    gateway.logout();
    assert_eq!(gateway.current_user(), None);
}

#[test]
fn test_accounts_and_session_survive_restart() {
    let dir = TempDir::new().unwrap();

    {
        let gateway = open_gateway(&dir);
        gateway.signup("alice", "pw1").unwrap();
        gateway.signup("bob", "pw2").unwrap();
        gateway.login("bob", "pw2").unwrap();
    }

    let gateway = open_gateway(&dir);
    assert_eq!(
        gateway.state(),
        SessionState::Authenticated("bob".to_string())
    );
    assert_eq!(gateway.credentials().usernames(), vec!["alice", "bob"]);
    assert!(gateway.login("alice", "pw1").is_ok());
    assert_eq!(gateway.current_user(), Some(Identity::new("alice")));
}

#[test]
fn test_storage_layout_matches_keys() {
    let dir = TempDir::new().unwrap();
    let gateway = open_gateway(&dir);

    gateway.signup("alice", "pw1").unwrap();
    gateway.login("alice", "pw1").unwrap();

    let users = fs::read_to_string(dir.path().join("users.json")).unwrap();
    let session = fs::read_to_string(dir.path().join("user.json")).unwrap();
    assert_eq!(users, r#"[{"username":"alice","password":"pw1"}]"#);
    assert_eq!(session, r#"{"username":"alice"}"#);

    gateway.logout();
    assert!(!dir.path().join("user.json").exists());
    assert!(dir.path().join("users.json").exists());
}

#[test]
fn test_reads_records_written_by_browser_client() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("users.json"),
        r#"[{"username":"carol","password":"c-pass"}]"#,
    )
    .unwrap();
    fs::write(dir.path().join("user.json"), r#"{"username":"carol"}"#).unwrap();

    let gateway = open_gateway(&dir);
    assert_eq!(gateway.current_user(), Some(Identity::new("carol")));
    assert!(gateway.login("carol", "c-pass").is_ok());
}

#[test]
fn test_corrupt_users_file_is_recovered() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("users.json"), "this is not json").unwrap();

    let gateway = open_gateway(&dir);
    assert!(gateway.credentials().load().is_empty());
    assert!(matches!(
        gateway.login("alice", "pw1"),
        Err(AuthError::InvalidCredentials)
    ));

    gateway.signup("alice", "pw1").unwrap();
    assert!(gateway.login("alice", "pw1").is_ok());
}

#[test]
fn test_corrupt_session_file_reads_as_anonymous() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("user.json"), "{\"user").unwrap();

    let gateway = open_gateway(&dir);
    assert_eq!(gateway.current_user(), None);
    assert!(matches!(gateway.require_user(), Err(AuthError::NotLoggedIn)));
}

#[test]
fn test_separate_directories_are_isolated_partitions() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let a = open_gateway(&first);
    let b = open_gateway(&second);

    a.signup("alice", "pw").unwrap();
    a.login("alice", "pw").unwrap();

    assert_eq!(b.current_user(), None);
    assert!(b.login("alice", "pw").is_err());
    b.signup("alice", "other").unwrap();
}

#[test]
fn test_concurrent_signups_keep_usernames_unique() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let config = AuthConfig {
        max_retries: 64,
        ..AuthConfig::default()
    };
    let gateway = Arc::new(AuthGateway::new(Arc::clone(&storage), config));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let gateway = Arc::clone(&gateway);
            thread::spawn(move || {
                let unique = gateway.signup(&format!("user{i}"), "pw").is_ok();
                let shared = gateway.signup("shared", &format!("pw{i}")).is_ok();
                (unique, shared)
            })
        })
        .collect();

    let results: Vec<(bool, bool)> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(results.iter().all(|(unique, _)| *unique));
    assert_eq!(results.iter().filter(|(_, shared)| *shared).count(), 1);
    assert_eq!(gateway.credentials().len(), 9);
}

#[test]
fn test_insert_rechecks_latest_persisted_state() {
    let dir = TempDir::new().unwrap();
    let gateway = open_gateway(&dir);
    gateway.signup("alice", "pw").unwrap();

    // A second handle on the same directory, as another tab would be
    let other = Arc::new(FileStorage::open(dir.path()).unwrap());
    let other_store = CredentialStore::new(other, &AuthConfig::default());
    other_store
        .save(&[
            CredentialRecord::new("alice", "pw"),
            CredentialRecord::new("bob", "from-other-writer"),
        ])
        .unwrap();

    assert!(matches!(
        gateway.signup("bob", "mine"),
        Err(AuthError::DuplicateUsername(_))
    ));
    assert!(gateway.login("bob", "from-other-writer").is_ok());
    assert_eq!(gateway.credentials().len(), 2);
}
