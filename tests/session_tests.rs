use chrono::{Duration, Utc};
use checkdesk::errors::AppError;
use checkdesk::models::Admin;
use checkdesk::session::{Session, SessionState, SessionStore};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

mod common;
use common::make_token;

fn sign(claims: &Value) -> String {
    encode(&Header::default(), claims, &EncodingKey::from_secret(b"k")).unwrap()
}

#[test]
fn test_identity_is_decoded_from_token() {
    let session = Session::from_token(&make_token("superadmin", Duration::hours(1))).unwrap();

    assert_eq!(session.identity.subject, "A1");
    assert_eq!(session.identity.display_name, "Ada Admin");
    assert_eq!(session.identity.email, "ada@example.com");
    assert!(session.is_superadmin());
    assert!(!session.is_expired_at(Utc::now()));
}

#[test]
fn test_token_without_expiry_is_rejected() {
    let token = sign(&json!({ "id": "A1", "role": "admin" }));
    assert!(matches!(
        Session::from_token(&token),
        Err(AppError::InvalidToken(_))
    ));
}

#[test]
fn test_login_record_fills_missing_claims() {
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    let token = sign(&json!({ "id": "A9", "exp": exp }));
    let admin = Admin {
        id: "A9".to_string(),
        full_name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        role: "admin".to_string(),
    };

    let session = Session::from_login(&token, Some(&admin)).unwrap();
    assert_eq!(session.identity.display_name, "Grace Hopper");
    assert_eq!(session.identity.role, "admin");
    assert!(!session.is_superadmin());
}

#[test]
fn test_store_round_trip_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("eraToken"));
    assert_eq!(store.load().unwrap(), SessionState::Absent);

    let session = Session::from_token(&make_token("admin", Duration::hours(1))).unwrap();
    store.save(&session).unwrap();

    match store.load().unwrap() {
        SessionState::Active(s) => assert_eq!(s, session),
        other => panic!("expected active session, got {other:?}"),
    }
    assert_eq!(store.require().unwrap().token, session.token);

    assert!(store.clear().unwrap());
    assert!(!store.clear().unwrap());
    assert!(matches!(store.require(), Err(AppError::NotLoggedIn)));
}

#[test]
fn test_store_expires_tokens_at_load_time() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("eraToken"));
    let session = Session::from_token(&make_token("admin", Duration::minutes(30))).unwrap();
    store.save(&session).unwrap();

    let later = Utc::now() + Duration::hours(1);
    assert_eq!(store.load_at(later).unwrap(), SessionState::Expired);
    assert!(!store.path().exists());
}

#[cfg(unix)]
#[test]
fn test_token_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("eraToken"));
    let session = Session::from_token(&make_token("admin", Duration::hours(1))).unwrap();
    store.save(&session).unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
