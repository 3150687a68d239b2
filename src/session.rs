//! Session store: the access token handed out by the server plus the
//! identity decoded from it.
//!
//! The token is persisted as a single opaque string under a fixed key
//! (one file in the config directory). A stored token whose expiry has
//! passed, or that cannot be decoded, counts as logged out and is removed.

use crate::errors::{AppError, AppResult};
use crate::models::Admin;
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub subject: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

/// Outcome of reading the store.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Absent,
    Expired,
    Active(Session),
}

fn claim_str(claims: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| claims.get(*k))
        .find_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

impl Session {
    /// Decode the token payload. The signature is not checked here: the
    /// server verifies it on every request, the client only needs the
    /// identity and the expiry.
    pub fn from_token(token: &str) -> AppResult<Self> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Map<String, Value>>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| AppError::InvalidToken(e.to_string()))?;
        let claims = data.claims;

        let exp = claims
            .get("exp")
            .and_then(Value::as_f64)
            .ok_or_else(|| AppError::InvalidToken("missing exp claim".to_string()))?;
        let expires_at = DateTime::<Utc>::from_timestamp(exp as i64, 0)
            .ok_or_else(|| AppError::InvalidToken(format!("exp out of range: {exp}")))?;

        Ok(Self {
            token: token.to_string(),
            identity: Identity {
                subject: claim_str(&claims, &["id", "_id", "sub"]),
                display_name: claim_str(&claims, &["fullName", "name"]),
                email: claim_str(&claims, &["email"]),
                role: claim_str(&claims, &["role"]),
                expires_at,
            },
        })
    }

    /// Token plus the admin record returned by the login call; the record
    /// fills in whatever the token does not carry.
    pub fn from_login(token: &str, admin: Option<&Admin>) -> AppResult<Self> {
        let mut session = Self::from_token(token)?;
        if let Some(admin) = admin {
            let id = &mut session.identity;
            if id.subject.is_empty() {
                id.subject = admin.id.clone();
            }
            if id.display_name.is_empty() {
                id.display_name = admin.full_name.clone();
            }
            if id.email.is_empty() {
                id.email = admin.email.clone();
            }
            if id.role.is_empty() {
                id.role = admin.role.clone();
            }
        }
        Ok(session)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.identity.expires_at <= now
    }

    pub fn is_superadmin(&self) -> bool {
        self.identity.role == "superadmin"
    }
}

/// File-backed token storage.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> AppResult<SessionState> {
        self.load_at(Utc::now())
    }

    /// Read the stored token and judge it against `now`.
    pub fn load_at(&self, now: DateTime<Utc>) -> AppResult<SessionState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SessionState::Absent),
            Err(e) => return Err(e.into()),
        };
        let token = raw.trim();
        if token.is_empty() {
            return Ok(SessionState::Absent);
        }

        let session = match Session::from_token(token) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "discarding undecodable session token");
                self.clear()?;
                return Ok(SessionState::Absent);
            }
        };

        if session.is_expired_at(now) {
            debug!(expired_at = %session.identity.expires_at, "stored session expired");
            self.clear()?;
            return Ok(SessionState::Expired);
        }

        Ok(SessionState::Active(session))
    }

    /// Active session or the reason there is none.
    pub fn require(&self) -> AppResult<Session> {
        match self.load()? {
            SessionState::Active(s) => Ok(s),
            SessionState::Expired => Err(AppError::SessionExpired),
            SessionState::Absent => Err(AppError::NotLoggedIn),
        }
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &session.token)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %self.path.display(), "session token stored");
        Ok(())
    }

    /// Remove the stored token. Returns whether one existed.
    pub fn clear(&self) -> AppResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
