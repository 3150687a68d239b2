#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Nothing listens here; commands that reach the network fail fast.
pub const DEAD_API: &str = "http://127.0.0.1:9/api";

pub fn cdk() -> Command {
    cargo_bin_cmd!("checkdesk")
}

/// Throwaway config directory for one test.
pub struct TestHome {
    pub dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    /// Binary wired to this home, logging off, pointed at a dead backend.
    pub fn cmd(&self) -> Command {
        let mut cmd = cdk();
        cmd.env("CHECKDESK_HOME", self.dir.path())
            .env("CHECKDESK_API_URL", DEAD_API)
            .env_remove("CHECKDESK_LOG")
            .current_dir(self.dir.path());
        cmd
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.path().join("checkdesk.conf")
    }

    pub fn token_file(&self) -> PathBuf {
        self.dir.path().join("eraToken")
    }

    pub fn store_token(&self, token: &str) {
        fs::write(self.token_file(), token).expect("write token");
    }
}

/// HS256 token shaped like the backend's, expiring `valid_for` from now.
pub fn make_token(role: &str, valid_for: Duration) -> String {
    let claims = json!({
        "id": "A1",
        "fullName": "Ada Admin",
        "email": "ada@example.com",
        "role": role,
        "exp": (Utc::now() + valid_for).timestamp(),
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"not-the-server-secret"),
    )
    .expect("encode token")
}
