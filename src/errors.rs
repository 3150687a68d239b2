//! Unified application error type.
//! Every layer (api, core, export, cli) returns AppError so commands can
//! report failures the same way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Transport / API
    // ---------------------------
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    // ---------------------------
    // Session
    // ---------------------------
    #[error("Not logged in. Run `checkdesk login` first")]
    NotLoggedIn,

    #[error("Session expired. Please log in again")]
    SessionExpired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("This action requires a superadmin account")]
    Forbidden,

    // ---------------------------
    // Domain
    // ---------------------------
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Membership cards
    // ---------------------------
    #[error("Card rendering error: {0}")]
    Card(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ---------------------------
    // Config
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// HTTP status carried by an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
