//! One handler per screen of the admin console.

pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod config;
pub mod init;
pub mod members;
pub mod overview;
pub mod reports;
pub mod scan;
pub mod settings;

use crate::errors::{AppError, AppResult};
use std::io::{self, BufRead, Write};

/// Read one line from stdin after printing `label`.
pub(crate) fn prompt(label: &str) -> AppResult<String> {
    print!("{label}: ");
    io::stdout().flush().ok();

    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        return Err(AppError::Validation(format!("{label} is required")));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Use the value given on the command line, otherwise ask for it.
pub(crate) fn value_or_prompt(value: &Option<String>, label: &str) -> AppResult<String> {
    match value {
        Some(v) => Ok(v.clone()),
        None => prompt(label),
    }
}

/// `[y/N]` question; anything but yes is a no.
pub(crate) fn confirm(question: &str) -> AppResult<bool> {
    let answer = prompt(&format!("{question} [y/N]"))?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
