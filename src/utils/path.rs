//! Path utilities: expand `~` and derive file names for downloads.

use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Collapse every whitespace run into a single `_`.
pub fn underscore_spaces(name: &str) -> String {
    static WS: OnceLock<Regex> = OnceLock::new();
    let re = WS.get_or_init(|| Regex::new(r"\s+").expect("static regex"));
    re.replace_all(name.trim(), "_").into_owned()
}

/// File name of a member's card image: `Jordan_Smith_card.png`.
pub fn card_file_name(full_name: &str) -> String {
    format!("{}_card.png", underscore_spaces(full_name))
}
