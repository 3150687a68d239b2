use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Hosted backend used when neither the environment nor the config file
/// names one.
pub const DEFAULT_API_URL: &str = "https://checkin-api-as1t.onrender.com/api";

/// Environment variable overriding the API base URL for a deployment.
pub const API_URL_ENV: &str = "CHECKDESK_API_URL";

/// Environment variable relocating the whole config directory.
pub const HOME_ENV: &str = "CHECKDESK_HOME";

/// Fixed storage key of the session token.
pub const SESSION_KEY: &str = "eraToken";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_card_template")]
    pub card_template: String,
    #[serde(default = "default_font_bold")]
    pub card_font_bold: String,
    #[serde(default = "default_font_regular")]
    pub card_font_regular: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_card_template() -> String {
    Config::config_dir()
        .join("card_template.png")
        .to_string_lossy()
        .to_string()
}
fn default_font_bold() -> String {
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf".to_string()
}
fn default_font_regular() -> String {
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string()
}
fn default_output_dir() -> String {
    ".".to_string()
}
fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            card_template: default_card_template(),
            card_font_bold: default_font_bold(),
            card_font_regular: default_font_regular(),
            output_dir: default_output_dir(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    /// Configuration directory: `$CHECKDESK_HOME` if set, otherwise
    /// `~/.checkdesk` (`%APPDATA%\checkdesk` on Windows).
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(HOME_ENV)
            && !custom.trim().is_empty()
        {
            return expand_tilde(&custom);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("checkdesk")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".checkdesk")
        }
    }

    /// Full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("checkdesk.conf")
    }

    /// Where the session token lives
    pub fn session_file() -> PathBuf {
        Self::config_dir().join(SESSION_KEY)
    }

    /// Load the configuration file, or defaults when it does not exist.
    /// The API URL environment override is applied on top.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content).map_err(|e| {
                AppError::Config(format!("cannot parse {}: {e}", path.display()))
            })?
        } else {
            Config::default()
        };

        if let Ok(url) = env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            cfg.api_url = url;
        }

        Ok(cfg)
    }

    /// Base URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        expand_tilde(&self.output_dir).join(file_name)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config directory and write a default config file.
    /// An existing file is left untouched unless `overwrite` is set.
    pub fn init_all(overwrite: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let path = Self::config_file();
        if path.exists() && !overwrite {
            return Ok(path);
        }

        let yaml = Config::default().to_yaml()?;
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;

        Ok(path)
    }
}
