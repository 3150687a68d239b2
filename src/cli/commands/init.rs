use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates the config directory and writes a default config file. The
/// session token lives in the same directory once you log in.
pub fn handle(force: bool) -> AppResult<()> {
    let existed = Config::config_file().exists();
    let path = Config::init_all(force)?;

    info("Initializing checkdesk…");
    println!("  Config file : {}", path.display());
    println!("  Session     : {}", Config::session_file().display());

    if existed && !force {
        info("Configuration file already exists, left untouched (use --force to reset)");
    } else {
        success(format!("Configuration written to {}", path.display()));
    }
    Ok(())
}
