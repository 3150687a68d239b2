//! Pass-through of server-produced files (CSV/PDF exports).

use crate::errors::{AppError, AppResult};
use crate::export::{notify_export_success, write_output};
use std::path::Path;
use tracing::info;

/// Save a downloaded blob unchanged. An empty body is refused rather than
/// leaving an empty file behind.
pub fn save_download(label: &str, bytes: &[u8], path: &Path, force: bool) -> AppResult<()> {
    if bytes.is_empty() {
        return Err(AppError::Export(format!("{label} export returned no data")));
    }

    write_output(path, bytes, force)?;
    info!(path = %path.display(), bytes = bytes.len(), "download saved");
    notify_export_success(label, path);
    Ok(())
}
