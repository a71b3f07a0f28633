//! Environment/runtime helpers
//!
//! Sanity checks to ensure the backing data file has somewhere to live at startup.

use std::path::Path;

use tracing::warn;

/// Ensure the parent directory of `data_file` exists; warn if the file itself is missing.
pub async fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if tokio::fs::metadata(data_file).await.is_err() {
        warn!(path = %data_file.display(), "data file not found; collection will start empty");
    }
    Ok(())
}
