use std::path::Path;

use tracing::info;

use crate::error::WalkError;
use crate::models::Manifest;

/// Serialize `manifest` and write it to `destination` in one write,
/// replacing whatever was there. The parent directory is created if needed.
pub async fn write_manifest(manifest: &Manifest, destination: &Path) -> Result<(), WalkError> {
    let json = serde_json::to_string_pretty(manifest)?;

    let write_error = |source: std::io::Error| WalkError::WriteManifest {
        path: destination.to_path_buf(),
        source,
    };

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(destination, json).await.map_err(write_error)?;

    info!(
        path = %destination.display(),
        files = manifest.files.len(),
        ignored = manifest.ignored.len(),
        "manifest written"
    );
    Ok(())
}
