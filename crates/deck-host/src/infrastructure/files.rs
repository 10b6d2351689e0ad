//! The downloads directory: where uploads land and what `open_folder` opens.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::application::actuate::ActuationError;
use crate::application::dispatch::FolderOpener;

/// The service's downloads directory on disk.
#[derive(Clone)]
pub struct DownloadsDir {
    path: PathBuf,
}

impl DownloadsDir {
    /// Ensures the directory exists and returns a handle to it.
    pub fn ensure(path: PathBuf) -> std::io::Result<Self> {
        std::fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a new file in the directory for incremental writing, so large
    /// uploads can stream to disk chunk by chunk.
    ///
    /// The client-supplied name is reduced to its final component, so a name
    /// carrying path separators cannot escape the directory.
    pub async fn create(&self, file_name: &str) -> std::io::Result<(PathBuf, tokio::fs::File)> {
        let name = sanitize_file_name(file_name)?;
        let target = self.path.join(name);
        let file = tokio::fs::File::create(&target).await?;
        Ok((target, file))
    }

    /// Writes one in-memory payload into the directory.
    pub async fn save(&self, file_name: &str, contents: &[u8]) -> std::io::Result<PathBuf> {
        let (target, mut file) = self.create(file_name).await?;
        file.write_all(contents).await?;
        file.flush().await?;
        info!(path = %target.display(), bytes = contents.len(), "file saved");
        Ok(target)
    }
}

impl FolderOpener for DownloadsDir {
    /// Opens the directory in the platform file manager, without waiting for
    /// the viewer process.
    fn open_downloads(&self) -> Result<(), ActuationError> {
        #[cfg(target_os = "windows")]
        let program = "explorer";
        #[cfg(target_os = "macos")]
        let program = "open";
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        let program = "xdg-open";

        std::process::Command::new(program)
            .arg(&self.path)
            .spawn()
            .map_err(|e| ActuationError::Platform(e.to_string()))?;
        Ok(())
    }
}

/// Strips any directory components from a client-supplied file name.
fn sanitize_file_name(file_name: &str) -> std::io::Result<&str> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    if name.is_empty() || name == "." || name == ".." {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid file name: {file_name:?}"),
        ));
    }
    Ok(name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
