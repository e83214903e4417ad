// Client-side "save as" for exported files
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GridError;

pub trait DownloadSink: Send + Sync {
    /// Writes `contents` under `file_name` and returns where it landed.
    fn save(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, GridError>;
}

/// Saves into a fixed directory, or the platform download directory when none is configured.
/// Existing files are never overwritten; a " (n)" suffix is added instead.
#[derive(Debug, Clone, Default)]
pub struct DirectoryDownloads {
    directory: Option<PathBuf>,
}

impl DirectoryDownloads {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    fn target_dir(&self) -> Result<PathBuf, GridError> {
        self.directory.clone().or_else(dirs::download_dir).ok_or(GridError::NoDownloadDir)
    }
}

fn available_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{}", ext)),
        None => (file_name, String::new()),
    };
    (1..)
        .map(|n| dir.join(format!("{} ({}){}", stem, n, ext)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

impl DownloadSink for DirectoryDownloads {
    fn save(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, GridError> {
        let dir = self.target_dir()?;
        fs::create_dir_all(&dir)?;
        let path = available_path(&dir, file_name);
        fs::write(&path, contents)?;
        tracing::info!(path = %path.display(), bytes = contents.len(), "Saved download");
        Ok(path)
    }
}
