use crate::Result;

use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

async fn atomic_write(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let tmp_path = path.with_extension("tmp");

    fs::write(&tmp_path, data).await?;
    fs::rename(&tmp_path, path).await?;

    Ok(())
}

/// Writes the error CSV of a failed batch to disk.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    output_dir: PathBuf,
}

impl ErrorReporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<source stem>_ERROR_<batch>.csv`, unique per batch.
    pub fn file_name(source: &Path, batch: &Uuid) -> String {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "import".to_string());
        format!("{stem}_ERROR_{batch}.csv")
    }

    /// Writes the server's error CSV byte for byte and returns the path of the new file.
    pub async fn write(&self, payload: &str, source: &Path, batch: &Uuid) -> Result<PathBuf> {
        let path = self.output_dir.join(Self::file_name(source, batch));
        atomic_write(&path, payload).await?;
        Ok(path)
    }
}
