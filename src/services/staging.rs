use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncWriteExt};
use uuid::Uuid;

use crate::api::error::AppError;

/// Scoped, request-lifetime storage for uploads and resize output.
///
/// Every request owns at most one staged input and one output artifact,
/// both placed under generated UUID names so concurrent requests never
/// collide without any locking.
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    /// Open the staging directory, creating it if absent.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stream an upload to disk under a fresh generated name.
    ///
    /// The returned guard owns both the staged input and the derived
    /// output path; dropping it removes whichever of the two exist, so a
    /// failure after this point never leaks files.
    pub async fn stage<R>(&self, mut reader: R) -> Result<StagedUpload, AppError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let name = Uuid::new_v4().to_string();
        let input_path = self.dir.join(&name);
        let output_path = self.dir.join(format!("resized_{}.jpg", name));

        tracing::info!("Staging upload to {}", input_path.display());

        let mut file = tokio::fs::File::create(&input_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create staged file: {}", e)))?;

        // Guard first, so a failed copy still removes the partial file.
        let staged = StagedUpload {
            input_path,
            output_path,
        };

        let bytes = tokio::io::copy(&mut reader, &mut file)
            .await
            .map_err(stage_error)?;
        file.flush()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to flush staged file: {}", e)))?;

        tracing::info!("Staged {} bytes as {}", bytes, name);
        Ok(staged)
    }
}

fn stage_error(e: std::io::Error) -> AppError {
    let msg = e.to_string();
    if msg.contains("length limit exceeded") {
        AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
    } else {
        AppError::Internal(format!("Failed to stage upload: {}", msg))
    }
}

/// Guard for the two files a request may leave behind.
pub struct StagedUpload {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl StagedUpload {
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Where the resized artifact goes: `resized_<name>.jpg` next to the input.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        // Each removal is attempted independently; failures are logged and
        // never alter the response already on the wire.
        for path in [&self.input_path, &self.output_path] {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
            }
        }
    }
}
