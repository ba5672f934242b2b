use crate::domain::models::{image_mime, ImageData};
use crate::domain::storage::NoteStore;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use std::path::Path;

/// Images above this size are refused rather than inlined as a data URL.
pub(crate) const MAX_IMAGE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Notes and images straight off the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsNoteStore;

impl FsNoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NoteStore for FsNoteStore {
    async fn read_note(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read note at {}", path.display()))
    }

    async fn write_note(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write note to {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = contents.len(), "Note saved");
        Ok(())
    }

    async fn read_image(&self, path: &Path) -> Result<ImageData> {
        let mime = image_mime(path)
            .ok_or_else(|| anyhow!("Not a supported image type: {}", path.display()))?;

        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to read image at {}", path.display()))?;
        if metadata.len() > MAX_IMAGE_SIZE {
            bail!(
                "Image {} is too large to embed ({} bytes)",
                path.display(),
                metadata.len()
            );
        }

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image at {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(ImageData { name, mime, bytes })
    }
}
