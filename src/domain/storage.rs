use crate::domain::models::ImageData;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteStore: Send + Sync {
    // Markdown source of a note
    async fn read_note(&self, path: &Path) -> Result<String>;

    async fn write_note(&self, path: &Path, contents: &str) -> Result<()>;

    // Raw bytes of a dropped, pasted or picked image
    async fn read_image(&self, path: &Path) -> Result<ImageData>;
}
