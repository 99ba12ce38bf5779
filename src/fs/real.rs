use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::task;

use crate::models::{EntryKind, FsEntry};

use super::FileSystem;

pub struct RealFileSystem;

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
        let dir = dir.to_path_buf();
        task::spawn_blocking(move || {
            let mut entries = Vec::new();
            for entry in std::fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                // Follows symlinks, so a linked directory is walked.
                let kind = if std::fs::metadata(&path)?.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                };

                entries.push(FsEntry {
                    path,
                    name: entry.file_name().to_string_lossy().into_owned(),
                    kind,
                });
            }
            Ok(entries)
        })
        .await?
    }

    async fn read_to_string(&self, file: &Path) -> io::Result<String> {
        let bytes = tokio::fs::read(file).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
